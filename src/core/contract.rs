use std::str::FromStr;

use log::{debug, warn};
use serde::{Serialize, Deserialize};

use crate::backend::LedgerStore;
use crate::core::display::DisplayRecord;
use crate::core::error::{ContractError, ContractResult};
use crate::core::response::Response;

/// What the contract does when the store, or the record codec, fails.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Failed reads look like a missing key, failed writes and encodes are
    /// dropped, undecodable records read as an empty record.
    #[default]
    Permissive,
    /// Every such failure is returned to the caller as an error response.
    Strict
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    QueryDisplay,
    CreateOrUpdateDisplay,
    UpdateScheduleHash
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::QueryDisplay => "queryDisplay",
            Self::CreateOrUpdateDisplay => "createOrUpdateDisplay",
            Self::UpdateScheduleHash => "updateScheduleHash"
        }
    }

    pub fn expected_args(&self) -> usize {
        match self {
            Self::QueryDisplay => 1,
            Self::CreateOrUpdateDisplay => 3,
            Self::UpdateScheduleHash => 2
        }
    }
}

impl FromStr for Operation {
    type Err = ContractError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "queryDisplay" => Ok(Self::QueryDisplay),
            "createOrUpdateDisplay" => Ok(Self::CreateOrUpdateDisplay),
            "updateScheduleHash" => Ok(Self::UpdateScheduleHash),
            other => Err(ContractError::UnknownFunction(other.to_owned()))
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The scheduler contract. Holds no ledger state of its own; the store is
/// handed in on every call and all concurrency control is left to it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchedulerContract {
    policy: FailurePolicy
}

impl SchedulerContract {
    pub fn new(policy: FailurePolicy) -> SchedulerContract {
        SchedulerContract { policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Activation hook. Touches nothing.
    pub fn init(&self) -> Response {
        Response::empty()
    }

    /// Single entry point: routes `function` to its handler.
    pub fn invoke<S>(&self, store: &mut S, function: &str, args: &[String]) -> Response
    where
        S: LedgerStore + ?Sized
    {
        let result = function.parse::<Operation>()
            .and_then(|operation| self.dispatch(store, operation, args));

        if let Err(err) = &result {
            debug!("{} rejected: {}", function, err);
        }
        return Response::from(result);
    }

    pub fn dispatch<S>(&self, store: &mut S, operation: Operation, args: &[String]) -> ContractResult<Vec<u8>>
    where
        S: LedgerStore + ?Sized
    {
        if args.len() != operation.expected_args() {
            return Err(ContractError::ArgumentCount { expected: operation.expected_args() });
        }
        debug!("{} {:?}", operation, args);

        match operation {
            Operation::QueryDisplay => self.query_display(store, &args[0]),
            Operation::CreateOrUpdateDisplay => self.create_or_update_display(store, &args[0], &args[1], &args[2]),
            Operation::UpdateScheduleHash => self.update_schedule_hash(store, &args[0], &args[1])
        }
    }

    fn query_display<S: LedgerStore + ?Sized>(&self, store: &S, key: &str) -> ContractResult<Vec<u8>> {
        Ok(self.read(store, key)?.unwrap_or_default())
    }

    fn create_or_update_display<S: LedgerStore + ?Sized>(&self, store: &mut S, key: &str, url: &str, hash: &str) -> ContractResult<Vec<u8>> {
        let record = DisplayRecord::new(url, hash);
        self.write(store, key, &record)?;
        return Ok(Vec::new());
    }

    fn update_schedule_hash<S: LedgerStore + ?Sized>(&self, store: &mut S, key: &str, hash: &str) -> ContractResult<Vec<u8>> {
        // An empty value counts as absent, in either policy.
        let mut record = match self.read(store, key)? {
            Some(bytes) if !bytes.is_empty() => self.decode(key, &bytes)?,
            _ => DisplayRecord::default()
        };
        record.schedule_hash = hash.to_owned();
        self.write(store, key, &record)?;
        return Ok(Vec::new());
    }

    fn read<S: LedgerStore + ?Sized>(&self, store: &S, key: &str) -> ContractResult<Option<Vec<u8>>> {
        match store.get(key) {
            Ok(bytes) => Ok(bytes),
            Err(err) if self.policy == FailurePolicy::Permissive => {
                warn!("ignoring failed read of {:?}: {}", key, err);
                Ok(None)
            },
            Err(err) => Err(err.into())
        }
    }

    fn decode(&self, key: &str, bytes: &[u8]) -> ContractResult<DisplayRecord> {
        match DisplayRecord::from_bytes(bytes) {
            Ok(record) => Ok(record),
            Err(err) if self.policy == FailurePolicy::Permissive => {
                warn!("record at {:?} did not decode, starting from empty: {}", key, err);
                Ok(DisplayRecord::default())
            },
            Err(source) => Err(ContractError::Decode { key: key.to_owned(), source })
        }
    }

    fn write<S: LedgerStore + ?Sized>(&self, store: &mut S, key: &str, record: &DisplayRecord) -> ContractResult<()> {
        let bytes = match record.to_bytes() {
            Ok(bytes) => bytes,
            Err(err) if self.policy == FailurePolicy::Permissive => {
                warn!("dropping write of {:?}, encode failed: {}", key, err);
                return Ok(());
            },
            Err(err) => return Err(ContractError::Encode(err))
        };

        match store.put(key, bytes) {
            Ok(()) => Ok(()),
            Err(err) if self.policy == FailurePolicy::Permissive => {
                warn!("ignoring failed write of {:?}: {}", key, err);
                Ok(())
            },
            Err(err) => Err(err.into())
        }
    }
}
