use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum ContractError {
    /// Occurs when a handler receives a different number of
    /// arguments than its function expects.
    #[error("Incorrect number of arguments. Expecting {expected}")]
    ArgumentCount { expected: usize },
    /// Occurs when the invoked function name is none of the
    /// contract's functions.
    #[error("Invalid Smart Contract function name.")]
    UnknownFunction(String),
    /// Only raised under the strict failure policy.
    #[error("storage error: {0}")]
    Storage(#[from] BackendError),
    /// Only raised under the strict failure policy.
    #[error("could not encode display record: {0}")]
    Encode(#[source] serde_json::Error),
    /// Only raised under the strict failure policy.
    #[error("could not decode display record at {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
