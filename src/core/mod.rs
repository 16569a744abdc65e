pub mod display;
pub mod contract;
pub mod response;
pub mod error;

pub use display::DisplayRecord;
pub use contract::{FailurePolicy, Operation, SchedulerContract};
pub use response::Response;
pub use error::{ContractError, ContractResult};
