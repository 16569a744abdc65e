mod core;
pub mod backend;

pub use crate::core::{DisplayRecord, FailurePolicy, Operation, Response, SchedulerContract};
pub use crate::core::{contract, display, error, response};
