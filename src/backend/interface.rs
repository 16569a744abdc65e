use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backing file could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    /// The backing file exists but does not hold a valid key/value map.
    #[error("malformed store contents: {0}")]
    Format(#[from] serde_json::Error),
    /// A text-only backend was asked to store bytes that are not UTF-8.
    #[error("value for key {0:?} is not valid UTF-8")]
    NonUtf8Value(String)
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Key/value state owned by the ledger platform.
///
/// A missing key is `Ok(None)`, never an error. `put` creates or overwrites.
pub trait LedgerStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()>;
}
