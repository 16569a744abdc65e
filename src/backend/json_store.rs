use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::backend::interface::{BackendError, LedgerStore, Result};

type Entries = BTreeMap<String, String>;

/// Ledger state kept in a single JSON object file, `{"<key>": "<value>", ...}`.
///
/// Values are stored as text, so only UTF-8 values are accepted. Every `put`
/// writes the whole map to a temporary file next to the store and renames it
/// over the old one; the in-memory map only changes once that succeeded.
pub struct JsonStore {
    path: PathBuf,
    entries: Entries
}

impl JsonStore {
    /// Loads the store at `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<JsonStore> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Entries::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Entries::new(),
            Err(source) => return Err(BackendError::Io { path, source })
        };
        info!("opened store {} with {} keys", path.display(), entries.len());
        return Ok(JsonStore { path, entries });
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn io_error(&self, source: std::io::Error) -> BackendError {
        BackendError::Io { path: self.path.clone(), source }
    }

    fn flush(&self, entries: &Entries) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new(".")
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(|err| self.io_error(err))?;
        staged.write_all(content.as_bytes()).map_err(|err| self.io_error(err))?;
        staged.as_file().sync_all().map_err(|err| self.io_error(err))?;
        staged.persist(&self.path).map_err(|err| self.io_error(err.error))?;

        debug!("flushed {} keys to {}", entries.len(), self.path.display());
        return Ok(());
    }
}

impl LedgerStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        return Ok(self.entries.get(key).map(|value| value.as_bytes().to_vec()));
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        let text = String::from_utf8(value)
            .map_err(|_| BackendError::NonUtf8Value(key.to_owned()))?;
        let mut updated = self.entries.clone();
        updated.insert(key.to_owned(), text);
        self.flush(&updated)?;
        self.entries = updated;
        return Ok(());
    }
}
