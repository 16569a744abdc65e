use std::collections::BTreeMap;

use crate::backend::interface::{LedgerStore, Result};

/// In-process store, used by tests and by hosts embedding the contract directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore { entries: BTreeMap::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LedgerStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        return Ok(self.entries.get(key).cloned());
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries.insert(key.to_owned(), value);
        return Ok(());
    }
}
