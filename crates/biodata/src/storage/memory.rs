//! In-memory record store.

use parking_lot::RwLock;

use super::RecordStore;
use crate::error::Result;
use crate::record::Record;

/// A [`RecordStore`] that keeps records in memory only.
///
/// Useful as a fake in tests and for throwaway servers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Vec<Record> {
        self.records.read().clone()
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        *self.records.write() = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        assert!(MemoryStore::new().load().is_empty());
    }

    #[test]
    fn test_save_replaces() {
        let store = MemoryStore::with_records(vec![Record::default(); 3]);
        assert_eq!(store.load().len(), 3);

        store.save(&[]).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_returns_copy() {
        let store = MemoryStore::with_records(vec![Record::default()]);
        let mut loaded = store.load();
        loaded.clear();
        assert_eq!(store.load().len(), 1);
    }
}
