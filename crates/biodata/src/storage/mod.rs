//! Storage layer for biodata.
//!
//! The whole record collection lives in one JSON file. Every read loads the
//! full array and every write replaces it, so the store never holds state
//! between calls.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;

use crate::error::Result;
use crate::record::Record;

/// An ordered, append-only collection of records.
///
/// Implementations keep insertion order and allow duplicates.
pub trait RecordStore: Send + Sync {
    /// Load every stored record.
    ///
    /// Never fails: a missing or unreadable backing store is treated as empty.
    fn load(&self) -> Vec<Record>;

    /// Replace the stored collection with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the new collection could not be persisted. The
    /// previous contents stay intact in that case.
    fn save(&self, records: &[Record]) -> Result<()>;

    /// Append one record to the end of the collection.
    ///
    /// This is a plain load-then-save. Two writers racing between the load and
    /// the save can lose one of the records; the store only guarantees that each
    /// individual save is atomic.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated collection could not be persisted.
    fn append(&self, record: Record) -> Result<()> {
        let mut records = self.load();
        records.push(record);
        self.save(&records)
    }

    /// Summary statistics for the stored collection.
    fn stats(&self) -> StoreStats {
        StoreStats::from_records(&self.load())
    }
}

/// Statistics about the record store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of stored records.
    pub total_records: usize,
    /// Earliest well-formed record timestamp.
    pub first_timestamp: Option<String>,
    /// Latest well-formed record timestamp.
    pub last_timestamp: Option<String>,
    /// Size of the backing file in bytes, 0 when not file-backed.
    pub size_bytes: u64,
}

impl StoreStats {
    /// Compute statistics over an in-memory collection.
    ///
    /// Records whose timestamp does not parse are counted but do not affect
    /// the timestamp range.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let dated = || {
            records
                .iter()
                .filter_map(|r| r.parsed_timestamp().map(|at| (at, &r.timestamp)))
        };

        Self {
            total_records: records.len(),
            first_timestamp: dated().min_by_key(|(at, _)| *at).map(|(_, ts)| ts.clone()),
            last_timestamp: dated().max_by_key(|(at, _)| *at).map(|(_, ts)| ts.clone()),
            size_bytes: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, timestamp: &str) -> Record {
        Record {
            timestamp: timestamp.to_string(),
            name: name.to_string(),
            ..Record::default()
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = StoreStats::from_records(&[]);
        assert_eq!(stats, StoreStats::default());
    }

    #[test]
    fn test_stats_first_and_last() {
        let records = vec![
            record("A", "2025-01-01T00:00:00+07:00"),
            record("B", "2025-02-01T00:00:00+07:00"),
            record("C", "2025-03-01T00:00:00+07:00"),
        ];
        let stats = StoreStats::from_records(&records);
        assert_eq!(stats.total_records, 3);
        assert_eq!(
            stats.first_timestamp.as_deref(),
            Some("2025-01-01T00:00:00+07:00")
        );
        assert_eq!(
            stats.last_timestamp.as_deref(),
            Some("2025-03-01T00:00:00+07:00")
        );
    }

    #[test]
    fn test_stats_range_ignores_order_and_bad_timestamps() {
        let records = vec![
            record("A", "2025-02-01T00:00:00+07:00"),
            record("B", "not a time"),
            record("C", "2025-01-01T00:00:00+07:00"),
            record("D", "2025-03-01T00:00:00+00:00"),
        ];
        let stats = StoreStats::from_records(&records);
        assert_eq!(stats.total_records, 4);
        assert_eq!(
            stats.first_timestamp.as_deref(),
            Some("2025-01-01T00:00:00+07:00")
        );
        assert_eq!(
            stats.last_timestamp.as_deref(),
            Some("2025-03-01T00:00:00+00:00")
        );
    }

    #[test]
    fn test_stats_without_valid_timestamps() {
        let stats = StoreStats::from_records(&[record("A", ""), record("B", "1")]);
        assert_eq!(stats.total_records, 2);
        assert!(stats.first_timestamp.is_none());
        assert!(stats.last_timestamp.is_none());
    }

    #[test]
    fn test_append_via_trait_default() {
        let store = MemoryStore::new();
        store.append(record("A", "1")).unwrap();
        store.append(record("B", "2")).unwrap();

        let names: Vec<String> = store.load().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_trait_object_usable() {
        let store: Box<dyn RecordStore> = Box::new(MemoryStore::new());
        store.append(record("A", "1")).unwrap();
        assert_eq!(store.stats().total_records, 1);
    }
}
