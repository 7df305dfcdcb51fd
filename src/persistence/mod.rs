//! Record persistence
//!
//! The simulation only sees the `RecordStore` trait. Backends:
//! - `MemoryRecordStore`: in-process, used by tests and as a fallback
//! - `JsonFileStore`: one JSON file with a list per game (native)
//! - `LocalStorageStore`: browser LocalStorage, one key per game (wasm32)
//!
//! Stored lists that fail to decode are treated as empty.

use std::collections::HashMap;

use thiserror::Error;

use crate::records::{Record, RecordBook};
use crate::sim::GameKind;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode records: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected the operation: {0}")]
    Storage(String),
}

/// Per-game record collections
pub trait RecordStore {
    /// Stored records for `kind`, best first, at most `MAX_RECORDS`
    fn fetch_records(&self, kind: GameKind) -> Result<Vec<Record>, PersistenceError>;

    /// Add one record; the stored list stays trimmed to the top `MAX_RECORDS`
    fn append_record(&mut self, kind: GameKind, record: &Record) -> Result<(), PersistenceError>;

    fn clear_records(&mut self, kind: GameKind) -> Result<(), PersistenceError>;
}

/// Decode a stored list, treating corrupt data as empty
pub fn decode_records(kind: GameKind, json: &str) -> RecordBook {
    match serde_json::from_str::<Vec<Record>>(json) {
        Ok(records) => RecordBook::from_records(records),
        Err(e) => {
            log::warn!("Discarding malformed {} records: {}", kind.as_str(), e);
            RecordBook::new()
        }
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    books: HashMap<GameKind, RecordBook>,
    failing: bool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail (for exercising error paths)
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.failing {
            return Err(PersistenceError::Unavailable("memory store offline".into()));
        }
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    fn fetch_records(&self, kind: GameKind) -> Result<Vec<Record>, PersistenceError> {
        self.check()?;
        Ok(self
            .books
            .get(&kind)
            .map(|b| b.entries().to_vec())
            .unwrap_or_default())
    }

    fn append_record(&mut self, kind: GameKind, record: &Record) -> Result<(), PersistenceError> {
        self.check()?;
        self.books.entry(kind).or_default().insert(record.clone());
        Ok(())
    }

    fn clear_records(&mut self, kind: GameKind) -> Result<(), PersistenceError> {
        self.check()?;
        self.books.remove(&kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MAX_RECORDS;

    #[test]
    fn test_memory_store_keeps_top_ten() {
        let mut store = MemoryRecordStore::new();
        for s in 0..25u64 {
            store
                .append_record(GameKind::BallDodge, &Record::new("d", 0.0, s))
                .unwrap();
        }
        let records = store.fetch_records(GameKind::BallDodge).unwrap();
        assert_eq!(records.len(), MAX_RECORDS);
        assert_eq!(records[0].score, 24);
        assert_eq!(records[9].score, 15);

        store.clear_records(GameKind::BallDodge).unwrap();
        assert!(store.fetch_records(GameKind::BallDodge).unwrap().is_empty());
    }

    #[test]
    fn test_failing_store_reports_errors() {
        let mut store = MemoryRecordStore::new();
        store.set_failing(true);
        assert!(matches!(
            store.fetch_records(GameKind::MeteorShower),
            Err(PersistenceError::Unavailable(_))
        ));
        assert!(store
            .append_record(GameKind::MeteorShower, &Record::new("d", 0.0, 1))
            .is_err());
    }

    #[test]
    fn test_malformed_json_decodes_empty() {
        assert!(decode_records(GameKind::BallDodge, "{not json").is_empty());
        assert!(decode_records(GameKind::BallDodge, r#"[{"score":"x"}]"#).is_empty());
        let book = decode_records(
            GameKind::BallDodge,
            r#"[{"date":"a","time":"00:10","score":3},{"date":"b","time":"00:20","score":9}]"#,
        );
        assert_eq!(book.top_score(), Some(9));
    }
}
