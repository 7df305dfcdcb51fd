//! JSON file record store (native)
//!
//! One file holds every game's list, keyed by `GameKind::as_str`. Each list
//! is decoded on its own, so a corrupt list only empties that game. Writes go
//! to a temp file first and are renamed into place.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{PersistenceError, RecordStore};
use crate::records::{Record, RecordBook};
use crate::sim::GameKind;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

/// Raw per-game lists; entries for other games are written back untouched
type Collections = BTreeMap<String, Value>;

fn decode_list(kind: GameKind, value: Value) -> RecordBook {
    match serde_json::from_value::<Vec<Record>>(value) {
        Ok(records) => RecordBook::from_records(records),
        Err(e) => {
            log::warn!("Discarding malformed {} records: {}", kind.as_str(), e);
            RecordBook::new()
        }
    }
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every collection. A missing file is empty; an unparseable one is logged and treated as empty.
    fn load_all(&self) -> Result<Collections, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Collections::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&json) {
            Ok(all) => Ok(all),
            Err(e) => {
                log::warn!("Discarding malformed record file {}: {}", self.path.display(), e);
                Ok(Collections::new())
            }
        }
    }

    fn save_all(&self, all: &Collections) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(all)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn fetch_records(&self, kind: GameKind) -> Result<Vec<Record>, PersistenceError> {
        let mut all = self.load_all()?;
        Ok(all
            .remove(kind.as_str())
            .map(|value| decode_list(kind, value).into_records())
            .unwrap_or_default())
    }

    fn append_record(&mut self, kind: GameKind, record: &Record) -> Result<(), PersistenceError> {
        let mut all = self.load_all()?;
        let mut book = all
            .remove(kind.as_str())
            .map(|value| decode_list(kind, value))
            .unwrap_or_default();
        book.insert(record.clone());
        all.insert(kind.as_str().to_string(), serde_json::to_value(book.entries())?);
        self.save_all(&all)?;
        log::info!("{} records saved to {}", kind.as_str(), self.path.display());
        Ok(())
    }

    fn clear_records(&mut self, kind: GameKind) -> Result<(), PersistenceError> {
        let mut all = self.load_all()?;
        if all.remove(kind.as_str()).is_some() {
            self.save_all(&all)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MAX_RECORDS;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("records.json"));
        assert!(store.fetch_records(GameKind::BallDodge).unwrap().is_empty());
    }

    #[test]
    fn test_append_persists_top_ten_per_game() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("records.json");
        let mut store = JsonFileStore::new(&path);
        for s in 0..12u64 {
            store
                .append_record(GameKind::BallDodge, &Record::new("2026-10-15", 1000.0, s))
                .unwrap();
        }
        store
            .append_record(GameKind::MeteorShower, &Record::new("2026-10-15", 60_000.0, 60))
            .unwrap();

        let reopened = JsonFileStore::new(&path);
        let balls = reopened.fetch_records(GameKind::BallDodge).unwrap();
        assert_eq!(balls.len(), MAX_RECORDS);
        assert_eq!(balls[0].score, 11);
        let meteors = reopened.fetch_records(GameKind::MeteorShower).unwrap();
        assert_eq!(meteors, vec![Record::new("2026-10-15", 60_000.0, 60)]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, b"]]] definitely not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.fetch_records(GameKind::MeteorShower).unwrap().is_empty());

        // Next write replaces the corrupt file
        store
            .append_record(GameKind::MeteorShower, &Record::new("d", 1000.0, 1))
            .unwrap();
        assert_eq!(store.fetch_records(GameKind::MeteorShower).unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_list_leaves_other_games_intact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            br#"{"ball_dodge":[{"score":"x"}],"meteor_shower":[{"date":"2026-10-01","time":"01:00","score":60}]}"#,
        )
        .unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.fetch_records(GameKind::BallDodge).unwrap().is_empty());
        assert_eq!(store.fetch_records(GameKind::MeteorShower).unwrap().len(), 1);

        store
            .append_record(GameKind::BallDodge, &Record::new("2026-10-15", 5000.0, 5))
            .unwrap();
        let reopened = JsonFileStore::new(&path);
        let balls = reopened.fetch_records(GameKind::BallDodge).unwrap();
        assert_eq!(balls.iter().map(|r| r.score).collect::<Vec<_>>(), vec![5]);
        let meteors = reopened.fetch_records(GameKind::MeteorShower).unwrap();
        assert_eq!(meteors, vec![Record::new("2026-10-01", 60_000.0, 60)]);
    }

    #[test]
    fn test_clear_only_touches_one_game() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("records.json"));
        store
            .append_record(GameKind::BallDodge, &Record::new("d", 1000.0, 5))
            .unwrap();
        store
            .append_record(GameKind::MeteorShower, &Record::new("d", 1000.0, 6))
            .unwrap();
        store.clear_records(GameKind::BallDodge).unwrap();
        assert!(store.fetch_records(GameKind::BallDodge).unwrap().is_empty());
        assert_eq!(store.fetch_records(GameKind::MeteorShower).unwrap().len(), 1);
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.fetch_records(GameKind::BallDodge),
            Err(PersistenceError::Io(_))
        ));
    }
}
