//! Record leaderboard
//!
//! Each game keeps its top 10 finished sessions by score. The `ScoreLedger`
//! reads the list when a session starts and appends one record when it ends;
//! storage failures are logged and never reach gameplay.

use serde::{Deserialize, Serialize};

use crate::persistence::RecordStore;
use crate::sim::{GameKind, SessionSummary};

/// Maximum number of records to keep per game
pub const MAX_RECORDS: usize = 10;

/// A single finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date the session ended
    pub date: String,
    /// Session length as mm:ss
    pub time: String,
    pub score: u64,
}

impl Record {
    pub fn new(date: impl Into<String>, duration_ms: f32, score: u64) -> Self {
        Self {
            date: date.into(),
            time: format_duration(duration_ms),
            score,
        }
    }

    pub fn from_summary(summary: &SessionSummary, date: impl Into<String>) -> Self {
        Self::new(date, summary.duration_ms, summary.final_score)
    }
}

/// Format milliseconds as mm:ss (minutes are not capped at 59)
pub fn format_duration(ms: f32) -> String {
    let total_secs = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Top-N list, sorted descending by score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordBook {
    entries: Vec<Record>,
}

impl RecordBook {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from an unsorted list, keeping the best `MAX_RECORDS`
    pub fn from_records(mut records: Vec<Record>) -> Self {
        // Stable sort keeps earlier records ahead on ties
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(MAX_RECORDS);
        Self { entries: records }
    }

    /// Check if a score would make the list
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_RECORDS {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a record if it qualifies.
    /// Returns the rank achieved (1-indexed) or None if it didn't.
    pub fn insert(&mut self, record: Record) -> Option<usize> {
        if !self.qualifies(record.score) {
            return None;
        }

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| record.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_RECORDS);

        Some(rank)
    }

    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.entries
    }
}

/// Reads and appends one game's records through a `RecordStore`
#[derive(Debug)]
pub struct ScoreLedger<S> {
    store: S,
    kind: GameKind,
    book: RecordBook,
}

impl<S: RecordStore> ScoreLedger<S> {
    /// Fetch the stored list; on failure start from an empty one
    pub fn load(store: S, kind: GameKind) -> Self {
        let book = match store.fetch_records(kind) {
            Ok(records) => {
                log::info!("Loaded {} {} records", records.len(), kind.as_str());
                RecordBook::from_records(records)
            }
            Err(e) => {
                log::warn!("Could not load {} records: {}", kind.as_str(), e);
                RecordBook::new()
            }
        };
        Self { store, kind, book }
    }

    /// Add a finished session. Returns the rank it reached in the visible list.
    pub fn record(&mut self, record: Record) -> Option<usize> {
        let rank = self.book.insert(record.clone());
        if let Err(e) = self.store.append_record(self.kind, &record) {
            log::warn!("Could not save {} record: {}", self.kind.as_str(), e);
        }
        rank
    }

    /// Drop every record for this game
    pub fn clear(&mut self) {
        self.book = RecordBook::new();
        if let Err(e) = self.store.clear_records(self.kind) {
            log::warn!("Could not clear {} records: {}", self.kind.as_str(), e);
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn book(&self) -> &RecordBook {
        &self.book
    }

    pub fn records(&self) -> &[Record] {
        self.book.entries()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
