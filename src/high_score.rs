//! High score persistence.
//!
//! The only state that survives between runs is a single best score,
//! stored as JSON next to the other files in ~/.blazing-runner/.

use crate::constants::HIGH_SCORE_FILE;
use crate::utils::persistence::{load_json_at_or_default, save_json_at, save_path};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// On-disk high score record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub best: u64,
    /// Unix timestamp (seconds) of when `best` was set.
    pub set_at: Option<i64>,
}

/// Storage for the persisted high score.
pub trait ScoreStore {
    /// Read the stored high score. Missing or unreadable storage reads as 0.
    fn load(&self) -> u64;

    /// Overwrite the stored high score.
    fn store(&mut self, score: u64) -> io::Result<()>;
}

/// JSON file store, ~/.blazing-runner/high_score.json by default.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Store at the default location in the data directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            path: save_path(HIGH_SCORE_FILE)?,
        })
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn record(&self) -> HighScoreRecord {
        load_json_at_or_default(&self.path)
    }

    /// Reset the stored high score to zero.
    pub fn clear(&mut self) -> io::Result<()> {
        save_json_at(&self.path, &HighScoreRecord::default())
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> u64 {
        self.record().best
    }

    fn store(&mut self, score: u64) -> io::Result<()> {
        let record = HighScoreRecord {
            best: score,
            set_at: Some(Utc::now().timestamp()),
        };
        save_json_at(&self.path, &record)
    }
}

/// In-memory store, used by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub best: u64,
    /// Number of successful `store` calls.
    pub writes: u32,
}

impl MemoryScoreStore {
    pub fn with_best(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn store(&mut self, score: u64) -> io::Result<()> {
        self.best = score;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_store(name: &str) -> JsonScoreStore {
        let path = std::env::temp_dir()
            .join(format!("blazing-runner-hs-{}", std::process::id()))
            .join(name);
        fs::remove_file(&path).ok();
        JsonScoreStore::at(path)
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = scratch_store("missing.json");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_store_then_load() {
        let mut store = scratch_store("roundtrip.json");
        store.store(4_321).unwrap();

        assert_eq!(store.load(), 4_321);
        assert!(store.record().set_at.is_some());

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_clear_resets_to_zero() {
        let mut store = scratch_store("clear.json");
        store.store(99).unwrap();
        store.clear().unwrap();

        assert_eq!(store.load(), 0);
        assert_eq!(store.record().set_at, None);

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryScoreStore::with_best(10);
        assert_eq!(store.load(), 10);
        store.store(20).unwrap();
        assert_eq!(store.load(), 20);
        assert_eq!(store.writes, 1);
    }
}
