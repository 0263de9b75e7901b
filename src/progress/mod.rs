//! # Progress Module
//!
//! Per-level completion records and the last-played marker, persisted
//! through a pluggable string key-value store. The game runs against a
//! JSON file on disk; tests run against plain memory. Stored data is
//! advisory: anything absent or corrupt reads back as "never played" and
//! is reported through the log, never through an error.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// String key-value storage for game progress.
///
/// Writes are fire-and-forget: implementations swallow and log their own
/// failures so gameplay never stalls on persistence.
pub trait ProgressStore: std::fmt::Debug {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// Volatile in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// File-backed store holding all keys in one JSON object.
///
/// The whole map is rewritten on every `set`. A missing file is a normal
/// first run; an unreadable or corrupt file degrades to an empty store
/// with a warning.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading whatever is already there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(e) => {
                    warn!(
                        "save file {} is corrupt ({e}), starting fresh",
                        path.display()
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no save file at {}, starting fresh", path.display());
                HashMap::new()
            }
            Err(e) => {
                warn!("could not read save file {}: {e}", path.display());
                HashMap::new()
            }
        };
        Self { path, values }
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.values) {
            Ok(payload) => {
                if let Err(e) = fs::write(&self.path, payload) {
                    warn!("could not write save file {}: {e}", self.path.display());
                }
            }
            Err(e) => warn!("could not encode save data: {e}"),
        }
    }
}

impl ProgressStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

/// What is known about one level across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Whether the level was ever completed
    pub completed: bool,
    /// Fewest moves of any completion
    pub best_moves: Option<u32>,
}

/// Result of recording one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionUpdate {
    /// The best move count on record before this completion
    pub previous_best: Option<u32>,
    /// Whether this completion became the new best
    pub is_new_best: bool,
}

/// Reads and writes level records through a [`ProgressStore`].
///
/// Records live under `level_{index}` as JSON; the last-played marker
/// lives under `last_level` as a plain number.
///
/// # Examples
///
/// ```
/// use mushman::{MemoryStore, ProgressTracker};
///
/// let mut tracker = ProgressTracker::new(Box::new(MemoryStore::new()));
///
/// let first = tracker.record_completion(0, 12);
/// assert!(first.is_new_best);
/// assert_eq!(first.previous_best, None);
///
/// let slower = tracker.record_completion(0, 20);
/// assert!(!slower.is_new_best);
/// assert_eq!(slower.previous_best, Some(12));
/// assert_eq!(tracker.level_record(0).best_moves, Some(12));
/// ```
#[derive(Debug)]
pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
}

impl ProgressTracker {
    /// Creates a tracker over the given store.
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        Self { store }
    }

    fn level_key(index: usize) -> String {
        format!("level_{index}")
    }

    /// The stored record for a level, defaulting to unplayed.
    pub fn level_record(&self, index: usize) -> LevelRecord {
        let Some(raw) = self.store.get(&Self::level_key(index)) else {
            return LevelRecord::default();
        };
        match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("record for level {index} is corrupt ({e}), treating as unplayed");
                LevelRecord::default()
            }
        }
    }

    /// Records a completion in `moves` moves.
    ///
    /// The first completion always sets the best; later ones only improve
    /// it when strictly fewer moves were used.
    pub fn record_completion(&mut self, index: usize, moves: u32) -> CompletionUpdate {
        let previous_best = self.level_record(index).best_moves;
        let is_new_best = previous_best.map_or(true, |best| moves < best);
        let record = LevelRecord {
            completed: true,
            best_moves: match previous_best {
                Some(best) if moves >= best => Some(best),
                _ => Some(moves),
            },
        };
        match serde_json::to_string(&record) {
            Ok(payload) => self.store.set(&Self::level_key(index), &payload),
            Err(e) => warn!("could not encode record for level {index}: {e}"),
        }
        CompletionUpdate {
            previous_best,
            is_new_best,
        }
    }

    /// The level index to resume at, defaulting to the first level.
    pub fn last_level(&self) -> usize {
        self.store
            .get("last_level")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }

    /// Remembers `index` as the level to resume at.
    pub fn set_last_level(&mut self, index: usize) {
        self.store.set("last_level", &index.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);
        store.set("a", "1");
        store.set("a", "2");
        assert_eq!(store.get("a"), Some("2".to_string()));
    }

    #[test]
    fn test_unplayed_level_defaults() {
        let tracker = ProgressTracker::new(Box::new(MemoryStore::new()));
        let record = tracker.level_record(7);
        assert!(!record.completed);
        assert_eq!(record.best_moves, None);
    }

    #[test]
    fn test_first_completion_sets_best() {
        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::new()));
        let update = tracker.record_completion(0, 30);
        assert!(update.is_new_best);
        assert_eq!(update.previous_best, None);
        assert_eq!(tracker.level_record(0).best_moves, Some(30));
        assert!(tracker.level_record(0).completed);
    }

    #[test]
    fn test_worse_completion_keeps_best() {
        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::new()));
        tracker.record_completion(0, 10);
        let update = tracker.record_completion(0, 15);
        assert!(!update.is_new_best);
        assert_eq!(update.previous_best, Some(10));
        assert_eq!(tracker.level_record(0).best_moves, Some(10));
    }

    #[test]
    fn test_equal_completion_is_not_new_best() {
        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::new()));
        tracker.record_completion(0, 10);
        let update = tracker.record_completion(0, 10);
        assert!(!update.is_new_best);
        assert_eq!(tracker.level_record(0).best_moves, Some(10));
    }

    #[test]
    fn test_better_completion_updates_best() {
        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::new()));
        tracker.record_completion(0, 10);
        let update = tracker.record_completion(0, 8);
        assert!(update.is_new_best);
        assert_eq!(update.previous_best, Some(10));
        assert_eq!(tracker.level_record(0).best_moves, Some(8));
    }

    #[test]
    fn test_corrupt_record_reads_as_unplayed() {
        let mut store = MemoryStore::new();
        store.set("level_3", "{not json");
        let tracker = ProgressTracker::new(Box::new(store));
        assert_eq!(tracker.level_record(3), LevelRecord::default());
    }

    #[test]
    fn test_last_level_round_trip() {
        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::new()));
        assert_eq!(tracker.last_level(), 0);
        tracker.set_last_level(4);
        assert_eq!(tracker.last_level(), 4);
    }

    #[test]
    fn test_corrupt_last_level_defaults_to_first() {
        let mut store = MemoryStore::new();
        store.set("last_level", "four");
        let tracker = ProgressTracker::new(Box::new(store));
        assert_eq!(tracker.last_level(), 0);
    }

    #[test]
    fn test_levels_tracked_independently() {
        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::new()));
        tracker.record_completion(0, 5);
        tracker.record_completion(2, 9);
        assert_eq!(tracker.level_record(0).best_moves, Some(5));
        assert_eq!(tracker.level_record(1).best_moves, None);
        assert_eq!(tracker.level_record(2).best_moves, Some(9));
    }
}
