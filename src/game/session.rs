//! # Session Module
//!
//! The playing-one-corpus facade the frontend talks to. A session owns the
//! parsed levels, the live [`LevelState`], and the progress tracker, and
//! turns raw engine step results into [`Outcome`] values decorated with
//! best-score information. Rendering reads the session through owned
//! [`Snapshot`] values only.

use crate::game::{
    AttemptStatus, Direction, FailureReason, Inventory, LevelState, Position, StepResult, Tile,
};
use crate::levels::LevelDefinition;
use crate::progress::{ProgressStore, ProgressTracker};
use crate::{MushmanError, MushmanResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What one player move meant for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nothing happened, the attempt was already over
    None,
    /// The player moved
    Moved,
    /// The move was blocked
    Rejected,
    /// The player moved and resources changed hands
    ResourceChanged,
    /// The level was completed
    LevelComplete {
        /// Whether this run set a new best move count
        new_best: bool,
        /// The best on record before this run
        previous_best: Option<u32>,
    },
    /// The level was lost
    LevelFailed(FailureReason),
}

/// Owned, serializable view of everything the frontend draws.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub level_index: usize,
    pub level_count: usize,
    pub title: String,
    pub author: String,
    pub width: i32,
    pub height: i32,
    pub player: Option<Position>,
    pub inventory: Inventory,
    pub moves: u32,
    pub status: AttemptStatus,
    pub tiles: Vec<(Position, Tile)>,
    pub best_moves: Option<u32>,
    pub completed_before: bool,
}

/// A play session over one level corpus.
///
/// The store behind the tracker is injected, so the same session logic
/// runs against the JSON save file in the game and against plain memory in
/// tests. Construction resumes at the persisted last-played level.
///
/// # Examples
///
/// ```
/// use mushman::{parse_corpus, Direction, GameSession, MemoryStore, Outcome};
///
/// let levels = parse_corpus("Hallway\nnobody\nwskle");
/// let mut session = GameSession::new(levels, Box::new(MemoryStore::new())).unwrap();
///
/// session.attempt_move(Direction::Right); // key
/// session.attempt_move(Direction::Right); // lock
/// let outcome = session.attempt_move(Direction::Right); // exit
///
/// assert_eq!(
///     outcome,
///     Outcome::LevelComplete { new_best: true, previous_best: None }
/// );
/// ```
#[derive(Debug)]
pub struct GameSession {
    levels: Vec<LevelDefinition>,
    current_level: usize,
    state: LevelState,
    tracker: ProgressTracker,
}

impl GameSession {
    /// Starts a session over `levels`, resuming at the last-played level.
    ///
    /// Fails with [`MushmanError::InvalidState`] when the corpus is empty.
    /// A stale last-played marker past the end of the corpus clamps to the
    /// final level.
    pub fn new(
        levels: Vec<LevelDefinition>,
        store: Box<dyn ProgressStore>,
    ) -> MushmanResult<Self> {
        if levels.is_empty() {
            return Err(MushmanError::InvalidState(
                "cannot start a session with no levels".to_string(),
            ));
        }
        let tracker = ProgressTracker::new(store);
        let start = tracker.last_level().min(levels.len() - 1);
        let state = LevelState::from_definition(&levels[start]);
        info!(
            "session starting at level {} of {}",
            start + 1,
            levels.len()
        );
        Ok(Self {
            levels,
            current_level: start,
            state,
            tracker,
        })
    }

    /// Number of levels in the corpus.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Index of the level being played.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// The live engine state, for inspection.
    pub fn state(&self) -> &LevelState {
        &self.state
    }

    /// Switches to the level at `index` and starts a fresh attempt.
    ///
    /// An out-of-range index is ignored. Switching records the new level
    /// as the one to resume at next session.
    pub fn load_level(&mut self, index: usize) {
        if index >= self.levels.len() {
            debug!(
                "ignoring request for level {index}, corpus has {}",
                self.levels.len()
            );
            return;
        }
        self.current_level = index;
        self.state = LevelState::from_definition(&self.levels[index]);
        self.tracker.set_last_level(index);
        info!("loaded level {} '{}'", index + 1, self.levels[index].title);
    }

    /// Restarts the current level from its definition.
    pub fn reset_current_level(&mut self) {
        self.state = LevelState::from_definition(&self.levels[self.current_level]);
        debug!("reset level {}", self.current_level + 1);
    }

    /// Moves on to the next level, returning whether one existed.
    pub fn advance_level(&mut self) -> bool {
        let next = self.current_level + 1;
        if next >= self.levels.len() {
            return false;
        }
        self.load_level(next);
        true
    }

    /// Plays one move on the current level.
    ///
    /// Completions are written to the progress tracker and reported with
    /// their best-score context.
    pub fn attempt_move(&mut self, direction: Direction) -> Outcome {
        match self.state.attempt_move(direction) {
            StepResult::Ignored => Outcome::None,
            StepResult::Rejected => Outcome::Rejected,
            StepResult::Moved => Outcome::Moved,
            StepResult::ResourceChanged => Outcome::ResourceChanged,
            StepResult::Failed(reason) => Outcome::LevelFailed(reason),
            StepResult::Completed => {
                let update = self
                    .tracker
                    .record_completion(self.current_level, self.state.moves());
                info!(
                    "level {} complete in {} moves{}",
                    self.current_level + 1,
                    self.state.moves(),
                    if update.is_new_best { " (new best)" } else { "" }
                );
                Outcome::LevelComplete {
                    new_best: update.is_new_best,
                    previous_best: update.previous_best,
                }
            }
        }
    }

    /// Builds the view the renderer draws this frame.
    pub fn snapshot(&self) -> Snapshot {
        let definition = &self.levels[self.current_level];
        let record = self.tracker.level_record(self.current_level);
        Snapshot {
            level_index: self.current_level,
            level_count: self.levels.len(),
            title: definition.title.clone(),
            author: definition.author.clone(),
            width: self.state.grid().width(),
            height: self.state.grid().height(),
            player: self.state.player(),
            inventory: self.state.inventory(),
            moves: self.state.moves(),
            status: self.state.status(),
            tiles: self.state.grid().iter().map(|(p, t)| (*p, *t)).collect(),
            best_moves: record.best_moves,
            completed_before: record.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::parse_corpus;
    use crate::progress::MemoryStore;

    fn two_level_corpus() -> Vec<LevelDefinition> {
        parse_corpus("One\na\nwse\nTwo\nb\nws e\n")
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let result = GameSession::new(Vec::new(), Box::new(MemoryStore::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_fresh_session_starts_at_first_level() {
        let session = GameSession::new(two_level_corpus(), Box::new(MemoryStore::new())).unwrap();
        assert_eq!(session.current_level(), 0);
        assert_eq!(session.level_count(), 2);
    }

    #[test]
    fn test_session_resumes_last_played() {
        let mut store = MemoryStore::new();
        store.set("last_level", "1");
        let session = GameSession::new(two_level_corpus(), Box::new(store)).unwrap();
        assert_eq!(session.current_level(), 1);
        assert_eq!(session.snapshot().title, "Two");
    }

    #[test]
    fn test_stale_resume_marker_clamps() {
        let mut store = MemoryStore::new();
        store.set("last_level", "9");
        let session = GameSession::new(two_level_corpus(), Box::new(store)).unwrap();
        assert_eq!(session.current_level(), 1);
    }

    #[test]
    fn test_out_of_range_load_is_ignored() {
        let mut session =
            GameSession::new(two_level_corpus(), Box::new(MemoryStore::new())).unwrap();
        session.attempt_move(Direction::Right);
        session.load_level(5);
        assert_eq!(session.current_level(), 0);
        // The running attempt is untouched.
        assert_eq!(session.state().moves(), 1);
    }

    #[test]
    fn test_completion_reports_best_context() {
        let mut session =
            GameSession::new(two_level_corpus(), Box::new(MemoryStore::new())).unwrap();
        let outcome = session.attempt_move(Direction::Right);
        assert_eq!(
            outcome,
            Outcome::LevelComplete {
                new_best: true,
                previous_best: None
            }
        );
    }

    #[test]
    fn test_advance_stops_at_corpus_end() {
        let mut session =
            GameSession::new(two_level_corpus(), Box::new(MemoryStore::new())).unwrap();
        assert!(session.advance_level());
        assert_eq!(session.current_level(), 1);
        assert!(!session.advance_level());
        assert_eq!(session.current_level(), 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let session = GameSession::new(two_level_corpus(), Box::new(MemoryStore::new())).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.level_index, 0);
        assert_eq!(snapshot.level_count, 2);
        assert_eq!(snapshot.title, "One");
        assert_eq!(snapshot.width, 3);
        assert_eq!(snapshot.height, 1);
        assert_eq!(snapshot.player, Some(Position::new(1, 0)));
        assert_eq!(snapshot.moves, 0);
        assert!(!snapshot.completed_before);
        // Two wall-and-exit tiles, the start cell stays empty.
        assert_eq!(snapshot.tiles.len(), 2);
    }
}
