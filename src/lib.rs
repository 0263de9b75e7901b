//! # Mushroom Man
//!
//! A deterministic, turn-based grid puzzle game: guide the mushroom man
//! through walls, locks, bombs, floods, and portals to the exit of each
//! level, in as few moves as you can.
//!
//! ## Architecture Overview
//!
//! The crate is split into a pure simulation core and thin frontend layers:
//!
//! - **Levels**: text corpus parsing into immutable level definitions
//! - **Game Core**: grid store, inventory, and the interaction engine that
//!   resolves one player move at a time
//! - **Session**: level switching, move outcomes, and best-score recording
//! - **Progress**: pluggable key-value persistence for per-level records
//! - **Rendering/Input**: macroquad window, keyboard, and 2D drawing
//!
//! The engine never performs I/O and never blocks; everything observable by
//! the frontend flows through [`Snapshot`] values and [`Outcome`] results,
//! so the whole rule set is exercisable from plain unit tests.

pub mod game;
pub mod input;
pub mod levels;
pub mod progress;
pub mod rendering;

// Core module re-exports
pub use game::*;
pub use input::*;
pub use levels::*;
pub use progress::*;
pub use rendering::*;

// Explicit re-exports for commonly used types to ensure cross-platform compatibility
pub use game::{
    // From engine
    AttemptStatus,
    Direction,
    FailureReason,
    // From session
    GameSession,
    // From grid
    GridStore,
    // From inventory
    Inventory,
    LevelState,
    Outcome,
    // From tiles
    PortalLink,
    Position,
    Snapshot,
    StepResult,
    Tile,
    TileKind,
};

pub use progress::{JsonFileStore, LevelRecord, MemoryStore, ProgressStore, ProgressTracker};

pub use rendering::MacroquadDisplay;

/// Core error type for the Mushroom Man engine.
#[derive(thiserror::Error, Debug)]
pub enum MushmanError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Result type used throughout the Mushroom Man codebase.
pub type MushmanResult<T> = Result<T, MushmanError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Oxygen units granted by one oxygen tank pickup
    pub const OXYGEN_PER_TANK: u32 = 3;

    /// Maximum chained portal transits resolved for a single move
    pub const MAX_PORTAL_HOPS: u32 = 8;

    /// Side length of one rendered tile in pixels
    pub const TILE_SIZE: f32 = 32.0;

    /// Width of the rendered info panel in pixels
    pub const PANEL_WIDTH: f32 = 260.0;

    /// Frames per second target for the game loop
    pub const TARGET_FPS: u64 = 60;
}
