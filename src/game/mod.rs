//! # Game Module
//!
//! The simulation core of Mushroom Man.
//!
//! This module contains the pieces one player move flows through:
//! - Tile vocabulary and the level symbol table
//! - Grid store holding at most one entity per cell
//! - Inventory of consumable resources
//! - The interaction engine resolving moves, pickups, blasts, and portals
//! - The session facade that tracks levels, outcomes, and best scores

pub mod engine;
pub mod grid;
pub mod inventory;
pub mod session;
pub mod tiles;

pub use engine::*;
pub use grid::*;
pub use inventory::*;
pub use session::*;
pub use tiles::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the level grid.
///
/// `x` grows rightward and `y` grows downward, matching the reading order
/// of the level text format.
///
/// # Examples
///
/// ```
/// use mushman::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let around = pos.adjacent_positions();
/// assert_eq!(around.len(), 8); // All 8 surrounding positions
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Returns the position one step away in the given direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use mushman::{Direction, Position};
    ///
    /// let pos = Position::new(3, 3);
    /// assert_eq!(pos.step(Direction::Up), Position::new(3, 2));
    /// assert_eq!(pos.step(Direction::Right), Position::new(4, 3));
    /// ```
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }

    /// Returns all 8 adjacent positions (including diagonals).
    pub fn adjacent_positions(self) -> Vec<Position> {
        vec![
            Position::new(self.x - 1, self.y - 1), // NW
            Position::new(self.x, self.y - 1),     // N
            Position::new(self.x + 1, self.y - 1), // NE
            Position::new(self.x - 1, self.y),     // W
            Position::new(self.x + 1, self.y),     // E
            Position::new(self.x - 1, self.y + 1), // SW
            Position::new(self.x, self.y + 1),     // S
            Position::new(self.x + 1, self.y + 1), // SE
        ]
    }
}

// Row-major ordering keeps grid scans deterministic.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions the player can move and portals can eject toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use mushman::{Direction, Position};
    ///
    /// let delta = Direction::Up.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta doesn't correspond to a single step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Decodes the direction digit used by portal codes in level text.
    ///
    /// # Examples
    ///
    /// ```
    /// use mushman::Direction;
    ///
    /// assert_eq!(Direction::from_digit(1), Some(Direction::Up));
    /// assert_eq!(Direction::from_digit(4), Some(Direction::Right));
    /// assert_eq!(Direction::from_digit(7), None);
    /// ```
    pub fn from_digit(digit: u8) -> Option<Direction> {
        match digit {
            1 => Some(Direction::Up),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            4 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}
