//! # Grid Module
//!
//! Sparse spatial storage for level content. Every occupied cell holds
//! exactly one [`Tile`]; empty cells are simply absent. Cells are keyed in
//! row-major order so scans visit positions deterministically.

use crate::game::{PortalLink, Position, Tile, TileKind};
use crate::{MushmanError, MushmanResult};
use std::collections::BTreeMap;

/// Owns the tiles of one level attempt.
///
/// The store enforces the one-entity-per-cell rule: [`GridStore::relocate`]
/// refuses to move a tile onto an occupied cell, and lookups are by exact
/// position. Bounds come from the level definition and matter only to the
/// projectile path and the renderer; movement itself is fenced by walls,
/// not by coordinates.
///
/// # Examples
///
/// ```
/// use mushman::{GridStore, Position, Tile, TileKind};
///
/// let mut grid = GridStore::new(5, 3);
/// grid.put(Position::new(2, 1), Tile::new(TileKind::Key));
///
/// assert_eq!(grid.kind_at(Position::new(2, 1)), Some(TileKind::Key));
/// assert_eq!(grid.get(Position::new(0, 0)), None);
/// assert!(grid.in_bounds(Position::new(4, 2)));
/// assert!(!grid.in_bounds(Position::new(5, 0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GridStore {
    cells: BTreeMap<Position, Tile>,
    width: i32,
    height: i32,
}

impl GridStore {
    /// Creates an empty grid with the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            cells: BTreeMap::new(),
            width,
            height,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the tile at `position`, if any.
    pub fn get(&self, position: Position) -> Option<Tile> {
        self.cells.get(&position).copied()
    }

    /// Returns just the tile kind at `position`, if any.
    pub fn kind_at(&self, position: Position) -> Option<TileKind> {
        self.get(position).map(|tile| tile.kind)
    }

    /// Places a tile, replacing whatever occupied the cell.
    ///
    /// Returns the previous occupant. Level loading uses the replacement
    /// behavior; the engine itself only places onto cells it has verified
    /// empty.
    pub fn put(&mut self, position: Position, tile: Tile) -> Option<Tile> {
        self.cells.insert(position, tile)
    }

    /// Removes and returns the tile at `position`.
    pub fn remove(&mut self, position: Position) -> Option<Tile> {
        self.cells.remove(&position)
    }

    /// Moves the tile at `from` to the empty cell `to`.
    ///
    /// Fails without touching the grid when `to` is occupied or `from` is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use mushman::{GridStore, Position, Tile, TileKind};
    ///
    /// let mut grid = GridStore::new(4, 1);
    /// grid.put(Position::new(1, 0), Tile::new(TileKind::Jellybean));
    ///
    /// grid.relocate(Position::new(1, 0), Position::new(2, 0)).unwrap();
    /// assert_eq!(grid.kind_at(Position::new(2, 0)), Some(TileKind::Jellybean));
    ///
    /// grid.put(Position::new(3, 0), Tile::new(TileKind::Wall));
    /// assert!(grid.relocate(Position::new(2, 0), Position::new(3, 0)).is_err());
    /// ```
    pub fn relocate(&mut self, from: Position, to: Position) -> MushmanResult<()> {
        if self.cells.contains_key(&to) {
            return Err(MushmanError::InvalidAction(format!(
                "cell ({}, {}) is already occupied",
                to.x, to.y
            )));
        }
        let tile = self.cells.remove(&from).ok_or_else(|| {
            MushmanError::InvalidAction(format!("no tile at ({}, {})", from.x, from.y))
        })?;
        self.cells.insert(to, tile);
        Ok(())
    }

    /// Positions of every tile of the given kind, in row-major order.
    pub fn find_all_of_kind(&self, kind: TileKind) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|(_, tile)| tile.kind == kind)
            .map(|(&position, _)| position)
            .collect()
    }

    /// Finds the partner pad of a linked teleporter.
    ///
    /// Scans row-major for the first linked pad sharing `pair`, skipping the
    /// pad at `excluding`. Unlinked pads never match.
    pub fn portal_partner(&self, pair: u8, excluding: Position) -> Option<(Position, PortalLink)> {
        self.cells.iter().find_map(|(&position, tile)| {
            if position == excluding {
                return None;
            }
            match tile.portal {
                Some(link) if link.pair == pair => Some((position, link)),
                _ => None,
            }
        })
    }

    /// Whether `position` lies inside the level rectangle.
    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Iterates occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&Position, &Tile)> {
        self.cells.iter()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
