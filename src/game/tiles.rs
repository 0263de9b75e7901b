//! # Tiles Module
//!
//! The tile vocabulary of the level format: every kind of cell content a
//! level can contain, plus the one-character symbol table used by the text
//! corpus. Portals carry an extra [`PortalLink`] decoded from their
//! three-character code.

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// Everything a grid cell can hold.
///
/// Each kind maps to exactly one lowercase symbol in level text; see
/// [`TileKind::from_symbol`]. `PlayerStart` only ever appears in level
/// definitions: loading a level turns it into the player's coordinate and
/// leaves the cell empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Ordinary wall, blocks movement, destroyed by blasts
    Wall,
    /// Reinforced wall, blocks movement, survives blasts
    Impenetrable,
    /// Starting cell of the player
    PlayerStart,
    /// Level goal
    Exit,
    /// Locked door, opened by spending a key
    Lock,
    /// Key pickup
    Key,
    /// Pit, filled by spending cement, otherwise fatal
    Hole,
    /// Cement bag pickup
    Cement,
    /// Pushable blob
    Jellybean,
    /// Explodes when stepped on
    Bomb,
    /// Volatile cache, level is lost if it is destroyed
    Dynamite,
    /// Toll keeper, passed by spending currency
    Guard,
    /// Currency pickup
    Currency,
    /// Oxygen tank pickup
    Oxygen,
    /// Fires a projectile when stepped on
    Gun,
    /// Flooded cell, crossing costs one oxygen
    Water,
    /// Teleporter pad, may link to a partner pad
    Portal,
}

impl TileKind {
    /// Decodes one level-text symbol.
    ///
    /// Returns `None` for the empty cell (space) and for characters outside
    /// the vocabulary. Portal cells are encoded as `t` followed by two
    /// digits; only the leading `t` is decoded here.
    ///
    /// # Examples
    ///
    /// ```
    /// use mushman::TileKind;
    ///
    /// assert_eq!(TileKind::from_symbol('w'), Some(TileKind::Wall));
    /// assert_eq!(TileKind::from_symbol('~'), Some(TileKind::Water));
    /// assert_eq!(TileKind::from_symbol(' '), None);
    /// assert_eq!(TileKind::from_symbol('z'), None);
    /// ```
    pub fn from_symbol(symbol: char) -> Option<TileKind> {
        match symbol {
            'w' => Some(TileKind::Wall),
            'i' => Some(TileKind::Impenetrable),
            's' => Some(TileKind::PlayerStart),
            'e' => Some(TileKind::Exit),
            'l' => Some(TileKind::Lock),
            'k' => Some(TileKind::Key),
            'h' => Some(TileKind::Hole),
            'c' => Some(TileKind::Cement),
            'j' => Some(TileKind::Jellybean),
            'b' => Some(TileKind::Bomb),
            'd' => Some(TileKind::Dynamite),
            'g' => Some(TileKind::Guard),
            'f' => Some(TileKind::Currency),
            'o' => Some(TileKind::Oxygen),
            'n' => Some(TileKind::Gun),
            '~' => Some(TileKind::Water),
            't' => Some(TileKind::Portal),
            _ => None,
        }
    }

    /// Returns the level-text symbol for this kind.
    pub fn symbol(self) -> char {
        match self {
            TileKind::Wall => 'w',
            TileKind::Impenetrable => 'i',
            TileKind::PlayerStart => 's',
            TileKind::Exit => 'e',
            TileKind::Lock => 'l',
            TileKind::Key => 'k',
            TileKind::Hole => 'h',
            TileKind::Cement => 'c',
            TileKind::Jellybean => 'j',
            TileKind::Bomb => 'b',
            TileKind::Dynamite => 'd',
            TileKind::Guard => 'g',
            TileKind::Currency => 'f',
            TileKind::Oxygen => 'o',
            TileKind::Gun => 'n',
            TileKind::Water => '~',
            TileKind::Portal => 't',
        }
    }

    /// Returns every tile kind once.
    pub fn all() -> Vec<TileKind> {
        vec![
            TileKind::Wall,
            TileKind::Impenetrable,
            TileKind::PlayerStart,
            TileKind::Exit,
            TileKind::Lock,
            TileKind::Key,
            TileKind::Hole,
            TileKind::Cement,
            TileKind::Jellybean,
            TileKind::Bomb,
            TileKind::Dynamite,
            TileKind::Guard,
            TileKind::Currency,
            TileKind::Oxygen,
            TileKind::Gun,
            TileKind::Water,
            TileKind::Portal,
        ]
    }
}

/// Pairing data carried by a linked teleporter pad.
///
/// Two pads sharing a `pair` digit form a pair. `direction` is where this
/// pad ejects an arriving player, decoded from the second digit of the
/// `t<pair><direction>` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortalLink {
    pub pair: u8,
    pub direction: Direction,
}

/// One occupied grid cell.
///
/// `portal` is only ever `Some` on `TileKind::Portal` cells that carried a
/// well-formed link code; legacy bare `t` pads keep `None` and behave as
/// inert floor decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub portal: Option<PortalLink>,
}

impl Tile {
    /// Creates a plain tile of the given kind.
    pub fn new(kind: TileKind) -> Self {
        Self { kind, portal: None }
    }

    /// Creates a linked teleporter pad.
    ///
    /// # Examples
    ///
    /// ```
    /// use mushman::{Direction, Tile, TileKind};
    ///
    /// let pad = Tile::portal(1, Direction::Right);
    /// assert_eq!(pad.kind, TileKind::Portal);
    /// assert_eq!(pad.portal.unwrap().pair, 1);
    /// ```
    pub fn portal(pair: u8, direction: Direction) -> Self {
        Self {
            kind: TileKind::Portal,
            portal: Some(PortalLink { pair, direction }),
        }
    }
}
