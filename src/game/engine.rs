//! # Engine Module
//!
//! Turn resolution for a single level attempt. One call to
//! [`LevelState::attempt_move`] runs the whole pipeline for a move: the
//! jellybean push pre-step, the passability check, the move itself, and the
//! interaction with whatever occupies the destination cell, including bomb
//! blasts, gun projectiles, and chained teleporter transits.
//!
//! The engine is deterministic and performs no I/O. Rule violations are
//! never `Err`: a blocked move is a [`StepResult::Rejected`], a lost level
//! is a [`StepResult::Failed`].

use crate::config;
use crate::game::{Direction, GridStore, Inventory, Position, Tile, TileKind};
use crate::levels::LevelDefinition;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Why a level attempt was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// Stepped into a hole with no cement left
    FellIntoHole,
    /// Entered water with no oxygen left
    Drowned,
    /// A blast or projectile destroyed dynamite
    DynamiteDestroyed,
    /// The last exit was destroyed
    ExitDestroyed,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FailureReason::FellIntoHole => "fell into a hole",
            FailureReason::Drowned => "drowned",
            FailureReason::DynamiteDestroyed => "dynamite destroyed",
            FailureReason::ExitDestroyed => "exit destroyed",
        };
        write!(f, "{text}")
    }
}

/// Whether the current attempt is still playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptStatus {
    /// Moves are accepted
    Active,
    /// The exit was reached
    Complete,
    /// The attempt was lost
    Failed(FailureReason),
}

/// What a single [`LevelState::attempt_move`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepResult {
    /// The attempt is already over, nothing happened
    Ignored,
    /// The move was blocked, nothing happened
    Rejected,
    /// The player moved
    Moved,
    /// The player moved and the inventory changed
    ResourceChanged,
    /// The player reached the exit
    Completed,
    /// The move lost the level
    Failed(FailureReason),
}

/// The full mutable state of one level attempt.
///
/// Built fresh from a [`LevelDefinition`] on every load or reset. The
/// player is a coordinate, not a grid tile, so blasts cannot remove it and
/// the one-entity-per-cell rule never has to reason about it.
///
/// # Examples
///
/// ```
/// use mushman::{parse_corpus, Direction, LevelState, StepResult};
///
/// let levels = parse_corpus("Tiny\nnobody\nwsew");
/// let mut state = LevelState::from_definition(&levels[0]);
///
/// assert_eq!(state.attempt_move(Direction::Right), StepResult::Completed);
/// assert_eq!(state.moves(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LevelState {
    grid: GridStore,
    inventory: Inventory,
    player: Option<Position>,
    moves: u32,
    status: AttemptStatus,
}

impl LevelState {
    /// Builds the starting state for a level.
    ///
    /// The `player-start` cell becomes the player coordinate and stays out
    /// of the grid. When a definition carries several start cells the last
    /// one in reading order wins; with none the level loads playerless and
    /// ignores every move.
    pub fn from_definition(definition: &LevelDefinition) -> Self {
        let mut grid = GridStore::new(definition.width(), definition.height());
        let mut player = None;

        for (y, row) in definition.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let Some(tile) = cell else { continue };
                let position = Position::new(x as i32, y as i32);
                if tile.kind == TileKind::PlayerStart {
                    player = Some(position);
                } else {
                    grid.put(position, *tile);
                }
            }
        }

        if player.is_none() {
            warn!(
                "level '{}' has no player start, every move will be ignored",
                definition.title
            );
        }

        Self {
            grid,
            inventory: Inventory::default(),
            player,
            moves: 0,
            status: AttemptStatus::Active,
        }
    }

    /// The level grid.
    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Resources collected so far in this attempt.
    pub fn inventory(&self) -> Inventory {
        self.inventory
    }

    /// Current player cell, `None` when the level has no start.
    pub fn player(&self) -> Option<Position> {
        self.player
    }

    /// Moves accepted so far in this attempt.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Whether the attempt is active, complete, or lost.
    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    /// Resolves one player move.
    ///
    /// Pipeline, in order: a jellybean on the destination is pushed one
    /// cell (into empty space only), the destination is checked for
    /// passability, the player moves and the move counter increments, and
    /// finally the destination tile's interaction runs. Rejected moves
    /// leave the state untouched and cost no move.
    pub fn attempt_move(&mut self, direction: Direction) -> StepResult {
        if self.status != AttemptStatus::Active {
            return StepResult::Ignored;
        }
        let Some(player) = self.player else {
            return StepResult::Ignored;
        };
        let target = player.step(direction);

        if self.grid.kind_at(target) == Some(TileKind::Jellybean) {
            let beyond = target.step(direction);
            if self.grid.relocate(target, beyond).is_err() {
                return StepResult::Rejected;
            }
        }

        if !self.can_enter(target) {
            return StepResult::Rejected;
        }

        self.player = Some(target);
        self.moves += 1;

        let inventory_before = self.inventory;
        self.resolve_interaction(target, direction, 0);

        match self.status {
            AttemptStatus::Complete => StepResult::Completed,
            AttemptStatus::Failed(reason) => StepResult::Failed(reason),
            AttemptStatus::Active => {
                if self.inventory != inventory_before {
                    StepResult::ResourceChanged
                } else {
                    StepResult::Moved
                }
            }
        }
    }

    /// Whether the player may step onto `target` right now.
    ///
    /// Walls, reinforced walls, dynamite, and jellybeans always block.
    /// Locks block without a key, guards block without a coin. Holes and
    /// water are always enterable; their cost is paid on entry. A linked
    /// teleporter blocks only when its partner's ejection cell is blocked.
    pub fn can_enter(&self, target: Position) -> bool {
        let Some(tile) = self.grid.get(target) else {
            return true;
        };
        if tile.kind == TileKind::Portal {
            return self.portal_exit_open(target, tile);
        }
        !self.entry_blocked(tile)
    }

    fn entry_blocked(&self, tile: Tile) -> bool {
        match tile.kind {
            TileKind::Wall
            | TileKind::Impenetrable
            | TileKind::Dynamite
            | TileKind::Jellybean => true,
            TileKind::Lock => self.inventory.keys == 0,
            TileKind::Guard => self.inventory.currency == 0,
            _ => false,
        }
    }

    /// A pad with no link or no partner is inert floor and always open.
    fn portal_exit_open(&self, position: Position, tile: Tile) -> bool {
        let Some(link) = tile.portal else {
            return true;
        };
        let Some((partner, partner_link)) = self.grid.portal_partner(link.pair, position) else {
            return true;
        };
        let exit = partner.step(partner_link.direction);
        match self.grid.get(exit) {
            None => true,
            Some(exit_tile) => !self.entry_blocked(exit_tile),
        }
    }

    /// Runs the interaction for the cell the player just landed on.
    ///
    /// `hops` counts chained teleporter transits within this one move.
    fn resolve_interaction(&mut self, position: Position, direction: Direction, hops: u32) {
        let Some(tile) = self.grid.get(position) else {
            return;
        };

        match tile.kind {
            TileKind::Key => {
                self.grid.remove(position);
                self.inventory.keys += 1;
            }
            TileKind::Currency => {
                self.grid.remove(position);
                self.inventory.currency += 1;
            }
            TileKind::Cement => {
                self.grid.remove(position);
                self.inventory.cement += 1;
            }
            TileKind::Oxygen => {
                self.grid.remove(position);
                self.inventory.oxygen += config::OXYGEN_PER_TANK;
            }
            TileKind::Lock => {
                self.grid.remove(position);
                self.inventory.keys = self.inventory.keys.saturating_sub(1);
            }
            TileKind::Guard => {
                self.grid.remove(position);
                self.inventory.currency = self.inventory.currency.saturating_sub(1);
            }
            TileKind::Hole => {
                if self.inventory.cement > 0 {
                    self.inventory.cement -= 1;
                    self.grid.remove(position);
                } else {
                    self.status = AttemptStatus::Failed(FailureReason::FellIntoHole);
                }
            }
            TileKind::Water => {
                // The water stays either way.
                if self.inventory.oxygen > 0 {
                    self.inventory.oxygen -= 1;
                } else {
                    self.status = AttemptStatus::Failed(FailureReason::Drowned);
                }
            }
            TileKind::Bomb => {
                let destroyed = self.explode(position, false);
                debug!(
                    "bomb at ({}, {}) destroyed {} tiles",
                    position.x,
                    position.y,
                    destroyed.len()
                );
                self.check_destruction(&destroyed);
            }
            TileKind::Gun => {
                self.fire_projectile(position, direction);
                self.grid.remove(position);
            }
            TileKind::Exit => {
                self.grid.remove(position);
                self.status = AttemptStatus::Complete;
            }
            TileKind::Portal => {
                let Some(link) = tile.portal else { return };
                let Some((partner, partner_link)) = self.grid.portal_partner(link.pair, position)
                else {
                    return;
                };
                if hops >= config::MAX_PORTAL_HOPS {
                    debug!("teleporter chain cut off after {hops} transits");
                    return;
                }
                let landing = partner.step(partner_link.direction);
                self.player = Some(landing);
                self.resolve_interaction(landing, partner_link.direction, hops + 1);
            }
            _ => {}
        }
    }

    /// Detonates a blast centered on `center`.
    ///
    /// The center tile is removed, then the 8 surrounding tiles go as one
    /// batch. Reinforced walls survive unless `destroys_impenetrable` is
    /// set. A destroyed linked teleporter takes its partner pad with it,
    /// wherever that pad sits. Bombs caught in the batch are destroyed,
    /// never detonated. Returns the destroyed surrounding tiles.
    pub fn explode(&mut self, center: Position, destroys_impenetrable: bool) -> Vec<Tile> {
        self.grid.remove(center);

        let mut targets: Vec<Position> = Vec::new();
        for neighbor in center.adjacent_positions() {
            let Some(tile) = self.grid.get(neighbor) else {
                continue;
            };
            if tile.kind == TileKind::Impenetrable && !destroys_impenetrable {
                continue;
            }
            targets.push(neighbor);
        }

        let mut partners: Vec<Position> = Vec::new();
        for &position in &targets {
            let Some(tile) = self.grid.get(position) else {
                continue;
            };
            if let Some(link) = tile.portal {
                if let Some((partner, _)) = self.grid.portal_partner(link.pair, position) {
                    if !targets.contains(&partner) && !partners.contains(&partner) {
                        partners.push(partner);
                    }
                }
            }
        }
        targets.extend(partners);

        let mut destroyed = Vec::new();
        for position in targets {
            if let Some(tile) = self.grid.remove(position) {
                destroyed.push(tile);
            }
        }
        destroyed
    }

    /// Fires a projectile from `origin`, which itself is never hit.
    ///
    /// The projectile flies over empty cells, is absorbed by reinforced
    /// walls, and destroys the first other tile it meets. A linked
    /// teleporter pad dies together with its partner. Leaving the level
    /// rectangle ends the flight.
    pub fn fire_projectile(&mut self, origin: Position, direction: Direction) {
        let delta = direction.to_delta();
        let mut cursor = origin + delta;

        loop {
            if !self.grid.in_bounds(cursor) {
                return;
            }
            let Some(tile) = self.grid.get(cursor) else {
                cursor = cursor + delta;
                continue;
            };
            if tile.kind == TileKind::Impenetrable {
                return;
            }

            let mut destroyed = Vec::new();
            if let Some(removed) = self.grid.remove(cursor) {
                destroyed.push(removed);
            }
            if let Some(link) = tile.portal {
                if let Some((partner, _)) = self.grid.portal_partner(link.pair, cursor) {
                    if let Some(removed) = self.grid.remove(partner) {
                        destroyed.push(removed);
                    }
                }
            }
            self.check_destruction(&destroyed);
            return;
        }
    }

    /// Applies the loss rules for a batch of destroyed tiles.
    ///
    /// Destroyed dynamite loses the level outright. Otherwise a destroyed
    /// exit loses it only when no exit remains anywhere on the grid.
    fn check_destruction(&mut self, destroyed: &[Tile]) {
        if destroyed.iter().any(|tile| tile.kind == TileKind::Dynamite) {
            self.status = AttemptStatus::Failed(FailureReason::DynamiteDestroyed);
            return;
        }
        if destroyed.iter().any(|tile| tile.kind == TileKind::Exit)
            && self.grid.find_all_of_kind(TileKind::Exit).is_empty()
        {
            self.status = AttemptStatus::Failed(FailureReason::ExitDestroyed);
        }
    }
}
