//! # Inventory Module
//!
//! The four consumable resources a level attempt accumulates and spends.

use serde::{Deserialize, Serialize};

/// Resource counters for the current level attempt.
///
/// Every counter starts at zero when a level loads and is only ever changed
/// by tile interactions: pickups increment, locks, guards, holes, and water
/// decrement. Counters never go negative; running out is checked before
/// spending.
///
/// # Examples
///
/// ```
/// use mushman::Inventory;
///
/// let mut inventory = Inventory::default();
/// assert_eq!(inventory.keys, 0);
///
/// inventory.keys += 1;
/// inventory.oxygen += 3;
/// assert_ne!(inventory, Inventory::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    /// Keys for opening locks
    pub keys: u32,
    /// Coins for paying guards
    pub currency: u32,
    /// Cement bags for filling holes
    pub cement: u32,
    /// Oxygen units for crossing water
    pub oxygen: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let inventory = Inventory::default();
        assert_eq!(inventory.keys, 0);
        assert_eq!(inventory.currency, 0);
        assert_eq!(inventory.cement, 0);
        assert_eq!(inventory.oxygen, 0);
    }

    #[test]
    fn test_copy_semantics() {
        let mut inventory = Inventory::default();
        let snapshot = inventory;
        inventory.keys += 1;
        assert_eq!(snapshot.keys, 0);
        assert_eq!(inventory.keys, 1);
    }
}
