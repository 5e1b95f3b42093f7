//! Damage-over-time afflictions.
//!
//! A combatant carries at most one affliction. A newly offered affliction
//! only displaces the current one when it is strictly stronger in damage per
//! turn or strictly longer in remaining turns; ties keep the incumbent.

use serde::{Deserialize, Serialize};

/// A timed effect dealing fixed damage each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affliction {
    /// Damage dealt per tick.
    pub damage: i32,
    /// Ticks remaining before the affliction clears.
    pub turns: u32,
}

impl Affliction {
    /// Create a new affliction.
    pub fn new(damage: i32, turns: u32) -> Self {
        Self { damage, turns }
    }

    /// The burn applied by fire: 5 damage for 3 turns.
    pub fn burn() -> Self {
        Self::new(5, 3)
    }

    /// Whether this affliction should replace `incumbent`.
    pub fn displaces(&self, incumbent: &Affliction) -> bool {
        self.damage > incumbent.damage || self.turns > incumbent.turns
    }

    /// Offer an affliction to a slot. Returns true if it was stored.
    pub fn offer(slot: &mut Option<Affliction>, new: Affliction) -> bool {
        if new.turns == 0 {
            return false;
        }
        match slot {
            Some(current) if !new.displaces(current) => false,
            _ => {
                *slot = Some(new);
                true
            }
        }
    }

    /// Apply one tick from the slot to `health`.
    ///
    /// Returns the damage dealt, or `None` if the slot was empty.
    pub fn tick(slot: &mut Option<Affliction>, health: &mut i32) -> Option<i32> {
        let current = slot.as_mut()?;
        let dealt = current.damage;
        *health -= dealt;
        current.turns = current.turns.saturating_sub(1);
        if current.turns == 0 {
            *slot = None;
        }
        Some(dealt)
    }
}

impl std::fmt::Display for Affliction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} dmg/turn, {} turns left", self.damage, self.turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn offer_to_empty_slot() {
        let mut slot = None;
        assert!(Affliction::offer(&mut slot, Affliction::burn()));
        assert_eq!(slot, Some(Affliction::new(5, 3)));
    }

    #[test]
    fn tie_keeps_incumbent() {
        let mut slot = Some(Affliction::new(5, 3));
        assert!(!Affliction::offer(&mut slot, Affliction::new(5, 3)));
        assert_eq!(slot, Some(Affliction::new(5, 3)));
    }

    #[test]
    fn longer_affliction_replaces() {
        let mut slot = Some(Affliction::new(5, 1));
        assert!(Affliction::offer(&mut slot, Affliction::new(5, 3)));
        assert_eq!(slot, Some(Affliction::new(5, 3)));
    }

    #[test]
    fn zero_turn_affliction_is_ignored() {
        let mut slot = None;
        assert!(!Affliction::offer(&mut slot, Affliction::new(9, 0)));
        assert!(slot.is_none());
    }

    #[test]
    fn tick_clears_when_exhausted() {
        let mut slot = Some(Affliction::new(5, 2));
        let mut health = 20;
        assert_eq!(Affliction::tick(&mut slot, &mut health), Some(5));
        assert_eq!(health, 15);
        assert_eq!(slot, Some(Affliction::new(5, 1)));
        assert_eq!(Affliction::tick(&mut slot, &mut health), Some(5));
        assert_eq!(health, 10);
        assert!(slot.is_none());
        assert_eq!(Affliction::tick(&mut slot, &mut health), None);
        assert_eq!(health, 10);
    }

    proptest! {
        #[test]
        fn weaker_or_equal_never_replaces(
            damage in 1i32..50,
            turns in 1u32..10,
            less_damage in 0i32..50,
            less_turns in 0u32..10,
        ) {
            let incumbent = Affliction::new(damage, turns);
            let challenger = Affliction::new(
                damage - less_damage.min(damage),
                turns - less_turns.min(turns - 1),
            );
            let mut slot = Some(incumbent);
            Affliction::offer(&mut slot, challenger);
            prop_assert_eq!(slot, Some(incumbent));
        }

        #[test]
        fn stronger_component_always_replaces(
            damage in 1i32..50,
            turns in 1u32..10,
            extra in 1i32..20,
        ) {
            let mut slot = Some(Affliction::new(damage, turns));
            prop_assert!(Affliction::offer(&mut slot, Affliction::new(damage + extra, 1)));
            prop_assert_eq!(slot, Some(Affliction::new(damage + extra, 1)));
        }
    }
}
