//! Game rules for Emberwake.
//!
//! Provides damage rolls, the item registry and item-use rules, the
//! loss/revival check, and the combat state machine with enemy abilities,
//! damage over time, and victory rewards.

pub mod combat;
pub mod dice;
pub mod items;
pub mod survival;

pub use combat::{Combat, CombatState, Spoils, fight};
pub use items::{ItemUse, UseContext, add_item, use_item};
pub use survival::{LossCheck, check_loss};
