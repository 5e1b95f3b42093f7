//! Core types for Emberwake: the player, enemies, inventory stacks, and the
//! immutable world content every other crate reads from.
//!
//! This crate holds no rules of its own beyond small invariants (stacking,
//! affliction replacement). Combat, item use, and world traversal live in the
//! crates built on top of it. It also defines the [`Presenter`] boundary the
//! engine talks to instead of performing I/O itself.

/// Damage-over-time afflictions and their replacement rule.
pub mod affliction;
/// World content loaded once at startup.
pub mod content;
/// Enemies, abilities, and enemy categories.
pub mod enemy;
/// Error types used throughout the crate.
pub mod error;
/// Player state and inventory stacks.
pub mod player;
/// The presentation boundary.
pub mod presenter;
/// Shared mutable context for one step of play.
pub mod scene;

/// Re-export affliction types.
pub use affliction::Affliction;
/// Re-export content types.
pub use content::{
    AllyTemplate, EnemyTemplate, GameContent, Puzzle, PuzzlePenalty, PuzzleReward,
};
/// Re-export enemy types.
pub use enemy::{Ability, Enemy, EnemyCategory};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export player types.
pub use player::{ItemStack, Player, normalize_name};
/// Re-export presentation types.
pub use presenter::{Presenter, ScriptedPresenter};
/// Re-export the scene context.
pub use scene::Scene;
