//! The loss/revival check.
//!
//! Runs after anything that can lower the player's health. A fallen player
//! carrying the revive item comes back at half maximum health; otherwise the
//! campaign is over.

use ew_core::{Player, Scene};

use crate::items::REVIVE_ITEM;

/// Outcome of a loss check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCheck {
    /// Health is above zero.
    Standing,
    /// The revive item was spent.
    Revived {
        /// Health after revival.
        health: i32,
    },
    /// The player has fallen for good.
    Fallen,
}

impl LossCheck {
    /// Whether play continues.
    pub fn survived(self) -> bool {
        !matches!(self, Self::Fallen)
    }

    /// Narration for this outcome.
    pub fn lines(self) -> Vec<String> {
        match self {
            Self::Standing => Vec::new(),
            Self::Revived { health } => vec![
                format!("Your {REVIVE_ITEM} bursts into flame!"),
                format!("You rise from the ashes with {health} health."),
            ],
            Self::Fallen => vec!["You have been defeated. Game Over.".to_string()],
        }
    }
}

/// Check whether the player has fallen, spending the revive item if needed.
pub fn check_loss(player: &mut Player) -> LossCheck {
    if player.health > 0 {
        return LossCheck::Standing;
    }
    if player.consume(REVIVE_ITEM) {
        player.health = player.max_health() / 2;
        tracing::info!(health = player.health, "player revived");
        return LossCheck::Revived {
            health: player.health,
        };
    }
    tracing::info!(player = %player.name, "player fell");
    LossCheck::Fallen
}

/// Run the loss check and narrate it. Returns whether play continues.
pub fn survive(scene: &mut Scene<'_>) -> bool {
    let outcome = check_loss(scene.player);
    scene.tell(&outcome.lines());
    outcome.survived()
}
