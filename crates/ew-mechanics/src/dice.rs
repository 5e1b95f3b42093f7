//! Damage rolls.
//!
//! Every roll is a uniform integer in an inclusive range. Player attacks may
//! additionally land a critical hit.

use rand::Rng;
use rand::rngs::StdRng;

/// Chance that a player attack is a critical hit.
pub const CRIT_CHANCE: f64 = 0.15;

/// Damage multiplier for a critical hit.
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Base of the player's attack range.
pub const PLAYER_BASE_DAMAGE: i32 = 10;

/// The result of an attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRoll {
    /// Final damage.
    pub value: i32,
    /// Whether the roll was a critical hit.
    pub critical: bool,
}

/// Uniform roll in `low..=high`. A degenerate range yields `low`.
pub fn roll_range(rng: &mut StdRng, low: i32, high: i32) -> i32 {
    if high <= low {
        low
    } else {
        rng.random_range(low..=high)
    }
}

/// Roll an attack of `base..=base + bonus` with a chance to crit.
pub fn roll_attack(rng: &mut StdRng, base: i32, bonus: i32) -> DamageRoll {
    let value = roll_range(rng, base, base + bonus.max(0));
    if chance(rng, CRIT_CHANCE) {
        DamageRoll {
            value: (f64::from(value) * CRIT_MULTIPLIER).floor() as i32,
            critical: true,
        }
    } else {
        DamageRoll {
            value,
            critical: false,
        }
    }
}

/// Crit-free roll of exactly `damage..=damage`, as enemies attack.
pub fn roll_damage(rng: &mut StdRng, damage: i32) -> i32 {
    roll_range(rng, damage, damage)
}

/// True with probability `p` (clamped to 0..=1).
pub fn chance(rng: &mut StdRng, p: f64) -> bool {
    rng.random_bool(p.clamp(0.0, 1.0))
}
