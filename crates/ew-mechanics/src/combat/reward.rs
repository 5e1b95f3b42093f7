//! Victory rewards: experience, levels, gold, and loot.

use rand::Rng;
use rand::rngs::StdRng;

use ew_core::{Enemy, GameContent, Player};

use crate::dice::chance;
use crate::items::add_item;

/// Chance that a random encounter drops a treasure item.
pub const LOOT_CHANCE: f64 = 0.3;
/// Experience needed per level.
pub const EXPERIENCE_PER_LEVEL: u32 = 100;
/// Maximum health gained on level-up.
pub const LEVEL_HEALTH: i32 = 20;
/// Damage bonus gained on level-up.
pub const LEVEL_DAMAGE: i32 = 5;

/// What an encounter pays out beyond experience and gold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spoils {
    /// A chance at one item from the treasure pool.
    Treasure,
    /// A guaranteed unique item.
    Reward(String),
}

/// Add experience, levelling up at most once.
///
/// Levelling raises maximum health and current health by the same amount
/// without clamping against the old maximum.
pub fn grant_experience(player: &mut Player, amount: u32) -> Vec<String> {
    player.experience += amount;
    let mut lines = vec![format!("You gain {amount} experience.")];
    if player.experience >= EXPERIENCE_PER_LEVEL * player.level {
        player.level += 1;
        player.experience = 0;
        player.health_bonus += LEVEL_HEALTH;
        player.health += LEVEL_HEALTH;
        player.damage_bonus += LEVEL_DAMAGE;
        tracing::info!(level = player.level, "level up");
        lines.push(format!(
            "You reached level {}! Maximum health +{LEVEL_HEALTH}, damage +{LEVEL_DAMAGE}.",
            player.level
        ));
    }
    lines
}

/// Pay out a victory over `enemy`.
pub fn award_victory(
    player: &mut Player,
    enemy: &Enemy,
    spoils: &Spoils,
    content: &GameContent,
    rng: &mut StdRng,
) -> Vec<String> {
    let category = enemy.category();
    let mut lines = vec![format!("You have defeated the {}!", enemy.name)];
    lines.extend(grant_experience(player, category.experience()));

    let (low, high) = category.gold_range();
    let gold = rng.random_range(low..=high);
    player.gold += gold;
    lines.push(format!("You find {gold} gold."));

    match spoils {
        Spoils::Reward(item) => {
            add_item(player, item);
            lines.push(format!("You claim the {item}!"));
        }
        Spoils::Treasure => {
            if !content.treasure_pool.is_empty() && chance(rng, LOOT_CHANCE) {
                let item = &content.treasure_pool[rng.random_range(0..content.treasure_pool.len())];
                add_item(player, item);
                lines.push(format!("The {} dropped a {item}.", enemy.name));
            }
        }
    }
    lines
}
