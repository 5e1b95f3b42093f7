//! Item registry and item-use rules.
//!
//! Each known item has an effect and a usage context. Using an item returns
//! narrative lines and whether the item was spent; nothing is printed here.

use ew_core::{Affliction, Enemy, Player, normalize_name};

/// The item that revives a fallen player.
pub const REVIVE_ITEM: &str = "Phoenix Feather";

/// Where an item is being used from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseContext {
    /// Outside of combat.
    Exploration,
    /// During the player's combat phase.
    Combat,
}

/// Where an item may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// Anywhere.
    Any,
    /// Only against an enemy.
    CombatOnly,
    /// Never directly.
    Never,
}

/// What an item does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    /// Restore a fixed amount of health, capped at maximum.
    Heal(i32),
    /// Raise permanent bonuses, then heal (capped).
    Boost {
        /// Added to the health bonus.
        health_bonus: i32,
        /// Added to the damage bonus.
        damage_bonus: i32,
        /// Healed after the bonus applies.
        heal: i32,
    },
    /// Deal fixed damage to the enemy, optionally setting it alight.
    Strike {
        /// Damage dealt.
        damage: i32,
        /// Whether the enemy is offered a burn.
        burns: bool,
    },
    /// Revives automatically on a fatal blow.
    Revive,
    /// Narrative item with no use.
    Keepsake,
}

/// Static description of a known item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    /// Canonical display name.
    pub name: &'static str,
    /// Effect on use.
    pub effect: ItemEffect,
    /// Usage context.
    pub usage: Usage,
    /// Permanent items are never consumed.
    pub permanent: bool,
}

const fn spec(name: &'static str, effect: ItemEffect, usage: Usage, permanent: bool) -> ItemSpec {
    ItemSpec {
        name,
        effect,
        usage,
        permanent,
    }
}

const REGISTRY: &[ItemSpec] = &[
    spec("Bread", ItemEffect::Heal(10), Usage::Any, false),
    spec("Healing Potion", ItemEffect::Heal(20), Usage::Any, false),
    spec("Greater Healing Potion", ItemEffect::Heal(50), Usage::Any, false),
    spec(
        "Ancient Relic",
        ItemEffect::Boost {
            health_bonus: 20,
            damage_bonus: 0,
            heal: 20,
        },
        Usage::Any,
        false,
    ),
    spec(
        "Strength Elixir",
        ItemEffect::Boost {
            health_bonus: 0,
            damage_bonus: 5,
            heal: 0,
        },
        Usage::Any,
        false,
    ),
    spec(
        "Vitality Tonic",
        ItemEffect::Boost {
            health_bonus: 10,
            damage_bonus: 0,
            heal: 0,
        },
        Usage::Any,
        false,
    ),
    spec(
        "Silver Sword",
        ItemEffect::Strike {
            damage: 30,
            burns: false,
        },
        Usage::CombatOnly,
        false,
    ),
    spec(
        "Fire Bomb",
        ItemEffect::Strike {
            damage: 15,
            burns: true,
        },
        Usage::CombatOnly,
        false,
    ),
    spec(REVIVE_ITEM, ItemEffect::Revive, Usage::Never, false),
    spec("Crystal Key", ItemEffect::Keepsake, Usage::Never, true),
    spec("Serpent Scale", ItemEffect::Keepsake, Usage::Never, true),
    spec("Toolkit", ItemEffect::Keepsake, Usage::Never, false),
    spec("Gold Coin", ItemEffect::Keepsake, Usage::Never, false),
];

/// Look up a known item (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static ItemSpec> {
    let wanted = normalize_name(name);
    REGISTRY
        .iter()
        .find(|s| normalize_name(s.name) == wanted)
}

/// Add one item to the player's inventory, stacking it and taking the
/// canonical name and permanence from the registry. Returns the name stored.
pub fn add_item(player: &mut Player, name: &str) -> String {
    let (name, permanent) = match lookup(name) {
        Some(spec) => (spec.name, spec.permanent),
        None => (name.trim(), false),
    };
    player.add_stack(name, permanent);
    name.to_string()
}

/// The result of trying to use an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUse {
    /// Narrative lines.
    pub lines: Vec<String>,
    /// Whether the item took effect and was spent.
    pub used: bool,
}

impl ItemUse {
    fn refused(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            used: false,
        }
    }

    fn spent(lines: Vec<String>) -> Self {
        Self { lines, used: true }
    }
}

/// Use an item from the player's inventory.
///
/// `enemy` is the current opponent, if any. Items that fail (wrong context,
/// full health, unknown, not carried) are not consumed.
pub fn use_item(
    player: &mut Player,
    item: &str,
    enemy: Option<&mut Enemy>,
    context: UseContext,
) -> ItemUse {
    let Some((index, _)) = player.find_item(item) else {
        return ItemUse::refused(format!("You don't have any {}.", item.trim()));
    };
    let Some(spec) = lookup(&player.inventory[index].name) else {
        return ItemUse::refused("You can't use that item.");
    };

    match spec.usage {
        Usage::Never => {
            return ItemUse::refused(match spec.effect {
                ItemEffect::Revive => format!(
                    "The {} can't be used directly. It will revive you if you fall.",
                    spec.name
                ),
                _ => "You can't use that item.".to_string(),
            });
        }
        Usage::CombatOnly if context != UseContext::Combat => {
            return ItemUse::refused(format!("You can't use the {} here.", spec.name));
        }
        _ => {}
    }

    match spec.effect {
        ItemEffect::Heal(amount) => {
            let healed = amount.min(player.max_health() - player.health);
            if healed <= 0 {
                return ItemUse::refused("You are already at full health.");
            }
            player.heal(healed);
            player.consume(spec.name);
            ItemUse::spent(vec![format!(
                "You used the {} and restored {healed} health.",
                spec.name
            )])
        }
        ItemEffect::Boost {
            health_bonus,
            damage_bonus,
            heal,
        } => {
            player.health_bonus += health_bonus;
            player.damage_bonus += damage_bonus;
            let mut lines = vec![format!("You used the {} and feel a surge of power.", spec.name)];
            if health_bonus > 0 {
                lines.push(format!("Your maximum health rises by {health_bonus}."));
            }
            if damage_bonus > 0 {
                lines.push(format!("Your damage rises by {damage_bonus}."));
            }
            let healed = player.heal(heal);
            if healed > 0 {
                lines.push(format!("You restore {healed} health."));
            }
            player.consume(spec.name);
            ItemUse::spent(lines)
        }
        ItemEffect::Strike { damage, burns } => {
            let Some(enemy) = enemy else {
                return ItemUse::refused(format!("You can't use the {} here.", spec.name));
            };
            enemy.health -= damage;
            let mut lines = vec![format!(
                "You use the {} on the {} for {damage} damage.",
                spec.name, enemy.name
            )];
            if burns && Affliction::offer(&mut enemy.affliction, Affliction::burn()) {
                lines.push(format!("The {} catches fire!", enemy.name));
            }
            player.consume(spec.name);
            ItemUse::spent(lines)
        }
        ItemEffect::Revive | ItemEffect::Keepsake => ItemUse::refused("You can't use that item."),
    }
}

/// Help lines describing an item's rules.
pub fn describe(name: &str) -> Option<String> {
    let spec = lookup(name)?;
    let usage = match spec.usage {
        Usage::Any => "usable anywhere",
        Usage::CombatOnly => "combat only",
        Usage::Never => "not usable directly",
    };
    Some(format!("{} ({usage})", spec.name))
}
