//! Player state and inventory stacks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::affliction::Affliction;

/// Normalize an item or token name for comparison: trimmed, lowercase,
/// single-spaced.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// One inventory entry: an item identity with a repeat count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Display name. Identity is the normalized form of this name.
    pub name: String,
    /// Number of items in the stack (at least 1).
    pub count: u32,
    /// Permanent items are never removed by consumption.
    #[serde(default)]
    pub permanent: bool,
}

impl ItemStack {
    /// Create a stack of one.
    pub fn new(name: impl Into<String>, permanent: bool) -> Self {
        Self {
            name: name.into(),
            count: 1,
            permanent,
        }
    }

    /// Whether this stack holds the named item.
    pub fn matches(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

impl std::fmt::Display for ItemStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count > 1 {
            write!(f, "{} x{}", self.name, self.count)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Character name.
    pub name: String,
    /// Current health. May go negative until the loss check runs.
    pub health: i32,
    /// Starting health; maximum health is this plus `health_bonus`.
    pub base_health: i32,
    /// Permanent maximum-health modifier.
    pub health_bonus: i32,
    /// Permanent attack damage modifier.
    pub damage_bonus: i32,
    /// Gold carried.
    pub gold: u32,
    /// Character level, starting at 1.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Inventory stacks in acquisition order.
    pub inventory: Vec<ItemStack>,
    /// Allies who have joined.
    pub allies: BTreeSet<String>,
    /// Active damage-over-time effect.
    pub affliction: Option<Affliction>,
    /// Whether the coast boat has been repaired.
    pub boat_repaired: bool,
    /// Gated paths already opened.
    #[serde(default)]
    pub unlocked_gates: BTreeSet<String>,
    /// Bosses already beaten.
    #[serde(default)]
    pub defeated_bosses: BTreeSet<String>,
}

impl Player {
    /// Create a fresh level-1 player.
    pub fn new(name: impl Into<String>, base_health: i32, gold: u32) -> Self {
        Self {
            name: name.into(),
            health: base_health,
            base_health,
            health_bonus: 0,
            damage_bonus: 0,
            gold,
            level: 1,
            experience: 0,
            inventory: Vec::new(),
            allies: BTreeSet::new(),
            affliction: None,
            boat_repaired: false,
            unlocked_gates: BTreeSet::new(),
            defeated_bosses: BTreeSet::new(),
        }
    }

    /// Maximum health.
    pub fn max_health(&self) -> i32 {
        self.base_health + self.health_bonus
    }

    /// Health clamped at zero for display.
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }

    /// Heal up to `amount`, capped at maximum health. Returns the amount healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.min(self.max_health() - self.health).max(0);
        self.health += healed;
        healed
    }

    /// Lose up to `amount` gold, never below zero. Returns the gold lost.
    pub fn lose_gold(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.gold);
        self.gold -= lost;
        lost
    }

    /// Pay `amount` gold if the player can afford it.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Find a stack by name (case-insensitive).
    ///
    /// Returns the stack index and the normalized name.
    pub fn find_item(&self, name: &str) -> Option<(usize, String)> {
        let wanted = normalize_name(name);
        self.inventory
            .iter()
            .position(|s| normalize_name(&s.name) == wanted)
            .map(|i| (i, wanted))
    }

    /// Whether the player carries at least one of the named item.
    pub fn has_item(&self, name: &str) -> bool {
        self.find_item(name).is_some()
    }

    /// Number of the named item carried.
    pub fn item_count(&self, name: &str) -> u32 {
        self.find_item(name)
            .map(|(i, _)| self.inventory[i].count)
            .unwrap_or(0)
    }

    /// Add one item, stacking onto an existing entry if present.
    pub fn add_stack(&mut self, name: &str, permanent: bool) {
        match self.find_item(name) {
            Some((i, _)) => self.inventory[i].count += 1,
            None => self.inventory.push(ItemStack::new(name.trim(), permanent)),
        }
    }

    /// Consume one item. Fails on permanent or missing stacks.
    pub fn consume(&mut self, name: &str) -> bool {
        let Some((i, _)) = self.find_item(name) else {
            return false;
        };
        if self.inventory[i].permanent {
            return false;
        }
        self.inventory[i].count -= 1;
        if self.inventory[i].count == 0 {
            self.inventory.remove(i);
        }
        true
    }

    /// Whether the named ally has joined.
    pub fn has_ally(&self, name: &str) -> bool {
        self.allies.contains(name)
    }

    /// Status lines for the `status` command.
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}'s Status:", self.name),
            format!("Health: {}/{}", self.display_health(), self.max_health()),
            format!("Level: {} ({} XP)", self.level, self.experience),
            format!("Gold: {}", self.gold),
            format!("Damage Bonus: {}", self.damage_bonus),
            format!("Health Bonus: {}", self.health_bonus),
        ];
        if !self.allies.is_empty() {
            let allies: Vec<&str> = self.allies.iter().map(String::as_str).collect();
            lines.push(format!("Allies: {}", allies.join(", ")));
        }
        if let Some(affliction) = &self.affliction {
            lines.push(format!("Afflicted: {affliction}"));
        }
        lines
    }

    /// Inventory lines for the `inventory` command.
    pub fn inventory_lines(&self) -> Vec<String> {
        if self.inventory.is_empty() {
            return vec!["Your inventory is empty.".to_string()];
        }
        let mut lines = vec!["You are carrying:".to_string()];
        lines.extend(
            self.inventory
                .iter()
                .enumerate()
                .map(|(i, s)| format!("  {}. {s}", i + 1)),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player() {
        let p = Player::new("Ada", 100, 25);
        assert_eq!(p.health, 100);
        assert_eq!(p.max_health(), 100);
        assert_eq!(p.level, 1);
        assert_eq!(p.gold, 25);
        assert!(p.inventory.is_empty());
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_name("  Healing   Potion "), "healing potion");
    }

    #[test]
    fn stacking_keeps_one_entry_per_name() {
        let mut p = Player::new("Ada", 100, 0);
        p.add_stack("Healing Potion", false);
        p.add_stack("healing potion", false);
        p.add_stack("Bread", false);
        assert_eq!(p.inventory.len(), 2);
        assert_eq!(p.item_count("HEALING POTION"), 2);
        assert_eq!(p.find_item("bread"), Some((1, "bread".to_string())));
    }

    #[test]
    fn consume_decrements_then_removes() {
        let mut p = Player::new("Ada", 100, 0);
        p.add_stack("Bread", false);
        p.add_stack("Bread", false);
        assert!(p.consume("bread"));
        assert_eq!(p.item_count("Bread"), 1);
        assert!(p.consume("Bread"));
        assert!(!p.has_item("Bread"));
        assert!(!p.consume("Bread"));
    }

    #[test]
    fn permanent_items_are_never_consumed() {
        let mut p = Player::new("Ada", 100, 0);
        p.add_stack("Crystal Key", true);
        assert!(!p.consume("Crystal Key"));
        assert!(p.has_item("crystal key"));
    }

    #[test]
    fn heal_is_capped_at_max() {
        let mut p = Player::new("Ada", 100, 0);
        p.health = 90;
        assert_eq!(p.heal(20), 10);
        assert_eq!(p.health, 100);
        assert_eq!(p.heal(20), 0);
    }

    #[test]
    fn gold_never_goes_negative() {
        let mut p = Player::new("Ada", 100, 8);
        assert_eq!(p.lose_gold(15), 8);
        assert_eq!(p.gold, 0);
        assert!(!p.spend_gold(1));
        p.gold = 10;
        assert!(p.spend_gold(10));
        assert_eq!(p.gold, 0);
    }

    #[test]
    fn display_lines() {
        let mut p = Player::new("Ada", 100, 0);
        p.health = -4;
        assert_eq!(p.display_health(), 0);
        assert!(p.status_lines()[1].contains("0/100"));
        assert_eq!(p.inventory_lines(), vec!["Your inventory is empty."]);
        p.add_stack("Bread", false);
        p.add_stack("Bread", false);
        assert!(p.inventory_lines()[1].contains("Bread x2"));
    }
}
