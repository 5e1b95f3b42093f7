//! Enemies and their special abilities.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::affliction::Affliction;
use crate::content::EnemyTemplate;

/// Upper bound of the random health added to a template.
const HEALTH_JITTER: i32 = 20;
/// Upper bound of the random damage added to a template.
const DAMAGE_JITTER: i32 = 3;

/// A special ability an enemy may use instead of a plain attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// No ability; always attacks normally.
    #[default]
    None,
    /// A fast hit for extra damage.
    #[serde(rename = "quick strike")]
    QuickStrike,
    /// A frenzied hit for double damage.
    Berserk,
    /// Heals the enemy.
    Regeneration,
    /// Takes gold from the player.
    #[serde(rename = "steal gold")]
    StealGold,
    /// Arcane damage.
    #[serde(rename = "magic blast")]
    MagicBlast,
    /// Coordinated hit for extra damage.
    #[serde(rename = "pack tactics")]
    PackTactics,
    /// Hardened hide; halves incoming player damage.
    #[serde(rename = "stone skin")]
    StoneSkin,
    /// A chance at a doubled hit.
    #[serde(rename = "critical strike")]
    CriticalStrike,
    /// Sets the player alight.
    Burn,
    /// Numbs the player's sword arm.
    Freeze,
}

impl Ability {
    /// Every ability, in table order.
    pub const ALL: [Ability; 11] = [
        Self::None,
        Self::QuickStrike,
        Self::Berserk,
        Self::Regeneration,
        Self::StealGold,
        Self::MagicBlast,
        Self::PackTactics,
        Self::StoneSkin,
        Self::CriticalStrike,
        Self::Burn,
        Self::Freeze,
    ];

    /// The name used in content files and narration.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::QuickStrike => "quick strike",
            Self::Berserk => "berserk",
            Self::Regeneration => "regeneration",
            Self::StealGold => "steal gold",
            Self::MagicBlast => "magic blast",
            Self::PackTactics => "pack tactics",
            Self::StoneSkin => "stone skin",
            Self::CriticalStrike => "critical strike",
            Self::Burn => "burn",
            Self::Freeze => "freeze",
        }
    }

    /// Parse an ability from its name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|a| a.name() == s)
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reward tier of an enemy, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyCategory {
    /// Goblins and bandits.
    Minor,
    /// Orcs and trolls.
    Brute,
    /// Everything else.
    Elite,
}

impl EnemyCategory {
    /// Categorize an enemy by its type name.
    pub fn of(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |kinds: &[&str]| {
            name.split(|c: char| !c.is_alphanumeric())
                .any(|word| kinds.contains(&word))
        };
        if has(&["goblin", "bandit"]) {
            Self::Minor
        } else if has(&["orc", "troll"]) {
            Self::Brute
        } else {
            Self::Elite
        }
    }

    /// Experience awarded for a victory.
    pub fn experience(self) -> u32 {
        match self {
            Self::Minor => 50,
            Self::Brute => 100,
            Self::Elite => 150,
        }
    }

    /// Inclusive gold range awarded for a victory.
    pub fn gold_range(self) -> (u32, u32) {
        match self {
            Self::Minor => (10, 20),
            Self::Brute => (20, 40),
            Self::Elite => (40, 60),
        }
    }
}

/// An enemy in a single encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    /// Type name, e.g. "goblin".
    pub name: String,
    /// Current health; may dip below zero before the encounter ends.
    pub health: i32,
    /// Base damage of a plain attack.
    pub damage: i32,
    /// Special ability.
    pub ability: Ability,
    /// Flavor text.
    pub description: String,
    /// Active damage-over-time effect.
    pub affliction: Option<Affliction>,
}

impl Enemy {
    /// Create an enemy with exact stats.
    pub fn new(
        name: impl Into<String>,
        health: i32,
        damage: i32,
        ability: Ability,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            health,
            damage,
            ability,
            description: description.into(),
            affliction: None,
        }
    }

    /// Spawn a fresh enemy from a template, with random health and damage jitter.
    pub fn from_template(template: &EnemyTemplate, rng: &mut StdRng) -> Self {
        let health = template.health + rng.random_range(0..=HEALTH_JITTER);
        let damage = template.damage + rng.random_range(0..=DAMAGE_JITTER);
        Self::new(
            template.name.clone(),
            health,
            damage,
            template.ability,
            template.description.clone(),
        )
    }

    /// Health clamped at zero for display.
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }

    /// Whether the enemy is out of the fight.
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Reward tier of this enemy.
    pub fn category(&self) -> EnemyCategory {
        EnemyCategory::of(&self.name)
    }
}
