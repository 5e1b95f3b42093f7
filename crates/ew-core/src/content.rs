//! World content: enemy templates, treasure, allies, the store, and puzzles.
//!
//! Content is deserialized once at startup and then only ever read. The
//! crate ships a default document in `data/content.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enemy::Ability;
use crate::error::{CoreError, CoreResult};
use crate::player::normalize_name;

const BUILTIN_CONTENT: &str = include_str!("../data/content.json");

/// Base stats for a kind of enemy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    /// Type name.
    pub name: String,
    /// Base health before jitter.
    pub health: i32,
    /// Base damage before jitter.
    pub damage: i32,
    /// Special ability.
    #[serde(default)]
    pub ability: Ability,
    /// Flavor text shown when the enemy appears.
    #[serde(default)]
    pub description: String,
}

impl EnemyTemplate {
    /// Check that the template can produce a sane enemy.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidContent("enemy without a name".into()));
        }
        if self.health <= 0 {
            return Err(CoreError::InvalidContent(format!(
                "enemy '{}' has non-positive health {}",
                self.name, self.health
            )));
        }
        if self.damage < 0 {
            return Err(CoreError::InvalidContent(format!(
                "enemy '{}' has negative damage {}",
                self.name, self.damage
            )));
        }
        Ok(())
    }
}

/// A companion who may join the player once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllyTemplate {
    /// Ally name, e.g. "a wandering knight".
    pub name: String,
    /// Permanent damage bonus granted on joining.
    #[serde(default)]
    pub damage_bonus: i32,
    /// Permanent health bonus granted on joining.
    #[serde(default)]
    pub health_bonus: i32,
}

/// What a correctly answered puzzle grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PuzzleReward {
    /// An item added to the inventory.
    Item {
        /// Item name.
        item: String,
    },
    /// Gold.
    Gold {
        /// Amount of gold.
        amount: u32,
    },
    /// Healing and a damage bonus, applied independently.
    Stats {
        /// Health restored, capped at maximum health.
        #[serde(default)]
        heal: i32,
        /// Permanent damage bonus.
        #[serde(default)]
        damage_bonus: i32,
    },
}

/// What a wrong answer costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PuzzlePenalty {
    /// Health lost.
    Health {
        /// Damage taken.
        amount: i32,
    },
    /// Gold lost, never below zero.
    Gold {
        /// Gold taken.
        amount: u32,
    },
    /// A named item taken, if carried.
    Item {
        /// Item name.
        item: String,
    },
}

/// A multiple-choice puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// The question text.
    pub question: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub answer: usize,
    /// Reward for a correct answer.
    pub reward: PuzzleReward,
    /// Penalty for a wrong answer.
    pub penalty: PuzzlePenalty,
}

impl Puzzle {
    /// Check that the puzzle can be presented and answered.
    pub fn validate(&self) -> CoreResult<()> {
        if self.question.trim().is_empty() {
            return Err(CoreError::InvalidContent("puzzle without a question".into()));
        }
        if self.options.len() < 2 {
            return Err(CoreError::InvalidContent(format!(
                "puzzle '{}' needs at least two options",
                self.question
            )));
        }
        if self.answer >= self.options.len() {
            return Err(CoreError::InvalidContent(format!(
                "puzzle '{}' answer index {} is out of range",
                self.question, self.answer
            )));
        }
        Ok(())
    }
}

/// All externally supplied world content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContent {
    /// Player health at the start of a new game.
    pub starting_health: i32,
    /// Player gold at the start of a new game.
    #[serde(default)]
    pub starting_gold: u32,
    /// Items that can be found as treasure or loot.
    #[serde(default)]
    pub treasure_pool: Vec<String>,
    /// Enemy templates for random encounters.
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
    /// Allies the player may meet.
    #[serde(default)]
    pub allies: Vec<AllyTemplate>,
    /// Store catalog: item name to price.
    #[serde(default)]
    pub store: BTreeMap<String, u32>,
    /// Puzzle pools keyed by pool name.
    #[serde(default)]
    pub puzzles: BTreeMap<String, Vec<Puzzle>>,
    /// Item descriptions for help text.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
    /// Things the player may stumble upon while exploring.
    #[serde(default)]
    pub mysteries: Vec<String>,
}

impl Default for GameContent {
    fn default() -> Self {
        Self {
            starting_health: 100,
            starting_gold: 0,
            treasure_pool: Vec::new(),
            enemies: Vec::new(),
            allies: Vec::new(),
            store: BTreeMap::new(),
            puzzles: BTreeMap::new(),
            items: BTreeMap::new(),
            mysteries: Vec::new(),
        }
    }
}

impl GameContent {
    /// Parse content from a JSON document.
    pub fn from_json(source: &str) -> CoreResult<Self> {
        let content: Self = serde_json::from_str(source)?;
        if content.starting_health <= 0 {
            return Err(CoreError::InvalidContent(format!(
                "starting health must be positive, got {}",
                content.starting_health
            )));
        }
        Ok(content)
    }

    /// The content bundled with the engine.
    ///
    /// A broken bundle is logged and replaced by empty content.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CONTENT).unwrap_or_else(|e| {
            tracing::error!(error = %e, "built-in content is invalid");
            Self::default()
        })
    }

    /// Describe every malformed entry. Empty means the content is clean.
    ///
    /// Malformed entries are not fatal: the engine skips them when they come
    /// up in play.
    pub fn problems(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .enemies
            .iter()
            .filter_map(|t| t.validate().err())
            .map(|e| e.to_string())
            .collect();
        for (pool, puzzles) in &self.puzzles {
            if puzzles.is_empty() {
                problems.push(format!("puzzle pool '{pool}' is empty"));
            }
            for puzzle in puzzles {
                if let Err(e) = puzzle.validate() {
                    problems.push(format!("{pool}: {e}"));
                }
            }
        }
        problems
    }

    /// Puzzles in a named pool; empty if the pool does not exist.
    pub fn puzzle_pool(&self, pool: &str) -> &[Puzzle] {
        self.puzzles.get(pool).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Store price of an item (case-insensitive).
    pub fn price_of(&self, item: &str) -> Option<u32> {
        let wanted = normalize_name(item);
        self.store
            .iter()
            .find(|(name, _)| normalize_name(name) == wanted)
            .map(|(_, price)| *price)
    }

    /// Help text for an item (case-insensitive).
    pub fn describe_item(&self, item: &str) -> Option<&str> {
        let wanted = normalize_name(item);
        self.items
            .iter()
            .find(|(name, _)| normalize_name(name) == wanted)
            .map(|(_, text)| text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_document_parses() {
        assert!(GameContent::from_json(BUILTIN_CONTENT).is_ok());
    }

    #[test]
    fn builtin_content_is_clean() {
        let content = GameContent::builtin();
        assert_eq!(content.starting_health, 100);
        assert!(!content.enemies.is_empty());
        assert!(!content.treasure_pool.is_empty());
        assert_eq!(content.allies.len(), 3);
        assert!(content.problems().is_empty(), "{:?}", content.problems());
    }

    #[test]
    fn builtin_content_has_every_pool_the_world_uses() {
        let content = GameContent::builtin();
        for pool in ["shrine", "old oak", "library", "tide pools"] {
            assert!(!content.puzzle_pool(pool).is_empty(), "missing pool {pool}");
        }
    }

    #[test]
    fn minimal_document_uses_defaults() {
        let content = GameContent::from_json(r#"{ "starting_health": 80 }"#).unwrap();
        assert_eq!(content.starting_health, 80);
        assert_eq!(content.starting_gold, 0);
        assert!(content.enemies.is_empty());
        assert!(content.puzzle_pool("shrine").is_empty());
    }

    #[test]
    fn rejects_non_positive_starting_health() {
        let err = GameContent::from_json(r#"{ "starting_health": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("starting health"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            GameContent::from_json("{ nope"),
            Err(CoreError::ContentParse(_))
        ));
    }

    #[test]
    fn reports_malformed_entries() {
        let content = GameContent::from_json(
            r#"{
                "starting_health": 100,
                "enemies": [{ "name": "ghost", "health": 0, "damage": 3 }],
                "puzzles": {
                    "empty": [],
                    "broken": [{
                        "question": "Which?",
                        "options": ["a", "b"],
                        "answer": 5,
                        "reward": { "type": "gold", "amount": 5 },
                        "penalty": { "type": "health", "amount": 5 }
                    }]
                }
            }"#,
        )
        .unwrap();
        let problems = content.problems();
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.contains("ghost")));
        assert!(problems.iter().any(|p| p.contains("'empty' is empty")));
        assert!(problems.iter().any(|p| p.contains("out of range")));
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let content = GameContent::builtin();
        assert_eq!(content.price_of("healing potion"), Some(15));
        assert!(content.describe_item("SILVER SWORD").is_some());
        assert_eq!(content.price_of("dragon egg"), None);
    }

    #[test]
    fn reward_tags_deserialize() {
        let reward: PuzzleReward =
            serde_json::from_str(r#"{ "type": "stats", "heal": 10 }"#).unwrap();
        assert_eq!(
            reward,
            PuzzleReward::Stats {
                heal: 10,
                damage_bonus: 0
            }
        );
        let penalty: PuzzlePenalty =
            serde_json::from_str(r#"{ "type": "item", "item": "Bread" }"#).unwrap();
        assert_eq!(
            penalty,
            PuzzlePenalty::Item {
                item: "Bread".to_string()
            }
        );
    }
}
