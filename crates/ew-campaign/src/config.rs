//! Configuration for a campaign.

use std::path::PathBuf;

/// Save file used when none is given.
pub const DEFAULT_SAVE_FILE: &str = "emberwake_save.json";

/// Configuration for a campaign.
#[derive(Debug, Clone)]
pub struct CampaignConfig {
    /// RNG seed for reproducible play.
    pub seed: u64,
    /// Where the single save slot lives.
    pub save_path: PathBuf,
    /// Player name; asked for at start when absent.
    pub player_name: Option<String>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            player_name: None,
        }
    }
}

impl CampaignConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the save file path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Set the player name. Blank names are ignored.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim();
        if !name.is_empty() {
            self.player_name = Some(name.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = CampaignConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.save_path, PathBuf::from(DEFAULT_SAVE_FILE));
        assert!(cfg.player_name.is_none());
    }

    #[test]
    fn builder_methods() {
        let cfg = CampaignConfig::default()
            .with_seed(7)
            .with_save_path("/tmp/x.json")
            .with_player_name("  Ada ");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.save_path, PathBuf::from("/tmp/x.json"));
        assert_eq!(cfg.player_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn blank_name_ignored() {
        let cfg = CampaignConfig::default().with_player_name("   ");
        assert!(cfg.player_name.is_none());
    }
}
