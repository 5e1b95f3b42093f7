//! The single-slot save file.
//!
//! A save holds the whole player record and the id of the current room as
//! pretty-printed JSON. Gates the player had opened travel inside the player
//! record and are re-applied to the live world on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ew_core::Player;
use ew_fiction::WorldGraph;

use crate::error::{CampaignError, CampaignResult};

/// Everything needed to resume a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    /// The player.
    pub player: Player,
    /// Id of the room the player stands in.
    pub current_room: String,
}

/// Reads and writes the save slot.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    /// A store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a save exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write a snapshot, replacing any earlier save.
    pub fn save(&self, player: &Player, current_room: &str) -> CampaignResult<()> {
        let snapshot = CampaignSnapshot {
            player: player.clone(),
            current_room: current_room.to_string(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, json)?;
        tracing::info!(path = %self.path.display(), room = current_room, "game saved");
        Ok(())
    }

    /// Read the snapshot without checking it against a world.
    pub fn read(&self) -> CampaignResult<CampaignSnapshot> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load the save into `world`.
    ///
    /// Fails if the file is missing or unreadable, or if its room is not in
    /// the world. On success the player's opened gates are open in `world`.
    pub fn restore(&self, world: &mut WorldGraph) -> CampaignResult<CampaignSnapshot> {
        let snapshot = self.read()?;
        if !world.contains(&snapshot.current_room) {
            return Err(CampaignError::UnknownRoom(snapshot.current_room));
        }
        world.apply_unlocked(&snapshot.player.unlocked_gates);
        tracing::info!(path = %self.path.display(), room = %snapshot.current_room, "game loaded");
        Ok(snapshot)
    }

    /// Like [`restore`](Self::restore), but any failure counts as no save.
    pub fn load(&self, world: &mut WorldGraph) -> Option<CampaignSnapshot> {
        match self.restore(world) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "save not usable");
                None
            }
        }
    }
}
