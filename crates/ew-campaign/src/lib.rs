//! Campaign controller for Emberwake.
//!
//! Ties the world, the rules, and the presenter together: reads corrected
//! commands, moves the player through the world graph, runs arrival events,
//! encounters, and item use, and keeps a single-slot save file.

pub mod config;
pub mod error;
pub mod persistence;
pub mod session;

pub use config::CampaignConfig;
pub use error::{CampaignError, CampaignResult};
pub use persistence::{CampaignSnapshot, SaveStore};
pub use session::{Campaign, CampaignEnd};
