//! Error types for the campaign layer.

use thiserror::Error;

use ew_core::CoreError;
use ew_fiction::FictionError;

/// Result type for campaign operations.
pub type CampaignResult<T> = Result<T, CampaignError>;

/// Errors that can occur while running a campaign.
#[derive(Debug, Error)]
pub enum CampaignError {
    /// Reading or writing the save file failed.
    #[error("save file I/O: {0}")]
    Io(#[from] std::io::Error),

    /// The save file could not be encoded or decoded.
    #[error("save file format: {0}")]
    Json(#[from] serde_json::Error),

    /// The saved room is not part of the world.
    #[error("saved room '{0}' does not exist")]
    UnknownRoom(String),

    /// World error.
    #[error("{0}")]
    Fiction(#[from] FictionError),

    /// Core error.
    #[error("{0}")]
    Core(#[from] CoreError),
}

impl CampaignError {
    /// Whether this error only means the input stream ended.
    pub fn is_input_closed(&self) -> bool {
        matches!(
            self,
            Self::Core(CoreError::InputClosed)
                | Self::Fiction(FictionError::Core(CoreError::InputClosed))
        )
    }
}
