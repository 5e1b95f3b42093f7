use ew_core::CoreError;
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors raised while building or walking the world.
#[derive(Debug, Error)]
pub enum FictionError {
    /// A room id that the graph does not contain.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// A gate id that the graph does not contain.
    #[error("gate not found: {0}")]
    GateNotFound(String),

    /// A room was added twice.
    #[error("duplicate room: {0}")]
    DuplicateRoom(String),

    /// Failure from the core layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}
