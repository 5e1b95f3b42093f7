/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while reading content or driving a scene.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The presentation layer stopped delivering input.
    #[error("input closed")]
    InputClosed,

    /// A piece of world content is malformed.
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// The content document could not be parsed.
    #[error("content parse error: {0}")]
    ContentParse(#[from] serde_json::Error),
}
