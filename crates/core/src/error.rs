/// Result alias that carries the custom [`ViewerError`] type.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Common error type for the core crate.
///
/// Only conditions that abort an operation end up here. Empty folders,
/// blocked autoplay and navigation past either end of the playlist are
/// reported through status text instead.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// A collaborator required to run a session was not supplied.
    #[error("initialization failed: missing {0}")]
    MissingCollaborator(&'static str),
    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ViewerError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for ViewerError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for ViewerError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
