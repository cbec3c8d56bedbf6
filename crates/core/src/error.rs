use crate::SortAlgorithm;

/// Result alias that carries the custom [`SortVizError`] type.
pub type Result<T> = std::result::Result<T, SortVizError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum SortVizError {
    /// Free-form message for conditions that do not warrant a dedicated
    /// variant.
    #[error("{0}")]
    Message(String),
    /// The configuration cannot produce a sensible layout or run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A sort was requested while another one is still running.
    #[error("a {0} run is already in progress")]
    SortInProgress(SortAlgorithm),
    /// The collection was used before `initialize` (or after `destroy`).
    #[error("stick collection has not been initialized")]
    NotInitialized,
    /// The background sort worker panicked instead of returning an outcome.
    #[error("sort worker panicked")]
    WorkerPanicked,
    /// A shared lock was poisoned by a panicking holder.
    #[error("{0} has been poisoned")]
    Poisoned(&'static str),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration files that fail to parse.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl SortVizError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<&str> for SortVizError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for SortVizError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
