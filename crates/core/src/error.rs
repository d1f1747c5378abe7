/// Result alias that carries the custom [`InteractError`] type.
pub type Result<T> = std::result::Result<T, InteractError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum InteractError {
    /// Invalid detector or rig construction input. Every validation happens
    /// when a detector is built, so a running frame stream never sees this.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON decoding errors from configuration or recordings.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl InteractError {
    /// Creates an [`InteractError::InvalidConfig`] from the provided message.
    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
