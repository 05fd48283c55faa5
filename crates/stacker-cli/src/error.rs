//! Error types for stacker-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from stacker-core
    #[error(transparent)]
    Core(#[from] stacker_core::Error),

    /// Filesystem error
    #[error(transparent)]
    Fs(#[from] stacker_fs::Error),

    /// Error from the control plane
    #[error(transparent)]
    Cloud(#[from] stacker_cloud::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
