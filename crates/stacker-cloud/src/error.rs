//! Error types for stacker-cloud

/// Result type for stacker-cloud operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the control plane
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The control plane rejected or failed a request
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    /// The client could not be constructed
    #[error("Unable to initialise CloudFormation client for region '{region}': {message}")]
    Client { region: String, message: String },

    /// A stack the operation requires does not exist
    #[error("Stack {name} does not exist")]
    StackNotFound { name: String },

    /// A change set the operation requires does not exist
    #[error("Change set {change_set} not found on stack {stack}")]
    ChangeSetNotFound { stack: String, change_set: String },
}

impl Error {
    pub fn api(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Api {
            operation,
            message: message.into(),
        }
    }
}
