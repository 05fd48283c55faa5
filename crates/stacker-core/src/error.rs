//! Error types for stacker-core

use std::path::PathBuf;

/// Result type for stacker-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur loading configuration or resolving parameters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration document failed to parse
    #[error("Unable to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The configuration tree could not be traversed
    #[error("Unable to read config at {path}: {message}")]
    ConfigIo { path: PathBuf, message: String },

    /// None of the configuration root directories exist
    #[error("Configuration root not found at {path}")]
    ConfigRootNotFound { path: PathBuf },

    /// No template file exists for a name in any supported extension
    #[error("Template `{name}` not found in {root}")]
    TemplateNotFound { name: String, root: PathBuf },

    /// A template exists but could not be parsed
    #[error("Invalid template {path}: {message}")]
    InvalidTemplate { path: PathBuf, message: String },

    /// Context for a template lookup made on behalf of a stack
    #[error("unable to fetch template `{template}`: {source}")]
    FetchTemplate {
        template: String,
        #[source]
        source: Box<Error>,
    },

    /// A mapping-valued parameter does not have exactly one entry
    #[error("unexpected map with {entries} keys, expected a single resolver")]
    BadResolverMap { entries: usize },

    /// A mapping-valued parameter names an unregistered resolver
    #[error("unknown resolver `{name}`")]
    UnknownResolver { name: String },

    /// Context for any failure while resolving one parameter
    #[error("error resolving {key}: {source}")]
    ResolveFailed {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// A registered resolver reported a failure
    #[error("{resolver} resolver failed: {message}")]
    ResolverFailed { resolver: String, message: String },

    /// `Stack` resolver input is not `<stack>.<output>`
    #[error("expected to receive input in format <stack>.<output>, got `{input}`")]
    BadStackRef { input: String },

    /// `Stack` resolver could not find the referenced stack
    #[error("unable to fetch stack `{stack}` for output `{output}`")]
    StackNotFound { stack: String, output: String },

    /// `Stack` resolver found the stack but not the output
    #[error("unable to find output `{output}` on stack `{stack}`")]
    OutputNotFound { stack: String, output: String },

    /// `File` resolver could not read its file
    #[error("unable to read file {path}: {source}")]
    FileResolver {
        path: PathBuf,
        #[source]
        source: stacker_fs::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from stacker-fs
    #[error(transparent)]
    Fs(#[from] stacker_fs::Error),

    /// Control plane error from stacker-cloud
    #[error(transparent)]
    Cloud(#[from] stacker_cloud::Error),
}

impl Error {
    /// Attach the parameter key a resolution failure belongs to.
    pub fn resolving(key: impl Into<String>, source: Error) -> Self {
        Self::ResolveFailed {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Map a stacker-fs error raised while loading configuration.
    pub(crate) fn config(error: stacker_fs::Error) -> Self {
        match error {
            stacker_fs::Error::Parse { path, message, .. } => Self::ConfigParse { path, message },
            stacker_fs::Error::Io { path, source } => Self::ConfigIo {
                path,
                message: source.to_string(),
            },
            other => Self::Fs(other),
        }
    }
}
