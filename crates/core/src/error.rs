use thiserror::Error;

/// Result type for carron operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while parsing or resolving a target
///
/// `InvalidSource` is the syntax-error specialization of a resolution
/// failure: it is the only variant the best-effort summary path still
/// reports as an error (together with a missing source file).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The raw target string is malformed
    #[error("Invalid target: {0}")]
    TargetParse(String),

    /// The target is well-formed but could not be resolved
    #[error("{0}")]
    TargetResolution(String),

    /// The source backing the target does not parse
    #[error("Invalid Python in {path}: {message} (line {line})")]
    InvalidSource {
        path: String,
        message: String,
        line: usize,
    },
}

impl AdapterError {
    /// Creates a target parse error
    pub fn target_parse(msg: impl Into<String>) -> Self {
        Self::TargetParse(msg.into())
    }

    /// Creates a target resolution error
    pub fn target_resolution(msg: impl Into<String>) -> Self {
        Self::TargetResolution(msg.into())
    }

    /// Creates an invalid source error
    pub fn invalid_source(path: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self::InvalidSource {
            path: path.into(),
            message: message.into(),
            line,
        }
    }

    /// True for resolution failures, including invalid source
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::TargetResolution(_) | Self::InvalidSource { .. })
    }

    /// True only for syntax errors in the backing source
    pub fn is_invalid_source(&self) -> bool {
        matches!(self, Self::InvalidSource { .. })
    }
}

/// Main error type for carron operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}
