use std::fmt;
use thiserror::Error;

/// The error type for cosops operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed parameters: non-positive expiration, bad sheet names, ragged rows
    InvalidInput,

    /// Required credential fields are missing or empty
    InvalidCredentials,

    /// The object store rejected the upload, the store's error is kept as source
    Storage,

    /// Unexpected errors while producing output (xml or zip serialization, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this is a credential error
    pub fn is_credential_error(&self) -> bool {
        self.kind == ErrorKind::InvalidCredentials
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Wrap an error returned by an object store.
    ///
    /// The message is the store's own message and the store's error stays
    /// reachable through `source()`.
    pub fn storage(err: anyhow::Error) -> Self {
        Self::new(ErrorKind::Storage, err.to_string()).with_source(err)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "invalid input"),
            ErrorKind::InvalidCredentials => write!(f, "invalid credentials"),
            ErrorKind::Storage => write!(f, "storage error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
