use std::io;

use thiserror::Error;

/// Library-wide error type for dataconf operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying local I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Remote session, authentication, or network failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote object does not exist.
    #[error("Object '{path}' not found in container '{container}'")]
    NotFound { container: String, path: String },

    /// Upload without overwrite permission onto an existing object.
    #[error("Object '{path}' already exists in container '{container}'")]
    Conflict { container: String, path: String },

    /// Configuration document violates the fixed schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Unrecognized log level name.
    #[error("Invalid log level '{0}': expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL")]
    InvalidLogLevel(String),
}

/// Schema violations detected while constructing a `DataConfiguration`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error(
        "Configuration keys must be exactly version, header, file_format, columns (missing: [{}], unexpected: [{}])",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    MissingOrExtraKeys { missing: Vec<String>, unexpected: Vec<String> },

    #[error("There are less than two distinct columns in the configuration ({found} found)")]
    InsufficientDistinctColumns { found: usize },

    #[error("A name for column entry {index} is missing")]
    ColumnNameMissing { index: usize },

    #[error("Malformed configuration document: {0}")]
    MalformedDocument(String),
}

impl AppError {
    pub fn transport<S: Into<String>>(message: S) -> Self {
        AppError::Transport(message.into())
    }

    /// The schema violation behind this error, if any.
    pub fn schema(&self) -> Option<&SchemaError> {
        match self {
            AppError::Schema(err) => Some(err),
            _ => None,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping failures to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Schema(_) | AppError::InvalidLogLevel(_) => io::ErrorKind::InvalidInput,
            AppError::NotFound { .. } => io::ErrorKind::NotFound,
            AppError::Conflict { .. } => io::ErrorKind::AlreadyExists,
            AppError::Transport(_) => io::ErrorKind::Other,
        }
    }
}
