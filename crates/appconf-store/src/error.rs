use thiserror::Error;

/// Error type for the application configuration store.
///
/// Argument errors are raised before any backend call is made. Backend and
/// transport failures pass through unchanged so callers can decide on retry
/// policy themselves.
#[derive(Error, Debug)]
pub enum AppConfError {
    /// A required input was absent or malformed.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
    },

    /// An update-only operation targeted a document that does not exist.
    #[error("Document '{id}' not found in index '{index}'")]
    NotFound {
        index: String,
        id:    String,
    },

    /// The stored document changed since the caller read it.
    #[error("Document '{id}' in index '{index}' is at version {actual}, expected {expected}")]
    VersionConflict {
        index:    String,
        id:       String,
        expected: u64,
        actual:   u64,
    },

    /// I/O operations failed (file system, network, etc.)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// The backend could not serve the request.
    #[error("Backend unavailable: {reason}")]
    BackendUnavailable {
        reason: String,
    },

    /// A stored document does not have the expected shape.
    #[error("Corrupt document '{id}' in index '{index}': {reason}")]
    CorruptDocument {
        index:  String,
        id:     String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },
}

impl AppConfError {
    /// Shorthand for [`AppConfError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, AppConfError>;
