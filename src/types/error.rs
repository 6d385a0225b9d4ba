//! Error types for the language server

use std::path::PathBuf;

/// Main error type for language server operations
#[derive(Debug, thiserror::Error)]
pub enum LangServerError {
    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URI that does not name a local file
    #[error("Unsupported document URI: {0}")]
    UnsupportedUri(String),

    /// The lint command could not be started
    #[error("failed to run {program} in {}: {source}", working_dir.display())]
    Spawn {
        /// Executable that failed to start
        program: String,
        /// Working directory the process was started in
        working_dir: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The lint queue was closed by `shutdown`
    #[error("Lint queue is closed")]
    QueueClosed,
}

/// Result type alias for language server operations
pub type Result<T> = std::result::Result<T, LangServerError>;
