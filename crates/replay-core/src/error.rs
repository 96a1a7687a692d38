//! Error types shared across the replay crates.

use thiserror::Error;

/// Errors that can occur while loading a script or running the replay.
///
/// Frontend-specific errors compose this type via `#[from]` for
/// transparent `?` propagation.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The script feed could not be parsed.
    #[error("script parse error: {0}")]
    Script(#[from] serde_json::Error),

    /// The script file could not be read.
    #[error("failed to read script file {path}: {source}")]
    ScriptIo {
        /// Path that was attempted.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The monotone turn-id counter ran out of ids.
    #[error("turn id space exhausted")]
    TurnIdExhausted,
}

/// Convenience alias for results using [`ReplayError`].
pub type ReplayResult<T> = Result<T, ReplayError>;
