//! Error types for the chaos bag core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for chaos bag operations.
pub type BagResult<T> = Result<T, BagError>;

/// Errors that can occur while configuring or driving the chaos bag.
///
/// Every variant is recoverable: the operation that produced it left the
/// bag unchanged, so the caller can retry with corrected input.
#[derive(Debug, Error)]
pub enum BagError {
    /// No scenario with this id exists in the catalog.
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// No difficulty with this id exists in the selected scenario.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// A difficulty was requested before any scenario was selected.
    #[error("no scenario selected")]
    NoScenarioSelected,

    /// A preset operation was requested but no catalog is loaded.
    #[error("no preset catalog loaded")]
    NoCatalog,

    /// The preset document is malformed or violates the catalog invariants.
    #[error("invalid preset config: {0}")]
    InvalidConfig(String),

    /// The preset document could not be read.
    #[error("failed to read presets from {path}: {source}")]
    ConfigIo {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A token id is not part of the active table.
    #[error("unknown token: {0}")]
    UnknownToken(String),

    /// The profile roster is already at capacity.
    #[error("profile limit reached ({0} profiles)")]
    ProfileLimit(usize),

    /// No profile exists at this (1-based) position.
    #[error("no profile #{0}")]
    UnknownProfile(usize),

    /// The last remaining profile cannot be removed.
    #[error("cannot remove the last profile")]
    LastProfile,

    /// A session command was recognised but its arguments were not.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// A session command was not recognised.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
