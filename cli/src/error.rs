//! Error types for the CLI

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// The request document is not a valid grid request
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    /// Compiling or running the request failed
    #[error(transparent)]
    Grid(#[from] gridquery_core::GridError),

    /// Neither the config nor the command line names a database
    #[error("No database configured; set `database` in the config or pass --database")]
    NoDatabase,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
