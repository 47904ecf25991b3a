//! CLI error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `dalitz` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file, environment or flag problem.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Physical constants or generator settings rejected by the engine.
    #[error("Invalid generator parameters: {0}")]
    Parameters(#[from] dalitz_engine::ConfigError),

    /// Dataset could not be created, written or read.
    #[error("Dataset error: {0}")]
    Sink(#[from] dalitz_engine::SinkError),

    /// Generation stopped before the target count.
    #[error("Generation failed: {0}")]
    Generation(#[from] dalitz_engine::GenerationError),

    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
