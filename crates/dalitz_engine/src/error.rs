//! Error types for the Dalitz sampling engine.
//!
//! Three concerns are kept apart:
//!
//! - [`ConfigError`]: rejected before any draw is made
//! - [`SinkError`]: dataset creation, writing and finalisation
//! - [`GenerationError`]: failures while the generator is running

use std::path::PathBuf;

use thiserror::Error;

/// Configuration error for the generator and its physical constants.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Event count outside the valid range.
    #[error("Invalid event count {0}: must be in range [1, 10_000_000_000]")]
    InvalidEventCount(u64),

    /// Worker count of zero.
    #[error("Invalid worker count {0}: must be at least 1")]
    InvalidWorkerCount(usize),

    /// Retry cap of zero.
    #[error("Invalid retry cap {0}: must be at least 1 when set")]
    InvalidRetryCap(u64),

    /// Radial transform would take the square root of a negative number.
    #[error("Radial transform undefined: K2 = {k2} exceeds K1² for K1 = {k1}")]
    RadialDomain {
        /// Radial constant K1.
        k1: f64,
        /// Radial constant K2.
        k2: f64,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Dataset sink error.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Output file could not be created or truncated.
    #[error("Cannot create dataset {path}: {source}")]
    Create {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while appending or flushing.
    #[error("Dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error raised while generating events.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Configured retry cap reached without an accepted candidate.
    #[error("Event {event_index} not accepted after {attempts} attempts")]
    RetryLimitExceeded {
        /// Zero-based index of the event being sampled.
        event_index: u64,
        /// Attempts made for that event.
        attempts: u64,
    },

    /// Dataset sink failure.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}
