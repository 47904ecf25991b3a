//! Dalitz CLI - command line front end for the Dalitz sampler
//!
//! Resolves a [`config::RunConfig`] from defaults, a TOML file, `DALITZ_*`
//! environment variables and flags, then hands it to `dalitz_engine`.
//!
//! # Commands
//!
//! - `dalitz generate` - Generate accepted (X, Y) points into a dataset
//! - `dalitz check` - Validate the resolved configuration
//! - `dalitz inspect <file>` - Summarise an existing dataset

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};

/// Crate version reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
