//! Run configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! CLI arguments.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`DALITZ_*`)
//! 3. Config file
//! 4. Default values (reference K⁰ → 3π⁰ decay)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use dalitz_engine::constants::{
    DalitzMapping, DecayParameters, KAON_MASS_MEV, NEUTRAL_PION_MASS_MEV, REFERENCE_A,
    REFERENCE_B, REFERENCE_C, REFERENCE_ENERGY_BUDGET_MEV, REFERENCE_K1, REFERENCE_K2,
};
use dalitz_engine::generator::{GeneratorConfig, DEFAULT_BATCH_SIZE};
use dalitz_engine::sink::DatasetFormat;
use serde::Deserialize;
use thiserror::Error;

/// Default number of events for a CLI run.
pub const DEFAULT_EVENTS: u64 = 1_000_000;

/// Default dataset path.
pub const DEFAULT_OUTPUT: &str = "perturbed.csv";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid dataset format: {0}")]
    InvalidFormat(String),

    #[error("Invalid value for {var}: {value}")]
    EnvError { var: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Output path must not be empty")]
    EmptyOutputPath,
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[decay]` table: masses and energy budget in MeV.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecaySettings {
    pub parent_mass: f64,
    pub daughter_masses: [f64; 3],
    pub energy_budget: f64,
}

impl Default for DecaySettings {
    fn default() -> Self {
        Self {
            parent_mass: KAON_MASS_MEV,
            daughter_masses: [NEUTRAL_PION_MASS_MEV; 3],
            energy_budget: REFERENCE_ENERGY_BUDGET_MEV,
        }
    }
}

/// `[mapping]` table: radial and affine constants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingSettings {
    pub k1: f64,
    pub k2: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            k1: REFERENCE_K1,
            k2: REFERENCE_K2,
            a: REFERENCE_A,
            b: REFERENCE_B,
            c: REFERENCE_C,
        }
    }
}

/// Run configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Number of accepted events to write
    pub events: u64,
    /// Base seed of the random source
    pub seed: u64,
    /// Dataset path, replaced once the run completes
    pub output: PathBuf,
    /// Dataset format; guessed from the output extension when unset
    pub format: Option<DatasetFormat>,
    /// Worker streams; 0 means one per logical CPU
    pub workers: usize,
    /// Retry cap per event; unset retries without bound
    pub max_attempts: Option<u64>,
    /// Events per worker between two sink writes
    pub batch_size: usize,
    /// Log level
    pub log_level: LogLevel,
    /// Physical constants
    pub decay: DecaySettings,
    /// Mapping constants
    pub mapping: MappingSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            events: DEFAULT_EVENTS,
            seed: 0,
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: None,
            workers: 1,
            max_attempts: None,
            batch_size: DEFAULT_BATCH_SIZE,
            log_level: LogLevel::Info,
            decay: DecaySettings::default(),
            mapping: MappingSettings::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `DALITZ_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Override fields from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DALITZ_EVENTS") {
            self.events = parse_env("DALITZ_EVENTS", &value)?;
        }
        if let Some(value) = lookup("DALITZ_SEED") {
            self.seed = parse_env("DALITZ_SEED", &value)?;
        }
        if let Some(value) = lookup("DALITZ_OUTPUT") {
            self.output = PathBuf::from(value);
        }
        if let Some(value) = lookup("DALITZ_FORMAT") {
            self.format = Some(DatasetFormat::from_str(&value).map_err(ConfigError::InvalidFormat)?);
        }
        if let Some(value) = lookup("DALITZ_WORKERS") {
            self.workers = parse_env("DALITZ_WORKERS", &value)?;
        }
        if let Some(value) = lookup("DALITZ_MAX_ATTEMPTS") {
            self.max_attempts = Some(parse_env("DALITZ_MAX_ATTEMPTS", &value)?);
        }
        if let Some(value) = lookup("DALITZ_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(events) = cli.events {
            self.events = events;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if let Some(format) = &cli.format {
            self.format = Some(DatasetFormat::from_str(format).map_err(ConfigError::InvalidFormat)?);
        }
        if let Some(workers) = cli.workers {
            self.workers = workers;
        }
        if let Some(max_attempts) = cli.max_attempts {
            self.max_attempts = Some(max_attempts);
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }
        Ok(())
    }

    /// Dataset format, explicit or guessed from the output extension
    pub fn dataset_format(&self) -> DatasetFormat {
        self.format
            .unwrap_or_else(|| DatasetFormat::from_path(&self.output))
    }

    /// Worker count with 0 resolved to the number of logical CPUs
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    /// Validated physical constants
    pub fn decay_parameters(&self) -> Result<DecayParameters, dalitz_engine::ConfigError> {
        DecayParameters::new(
            self.decay.parent_mass,
            self.decay.daughter_masses,
            self.decay.energy_budget,
        )
    }

    /// Validated mapping constants
    pub fn dalitz_mapping(&self) -> Result<DalitzMapping, dalitz_engine::ConfigError> {
        let m = &self.mapping;
        DalitzMapping::new(m.k1, m.k2, m.a, m.b, m.c)
    }

    /// Engine configuration for this run
    pub fn generator_config(&self) -> Result<GeneratorConfig, dalitz_engine::ConfigError> {
        GeneratorConfig::builder()
            .n_events(self.events)
            .seed(self.seed)
            .retry_cap(self.max_attempts)
            .n_workers(self.resolved_workers())
            .batch_size(self.batch_size)
            .params(self.decay_parameters()?)
            .mapping(self.dalitz_mapping()?)
            .build()
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvError {
        var,
        value: value.to_string(),
    })
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Event count override
    pub events: Option<u64>,
    /// Seed override
    pub seed: Option<u64>,
    /// Output path override
    pub output: Option<PathBuf>,
    /// Dataset format override
    pub format: Option<String>,
    /// Worker count override
    pub workers: Option<usize>,
    /// Retry cap override
    pub max_attempts: Option<u64>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
pub fn build_config(cli: &CliArgs) -> Result<RunConfig, ConfigError> {
    build_config_with_env(cli, |var| std::env::var(var).ok())
}

/// Build configuration with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<RunConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.events, DEFAULT_EVENTS);
        assert_eq!(config.seed, 0);
        assert_eq!(config.output, PathBuf::from("perturbed.csv"));
        assert_eq!(config.dataset_format(), DatasetFormat::Csv);
        assert_eq!(config.workers, 1);
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.decay_parameters().unwrap(), DecayParameters::reference());
        assert_eq!(config.dalitz_mapping().unwrap(), DalitzMapping::reference());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            events = 5000
            seed = 17
            output = "out/events.jsonl"
            workers = 4
            max_attempts = 1000
            log_level = "debug"

            [decay]
            parent_mass = 493.677
            daughter_masses = [139.57, 139.57, 134.98]
            energy_budget = 79.557

            [mapping]
            k2 = 1000.0
        "#;

        let config: RunConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.events, 5000);
        assert_eq!(config.seed, 17);
        assert_eq!(config.dataset_format(), DatasetFormat::JsonLines);
        assert_eq!(config.workers, 4);
        assert_eq!(config.max_attempts, Some(1000));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.decay.daughter_masses, [139.57, 139.57, 134.98]);
        assert_eq!(config.mapping.k1, REFERENCE_K1);
        assert_eq!(config.mapping.k2, 1000.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<RunConfig, _> = toml::from_str("event_count = 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = RunConfig::default();
        config
            .apply_env_with(env(&[
                ("DALITZ_EVENTS", "250"),
                ("DALITZ_SEED", "9"),
                ("DALITZ_OUTPUT", "x.jsonl"),
                ("DALITZ_FORMAT", "csv"),
                ("DALITZ_MAX_ATTEMPTS", "64"),
            ]))
            .unwrap();

        assert_eq!(config.events, 250);
        assert_eq!(config.seed, 9);
        assert_eq!(config.output, PathBuf::from("x.jsonl"));
        assert_eq!(config.dataset_format(), DatasetFormat::Csv);
        assert_eq!(config.max_attempts, Some(64));
    }

    #[test]
    fn test_env_parse_error() {
        let mut config = RunConfig::default();
        let result = config.apply_env_with(env(&[("DALITZ_EVENTS", "many")]));
        assert!(matches!(
            result,
            Err(ConfigError::EnvError {
                var: "DALITZ_EVENTS",
                ..
            })
        ));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let cli = CliArgs {
            events: Some(10),
            seed: Some(3),
            format: Some("jsonl".to_string()),
            log_level: Some("warn".to_string()),
            ..Default::default()
        };

        let config =
            build_config_with_env(&cli, env(&[("DALITZ_EVENTS", "99"), ("DALITZ_SEED", "1")]))
                .unwrap();
        assert_eq!(config.events, 10);
        assert_eq!(config.seed, 3);
        assert_eq!(config.dataset_format(), DatasetFormat::JsonLines);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_invalid_cli_format() {
        let cli = CliArgs {
            format: Some("root".to_string()),
            ..Default::default()
        };
        let result = build_config_with_env(&cli, env(&[]));
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_output_rejected() {
        let cli = CliArgs {
            output: Some(PathBuf::new()),
            ..Default::default()
        };
        let result = build_config_with_env(&cli, env(&[]));
        assert!(matches!(result, Err(ConfigError::EmptyOutputPath)));
    }

    #[test]
    fn test_generator_config_validates_constants() {
        let mut config = RunConfig::default();
        config.mapping.k2 = 50_000.0;
        assert!(matches!(
            config.generator_config(),
            Err(dalitz_engine::ConfigError::RadialDomain { .. })
        ));

        let mut config = RunConfig::default();
        config.events = 0;
        assert!(matches!(
            config.generator_config(),
            Err(dalitz_engine::ConfigError::InvalidEventCount(0))
        ));
    }

    #[test]
    fn test_auto_workers() {
        let config = RunConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(config.resolved_workers() >= 1);
    }

    #[test]
    fn test_missing_config_file() {
        let result = RunConfig::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }
}
