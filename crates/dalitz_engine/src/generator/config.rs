//! Event generation configuration.
//!
//! Built through [`GeneratorConfig::builder`] and validated at build time.

use crate::constants::{DalitzMapping, DecayParameters};
use crate::error::ConfigError;
use crate::kinematics::DalitzKinematics;

/// Maximum number of events in one run.
pub const MAX_EVENTS: u64 = 10_000_000_000;

/// Events produced per worker between two sink writes in a parallel run.
pub const DEFAULT_BATCH_SIZE: usize = 65_536;

/// Immutable generation configuration.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::builder()
///     .n_events(10_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_events(), 10_000);
/// assert_eq!(config.max_attempts(), None);
/// assert_eq!(config.n_workers(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    n_events: u64,
    seed: u64,
    max_attempts: Option<u64>,
    n_workers: usize,
    batch_size: usize,
    progress_interval: u64,
    kinematics: DalitzKinematics,
}

impl GeneratorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Target number of accepted events.
    #[inline]
    pub fn n_events(&self) -> u64 {
        self.n_events
    }

    /// Base seed of the random source.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Retry cap per event; `None` retries without bound.
    #[inline]
    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Number of independent worker streams.
    #[inline]
    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    /// Events per worker between two sink writes.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Events between two progress log lines.
    #[inline]
    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }

    /// Decay parameters and mapping.
    #[inline]
    pub fn kinematics(&self) -> &DalitzKinematics {
        &self.kinematics
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_events` is 0 or greater than [`MAX_EVENTS`]
    /// - `n_workers` is 0
    /// - `max_attempts` is `Some(0)`
    /// - `batch_size` or `progress_interval` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_events == 0 || self.n_events > MAX_EVENTS {
            return Err(ConfigError::InvalidEventCount(self.n_events));
        }
        if self.n_workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.n_workers));
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::InvalidRetryCap(0));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "batch_size",
                value: "must be at least 1".to_string(),
            });
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "progress_interval",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`GeneratorConfig`].
///
/// Unset physical constants fall back to the reference decay.
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfigBuilder {
    n_events: Option<u64>,
    seed: u64,
    max_attempts: Option<u64>,
    n_workers: Option<usize>,
    batch_size: Option<usize>,
    progress_interval: Option<u64>,
    params: Option<DecayParameters>,
    mapping: Option<DalitzMapping>,
}

impl GeneratorConfigBuilder {
    /// Sets the target number of accepted events.
    #[inline]
    pub fn n_events(mut self, n_events: u64) -> Self {
        self.n_events = Some(n_events);
        self
    }

    /// Sets the base seed (default 0).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Caps the attempts per event.
    #[inline]
    pub fn max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets an optional retry cap; `None` keeps retries unbounded.
    #[inline]
    pub fn retry_cap(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the number of worker streams (default 1).
    #[inline]
    pub fn n_workers(mut self, n_workers: usize) -> Self {
        self.n_workers = Some(n_workers);
        self
    }

    /// Sets the per-worker batch size of parallel runs.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Sets the number of events between progress log lines.
    #[inline]
    pub fn progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = Some(progress_interval);
        self
    }

    /// Sets the decay parameters.
    #[inline]
    pub fn params(mut self, params: DecayParameters) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets the mapping constants.
    #[inline]
    pub fn mapping(mut self, mapping: DalitzMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_events` is not set or any value is invalid.
    pub fn build(self) -> Result<GeneratorConfig, ConfigError> {
        let n_events = self.n_events.ok_or(ConfigError::InvalidParameter {
            name: "n_events",
            value: "must be specified".to_string(),
        })?;

        let config = GeneratorConfig {
            n_events,
            seed: self.seed,
            max_attempts: self.max_attempts,
            n_workers: self.n_workers.unwrap_or(1),
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            // Roughly ten progress lines per run.
            progress_interval: self
                .progress_interval
                .unwrap_or_else(|| (n_events / 10).max(1)),
            kinematics: DalitzKinematics::new(
                self.params.unwrap_or_default(),
                self.mapping.unwrap_or_default(),
            ),
        };

        config.validate()?;
        Ok(config)
    }
}
