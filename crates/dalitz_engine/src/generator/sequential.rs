//! Sequential event generator: one stream, one sink.
//!
//! ```text
//! SAMPLING ──reject──► SAMPLING
//! SAMPLING ──accept──► RECORDED ──(events_written < n_events)──► SAMPLING
//!                          └──────(events_written == n_events)──► FINALISED
//! ```

use std::time::Instant;

use tracing::{info, warn};

use super::config::GeneratorConfig;
use super::stats::{RunStatistics, RunSummary};
use crate::error::GenerationError;
use crate::kinematics::{AcceptedEvent, Candidate, DalitzKinematics};
use crate::rng::{DecayRng, UniformSource};
use crate::sink::EventSink;

/// Rejection-sampling generator owning its random source.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::generator::{EventGenerator, GeneratorConfig};
/// use dalitz_engine::sink::MemorySink;
///
/// let config = GeneratorConfig::builder().n_events(100).seed(7).build().unwrap();
/// let mut sink = MemorySink::new();
///
/// let summary = EventGenerator::new(&config).run(&mut sink).unwrap();
/// assert_eq!(summary.events_written, 100);
/// assert_eq!(sink.len(), 100);
/// ```
pub struct EventGenerator<S: UniformSource = DecayRng> {
    kinematics: DalitzKinematics,
    n_events: u64,
    max_attempts: Option<u64>,
    progress_interval: u64,
    source: S,
    statistics: RunStatistics,
    events_generated: u64,
}

impl EventGenerator<DecayRng> {
    /// Creates a generator seeded with the configured seed.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self::with_source(config, DecayRng::from_seed(config.seed()))
    }
}

impl<S: UniformSource> EventGenerator<S> {
    /// Creates a generator driven by `source`.
    pub fn with_source(config: &GeneratorConfig, source: S) -> Self {
        Self {
            kinematics: *config.kinematics(),
            n_events: config.n_events(),
            max_attempts: config.max_attempts(),
            progress_interval: config.progress_interval(),
            source,
            statistics: RunStatistics::default(),
            events_generated: 0,
        }
    }

    /// Candidate counters so far.
    #[inline]
    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Accepted events produced so far.
    #[inline]
    pub fn events_generated(&self) -> u64 {
        self.events_generated
    }

    /// Draws `u1` then `u2` and evaluates one candidate.
    #[inline]
    pub fn next_candidate(&mut self) -> Candidate {
        let u1 = self.source.next_uniform();
        let u2 = self.source.next_uniform();
        let candidate = self.kinematics.evaluate(u1, u2);
        self.statistics.record(&candidate.verdict);
        candidate
    }

    /// Retries until a candidate is accepted.
    ///
    /// # Errors
    ///
    /// [`GenerationError::RetryLimitExceeded`] when a retry cap is configured
    /// and reached. Without a cap this loops until acceptance.
    pub fn next_event(&mut self) -> Result<AcceptedEvent, GenerationError> {
        let mut attempts: u64 = 0;
        loop {
            let candidate = self.next_candidate();
            attempts += 1;

            if let Some(event) = candidate.accepted_event() {
                self.events_generated += 1;
                return Ok(event);
            }

            if let Some(cap) = self.max_attempts {
                if attempts >= cap {
                    warn!(
                        event_index = self.events_generated,
                        attempts, "retry cap reached without an accepted candidate"
                    );
                    return Err(GenerationError::RetryLimitExceeded {
                        event_index: self.events_generated,
                        attempts,
                    });
                }
            }
        }
    }

    /// Generates the configured number of events into `sink` and finalises
    /// it once.
    ///
    /// On error the sink is dropped without being finalised.
    pub fn run<K: EventSink>(mut self, mut sink: K) -> Result<RunSummary, GenerationError> {
        let start = Instant::now();
        info!(
            n_events = self.n_events,
            max_attempts = ?self.max_attempts,
            "starting event generation"
        );

        let mut events_written: u64 = 0;
        while events_written < self.n_events {
            let event = self.next_event()?;
            sink.write(event)?;
            events_written += 1;

            if events_written % self.progress_interval == 0 {
                info!(
                    events_written,
                    n_events = self.n_events,
                    acceptance_rate = self.statistics.acceptance_rate(),
                    "progress"
                );
            }
        }

        let finalised = sink.finish()?;
        debug_assert_eq!(finalised, events_written);

        let summary = RunSummary {
            events_written,
            statistics: self.statistics,
            elapsed: start.elapsed(),
        };
        info!(
            events_written,
            attempts = summary.statistics.attempts,
            acceptance_rate = summary.statistics.acceptance_rate(),
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "event generation complete"
        );
        Ok(summary)
    }
}
