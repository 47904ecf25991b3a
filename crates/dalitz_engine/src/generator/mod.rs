//! Event Generator: the retry loop per event and the outer loop per run.
//!
//! # Architecture
//!
//! ```text
//! generate(config, sink)
//! ├── n_workers == 1 ─► EventGenerator     (one DecayRng stream)
//! └── n_workers  > 1 ─► ParallelGenerator  (one substream per worker, Rayon)
//!                              │
//!                              ▼
//!                        EventSink::write × n_events, then EventSink::finish
//! ```
//!
//! Retries are unbounded unless a cap is configured, in which case an event
//! that reaches the cap aborts the run with
//! [`GenerationError::RetryLimitExceeded`](crate::error::GenerationError::RetryLimitExceeded).

mod config;
mod parallel;
mod sequential;
mod stats;

pub use config::{GeneratorConfig, GeneratorConfigBuilder, DEFAULT_BATCH_SIZE, MAX_EVENTS};
pub use parallel::{partition, ParallelGenerator};
pub use sequential::EventGenerator;
pub use stats::{RunStatistics, RunSummary};

use crate::error::GenerationError;
use crate::sink::EventSink;

/// Runs the configured generation into `sink`, choosing the sequential or the
/// parallel generator from the worker count.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::generator::{generate, GeneratorConfig};
/// use dalitz_engine::sink::MemorySink;
///
/// let config = GeneratorConfig::builder().n_events(50).build().unwrap();
/// let mut sink = MemorySink::new();
/// let summary = generate(&config, &mut sink).unwrap();
///
/// assert_eq!(summary.events_written, 50);
/// assert_eq!(sink.finish_count(), 1);
/// ```
pub fn generate<K: EventSink>(
    config: &GeneratorConfig,
    sink: K,
) -> Result<RunSummary, GenerationError> {
    if config.n_workers() > 1 {
        ParallelGenerator::new(config.clone()).run(sink)
    } else {
        EventGenerator::new(config).run(sink)
    }
}
