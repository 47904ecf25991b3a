//! Parallel event generation over independent substreams.
//!
//! The target count is split across workers; worker `i` owns a
//! [`DecayRng`] seeded with [`substream_seed`](crate::rng::substream_seed)`(seed, i)`.
//! Workers produce events in rounds of at most `batch_size` events each on
//! the Rayon pool, and every round is written to the sink in worker order.
//! Output is therefore deterministic for a fixed `(seed, n_workers,
//! batch_size)` and memory stays bounded by one round.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, error, info};

use super::config::GeneratorConfig;
use super::sequential::EventGenerator;
use super::stats::{RunStatistics, RunSummary};
use crate::error::GenerationError;
use crate::kinematics::AcceptedEvent;
use crate::rng::DecayRng;
use crate::sink::EventSink;

/// Splits `n_events` into `n_workers` shares; the first
/// `n_events % n_workers` shares take one extra event.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::generator::partition;
///
/// assert_eq!(partition(10, 3), vec![4, 3, 3]);
/// assert_eq!(partition(2, 4), vec![1, 1, 0, 0]);
/// ```
pub fn partition(n_events: u64, n_workers: usize) -> Vec<u64> {
    let n_workers = n_workers.max(1);
    let base = n_events / n_workers as u64;
    let extra = (n_events % n_workers as u64) as usize;

    (0..n_workers)
        .map(|worker| base + u64::from(worker < extra))
        .collect()
}

struct Worker {
    index: usize,
    generator: EventGenerator<DecayRng>,
    remaining: u64,
    buffer: Vec<AcceptedEvent>,
}

impl Worker {
    fn fill(&mut self, batch_size: usize) -> Result<(), GenerationError> {
        self.buffer.clear();
        let round = self.remaining.min(batch_size as u64);
        for _ in 0..round {
            let event = self.generator.next_event().map_err(|err| {
                error!(worker = self.index, %err, "worker stopped");
                err
            })?;
            self.buffer.push(event);
        }
        self.remaining -= round;
        Ok(())
    }
}

/// Generator distributing the run over independent worker streams.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::generator::{GeneratorConfig, ParallelGenerator};
/// use dalitz_engine::sink::MemorySink;
///
/// let config = GeneratorConfig::builder()
///     .n_events(1_000)
///     .n_workers(4)
///     .seed(3)
///     .build()
///     .unwrap();
///
/// let mut sink = MemorySink::new();
/// let summary = ParallelGenerator::new(config).run(&mut sink).unwrap();
/// assert_eq!(summary.events_written, 1_000);
/// ```
pub struct ParallelGenerator {
    config: GeneratorConfig,
}

impl ParallelGenerator {
    /// Creates a parallel generator for `config`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates all events into `sink` and finalises it once.
    ///
    /// On error the sink is dropped without being finalised.
    pub fn run<K: EventSink>(&self, mut sink: K) -> Result<RunSummary, GenerationError> {
        let start = Instant::now();
        let config = &self.config;
        let n_workers = config.n_workers();
        let batch_size = config.batch_size();

        let mut workers: Vec<Worker> = partition(config.n_events(), n_workers)
            .into_iter()
            .enumerate()
            .map(|(index, remaining)| {
                let rng = DecayRng::for_worker(config.seed(), index, n_workers);
                debug!(worker = index, seed = rng.seed(), events = remaining, "worker partition");
                Worker {
                    index,
                    generator: EventGenerator::with_source(config, rng),
                    remaining,
                    buffer: Vec::with_capacity(remaining.min(batch_size as u64) as usize),
                }
            })
            .collect();

        info!(
            n_events = config.n_events(),
            n_workers,
            batch_size,
            "starting parallel event generation"
        );

        let mut events_written: u64 = 0;
        let mut next_progress = config.progress_interval();
        while workers.iter().any(|worker| worker.remaining > 0) {
            workers
                .par_iter_mut()
                .try_for_each(|worker| worker.fill(batch_size))?;

            for worker in &mut workers {
                for event in worker.buffer.drain(..) {
                    sink.write(event)?;
                    events_written += 1;
                }
            }

            if events_written >= next_progress {
                info!(events_written, n_events = config.n_events(), "progress");
                while next_progress <= events_written {
                    next_progress += config.progress_interval();
                }
            }
        }

        let finalised = sink.finish()?;
        debug_assert_eq!(finalised, events_written);

        let mut statistics = RunStatistics::default();
        for worker in &workers {
            statistics.merge(worker.generator.statistics());
        }

        let summary = RunSummary {
            events_written,
            statistics,
            elapsed: start.elapsed(),
        };
        info!(
            events_written,
            attempts = statistics.attempts,
            acceptance_rate = statistics.acceptance_rate(),
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "parallel event generation complete"
        );
        Ok(summary)
    }
}
