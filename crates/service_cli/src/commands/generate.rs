//! Generate command implementation
//!
//! Runs the rejection sampler and writes accepted (X, Y) points to the
//! configured dataset.

use dalitz_engine::generator::RunSummary;
use dalitz_engine::{generate, FileSink};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::Result;

/// Run the generate command
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let generator_config = config.generator_config()?;
    let params = generator_config.kinematics().params();
    let format = config.dataset_format();

    if !params.is_budget_consistent() {
        warn!(
            energy_budget = params.energy_budget(),
            nominal = params.nominal_energy_budget(),
            "Energy budget differs from parent minus daughter masses"
        );
    }

    info!("Starting generation...");
    info!("  Events: {}", generator_config.n_events());
    info!("  Seed: {}", generator_config.seed());
    info!("  Workers: {}", generator_config.n_workers());
    info!("  Output: {} ({})", config.output.display(), format);
    match generator_config.max_attempts() {
        Some(cap) => info!("  Retry cap: {}", cap),
        None => info!("  Retry cap: none"),
    }

    let sink = FileSink::create(&config.output, format)?;
    let summary = generate(&generator_config, sink)?;

    info!(
        events = summary.events_written,
        attempts = summary.statistics.attempts,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Generation complete"
    );

    print_summary(&summary);
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.statistics;
    println!("\n┌──────────────────────┬──────────────────┐");
    println!("│ Events written       │ {:>16} │", summary.events_written);
    println!("│ Candidates drawn     │ {:>16} │", stats.attempts);
    println!("│ Acceptance rate      │ {:>16.4} │", stats.acceptance_rate());
    println!("├──────────────────────┼──────────────────┤");
    println!("│ Rejected: T1 < 0     │ {:>16} │", stats.negative_t1);
    println!("│ Rejected: T2 < 0     │ {:>16} │", stats.negative_t2);
    println!("│ Rejected: T1+T2 > Q  │ {:>16} │", stats.exceeds_budget);
    println!("│ Rejected: unclosed   │ {:>16} │", stats.unclosed);
    println!("├──────────────────────┼──────────────────┤");
    println!("│ Elapsed (s)          │ {:>16.3} │", summary.elapsed.as_secs_f64());
    println!("│ Events per second    │ {:>16.0} │", summary.throughput());
    println!("└──────────────────────┴──────────────────┘");
}
