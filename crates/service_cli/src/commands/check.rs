//! Check command implementation
//!
//! Resolves and validates the run configuration without drawing any event.

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &RunConfig) -> Result<()> {
    info!("Checking configuration...");

    let generator_config = config.generator_config()?;
    let params = generator_config.kinematics().params();
    let mapping = generator_config.kinematics().mapping();

    if let Some(parent) = config.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(CliError::FileNotFound(parent.display().to_string()));
        }
    }

    if !params.is_budget_consistent() {
        warn!(
            "Energy budget Q = {} differs from parent minus daughters = {}",
            params.energy_budget(),
            params.nominal_energy_budget()
        );
    }

    println!("\n┌──────────────────────┬──────────────────────────────┐");
    println!("│ Events               │ {:>28} │", generator_config.n_events());
    println!("│ Seed                 │ {:>28} │", generator_config.seed());
    println!("│ Workers              │ {:>28} │", generator_config.n_workers());
    println!("│ Batch size           │ {:>28} │", generator_config.batch_size());
    println!(
        "│ Retry cap            │ {:>28} │",
        generator_config
            .max_attempts()
            .map_or_else(|| "none".to_string(), |cap| cap.to_string())
    );
    println!(
        "│ Output               │ {:>28} │",
        format!("{} ({})", config.output.display(), config.dataset_format())
    );
    println!("├──────────────────────┼──────────────────────────────┤");
    println!("│ Parent mass (MeV)    │ {:>28} │", params.parent_mass());
    println!(
        "│ Daughter masses      │ {:>28} │",
        format!("{:?}", params.daughter_masses())
    );
    println!("│ Q (MeV)              │ {:>28} │", params.energy_budget());
    println!("│ K1, K2               │ {:>28} │", format!("{}, {}", mapping.k1(), mapping.k2()));
    println!(
        "│ a, b, c              │ {:>28} │",
        format!("{}, {}, {}", mapping.a(), mapping.b(), mapping.c())
    );
    println!("│ Disc radius          │ {:>28.6} │", mapping.max_radius());
    println!("└──────────────────────┴──────────────────────────────┘");

    info!("Configuration OK");
    Ok(())
}
