//! End-to-end tests for the CLI commands against temporary datasets.

use std::io::Write;

use dalitz_engine::sink::{read_dataset, DatasetFormat};
use service_cli::commands::{check, generate, inspect};
use service_cli::config::{build_config_with_env, CliArgs, RunConfig};
use service_cli::CliError;
use tempfile::{tempdir, NamedTempFile};

fn no_env(_: &str) -> Option<String> {
    None
}

// ========================================
// generate
// ========================================

#[test]
fn test_generate_writes_requested_count() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("perturbed.csv");

    let config = RunConfig {
        events: 500,
        seed: 11,
        output: output.clone(),
        ..Default::default()
    };

    let summary = generate::run(&config).unwrap();
    assert_eq!(summary.events_written, 500);
    assert!(summary.statistics.attempts >= 500);

    let events = read_dataset(&output, DatasetFormat::Csv).unwrap();
    assert_eq!(events.len(), 500);
}

#[test]
fn test_generate_is_reproducible_across_formats() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("a.csv");
    let jsonl = dir.path().join("a.jsonl");

    for output in [&csv, &jsonl] {
        let config = RunConfig {
            events: 200,
            seed: 5,
            output: output.clone(),
            ..Default::default()
        };
        generate::run(&config).unwrap();
    }

    let from_csv = read_dataset(&csv, DatasetFormat::Csv).unwrap();
    let from_jsonl = read_dataset(&jsonl, DatasetFormat::JsonLines).unwrap();
    assert_eq!(from_csv.len(), 200);
    for (a, b) in from_csv.iter().zip(&from_jsonl) {
        assert!((a.x - b.x).abs() < 1e-12);
        assert!((a.y - b.y).abs() < 1e-12);
    }
}

#[test]
fn test_generate_unwritable_output_fails() {
    let dir = tempdir().unwrap();
    let config = RunConfig {
        events: 10,
        output: dir.path().join("missing").join("out.csv"),
        ..Default::default()
    };

    let result = generate::run(&config);
    assert!(matches!(result, Err(CliError::Sink(_))));
}

#[test]
fn test_generate_retry_cap_leaves_no_dataset() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("capped.csv");
    let config = RunConfig {
        events: 10_000,
        max_attempts: Some(1),
        output: output.clone(),
        ..Default::default()
    };

    let result = generate::run(&config);
    assert!(matches!(result, Err(CliError::Generation(_))));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_generate_rejects_bad_mapping_before_writing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("never.csv");
    let mut config = RunConfig {
        events: 10,
        output: output.clone(),
        ..Default::default()
    };
    config.mapping.k2 = 1.0e6;

    let result = generate::run(&config);
    assert!(matches!(result, Err(CliError::Parameters(_))));
    assert!(!output.exists());
}

#[test]
fn test_generate_parallel_workers() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("parallel.jsonl");
    let config = RunConfig {
        events: 1_000,
        workers: 3,
        batch_size: 128,
        output: output.clone(),
        ..Default::default()
    };

    let summary = generate::run(&config).unwrap();
    assert_eq!(summary.events_written, 1_000);
    let events = read_dataset(&output, DatasetFormat::JsonLines).unwrap();
    assert_eq!(events.len(), 1_000);
}

// ========================================
// check / inspect
// ========================================

#[test]
fn test_check_missing_output_directory() {
    let config = RunConfig {
        output: "/no/such/directory/out.csv".into(),
        ..Default::default()
    };
    assert!(matches!(check::run(&config), Err(CliError::FileNotFound(_))));
}

#[test]
fn test_check_default_config() {
    assert!(check::run(&RunConfig::default()).is_ok());
}

#[test]
fn test_inspect_generated_dataset() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("inspect.csv");
    let config = RunConfig {
        events: 300,
        output: output.clone(),
        ..Default::default()
    };
    generate::run(&config).unwrap();

    let report = inspect::run(&output, None).unwrap();
    assert_eq!(report.count, 300);
    assert!(report.max_radius <= 2.0);
    assert!(report.mean_x.is_finite());
    assert!(report.mean_y.is_finite());
}

// ========================================
// configuration sources
// ========================================

#[test]
fn test_config_file_then_cli() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
events = 42
seed = 7
output = "from_file.jsonl"

[decay]
energy_budget = 80.0
"#
    )
    .unwrap();

    let cli = CliArgs {
        config_file: Some(file.path().to_path_buf()),
        seed: Some(8),
        ..Default::default()
    };

    let config = build_config_with_env(&cli, no_env).unwrap();
    assert_eq!(config.events, 42);
    assert_eq!(config.seed, 8);
    assert_eq!(config.dataset_format(), DatasetFormat::JsonLines);

    // Q is taken as given even when it disagrees with the masses.
    let params = config.decay_parameters().unwrap();
    assert_eq!(params.energy_budget(), 80.0);
    assert!(!params.is_budget_consistent());
}

#[test]
fn test_invalid_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "events = \"lots\"").unwrap();

    let cli = CliArgs {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(build_config_with_env(&cli, no_env).is_err());
}
