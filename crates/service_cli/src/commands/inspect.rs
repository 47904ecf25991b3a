//! Inspect command implementation
//!
//! Reads a generated dataset back and summarises its points.

use std::path::Path;

use dalitz_engine::sink::{read_dataset, DatasetFormat};
use dalitz_engine::AcceptedEvent;
use tracing::info;

use crate::{CliError, Result};

/// Summary of a dataset on disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InspectReport {
    /// Number of records.
    pub count: usize,
    /// Mean X over all records.
    pub mean_x: f64,
    /// Mean Y over all records.
    pub mean_y: f64,
    /// Largest distance from the origin.
    pub max_radius: f64,
}

impl InspectReport {
    /// Summarises a slice of events; means are zero for an empty slice.
    pub fn from_events(events: &[AcceptedEvent]) -> Self {
        let count = events.len();
        let (sum_x, sum_y, max_radius) =
            events
                .iter()
                .fold((0.0, 0.0, 0.0_f64), |(sx, sy, max_r), event| {
                    let r = event.x.hypot(event.y);
                    (sx + event.x, sy + event.y, max_r.max(r))
                });

        let (mean_x, mean_y) = if count > 0 {
            (sum_x / count as f64, sum_y / count as f64)
        } else {
            (0.0, 0.0)
        };

        Self {
            count,
            mean_x,
            mean_y,
            max_radius,
        }
    }
}

/// Run the inspect command
pub fn run(input: &Path, format: Option<DatasetFormat>) -> Result<InspectReport> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }

    let format = format.unwrap_or_else(|| DatasetFormat::from_path(input));
    info!("Reading {} ({})", input.display(), format);

    let events = read_dataset(input, format)?;
    let report = InspectReport::from_events(&events);

    println!("\n┌──────────────────────┬──────────────────┐");
    println!("│ Records              │ {:>16} │", report.count);
    println!("│ Mean X               │ {:>16.6} │", report.mean_x);
    println!("│ Mean Y               │ {:>16.6} │", report.mean_y);
    println!("│ Max radius           │ {:>16.6} │", report.max_radius);
    println!("└──────────────────────┴──────────────────┘");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_events() {
        let events = vec![
            AcceptedEvent { x: 1.0, y: 0.0 },
            AcceptedEvent { x: -0.5, y: 1.0 },
            AcceptedEvent { x: 0.0, y: -2.0 },
        ];
        let report = InspectReport::from_events(&events);
        assert_eq!(report.count, 3);
        assert!((report.mean_x - 1.0 / 6.0).abs() < 1e-12);
        assert!((report.mean_y - (-1.0 / 3.0)).abs() < 1e-12);
        assert!((report.max_radius - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_empty() {
        let report = InspectReport::from_events(&[]);
        assert_eq!(report.count, 0);
        assert_eq!(report.mean_x, 0.0);
        assert_eq!(report.max_radius, 0.0);
    }

    #[test]
    fn test_missing_input() {
        let result = run(Path::new("/no/such/dataset.csv"), None);
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
