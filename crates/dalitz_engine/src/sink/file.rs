//! File-backed dataset writer.
//!
//! Both formats carry one record type with a single two-element `XY` field:
//!
//! ```text
//! CSV:         XY[0],XY[1]
//!              0.123,-0.456
//! JSON lines:  {"XY":[0.123,-0.456]}
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::EventSink;
use crate::error::SinkError;
use crate::kinematics::AcceptedEvent;

/// Column names of the CSV layout.
pub const CSV_HEADER: [&str; 2] = ["XY[0]", "XY[1]"];

/// On-disk layout of a dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// Comma-separated values with an `XY[0],XY[1]` header.
    #[default]
    Csv,
    /// One `{"XY":[x,y]}` object per line.
    #[serde(alias = "jsonl")]
    JsonLines,
}

impl DatasetFormat {
    /// Guesses the format from a file extension; `.jsonl`/`.json` give
    /// [`DatasetFormat::JsonLines`], anything else CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("json") => {
                Self::JsonLines
            }
            _ => Self::Csv,
        }
    }
}

impl FromStr for DatasetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "jsonlines" | "jsonl" | "json" => Ok(Self::JsonLines),
            other => Err(format!(
                "Unknown dataset format: {}. Supported: csv, jsonl",
                other
            )),
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::JsonLines => write!(f, "jsonl"),
        }
    }
}

/// Serialised record: a single two-element floating-point array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct XyRecord {
    /// `[X, Y]` of the accepted event.
    #[serde(rename = "XY")]
    pub xy: [f64; 2],
}

impl From<AcceptedEvent> for XyRecord {
    fn from(event: AcceptedEvent) -> Self {
        Self { xy: event.xy() }
    }
}

impl From<XyRecord> for AcceptedEvent {
    fn from(record: XyRecord) -> Self {
        AcceptedEvent::from(record.xy)
    }
}

enum Encoder<W: Write> {
    Csv(csv::Writer<W>),
    JsonLines(BufWriter<W>),
}

/// Streams records to any writer in the chosen format.
pub struct DatasetWriter<W: Write> {
    encoder: Encoder<W>,
    format: DatasetFormat,
    records: u64,
}

impl<W: Write> DatasetWriter<W> {
    /// Wraps `inner`; the CSV header is written immediately.
    pub fn new(inner: W, format: DatasetFormat) -> Result<Self, SinkError> {
        let encoder = match format {
            DatasetFormat::Csv => {
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(inner);
                writer.write_record(CSV_HEADER)?;
                Encoder::Csv(writer)
            }
            DatasetFormat::JsonLines => Encoder::JsonLines(BufWriter::new(inner)),
        };

        Ok(Self {
            encoder,
            format,
            records: 0,
        })
    }

    /// Format being written.
    pub fn format(&self) -> DatasetFormat {
        self.format
    }

    /// Records appended so far.
    pub fn records(&self) -> u64 {
        self.records
    }
}

impl<W: Write> EventSink for DatasetWriter<W> {
    fn write(&mut self, event: AcceptedEvent) -> Result<(), SinkError> {
        match &mut self.encoder {
            Encoder::Csv(writer) => writer.serialize((event.x, event.y))?,
            Encoder::JsonLines(writer) => {
                serde_json::to_writer(&mut *writer, &XyRecord::from(event))?;
                writer.write_all(b"\n")?;
            }
        }
        self.records += 1;
        Ok(())
    }

    fn finish(self) -> Result<u64, SinkError> {
        match self.encoder {
            Encoder::Csv(mut writer) => writer.flush()?,
            Encoder::JsonLines(mut writer) => writer.flush()?,
        }
        debug!(records = self.records, format = %self.format, "dataset finalised");
        Ok(self.records)
    }
}

/// Dataset file that only appears at its final path once finalised.
///
/// Records go to a sibling `<path>.partial` file, which
/// [`finish`](EventSink::finish) renames onto `path`. A sink dropped without
/// being finalised removes the partial file, so a failed run never leaves a
/// short dataset behind.
pub struct FileSink {
    writer: Option<DatasetWriter<File>>,
    path: PathBuf,
    partial_path: PathBuf,
}

impl FileSink {
    /// Opens a fresh partial file for the dataset at `path`.
    ///
    /// # Errors
    ///
    /// [`SinkError::Create`] when the partial file cannot be opened for
    /// writing.
    pub fn create(path: impl AsRef<Path>, format: DatasetFormat) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let partial_path = partial_path(&path);
        let file = File::create(&partial_path).map_err(|source| SinkError::Create {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), %format, "dataset created");

        let mut sink = Self {
            writer: None,
            path,
            partial_path,
        };
        sink.writer = Some(DatasetWriter::new(file, format)?);
        Ok(sink)
    }

    /// Final dataset path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path records are written to until the sink is finalised.
    pub fn partial_path(&self) -> &Path {
        &self.partial_path
    }

    /// Records appended so far.
    pub fn records(&self) -> u64 {
        self.writer.as_ref().map_or(0, DatasetWriter::records)
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

impl EventSink for FileSink {
    fn write(&mut self, event: AcceptedEvent) -> Result<(), SinkError> {
        match self.writer.as_mut() {
            Some(writer) => writer.write(event),
            None => Err(SinkError::Io(std::io::Error::other("dataset already closed"))),
        }
    }

    fn finish(mut self) -> Result<u64, SinkError> {
        let Some(writer) = self.writer.take() else {
            return Err(SinkError::Io(std::io::Error::other("dataset already closed")));
        };
        let records = writer.finish()?;
        std::fs::rename(&self.partial_path, &self.path)?;
        debug!(path = %self.path.display(), records, "dataset committed");
        Ok(records)
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Unfinalised, or finalising failed before the rename.
        if self.partial_path.exists() {
            self.writer.take();
            if let Err(err) = std::fs::remove_file(&self.partial_path) {
                warn!(path = %self.partial_path.display(), %err, "could not remove partial dataset");
            } else {
                debug!(path = %self.partial_path.display(), "partial dataset removed");
            }
        }
    }
}

/// Reads a dataset written by [`DatasetWriter`].
pub fn read_dataset(
    path: impl AsRef<Path>,
    format: DatasetFormat,
) -> Result<Vec<AcceptedEvent>, SinkError> {
    let file = File::open(path.as_ref())?;

    match format {
        DatasetFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .from_reader(file);
            reader
                .deserialize::<(f64, f64)>()
                .map(|row| -> Result<AcceptedEvent, SinkError> {
                    let (x, y) = row?;
                    Ok(AcceptedEvent { x, y })
                })
                .collect()
        }
        DatasetFormat::JsonLines => BufReader::new(file)
            .lines()
            .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
            .map(|line| -> Result<AcceptedEvent, SinkError> {
                let record: XyRecord = serde_json::from_str(&line?)?;
                Ok(record.into())
            })
            .collect(),
    }
}
