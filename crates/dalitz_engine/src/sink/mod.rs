//! Dataset sinks for accepted events.
//!
//! A sink receives one `XY` record per accepted event and is finalised once
//! at the end of the run. [`EventSink::finish`] takes the sink by value, so a
//! finalised sink cannot be written to or finalised again.
//!
//! - [`MemorySink`]: keeps events in memory
//! - [`DatasetWriter`]: CSV or JSON lines over any writer
//! - [`FileSink`]: dataset file written beside its final path and moved into
//!   place, replacing any previous file, only when finalised

mod file;
mod memory;

pub use file::{read_dataset, DatasetFormat, DatasetWriter, FileSink, XyRecord, CSV_HEADER};
pub use memory::MemorySink;

use crate::error::SinkError;
use crate::kinematics::AcceptedEvent;

/// Destination of accepted events.
pub trait EventSink {
    /// Appends one record. Ownership of the event moves to the sink.
    fn write(&mut self, event: AcceptedEvent) -> Result<(), SinkError>;

    /// Flushes and closes the dataset, returning the number of records.
    fn finish(self) -> Result<u64, SinkError>
    where
        Self: Sized;
}
