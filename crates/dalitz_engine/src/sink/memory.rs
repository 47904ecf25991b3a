//! In-memory sink.

use super::EventSink;
use crate::error::SinkError;
use crate::kinematics::AcceptedEvent;

/// Collects events in a vector.
///
/// Pass `&mut MemorySink` to a generator to inspect the events afterwards.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::kinematics::AcceptedEvent;
/// use dalitz_engine::sink::{EventSink, MemorySink};
///
/// let mut sink = MemorySink::new();
/// sink.write(AcceptedEvent { x: 0.1, y: 0.2 }).unwrap();
/// assert_eq!((&mut sink).finish().unwrap(), 1);
/// assert_eq!(sink.finish_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    events: Vec<AcceptedEvent>,
    finish_count: u32,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink with room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            finish_count: 0,
        }
    }

    /// Events written so far, in write order.
    pub fn events(&self) -> &[AcceptedEvent] {
        &self.events
    }

    /// Consumes the sink, returning its events.
    pub fn into_events(self) -> Vec<AcceptedEvent> {
        self.events
    }

    /// Number of events written.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event has been written.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// How many times the sink was finalised through `&mut MemorySink`.
    pub fn finish_count(&self) -> u32 {
        self.finish_count
    }
}

impl EventSink for MemorySink {
    fn write(&mut self, event: AcceptedEvent) -> Result<(), SinkError> {
        self.events.push(event);
        Ok(())
    }

    fn finish(self) -> Result<u64, SinkError> {
        Ok(self.events.len() as u64)
    }
}

impl EventSink for &mut MemorySink {
    fn write(&mut self, event: AcceptedEvent) -> Result<(), SinkError> {
        self.events.push(event);
        Ok(())
    }

    fn finish(self) -> Result<u64, SinkError> {
        self.finish_count += 1;
        Ok(self.events.len() as u64)
    }
}
