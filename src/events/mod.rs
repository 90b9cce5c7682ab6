//! Quadrant events and the run's event log.

mod event_log;
mod record;

pub use event_log::{EventLog, OutputError, HEADER};
pub use record::{EventKind, EventRecord};
