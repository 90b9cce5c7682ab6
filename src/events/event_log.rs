//! Append-only event log and its text serialization.

use super::record::EventRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// First line of every serialized log.
pub const HEADER: &str = "Time, Quadrant Number, Ball Colour, Type";

/// Errors that can occur while writing the event log.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The log file could not be created.
    #[error("failed to create event log '{path}': {source}")]
    Create {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Writing to the log failed.
    #[error("failed to write event log: {0}")]
    Write(#[from] io::Error),
}

/// Ordered, append-only sequence of events for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Records are never removed or reordered.
    pub fn append(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    /// Records in append order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the header, a newline, then the records joined by newlines.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writer.write_all(b"\n")?;
            }
            write!(writer, "{}", record)?;
        }
        writer.flush()
    }

    /// Renders the serialized log as a string.
    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        let lines: Vec<String> = self.records.iter().map(|r| r.to_string()).collect();
        out.push_str(&lines.join("\n"));
        out
    }

    /// Writes the log to a file, replacing any existing content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| OutputError::Create {
            path: path.display().to_string(),
            source,
        })?;
        self.write_to(BufWriter::new(file))?;
        tracing::info!(path = %path.display(), events = self.len(), "Event log saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::segmentation::BallColor;
    use crate::tracking::Quadrant;

    fn record(timestamp: f64, quadrant: Quadrant, kind: EventKind) -> EventRecord {
        EventRecord {
            timestamp,
            frame_index: (timestamp * 10.0) as u64,
            quadrant,
            color: BallColor::Red,
            kind,
        }
    }

    #[test]
    fn test_empty_log_is_header_only() {
        let log = EventLog::new();
        assert_eq!(log.render(), "Time, Quadrant Number, Ball Colour, Type\n");
    }

    #[test]
    fn test_records_joined_without_trailing_newline() {
        let mut log = EventLog::new();
        log.append(record(0.1, Quadrant::First, EventKind::Entry));
        log.append(record(0.6, Quadrant::Fourth, EventKind::Exit));

        assert_eq!(
            log.render(),
            "Time, Quadrant Number, Ball Colour, Type\n0.10, 1, red, Entry\n0.60, 4, red, Exit"
        );
    }

    #[test]
    fn test_write_to_matches_render() {
        let mut log = EventLog::new();
        log.append(record(0.1, Quadrant::First, EventKind::Entry));
        log.append(record(0.3, Quadrant::Second, EventKind::Exit));
        log.append(record(0.9, Quadrant::Third, EventKind::Exit));

        let mut buffer = Vec::new();
        log.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), log.render());

        let mut empty = Vec::new();
        EventLog::new().write_to(&mut empty).unwrap();
        assert_eq!(String::from_utf8(empty).unwrap(), EventLog::new().render());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = EventLog::new();
        log.append(record(0.2, Quadrant::Second, EventKind::Entry));
        log.append(record(0.1, Quadrant::First, EventKind::Exit));

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].quadrant, Quadrant::Second);
        assert_eq!(log.records()[1].quadrant, Quadrant::First);
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let err = EventLog::new()
            .save("/nonexistent/quadrant-tracker/events.txt")
            .unwrap_err();
        assert!(matches!(err, OutputError::Create { .. }));
    }
}
