//! Event record type.

use crate::segmentation::BallColor;
use crate::tracking::Quadrant;
use std::fmt;

/// Whether a color appeared for the first time or moved between quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// First sighting of a color.
    Entry,
    /// Move to a different quadrant.
    Exit,
}

impl EventKind {
    /// Name as written to the event log.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Entry => "Entry",
            EventKind::Exit => "Exit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged quadrant change.
///
/// `Display` renders the log line, with the timestamp fixed to two
/// decimals: `0.60, 4, red, Exit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRecord {
    /// Seconds since stream start (frame index / fps).
    pub timestamp: f64,
    /// 1-based index of the frame that produced the event.
    pub frame_index: u64,
    /// Quadrant the color is in after this event.
    pub quadrant: Quadrant,
    /// Color that moved.
    pub color: BallColor,
    /// Entry or exit.
    pub kind: EventKind,
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}, {}, {}, {}",
            self.timestamp, self.quadrant, self.color, self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let record = EventRecord {
            timestamp: 0.6,
            frame_index: 6,
            quadrant: Quadrant::Fourth,
            color: BallColor::Red,
            kind: EventKind::Exit,
        };
        assert_eq!(record.to_string(), "0.60, 4, red, Exit");
    }

    #[test]
    fn test_timestamp_rounds_to_two_places() {
        let record = EventRecord {
            timestamp: 1.0 / 3.0,
            frame_index: 1,
            quadrant: Quadrant::First,
            color: BallColor::Blue,
            kind: EventKind::Entry,
        };
        assert_eq!(record.to_string(), "0.33, 1, blue, Entry");
    }
}
