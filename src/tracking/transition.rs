//! Per-color entry/exit state machine.
//!
//! Each color starts unseen. Its first sighting logs an `Entry`; every
//! later change of quadrant logs an `Exit` carrying the quadrant the ball
//! moved into. Repeated sightings in the same quadrant log nothing, and a
//! color that drops out of view keeps its last quadrant.

use super::quadrant::Quadrant;
use crate::events::{EventKind, EventRecord};
use crate::segmentation::BallColor;

/// Where a color was last seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackStatus {
    /// Not detected yet in this stream.
    #[default]
    Unseen,
    /// Last detected in this quadrant.
    InQuadrant(Quadrant),
}

/// Last known quadrant for every color.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackState {
    slots: [TrackStatus; BallColor::COUNT],
}

impl TrackState {
    /// Creates a state with every color unseen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status of `color`.
    #[inline]
    pub fn status(&self, color: BallColor) -> TrackStatus {
        self.slots[color.index()]
    }

    /// Last quadrant of `color`, if it has been seen.
    pub fn quadrant(&self, color: BallColor) -> Option<Quadrant> {
        match self.status(color) {
            TrackStatus::Unseen => None,
            TrackStatus::InQuadrant(q) => Some(q),
        }
    }

    fn set(&mut self, color: BallColor, quadrant: Quadrant) {
        self.slots[color.index()] = TrackStatus::InQuadrant(quadrant);
    }
}

/// Turns quadrant observations into events.
#[derive(Debug, Clone, Default)]
pub struct TransitionTracker {
    state: TrackState,
}

impl TransitionTracker {
    /// Creates a tracker with every color unseen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes tracking from an existing state.
    pub fn with_state(state: TrackState) -> Self {
        Self { state }
    }

    /// Feeds one observation and returns the event it produces, if any.
    pub fn observe(
        &mut self,
        color: BallColor,
        quadrant: Quadrant,
        frame_index: u64,
        timestamp: f64,
    ) -> Option<EventRecord> {
        let kind = match self.state.status(color) {
            TrackStatus::Unseen => EventKind::Entry,
            TrackStatus::InQuadrant(previous) if previous != quadrant => EventKind::Exit,
            TrackStatus::InQuadrant(_) => return None,
        };

        self.state.set(color, quadrant);

        let record = EventRecord {
            timestamp,
            frame_index,
            quadrant,
            color,
            kind,
        };
        tracing::debug!(
            %color,
            quadrant = quadrant.id(),
            %kind,
            frame = frame_index,
            "Quadrant transition"
        );
        Some(record)
    }

    /// Current state.
    pub fn state(&self) -> &TrackState {
        &self.state
    }

    /// Consumes the tracker, returning its state.
    pub fn into_state(self) -> TrackState {
        self.state
    }

    /// Forgets every color, as at stream start.
    pub fn reset(&mut self) {
        self.state = TrackState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_sighting_is_entry() {
        let mut tracker = TransitionTracker::new();
        let event = tracker
            .observe(BallColor::Red, Quadrant::Third, 1, 0.1)
            .unwrap();

        assert_eq!(event.kind, EventKind::Entry);
        assert_eq!(event.quadrant, Quadrant::Third);
        assert_eq!(tracker.state().quadrant(BallColor::Red), Some(Quadrant::Third));
    }

    #[test]
    fn test_same_quadrant_is_suppressed() {
        let mut tracker = TransitionTracker::new();
        tracker.observe(BallColor::Green, Quadrant::First, 1, 0.1);

        for frame in 2..10 {
            assert!(tracker
                .observe(BallColor::Green, Quadrant::First, frame, frame as f64 / 10.0)
                .is_none());
        }
    }

    #[test]
    fn test_change_is_exit_with_new_quadrant() {
        let mut tracker = TransitionTracker::new();
        tracker.observe(BallColor::Blue, Quadrant::First, 1, 0.1);

        let event = tracker
            .observe(BallColor::Blue, Quadrant::Second, 2, 0.2)
            .unwrap();
        assert_eq!(event.kind, EventKind::Exit);
        assert_eq!(event.quadrant, Quadrant::Second);
    }

    #[test]
    fn test_colors_are_independent() {
        let mut tracker = TransitionTracker::new();
        tracker.observe(BallColor::Red, Quadrant::First, 1, 0.1);

        let event = tracker
            .observe(BallColor::Green, Quadrant::First, 1, 0.1)
            .unwrap();
        assert_eq!(event.kind, EventKind::Entry);
        assert_eq!(tracker.state().status(BallColor::Blue), TrackStatus::Unseen);
    }

    #[test]
    fn test_reset_returns_to_unseen() {
        let mut tracker = TransitionTracker::new();
        tracker.observe(BallColor::Red, Quadrant::Fourth, 1, 0.1);
        tracker.reset();

        assert_eq!(tracker.state(), &TrackState::new());
        let event = tracker
            .observe(BallColor::Red, Quadrant::Fourth, 2, 0.2)
            .unwrap();
        assert_eq!(event.kind, EventKind::Entry);
    }

    #[test]
    fn test_state_round_trip() {
        let mut tracker = TransitionTracker::new();
        tracker.observe(BallColor::Red, Quadrant::Second, 1, 0.1);

        let mut resumed = TransitionTracker::with_state(tracker.into_state());
        assert!(resumed
            .observe(BallColor::Red, Quadrant::Second, 2, 0.2)
            .is_none());
    }

    fn color_strategy() -> impl Strategy<Value = BallColor> {
        prop::sample::select(BallColor::ALL.to_vec())
    }

    fn quadrant_strategy() -> impl Strategy<Value = Quadrant> {
        prop::sample::select(Quadrant::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_events_follow_quadrant_changes(
            observations in prop::collection::vec((color_strategy(), quadrant_strategy()), 0..200)
        ) {
            let mut tracker = TransitionTracker::new();
            let mut seen = [None::<Quadrant>; BallColor::COUNT];

            for (i, (color, quadrant)) in observations.into_iter().enumerate() {
                let event = tracker.observe(color, quadrant, i as u64 + 1, 0.0);
                let previous = seen[color.index()];

                match previous {
                    None => {
                        let event = event.expect("first sighting must log");
                        prop_assert_eq!(event.kind, EventKind::Entry);
                    }
                    Some(q) if q == quadrant => prop_assert!(event.is_none()),
                    Some(_) => {
                        let event = event.expect("quadrant change must log");
                        prop_assert_eq!(event.kind, EventKind::Exit);
                        prop_assert_eq!(event.quadrant, quadrant);
                    }
                }
                seen[color.index()] = Some(quadrant);
            }
        }
    }
}
