//! Quadrant resolution and entry/exit tracking.

mod quadrant;
mod transition;

pub use quadrant::{Quadrant, QuadrantLayout};
pub use transition::{TrackState, TrackStatus, TransitionTracker};
