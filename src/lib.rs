//! Quadrant Tracker Library
//!
//! Tracks colored balls across a video split into four fixed quadrants and
//! produces a chronological log of quadrant entry/exit events per color.
//!
//! # Architecture
//!
//! Each frame flows through the same stages:
//!
//! ```text
//! capture → segmentation → extraction → tracking → events
//!                                            ↓
//!                           pipeline (annotation, output)
//! ```
//!
//! # Behavior
//!
//! - The first sighting of a color logs `Entry`; each later quadrant change
//!   logs `Exit` with the quadrant the ball moved *into*
//! - Staying in one quadrant logs nothing, and losing sight of a ball keeps
//!   its last quadrant
//! - Points on a quadrant divider belong to the lower-numbered quadrant
//!
//! # Example
//!
//! ```no_run
//! use quadrant_tracker::{
//!     capture::{DetectionConfig, RawVideoSource, StreamConfig},
//!     pipeline::{self, RawVideoSink},
//! };
//! use std::sync::atomic::AtomicBool;
//!
//! let mut source = RawVideoSource::new("input.bgr", StreamConfig::new(1280, 720, 30.0));
//! let mut sink = RawVideoSink::new("annotated.bgr");
//! let stop = AtomicBool::new(false);
//!
//! let summary = pipeline::run(&mut source, &mut sink, &DetectionConfig::default(), &stop)
//!     .unwrap();
//! summary.log.save("events.txt").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod events;
pub mod extraction;
pub mod metrics;
pub mod pipeline;
pub mod segmentation;
pub mod tracking;

// Re-export commonly used types at crate root
pub use capture::{DetectionConfig, FileConfig, Frame, FrameSource, StreamConfig, SyntheticSource};
pub use events::{EventKind, EventLog, EventRecord};
pub use extraction::{Blob, BlobExtractor, BlobPolicy};
pub use pipeline::{FrameProcessor, RunSummary};
pub use segmentation::{BallColor, ColorBand, ColorSegmenter};
pub use tracking::{Quadrant, QuadrantLayout, TransitionTracker};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
