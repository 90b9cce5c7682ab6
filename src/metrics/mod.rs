//! Prometheus metrics for tracking runs.
//!
//! # Metrics Exposed
//!
//! - `quadrant_tracker_frames_total` - Frames processed
//! - `quadrant_tracker_degenerate_frames_total` - Frames skipped for detection
//! - `quadrant_tracker_blobs_total` - Blobs accepted after noise filtering
//! - `quadrant_tracker_noise_regions_total` - Regions discarded as noise
//! - `quadrant_tracker_entries_total` - Entry events logged
//! - `quadrant_tracker_exits_total` - Exit events logged
//!
//! # Example
//!
//! ```no_run
//! use quadrant_tracker::metrics::{MetricsRegistry, MetricsSnapshot};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//!
//! let snapshot = MetricsSnapshot {
//!     frames: 300,
//!     degenerate_frames: 0,
//!     blobs: 290,
//!     noise_regions: 12,
//!     entries: 3,
//!     exits: 7,
//! };
//!
//! registry.update(&snapshot);
//! println!("{}", registry.encode().unwrap());
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
