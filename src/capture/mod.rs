//! Frame input and stream configuration.
//!
//! This module provides the pull-based frame source abstraction the
//! tracking core reads from, plus the configuration types shared by the
//! rest of the pipeline. Decoding of compressed containers is left to
//! external tools; sources hand over already-decoded BGR frames.

mod config;
mod frame;
mod raw;
mod source;

pub use config::{ConfigError, DetectionConfig, FileConfig, StreamConfig};
pub use frame::{Frame, CHANNELS};
pub use raw::RawVideoSource;
pub use source::{FrameSource, Frames, SourceError, StreamMetadata, SyntheticSource};
