//! Frame source abstraction.
//!
//! A source is opened once, then pulled frame by frame until exhausted.
//! Streams are finite and cannot be rewound; reopening starts over.

use super::Frame;
use std::collections::VecDeque;
use thiserror::Error;

/// Errors that can occur while reading a frame stream.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be opened.
    #[error("could not open source '{source_name}': {reason}")]
    Unavailable {
        /// Name of the source, e.g. its path.
        source_name: String,
        /// Underlying cause.
        reason: String,
    },
    /// Geometry or frame rate cannot describe a stream.
    #[error("invalid stream metadata: {0}")]
    InvalidMetadata(String),
    /// Reading the next frame failed.
    #[error("failed to read frame: {0}")]
    ReadFailed(String),
    /// `read` was called before `open`.
    #[error("source not opened")]
    NotOpen,
}

/// Properties of an opened stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Declared frames per second.
    pub fps: f64,
    /// Total number of frames, when known up front.
    pub frame_count: Option<u64>,
}

impl StreamMetadata {
    /// Creates metadata for a stream of unknown length.
    pub fn new(width: u32, height: u32, fps: f64) -> Self {
        Self {
            width,
            height,
            fps,
            frame_count: None,
        }
    }

    /// Returns true if the geometry and frame rate can be used for tracking.
    pub fn is_usable(&self) -> bool {
        self.width > 0 && self.height > 0 && self.fps.is_finite() && self.fps > 0.0
    }
}

/// Trait for frame stream implementations.
///
/// Decoding lives behind this trait so the tracking core never depends
/// on a particular container or codec.
pub trait FrameSource {
    /// Human-readable name of the source, used in error reports.
    fn name(&self) -> &str;

    /// Opens the stream and returns its metadata.
    fn open(&mut self) -> Result<StreamMetadata, SourceError>;

    /// Reads the next frame, or `None` once the stream is exhausted.
    fn read(&mut self) -> Result<Option<Frame>, SourceError>;

    /// Checks if the source is currently open.
    fn is_open(&self) -> bool;

    /// Closes the source and releases resources.
    fn close(&mut self);

    /// Returns a pull iterator over the remaining frames.
    fn frames(&mut self) -> Frames<'_, Self>
    where
        Self: Sized,
    {
        Frames {
            source: self,
            done: false,
        }
    }
}

/// Iterator adapter over a [`FrameSource`].
///
/// Yields each frame once, stops after exhaustion or the first error.
pub struct Frames<'a, S: FrameSource> {
    source: &'a mut S,
    done: bool,
}

impl<S: FrameSource> Iterator for Frames<'_, S> {
    type Item = Result<Frame, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.read() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// In-memory source that replays a fixed list of frames.
#[derive(Debug)]
pub struct SyntheticSource {
    metadata: StreamMetadata,
    frames: Vec<Frame>,
    pending: VecDeque<Frame>,
    open: bool,
}

impl SyntheticSource {
    /// Creates a source that replays `frames` on every open.
    pub fn new(width: u32, height: u32, fps: f64, frames: Vec<Frame>) -> Self {
        let metadata = StreamMetadata {
            width,
            height,
            fps,
            frame_count: Some(frames.len() as u64),
        };
        Self {
            metadata,
            frames,
            pending: VecDeque::new(),
            open: false,
        }
    }

    /// Builds `count` frames by calling `make` with each 1-based frame index.
    pub fn from_fn(
        width: u32,
        height: u32,
        fps: f64,
        count: u64,
        make: impl FnMut(u64) -> Frame,
    ) -> Self {
        let frames = (1..=count).map(make).collect();
        Self::new(width, height, fps, frames)
    }
}

impl FrameSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn open(&mut self) -> Result<StreamMetadata, SourceError> {
        self.pending = self.frames.iter().cloned().collect();
        self.open = true;
        tracing::debug!(frames = self.frames.len(), "SyntheticSource opened");
        Ok(self.metadata)
    }

    fn read(&mut self) -> Result<Option<Frame>, SourceError> {
        if !self.open {
            return Err(SourceError::NotOpen);
        }
        Ok(self.pending.pop_front())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.pending.clear();
        self.open = false;
    }
}
