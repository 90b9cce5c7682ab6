//! Destinations for annotated frames.

use crate::capture::{Frame, StreamMetadata};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing output frames.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The output could not be created.
    #[error("could not create output '{path}': {reason}")]
    CreateFailed {
        /// Destination path.
        path: String,
        /// Underlying cause.
        reason: String,
    },
    /// Writing or flushing a frame failed.
    #[error("failed to write frame: {0}")]
    WriteFailed(String),
    /// A frame does not match the stream geometry.
    #[error("frame is {got_width}x{got_height}, output expects {width}x{height}")]
    DimensionMismatch {
        /// Stream width.
        width: u32,
        /// Stream height.
        height: u32,
        /// Frame width.
        got_width: u32,
        /// Frame height.
        got_height: u32,
    },
    /// `write` was called before `begin`.
    #[error("sink not started")]
    NotStarted,
}

/// Trait for annotated frame consumers.
pub trait FrameSink {
    /// Prepares the sink for a stream with the given metadata.
    fn begin(&mut self, metadata: &StreamMetadata) -> Result<(), SinkError>;

    /// Writes one frame. Frames arrive in stream order.
    fn write(&mut self, frame: &Frame) -> Result<(), SinkError>;

    /// Flushes and releases resources.
    fn finish(&mut self) -> Result<(), SinkError>;
}

/// Writes frames as headerless BGR24, the same layout `RawVideoSource` reads.
pub struct RawVideoSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    dimensions: (u32, u32),
    frames_written: u64,
}

impl RawVideoSink {
    /// Creates a sink for `path`. The file is created by `begin`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: None,
            dimensions: (0, 0),
            frames_written: 0,
        }
    }

    /// Frames written since `begin`.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl FrameSink for RawVideoSink {
    fn begin(&mut self, metadata: &StreamMetadata) -> Result<(), SinkError> {
        let file = File::create(&self.path).map_err(|e| SinkError::CreateFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.writer = Some(BufWriter::new(file));
        self.dimensions = (metadata.width, metadata.height);
        self.frames_written = 0;
        tracing::info!(path = %self.path.display(), "Raw video output opened");
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), SinkError> {
        let (width, height) = self.dimensions;
        if frame.width() != width || frame.height() != height || !frame.is_valid() {
            return Err(SinkError::DimensionMismatch {
                width,
                height,
                got_width: frame.width(),
                got_height: frame.height(),
            });
        }
        let writer = self.writer.as_mut().ok_or(SinkError::NotStarted)?;
        writer
            .write_all(frame.pixels())
            .map_err(|e| SinkError::WriteFailed(e.to_string()))?;
        self.frames_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| SinkError::WriteFailed(e.to_string()))?;
            tracing::info!(
                path = %self.path.display(),
                frames = self.frames_written,
                "Raw video output closed"
            );
        }
        Ok(())
    }
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    frames: Vec<Frame>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames received, in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

impl FrameSink for MemorySink {
    fn begin(&mut self, _metadata: &StreamMetadata) -> Result<(), SinkError> {
        self.frames.clear();
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Discards frames, counting them.
#[derive(Debug, Default)]
pub struct NullSink {
    count: u64,
}

impl NullSink {
    /// Creates a sink with a zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames received since `begin`.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl FrameSink for NullSink {
    fn begin(&mut self, _metadata: &StreamMetadata) -> Result<(), SinkError> {
        self.count = 0;
        Ok(())
    }

    fn write(&mut self, _frame: &Frame) -> Result<(), SinkError> {
        self.count += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
