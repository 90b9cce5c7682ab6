//! Raw BGR24 video file source.
//!
//! Reads headerless, tightly packed BGR frames such as those written by
//! `ffmpeg -i input.mp4 -f rawvideo -pix_fmt bgr24 frames.raw`. Geometry
//! and frame rate are not stored in the file and come from configuration.

use super::frame::CHANNELS;
use super::source::{FrameSource, SourceError, StreamMetadata};
use super::{Frame, StreamConfig};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Frame source backed by a raw BGR24 file.
pub struct RawVideoSource {
    path: PathBuf,
    name: String,
    config: StreamConfig,
    reader: Option<BufReader<File>>,
    sequence: u64,
}

impl RawVideoSource {
    /// Creates a source for `path`. The file is not touched until `open`.
    pub fn new(path: impl AsRef<Path>, config: StreamConfig) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            path,
            config,
            reader: None,
            sequence: 0,
        }
    }

    /// Size of one frame in bytes.
    pub fn frame_bytes(&self) -> usize {
        (self.config.width as usize) * (self.config.height as usize) * CHANNELS
    }

    fn unavailable(&self, reason: impl Into<String>) -> SourceError {
        SourceError::Unavailable {
            source_name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

impl FrameSource for RawVideoSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<StreamMetadata, SourceError> {
        self.config
            .validate()
            .map_err(|e| SourceError::InvalidMetadata(e.to_string()))?;

        let file = File::open(&self.path).map_err(|e| self.unavailable(e.to_string()))?;
        let len = file
            .metadata()
            .map_err(|e| self.unavailable(e.to_string()))?
            .len();

        let frame_bytes = self.frame_bytes() as u64;
        let frame_count = len / frame_bytes;
        if len % frame_bytes != 0 {
            tracing::warn!(
                source = %self.name,
                trailing_bytes = len % frame_bytes,
                "Input size is not a whole number of frames"
            );
        }

        self.reader = Some(BufReader::new(file));
        self.sequence = 0;

        let metadata = StreamMetadata {
            width: self.config.width,
            height: self.config.height,
            fps: self.config.fps,
            frame_count: Some(frame_count),
        };
        tracing::info!(source = %self.name, ?metadata, "Raw video source opened");
        Ok(metadata)
    }

    fn read(&mut self) -> Result<Option<Frame>, SourceError> {
        let frame_bytes = self.frame_bytes();
        let reader = self.reader.as_mut().ok_or(SourceError::NotOpen)?;

        let mut pixels = vec![0u8; frame_bytes];
        let mut filled = 0;
        while filled < frame_bytes {
            match reader.read(&mut pixels[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(SourceError::ReadFailed(e.to_string())),
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < frame_bytes {
            tracing::warn!(
                source = %self.name,
                bytes = filled,
                expected = frame_bytes,
                "Discarding truncated trailing frame"
            );
            return Ok(None);
        }

        self.sequence += 1;
        Ok(Some(Frame::new(
            pixels,
            self.config.width,
            self.config.height,
            self.sequence,
        )))
    }

    fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    fn close(&mut self) {
        self.reader = None;
        tracing::debug!(source = %self.name, "Raw video source closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "quadrant-tracker-raw-{}-{}.bgr",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let mut source = RawVideoSource::new(
            "/nonexistent/quadrant-tracker/input.bgr",
            StreamConfig::new(4, 4, 10.0),
        );
        let err = source.open().unwrap_err();

        assert!(matches!(err, SourceError::Unavailable { .. }));
        assert!(err.to_string().contains("input.bgr"));
    }

    #[test]
    fn test_reads_whole_frames_and_drops_partial_tail() {
        let path = temp_path("tail");
        {
            let mut file = File::create(&path).unwrap();
            file.write_all(&[10u8; 2 * 2 * 3]).unwrap();
            file.write_all(&[20u8; 2 * 2 * 3]).unwrap();
            file.write_all(&[30u8; 5]).unwrap();
        }

        let mut source = RawVideoSource::new(&path, StreamConfig::new(2, 2, 25.0));
        let metadata = source.open().unwrap();
        assert_eq!(metadata.frame_count, Some(2));

        let first = source.read().unwrap().unwrap();
        assert_eq!(first.sequence(), 1);
        assert!(first.pixels().iter().all(|&b| b == 10));

        let second = source.read().unwrap().unwrap();
        assert_eq!(second.sequence(), 2);
        assert!(second.is_valid());

        assert!(source.read().unwrap().is_none());
        source.close();
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut source = RawVideoSource::new(temp_path("geom"), StreamConfig::new(0, 4, 10.0));
        assert!(matches!(
            source.open(),
            Err(SourceError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_read_before_open() {
        let mut source = RawVideoSource::new(temp_path("closed"), StreamConfig::default());
        assert!(matches!(source.read(), Err(SourceError::NotOpen)));
    }
}
