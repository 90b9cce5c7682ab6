//! Per-frame detection-to-event processing.

use super::overlay::{self, MARKER_RADIUS, OVERLAY_COLOR};
use crate::capture::{DetectionConfig, Frame, StreamMetadata};
use crate::events::{EventKind, EventLog, EventRecord};
use crate::extraction::{Blob, BlobExtractor};
use crate::segmentation::ColorSegmenter;
use crate::tracking::{QuadrantLayout, TrackState, TransitionTracker};

/// Fill for frames whose geometry does not match the stream (BGR black).
pub const BLANK_COLOR: [u8; 3] = [0, 0, 0];

/// Counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    /// Frames seen, including degenerate ones.
    pub frames: u64,
    /// Frames skipped for detection (bad geometry or frame rate).
    pub degenerate_frames: u64,
    /// Blobs accepted after noise filtering.
    pub blobs: u64,
    /// Regions discarded as noise.
    pub noise_regions: u64,
    /// Entry events logged.
    pub entries: u64,
    /// Exit events logged.
    pub exits: u64,
}

/// What happened in one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// 1-based frame index.
    pub frame_index: u64,
    /// Seconds since stream start; `None` for degenerate frames.
    pub timestamp: Option<f64>,
    /// Accepted blobs, across all bands, in processing order.
    pub blobs: Vec<Blob>,
    /// Events appended to the log by this frame.
    pub events: Vec<EventRecord>,
}

impl FrameReport {
    /// Returns true if the frame was skipped for detection.
    pub fn is_degenerate(&self) -> bool {
        self.timestamp.is_none()
    }
}

/// Runs segmentation, extraction, quadrant resolution and tracking for
/// each frame of one stream, and owns the resulting event log.
pub struct FrameProcessor {
    segmenter: ColorSegmenter,
    extractor: BlobExtractor,
    layout: QuadrantLayout,
    tracker: TransitionTracker,
    log: EventLog,
    metadata: StreamMetadata,
    annotate: bool,
    frame_index: u64,
    stats: ProcessorStats,
}

impl FrameProcessor {
    /// Creates a processor for a stream with the given metadata.
    pub fn new(config: &DetectionConfig, metadata: StreamMetadata) -> Self {
        if !metadata.is_usable() {
            tracing::warn!(
                ?metadata,
                "Stream metadata unusable; frames will pass through without detection"
            );
        }
        Self {
            segmenter: ColorSegmenter::new(config.bands.clone()),
            extractor: BlobExtractor::new(config.min_area, config.blob_policy),
            layout: QuadrantLayout::new(metadata.width, metadata.height),
            tracker: TransitionTracker::new(),
            log: EventLog::new(),
            metadata,
            annotate: config.annotate,
            frame_index: 0,
            stats: ProcessorStats::default(),
        }
    }

    /// Processes the next frame of the stream, annotating it in place.
    pub fn process(&mut self, frame: &mut Frame) -> FrameReport {
        self.frame_index += 1;
        self.stats.frames += 1;

        let mut report = FrameReport {
            frame_index: self.frame_index,
            ..FrameReport::default()
        };

        let geometry_ok = frame.is_valid()
            && !frame.is_empty()
            && frame.width() == self.metadata.width
            && frame.height() == self.metadata.height;

        if !geometry_ok || !self.metadata.is_usable() {
            self.stats.degenerate_frames += 1;
            tracing::debug!(
                frame = self.frame_index,
                width = frame.width(),
                height = frame.height(),
                "Degenerate frame, skipping detection"
            );
            if !geometry_ok {
                // Output keeps the stream geometry, one frame per input frame.
                *frame = Frame::filled(
                    self.metadata.width,
                    self.metadata.height,
                    BLANK_COLOR,
                    frame.sequence(),
                );
            }
            if self.annotate {
                overlay::draw_quadrant_lines(frame, &self.layout, OVERLAY_COLOR);
            }
            return report;
        }

        let timestamp = self.frame_index as f64 / self.metadata.fps;
        report.timestamp = Some(timestamp);

        let image = self.segmenter.prepare(frame);
        for band in self.segmenter.bands() {
            let mask = self.segmenter.segment(&image, band);
            let extraction = self.extractor.extract(&mask, band.color);
            self.stats.noise_regions += extraction.discarded as u64;

            for blob in extraction.blobs {
                let quadrant = self.layout.resolve(blob.centroid);
                if let Some(event) =
                    self.tracker
                        .observe(blob.color, quadrant, self.frame_index, timestamp)
                {
                    match event.kind {
                        EventKind::Entry => self.stats.entries += 1,
                        EventKind::Exit => self.stats.exits += 1,
                    }
                    self.log.append(event);
                    report.events.push(event);
                }
                self.stats.blobs += 1;
                report.blobs.push(blob);
            }
        }

        if self.annotate {
            for blob in &report.blobs {
                overlay::fill_circle(frame, blob.centroid, MARKER_RADIUS, OVERLAY_COLOR);
            }
            overlay::draw_quadrant_lines(frame, &self.layout, OVERLAY_COLOR);
        }

        report
    }

    /// Events logged so far.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Current per-color state.
    pub fn track_state(&self) -> &TrackState {
        self.tracker.state()
    }

    /// Counters so far.
    pub fn stats(&self) -> ProcessorStats {
        self.stats
    }

    /// Number of frames processed.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Ends the stream, handing over the event log.
    pub fn finish(self) -> (EventLog, ProcessorStats) {
        (self.log, self.stats)
    }
}
