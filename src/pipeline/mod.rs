//! Frame-sequential processing pipeline.
//!
//! Pulls frames from a [`FrameSource`], runs each through the
//! [`FrameProcessor`], and writes the annotated result to a [`FrameSink`].
//! Every frame is fully processed before the next one is read.

mod overlay;
mod processor;
mod sink;

pub use overlay::{draw_quadrant_lines, fill_circle, OVERLAY_COLOR};
pub use processor::{FrameProcessor, FrameReport, ProcessorStats, BLANK_COLOR};
pub use sink::{FrameSink, MemorySink, NullSink, RawVideoSink, SinkError};

use crate::capture::{DetectionConfig, FrameSource, SourceError};
use crate::events::EventLog;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Errors that end a run early.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the input failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Writing the annotated video failed.
    #[error("output video: {0}")]
    Sink(#[from] SinkError),
}

/// Outcome of a completed (or interrupted) run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Events logged, in processing order.
    pub log: EventLog,
    /// Per-run counters.
    pub stats: ProcessorStats,
    /// True if the run stopped on request before the stream ended.
    pub interrupted: bool,
}

/// Processes an entire stream.
///
/// The source is opened here; failing to open it aborts before any output
/// is created. `stop` is checked between frames.
pub fn run<S, K>(
    source: &mut S,
    sink: &mut K,
    config: &DetectionConfig,
    stop: &AtomicBool,
) -> Result<RunSummary, PipelineError>
where
    S: FrameSource,
    K: FrameSink,
{
    let metadata = source.open()?;
    if let Err(e) = sink.begin(&metadata) {
        source.close();
        return Err(e.into());
    }

    tracing::info!(
        source = source.name(),
        width = metadata.width,
        height = metadata.height,
        fps = metadata.fps,
        frames = ?metadata.frame_count,
        "Processing stream"
    );

    let mut processor = FrameProcessor::new(config, metadata);
    let outcome = process_frames(source, sink, &mut processor, stop);
    source.close();
    let interrupted = outcome?;
    sink.finish()?;

    let (log, stats) = processor.finish();
    tracing::info!(
        frames = stats.frames,
        events = log.len(),
        degenerate = stats.degenerate_frames,
        "Stream processed"
    );

    Ok(RunSummary {
        log,
        stats,
        interrupted,
    })
}

/// Drives the frame loop. Returns true if `stop` ended it early.
fn process_frames<S, K>(
    source: &mut S,
    sink: &mut K,
    processor: &mut FrameProcessor,
    stop: &AtomicBool,
) -> Result<bool, PipelineError>
where
    S: FrameSource,
    K: FrameSink,
{
    let mut frames = source.frames();
    loop {
        if stop.load(Ordering::Relaxed) {
            tracing::warn!(
                frame = processor.frame_index(),
                "Stop requested, ending run early"
            );
            return Ok(true);
        }
        let Some(frame) = frames.next() else {
            return Ok(false);
        };
        let mut frame = frame?;
        processor.process(&mut frame);
        sink.write(&frame)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{Frame, SyntheticSource};
    use crate::extraction::Point;
    use proptest::prelude::*;

    const BLACK: [u8; 3] = [0, 0, 0];
    const RED: [u8; 3] = [0, 0, 255];
    const GREEN: [u8; 3] = [0, 255, 0];

    /// Ten frames, 200x100 at 10 fps: a 600 px red ball at (40, 20) for
    /// frames 1-5, then at (160, 80) for frames 6-10.
    fn two_position_stream() -> SyntheticSource {
        SyntheticSource::from_fn(200, 100, 10.0, 10, |i| {
            let center = if i <= 5 {
                Point::new(40, 20)
            } else {
                Point::new(160, 80)
            };
            let mut frame = Frame::filled(200, 100, BLACK, i);
            frame.fill_rect(center.x - 15, center.y - 10, center.x + 14, center.y + 9, RED);
            frame
        })
    }

    fn run_to_log(source: &mut SyntheticSource) -> String {
        let stop = AtomicBool::new(false);
        let summary = run(source, &mut NullSink::new(), &DetectionConfig::default(), &stop).unwrap();
        summary.log.render()
    }

    #[test]
    fn test_end_to_end_two_positions() {
        let mut source = two_position_stream();
        let mut sink = MemorySink::new();
        let stop = AtomicBool::new(false);

        let summary = run(&mut source, &mut sink, &DetectionConfig::default(), &stop).unwrap();

        assert_eq!(
            summary.log.render(),
            "Time, Quadrant Number, Ball Colour, Type\n0.10, 1, red, Entry\n0.60, 4, red, Exit"
        );
        assert!(!summary.interrupted);
        assert_eq!(summary.stats.frames, 10);
        assert_eq!(sink.frames().len(), 10);
        assert!(sink
            .frames()
            .iter()
            .enumerate()
            .all(|(i, f)| f.sequence() == i as u64 + 1 && f.width() == 200));
        assert!(!source.is_open());
    }

    #[test]
    fn test_empty_stream_is_header_only() {
        let mut source = SyntheticSource::new(200, 100, 10.0, Vec::new());
        assert_eq!(run_to_log(&mut source), "Time, Quadrant Number, Ball Colour, Type\n");
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut source = two_position_stream();
        let first = run_to_log(&mut source);
        let second = run_to_log(&mut source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stop_flag_ends_run() {
        let mut source = two_position_stream();
        let mut sink = MemorySink::new();
        let stop = AtomicBool::new(true);

        let summary = run(&mut source, &mut sink, &DetectionConfig::default(), &stop).unwrap();
        assert!(summary.interrupted);
        assert!(summary.log.is_empty());
        assert!(sink.frames().is_empty());
    }

    #[test]
    fn test_sink_failure_is_terminal() {
        let mut source = two_position_stream();
        let mut sink = RawVideoSink::new("/nonexistent/quadrant-tracker/out.bgr");
        let stop = AtomicBool::new(false);

        let err = run(&mut source, &mut sink, &DetectionConfig::default(), &stop).unwrap_err();
        assert!(matches!(err, PipelineError::Sink(SinkError::CreateFailed { .. })));
    }

    #[test]
    fn test_mismatched_frame_does_not_end_run() {
        let path = std::env::temp_dir().join(format!(
            "quadrant-tracker-run-mismatch-{}.bgr",
            std::process::id()
        ));
        let mut source = SyntheticSource::from_fn(200, 100, 10.0, 5, |i| {
            if i == 3 {
                Frame::filled(50, 50, RED, i)
            } else {
                Frame::filled(200, 100, BLACK, i)
            }
        });
        let mut sink = RawVideoSink::new(&path);
        let stop = AtomicBool::new(false);

        let summary = run(&mut source, &mut sink, &DetectionConfig::default(), &stop).unwrap();
        assert_eq!(summary.stats.frames, 5);
        assert_eq!(summary.stats.degenerate_frames, 1);
        assert_eq!(sink.frames_written(), 5);

        let written = std::fs::metadata(&path).unwrap().len();
        assert_eq!(written, 5 * 200 * 100 * 3);
        let _ = std::fs::remove_file(&path);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_deterministic_and_entry_first(
            positions in prop::collection::vec((0u32..2, 0u32..2, any::<bool>()), 1..12)
        ) {
            let frames: Vec<Frame> = positions
                .iter()
                .enumerate()
                .map(|(i, &(qx, qy, green))| {
                    let mut frame = Frame::filled(80, 60, BLACK, i as u64 + 1);
                    let (x, y) = (qx * 45 + 5, qy * 35 + 3);
                    frame.fill_rect(x, y, x + 24, y + 19, if green { GREEN } else { RED });
                    frame
                })
                .collect();

            let mut source = SyntheticSource::new(80, 60, 25.0, frames);
            let first = run_to_log(&mut source);
            let second = run_to_log(&mut source);
            prop_assert_eq!(&first, &second);

            // Every color's first line is an Entry.
            for color in ["red", "green"] {
                if let Some(line) = first.lines().skip(1).find(|l| l.contains(color)) {
                    prop_assert!(line.ends_with("Entry"));
                }
            }
        }
    }
}
