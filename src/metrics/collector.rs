//! Metrics collection and registry.

use crate::pipeline::ProcessorStats;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    /// Encoded output was not UTF-8.
    #[error("metrics output is not valid UTF-8")]
    Encoding,
}

/// A snapshot of run counters for a metrics update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Frames read from the source.
    pub frames: u64,
    /// Frames skipped for detection.
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

impl From<ProcessorStats> for MetricsSnapshot {
    fn from(stats: ProcessorStats) -> Self {
        Self {
            frames: stats.frames,
            degenerate_frames: stats.degenerate_frames,
            blobs: stats.blobs,
            noise_regions: stats.noise_regions,
            entries: stats.entries,
            exits: stats.exits,
        }
    }
}

/// Prometheus metrics registry for tracking runs.
pub struct MetricsRegistry {
    registry: Registry,

    frames_total: IntCounter,
    degenerate_frames_total: IntCounter,
    blobs_total: IntCounter,
    noise_regions_total: IntCounter,
    entries_total: IntCounter,
    exits_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all tracking metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let frames_total = IntCounter::new(
            "quadrant_tracker_frames_total",
            "Total number of frames processed",
        )?;
        let degenerate_frames_total = IntCounter::new(
            "quadrant_tracker_degenerate_frames_total",
            "Frames skipped because of unusable geometry or frame rate",
        )?;
        let blobs_total = IntCounter::new(
            "quadrant_tracker_blobs_total",
            "Blobs accepted after noise filtering",
        )?;
        let noise_regions_total = IntCounter::new(
            "quadrant_tracker_noise_regions_total",
            "Connected regions discarded as noise",
        )?;
        let entries_total = IntCounter::new(
            "quadrant_tracker_entries_total",
            "Entry events logged",
        )?;
        let exits_total = IntCounter::new(
            "quadrant_tracker_exits_total",
            "Exit events logged",
        )?;

        registry.register(Box::new(frames_total.clone()))?;
        registry.register(Box::new(degenerate_frames_total.clone()))?;
        registry.register(Box::new(blobs_total.clone()))?;
        registry.register(Box::new(noise_regions_total.clone()))?;
        registry.register(Box::new(entries_total.clone()))?;
        registry.register(Box::new(exits_total.clone()))?;

        Ok(Self {
            registry,
            frames_total,
            degenerate_frames_total,
            blobs_total,
            noise_regions_total,
            entries_total,
            exits_total,
        })
    }

    /// Updates all metrics from a snapshot of cumulative counters.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        advance(&self.frames_total, snapshot.frames);
        advance(&self.degenerate_frames_total, snapshot.degenerate_frames);
        advance(&self.blobs_total, snapshot.blobs);
        advance(&self.noise_regions_total, snapshot.noise_regions);
        advance(&self.entries_total, snapshot.entries);
        advance(&self.exits_total, snapshot.exits);
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|_| MetricsError::Encoding)
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Counters only go up, so increment by the difference.
fn advance(counter: &IntCounter, target: u64) {
    let current = counter.get();
    if target > current {
        counter.inc_by(target - current);
    }
}
