//! Chunk assembly from chosen boundaries.

use super::{
    interior_boundaries, select_boundaries, BoundaryDecision, ChunkRange, MIN_SEGMENT_SECONDS,
};
use crate::config::SplitConfig;
use crate::silence::SilenceInterval;
use tracing::debug;

/// Turn interior boundaries into ranges covering `[0, duration]`.
///
/// A boundary that would leave a range of `MIN_SEGMENT_SECONDS` or less on
/// either side is dropped, merging the sliver into its neighbour. Returns an
/// empty list only when the whole duration is itself that short.
pub fn assemble_ranges(boundaries: &[f64], duration: f64) -> Vec<ChunkRange> {
    let mut points = vec![0.0];

    for &boundary in boundaries {
        let last = points[points.len() - 1];
        if boundary - last > MIN_SEGMENT_SECONDS && duration - boundary > MIN_SEGMENT_SECONDS {
            points.push(boundary);
        } else {
            debug!(boundary, "Dropping boundary that would leave a degenerate chunk");
        }
    }
    points.push(duration);

    points
        .windows(2)
        .map(|pair| ChunkRange::new(pair[0], pair[1]))
        .filter(|range| range.duration() > MIN_SEGMENT_SECONDS)
        .collect()
}

/// Ranges and per-boundary decisions from a silence-aware pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedPlan {
    pub ranges: Vec<ChunkRange>,
    pub decisions: Vec<BoundaryDecision>,
}

/// Move the interior boundaries of `fixed` toward silence.
///
/// Returns `None` when nothing usable is left, in which case the caller keeps
/// `fixed` unchanged.
pub fn plan_silence_aware(
    duration: f64,
    fixed: &[ChunkRange],
    intervals: &[SilenceInterval],
    config: &SplitConfig,
) -> Option<AdjustedPlan> {
    let targets = interior_boundaries(fixed);
    let decisions = select_boundaries(&targets, intervals, config, duration);
    let boundaries: Vec<f64> = decisions.iter().map(|d| d.boundary).collect();

    let ranges = assemble_ranges(&boundaries, duration);
    if ranges.is_empty() {
        return None;
    }

    Some(AdjustedPlan { ranges, decisions })
}
