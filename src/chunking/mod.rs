//! Chunk boundary engine.
//!
//! Turns a video duration into contiguous, duration-bounded ranges:
//!
//! - [`fixed_ranges`] cuts at every multiple of the chunk length.
//! - [`select_boundaries`] nudges each interior cut toward nearby silence
//!   while keeping every chunk above the minimum length.
//! - [`assemble_ranges`] turns chosen cuts back into ranges and suppresses
//!   degenerate slivers.

mod assemble;
mod boundary;
mod fixed;

pub use assemble::{assemble_ranges, plan_silence_aware, AdjustedPlan};
pub use boundary::select_boundaries;
pub use fixed::{fixed_ranges, interior_boundaries};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::silence::SilenceInterval;

/// Ranges this short or shorter are never returned.
pub const MIN_SEGMENT_SECONDS: f64 = 0.5;

/// A contiguous time range of the source video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkRange {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl ChunkRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of this range in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Why a boundary ended up where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryReason {
    /// Moved to the midpoint of a silence inside the search window.
    Silence,
    /// No silence in the window; target kept (clamped to the corridor).
    FixedFallback,
    /// Search window collapsed to nothing.
    FixedFallbackWindow,
    /// Corridor collapsed; the minimum-length rules cannot all be met.
    FixedFallbackConstrained,
}

impl std::fmt::Display for BoundaryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryReason::Silence => write!(f, "silence"),
            BoundaryReason::FixedFallback => write!(f, "fixed_fallback"),
            BoundaryReason::FixedFallbackWindow => write!(f, "fixed_fallback_window"),
            BoundaryReason::FixedFallbackConstrained => write!(f, "fixed_fallback_constrained"),
        }
    }
}

/// Record of how one interior boundary was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryDecision {
    pub target: f64,
    pub boundary: f64,
    pub reason: BoundaryReason,
    /// `boundary - target`.
    pub shift: f64,
    pub window_start: f64,
    pub window_end: f64,
    /// Feasibility corridor before the edge rails are applied.
    pub corridor_min: f64,
    pub corridor_max: f64,
    /// Corridor clamped into `[previous + 1, duration - 1]`.
    pub safe_min: f64,
    pub safe_max: f64,
    pub matched_interval: Option<SilenceInterval>,
}

/// Description of one produced chunk, handed to per-chunk analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Media file for this chunk.
    pub path: PathBuf,
    /// 1-based position.
    pub chunk_number: usize,
    pub total_chunks: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    /// True only when the source was short enough to use as-is.
    pub is_original: bool,
}

impl ChunkMetadata {
    /// Metadata for a video that needs no splitting.
    pub fn original(path: PathBuf, duration: f64) -> Self {
        Self {
            path,
            chunk_number: 1,
            total_chunks: 1,
            start_time: 0.0,
            end_time: duration,
            duration,
            is_original: true,
        }
    }

    /// Metadata for the `index`-th (0-based) of `total` cut ranges.
    pub fn from_range(path: PathBuf, index: usize, total: usize, range: &ChunkRange) -> Self {
        Self {
            path,
            chunk_number: index + 1,
            total_chunks: total,
            start_time: range.start,
            end_time: range.end,
            duration: range.duration(),
            is_original: false,
        }
    }
}
