//! Silence intervals reported by an external loudness-threshold pass.
//!
//! The detector writes one diagnostic message per line; [`SilenceLogParser`]
//! turns those lines into ordered [`SilenceInterval`]s.

mod parser;

pub use parser::{parse_silence_log, SilenceLogParser};

use crate::error::{Result, VidchunkError};
use serde::{Deserialize, Serialize};

/// A stretch of audio below the noise floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceInterval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Always `end - start`.
    pub duration: f64,
}

impl SilenceInterval {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            duration: end - start,
        }
    }

    /// Midpoint of the part of this interval that lies inside `[lo, hi]`,
    /// or `None` if they do not touch.
    pub fn clipped_midpoint(&self, lo: f64, hi: f64) -> Option<f64> {
        if self.end < lo || self.start > hi {
            return None;
        }
        let clipped_start = self.start.max(lo);
        let clipped_end = self.end.min(hi);
        Some((clipped_start + clipped_end) / 2.0)
    }
}

/// Decide whether a finished detector run is usable.
///
/// The detector routinely exits non-zero while still printing a full report,
/// so only a failed run with nothing on its diagnostic stream is an error.
pub fn check_detector_exit(success: bool, diagnostics: &str) -> Result<()> {
    if success || !diagnostics.trim().is_empty() {
        Ok(())
    } else {
        Err(VidchunkError::SilenceDetection(
            "detector exited with an error and produced no output".to_string(),
        ))
    }
}
