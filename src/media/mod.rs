//! Capabilities the splitter needs from external media tools.
//!
//! The boundary engine only relies on the input/output contracts below, so
//! tests can swap in scripted fakes while [`FfmpegTools`] drives the real
//! `ffprobe`/`ffmpeg` binaries.

mod ffmpeg;
mod probe;

pub use ffmpeg::FfmpegTools;
pub use probe::{parse_fps, parse_media_info, parse_probe_duration, MediaInfo};

use crate::error::Result;
use crate::silence::SilenceInterval;
use async_trait::async_trait;
use std::path::Path;

/// Reads the total duration of a media file.
#[async_trait]
pub trait ProbeDuration: Send + Sync {
    /// Duration in seconds. Failure is fatal for a split.
    async fn probe_duration(&self, path: &Path) -> Result<f64>;
}

/// Finds stretches of silence in a media file's audio.
#[async_trait]
pub trait DetectSilence: Send + Sync {
    /// Silence intervals in temporal order.
    ///
    /// `media_duration` closes a silence still open when the stream ends.
    async fn detect_silence(
        &self,
        path: &Path,
        noise_db: f64,
        min_duration: f64,
        media_duration: f64,
    ) -> Result<Vec<SilenceInterval>>;
}

/// Copies a sub-range of a media file without re-encoding.
#[async_trait]
pub trait CutRange: Send + Sync {
    /// Write `[start, start + length)` of `source` to `dest`.
    async fn cut_range(&self, source: &Path, dest: &Path, start: f64, length: f64) -> Result<()>;
}
