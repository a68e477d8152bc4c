//! `ffprobe`/`ffmpeg` backed media tools.

use super::{
    parse_media_info, parse_probe_duration, CutRange, DetectSilence, MediaInfo, ProbeDuration,
};
use crate::config::ToolSettings;
use crate::error::{Result, VidchunkError};
use crate::silence::{check_detector_exit, parse_silence_log, SilenceInterval};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Media tools implemented with the ffmpeg command-line suite.
#[derive(Debug, Clone)]
pub struct FfmpegTools {
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegTools {
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            ffmpeg: settings.ffmpeg.clone(),
            ffprobe: settings.ffprobe.clone(),
        }
    }

    /// Run a tool to completion, capturing stdout and stderr.
    async fn run<I, S>(program: &str, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let result = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(output) => Ok(output),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(VidchunkError::ToolNotFound(program.to_string()))
            }
            Err(e) => Err(VidchunkError::ToolFailed(format!("{program} execution failed: {e}"))),
        }
    }

    /// Container and video stream summary.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn media_info(&self, path: &Path) -> Result<MediaInfo> {
        let output = Self::run(
            &self.ffprobe,
            [
                OsStr::new("-v"),
                OsStr::new("quiet"),
                OsStr::new("-print_format"),
                OsStr::new("json"),
                OsStr::new("-show_format"),
                OsStr::new("-show_streams"),
                path.as_os_str(),
            ],
        )
        .await?;

        if !output.status.success() {
            return Err(VidchunkError::ToolFailed(format!(
                "ffprobe could not read {}",
                path.display()
            )));
        }

        parse_media_info(&String::from_utf8_lossy(&output.stdout))
    }

    /// Save one high-quality JPEG frame at `timecode`.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn extract_frame(&self, path: &Path, timecode: &str, dest: &Path) -> Result<()> {
        let output = Self::run(
            &self.ffmpeg,
            [
                OsStr::new("-y"),
                OsStr::new("-ss"),
                OsStr::new(timecode),
                OsStr::new("-i"),
                path.as_os_str(),
                OsStr::new("-frames:v"),
                OsStr::new("1"),
                OsStr::new("-q:v"),
                OsStr::new("2"),
                OsStr::new("-loglevel"),
                OsStr::new("error"),
                dest.as_os_str(),
            ],
        )
        .await?;

        if output.status.success() {
            Ok(())
        } else {
            let err = String::from_utf8_lossy(&output.stderr);
            Err(VidchunkError::ToolFailed(format!("Frame extraction failed: {err}")))
        }
    }
}

#[async_trait]
impl ProbeDuration for FfmpegTools {
    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn probe_duration(&self, path: &Path) -> Result<f64> {
        let output = Self::run(
            &self.ffprobe,
            [
                OsStr::new("-v"),
                OsStr::new("quiet"),
                OsStr::new("-print_format"),
                OsStr::new("json"),
                OsStr::new("-show_format"),
                path.as_os_str(),
            ],
        )
        .await
        .map_err(|e| VidchunkError::DurationProbe(e.to_string()))?;

        if !output.status.success() {
            return Err(VidchunkError::DurationProbe("ffprobe returned error".into()));
        }

        let duration = parse_probe_duration(&String::from_utf8_lossy(&output.stdout))?;
        info!("Total video duration: {:.1}s", duration);
        Ok(duration)
    }
}

#[async_trait]
impl DetectSilence for FfmpegTools {
    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn detect_silence(
        &self,
        path: &Path,
        noise_db: f64,
        min_duration: f64,
        media_duration: f64,
    ) -> Result<Vec<SilenceInterval>> {
        let filter = format!("silencedetect=noise={noise_db}dB:d={min_duration}");

        let output = Self::run(
            &self.ffmpeg,
            [
                OsStr::new("-hide_banner"),
                OsStr::new("-nostats"),
                OsStr::new("-i"),
                path.as_os_str(),
                OsStr::new("-vn"),
                OsStr::new("-af"),
                OsStr::new(&filter),
                OsStr::new("-f"),
                OsStr::new("null"),
                OsStr::new("-"),
            ],
        )
        .await
        .map_err(|e| VidchunkError::SilenceDetection(e.to_string()))?;

        // The report goes to stderr; a non-zero exit alone is not a failure.
        let diagnostics = String::from_utf8_lossy(&output.stderr);
        check_detector_exit(output.status.success(), &diagnostics)?;

        let intervals = parse_silence_log(&diagnostics, min_duration, Some(media_duration));
        debug!("Detected {} silence intervals", intervals.len());
        Ok(intervals)
    }
}

#[async_trait]
impl CutRange for FfmpegTools {
    #[instrument(skip(self, source), fields(dest = %dest.display()))]
    async fn cut_range(&self, source: &Path, dest: &Path, start: f64, length: f64) -> Result<()> {
        let start_arg = format!("{start:.3}");
        let length_arg = format!("{length:.3}");

        let output = Self::run(
            &self.ffmpeg,
            [
                OsStr::new("-y"),
                OsStr::new("-ss"),
                OsStr::new(&start_arg),
                OsStr::new("-i"),
                source.as_os_str(),
                OsStr::new("-t"),
                OsStr::new(&length_arg),
                OsStr::new("-c"),
                OsStr::new("copy"),
                OsStr::new("-avoid_negative_ts"),
                OsStr::new("make_zero"),
                OsStr::new("-loglevel"),
                OsStr::new("error"),
                dest.as_os_str(),
            ],
        )
        .await?;

        if output.status.success() {
            Ok(())
        } else {
            let err = String::from_utf8_lossy(&output.stderr);
            Err(VidchunkError::ToolFailed(format!("ffmpeg stream copy failed: {err}")))
        }
    }
}
