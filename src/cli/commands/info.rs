//! Info command - show media information.

use crate::cli::output::format_duration;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::media::FfmpegTools;
use anyhow::Result;
use std::path::Path;

/// Run the info command.
pub async fn run_info(input: &str, settings: Settings) -> Result<()> {
    preflight::check(Operation::Info, &settings.tools)?;

    let video_path = Path::new(input);
    if !video_path.is_file() {
        anyhow::bail!("Video file not found: {}", video_path.display());
    }

    let tools = FfmpegTools::new(&settings.tools);
    let info = tools.media_info(video_path).await?;

    Output::header(&format!("{}", video_path.display()));
    Output::kv("Duration", &format!("{} ({:.2}s)", format_duration(info.duration), info.duration));
    Output::kv("Container", &info.format);
    Output::kv("Size", &format_size(info.size_bytes));
    Output::kv("Video", &format!("{} {}x{}", info.codec, info.width, info.height));
    Output::kv("Frame rate", &format!("{} fps", info.fps));

    Ok(())
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
