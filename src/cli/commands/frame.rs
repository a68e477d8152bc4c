//! Frame command - save one still image.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::media::FfmpegTools;
use crate::timecode::{seconds_to_timecode, timecode_to_seconds};
use anyhow::Result;
use std::path::Path;

/// Run the frame command.
pub async fn run_frame(
    input: &str,
    timecode: &str,
    output: &str,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Frame, &settings.tools)?;

    let video_path = Path::new(input);
    if !video_path.is_file() {
        anyhow::bail!("Video file not found: {}", video_path.display());
    }

    let seconds = timecode_to_seconds(timecode)?;
    let position = seconds_to_timecode(seconds);

    let tools = FfmpegTools::new(&settings.tools);
    tools
        .extract_frame(video_path, &format!("{seconds:.3}"), Path::new(output))
        .await?;

    Output::success(&format!("Saved frame at {} to {}", position, output));
    Ok(())
}
