//! Clean command - remove a job's chunk files.

use crate::cli::Output;
use crate::config::Settings;
use crate::splitter::VideoSplitter;
use anyhow::Result;

/// Run the clean command.
pub fn run_clean(job_id: &str, settings: Settings) -> Result<()> {
    let splitter = VideoSplitter::new(&settings, settings.split_config())?;

    if splitter.cleanup_job(job_id)? {
        Output::success(&format!("Removed chunks for job '{}'", job_id));
    } else {
        Output::warning(&format!("No chunks found for job '{}'", job_id));
    }

    Ok(())
}
