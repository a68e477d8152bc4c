//! CLI output formatting utilities.

use crate::chunking::{BoundaryDecision, ChunkMetadata, ChunkRange};
use crate::timecode::seconds_to_timecode;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print one planned range.
    pub fn range(number: usize, range: &ChunkRange) {
        println!(
            "  {} {:>3}  {} - {}  ({})",
            style("*").cyan(),
            number,
            seconds_to_timecode(range.start),
            seconds_to_timecode(range.end),
            format_duration(range.duration())
        );
    }

    /// Print one produced chunk.
    pub fn chunk(chunk: &ChunkMetadata) {
        println!(
            "  {} {}/{}  {} - {}  {}",
            style("*").cyan(),
            chunk.chunk_number,
            chunk.total_chunks,
            seconds_to_timecode(chunk.start_time),
            seconds_to_timecode(chunk.end_time),
            style(chunk.path.display()).dim()
        );
    }

    /// Print how a boundary was chosen.
    pub fn decision(decision: &BoundaryDecision) {
        println!(
            "  {} {:>9.2}s -> {:>9.2}s  {:+7.2}s  {}",
            style("|").dim(),
            decision.target,
            decision.boundary,
            decision.shift,
            style(decision.reason).yellow()
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format duration in seconds to a human-readable string.
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42.9), "42s");
        assert_eq!(format_duration(600.0), "10m 0s");
        assert_eq!(format_duration(3725.0), "1h 2m 5s");
    }
}
