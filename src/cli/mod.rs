//! CLI module for vidchunk.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::{Settings, SplitConfig, SplitMode};
use clap::{Args, Parser, Subcommand};

/// vidchunk - Silence-aware video chunking
///
/// Splits long videos into duration-bounded chunks whose cut points fall in
/// moments of silence, ready for per-chunk AI analysis.
#[derive(Parser, Debug)]
#[command(name = "vidchunk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Per-invocation overrides of the `[chunking]` settings.
#[derive(Args, Debug, Clone, Default)]
pub struct SplitOverrides {
    /// Target chunk length in seconds
    #[arg(long, env = "VIDCHUNK_CHUNK_SECONDS")]
    pub chunk_seconds: Option<f64>,

    /// Boundary mode (fixed, silence)
    #[arg(long, env = "VIDCHUNK_MODE")]
    pub mode: Option<SplitMode>,

    /// Silence search radius around each cut, in seconds
    #[arg(long, env = "VIDCHUNK_WINDOW_SECONDS")]
    pub window: Option<f64>,

    /// Minimum chunk length for silence-aware cuts, in seconds
    #[arg(long, env = "VIDCHUNK_MIN_CHUNK_SECONDS")]
    pub min_chunk: Option<f64>,
}

impl SplitOverrides {
    /// Build the split configuration from settings plus these overrides.
    pub fn apply(&self, settings: &Settings) -> SplitConfig {
        let mut config = settings.split_config();
        if let Some(chunk_seconds) = self.chunk_seconds {
            config.chunk_seconds = chunk_seconds;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(window) = self.window {
            config.search_window_seconds = window;
        }
        if let Some(min_chunk) = self.min_chunk {
            config.min_chunk_seconds = min_chunk;
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a video into chunk files
    Split {
        /// Path to the video file
        input: String,

        /// Job identifier; chunks are written to <temp_dir>/<job_id> (default: random)
        #[arg(short, long)]
        job_id: Option<String>,

        /// Write chunk metadata as JSON to this file
        #[arg(short, long)]
        manifest: Option<String>,

        #[command(flatten)]
        overrides: SplitOverrides,
    },

    /// Show the chunk ranges a split would produce, without cutting
    Plan {
        /// Path to the video file
        input: String,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: SplitOverrides,
    },

    /// Show media information
    Info {
        /// Path to the video file
        input: String,
    },

    /// Extract a single frame as JPEG
    Frame {
        /// Path to the video file
        input: String,

        /// Position as HH:MM:SS, MM:SS or seconds
        timecode: String,

        /// Output image path
        output: String,
    },

    /// Delete the chunk files of a job
    Clean {
        /// Job identifier used for `split`
        job_id: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the current settings to the configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
