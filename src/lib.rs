//! vidchunk - Silence-aware video chunking
//!
//! Splits long videos into contiguous, duration-bounded chunks for
//! multimodal AI models that only accept short clips. Chunk boundaries are
//! nudged toward nearby silence so sentences are not cut mid-word.
//!
//! # Architecture
//!
//! - `config` - Settings file and the immutable [`config::SplitConfig`]
//! - `chunking` - Fixed ranges, boundary selection and chunk assembly
//! - `silence` - Silence detector log parsing
//! - `media` - ffprobe/ffmpeg capabilities behind small traits
//! - `splitter` - Orchestration of probe, plan and cut
//! - `timecode` - `HH:MM:SS` helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vidchunk::config::Settings;
//! use vidchunk::splitter::VideoSplitter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let splitter = VideoSplitter::new(&settings, settings.split_config())?;
//!
//!     let chunks = splitter.split_video(Path::new("lecture.mp4"), "job-42").await?;
//!     for chunk in &chunks {
//!         println!("{} {:.1}-{:.1}", chunk.path.display(), chunk.start_time, chunk.end_time);
//!     }
//!
//!     splitter.cleanup_job("job-42")?;
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod silence;
pub mod splitter;
pub mod timecode;

pub use error::{Result, VidchunkError};
