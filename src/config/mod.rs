//! Configuration module for vidchunk.
//!
//! Handles loading application settings and deriving split parameters.

mod settings;

pub use settings::{
    ChunkingSettings, GeneralSettings, SilenceSettings, Settings, SplitConfig, SplitMode,
    ToolSettings,
};
