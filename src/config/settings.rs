//! Configuration settings for vidchunk.

use crate::error::{Result, VidchunkError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub chunking: ChunkingSettings,
    pub silence: SilenceSettings,
    pub tools: ToolSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory holding per-job chunk directories.
    pub temp_dir: String,
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/vidchunk".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// How chunk boundaries are chosen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Plain fixed-length ranges.
    Fixed,
    /// Fixed targets nudged toward nearby silence.
    #[default]
    Silence,
}

impl std::str::FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(SplitMode::Fixed),
            "silence" | "silence-aware" => Ok(SplitMode::Silence),
            _ => Err(format!("Unknown split mode: {}", s)),
        }
    }
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitMode::Fixed => write!(f, "fixed"),
            SplitMode::Silence => write!(f, "silence"),
        }
    }
}

/// Chunk geometry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Target chunk length in seconds.
    pub chunk_duration_seconds: f64,
    /// Boundary selection mode (fixed, silence).
    pub mode: SplitMode,
    /// Minimum length of any chunk produced by silence-aware splitting.
    pub min_chunk_seconds: f64,
    /// Search radius around each fixed boundary.
    pub search_window_seconds: f64,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_duration_seconds: 600.0,
            mode: SplitMode::Silence,
            min_chunk_seconds: 30.0,
            search_window_seconds: 30.0,
        }
    }
}

/// Silence detection thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SilenceSettings {
    /// Noise floor in dB below which audio counts as silence.
    pub noise_db: f64,
    /// Shortest silence worth reporting, in seconds.
    pub min_duration_seconds: f64,
}

impl Default for SilenceSettings {
    fn default() -> Self {
        Self {
            noise_db: -30.0,
            min_duration_seconds: 0.5,
        }
    }
}

/// External tool locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Immutable parameters for one split operation.
///
/// Built once from [`Settings`] (plus any CLI overrides) and passed by
/// reference into the range builder, boundary selector and splitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitConfig {
    pub chunk_seconds: f64,
    pub mode: SplitMode,
    pub min_chunk_seconds: f64,
    pub search_window_seconds: f64,
    pub silence_noise_db: f64,
    pub silence_min_duration_seconds: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Settings::default().split_config()
    }
}

impl SplitConfig {
    /// Reject values the boundary engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.chunk_seconds.is_finite() || self.chunk_seconds <= 0.0 {
            return Err(VidchunkError::Config(format!(
                "chunk length must be a positive number of seconds, got {}",
                self.chunk_seconds
            )));
        }
        if !self.search_window_seconds.is_finite() || self.search_window_seconds < 0.0 {
            return Err(VidchunkError::Config(format!(
                "search window must be >= 0, got {}",
                self.search_window_seconds
            )));
        }
        if !self.min_chunk_seconds.is_finite() || self.min_chunk_seconds < 0.0 {
            return Err(VidchunkError::Config(format!(
                "minimum chunk length must be >= 0, got {}",
                self.min_chunk_seconds
            )));
        }
        if !self.silence_min_duration_seconds.is_finite()
            || self.silence_min_duration_seconds <= 0.0
        {
            return Err(VidchunkError::Config(format!(
                "minimum silence duration must be > 0, got {}",
                self.silence_min_duration_seconds
            )));
        }
        if !self.silence_noise_db.is_finite() {
            return Err(VidchunkError::Config("noise floor must be finite".to_string()));
        }
        Ok(())
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| VidchunkError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidchunk")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }

    /// Snapshot the chunking and silence sections as a [`SplitConfig`].
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            chunk_seconds: self.chunking.chunk_duration_seconds,
            mode: self.chunking.mode,
            min_chunk_seconds: self.chunking.min_chunk_seconds,
            search_window_seconds: self.chunking.search_window_seconds,
            silence_noise_db: self.silence.noise_db,
            silence_min_duration_seconds: self.silence.min_duration_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Settings::default().split_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_seconds, 600.0);
        assert_eq!(config.mode, SplitMode::Silence);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [chunking]
            chunk_duration_seconds = 300
            mode = "fixed"
            "#,
        )
        .unwrap();

        assert_eq!(settings.chunking.chunk_duration_seconds, 300.0);
        assert_eq!(settings.chunking.mode, SplitMode::Fixed);
        assert_eq!(settings.silence.noise_db, -30.0);
        assert_eq!(settings.tools.ffmpeg, "ffmpeg");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.chunking.search_window_seconds = 12.5;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.chunking.search_window_seconds, 12.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SplitConfig::default();
        config.chunk_seconds = 0.0;
        assert!(config.validate().is_err());

        let mut config = SplitConfig::default();
        config.search_window_seconds = -1.0;
        assert!(config.validate().is_err());

        let mut config = SplitConfig::default();
        config.silence_min_duration_seconds = 0.0;
        assert!(config.validate().is_err());

        let mut config = SplitConfig::default();
        config.min_chunk_seconds = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_split_mode_parse() {
        assert_eq!("Fixed".parse::<SplitMode>().unwrap(), SplitMode::Fixed);
        assert_eq!("silence-aware".parse::<SplitMode>().unwrap(), SplitMode::Silence);
        assert!("scene".parse::<SplitMode>().is_err());
        assert_eq!(SplitMode::Silence.to_string(), "silence");
    }
}
