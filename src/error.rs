//! Error types for vidchunk.

use thiserror::Error;

/// Library-level error type for vidchunk operations.
#[derive(Error, Debug)]
pub enum VidchunkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to get video duration: {0}")]
    DurationProbe(String),

    #[error("Silence detection failed: {0}")]
    SilenceDetection(String),

    #[error("Failed to split video at chunk {chunk}: {message}")]
    ChunkExtraction { chunk: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for vidchunk operations.
pub type Result<T> = std::result::Result<T, VidchunkError>;
