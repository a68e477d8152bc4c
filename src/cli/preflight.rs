//! Pre-flight checks before expensive operations.
//!
//! Validates that the required media tools are available before starting
//! operations that would otherwise fail midway.

use crate::config::ToolSettings;
use crate::error::{Result, VidchunkError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Splitting probes, detects silence and cuts.
    Split,
    /// Planning needs the prober, plus the detector in silence mode.
    Plan { needs_detector: bool },
    /// Media info reads the container only.
    Info,
    /// Frame extraction needs the encoder.
    Frame,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, tools: &ToolSettings) -> Result<()> {
    match operation {
        Operation::Split => {
            check_tool(&tools.ffprobe)?;
            check_tool(&tools.ffmpeg)?;
        }
        Operation::Plan { needs_detector } => {
            check_tool(&tools.ffprobe)?;
            if needs_detector {
                check_tool(&tools.ffmpeg)?;
            }
        }
        Operation::Info => {
            check_tool(&tools.ffprobe)?;
        }
        Operation::Frame => {
            check_tool(&tools.ffmpeg)?;
        }
    }
    Ok(())
}

/// Check if an external tool is available.
pub(crate) fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("-version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(VidchunkError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(VidchunkError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(VidchunkError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
