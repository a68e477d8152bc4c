//! Conversions between seconds and `HH:MM:SS` timecodes.

use crate::error::{Result, VidchunkError};

/// Format seconds as `HH:MM:SS`, truncating fractions.
pub fn seconds_to_timecode(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Parse `HH:MM:SS`, `MM:SS` or plain seconds. Seconds may be fractional.
pub fn timecode_to_seconds(timecode: &str) -> Result<f64> {
    let invalid = || VidchunkError::InvalidInput(format!("Invalid timecode: {}", timecode));

    let parts: Vec<&str> = timecode.trim().split(':').collect();
    let whole = |s: &str| s.parse::<u64>().map(|v| v as f64).map_err(|_| invalid());
    let fractional = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(invalid)
    };

    match parts.as_slice() {
        [h, m, s] => Ok(whole(h)? * 3600.0 + whole(m)? * 60.0 + fractional(s)?),
        [m, s] => Ok(whole(m)? * 60.0 + fractional(s)?),
        [s] => fractional(s),
        _ => Err(invalid()),
    }
}
