//! Parsing of `ffprobe -print_format json` output.

use crate::error::{Result, VidchunkError};
use serde::{Deserialize, Serialize};

/// Read `format.duration`, which ffprobe prints as a string but may be a number.
pub fn parse_probe_duration(json_str: &str) -> Result<f64> {
    let parsed: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| VidchunkError::DurationProbe(format!("Invalid ffprobe output: {e}")))?;

    let field = &parsed["format"]["duration"];
    let duration = field
        .as_f64()
        .or_else(|| field.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .ok_or_else(|| {
            VidchunkError::DurationProbe("ffprobe output has no numeric duration".into())
        })?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(VidchunkError::DurationProbe(format!(
            "Unusable duration: {duration}"
        )));
    }

    Ok(duration)
}

/// Summary of a media file's container and first video stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub duration: f64,
    pub size_bytes: u64,
    pub format: String,
    pub width: u64,
    pub height: u64,
    pub codec: String,
    pub fps: f64,
}

/// Parse `-show_format -show_streams` output into [`MediaInfo`].
///
/// Missing fields fall back to zero / `"unknown"`; only malformed JSON fails.
pub fn parse_media_info(json_str: &str) -> Result<MediaInfo> {
    let parsed: serde_json::Value = serde_json::from_str(json_str)?;
    let format = &parsed["format"];

    let video_stream = parsed["streams"]
        .as_array()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s["codec_type"].as_str() == Some("video"))
        })
        .cloned()
        .unwrap_or_default();

    let number = |value: &serde_json::Value| -> Option<f64> {
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.parse::<f64>().ok()))
    };

    Ok(MediaInfo {
        duration: number(&format["duration"]).unwrap_or(0.0),
        size_bytes: number(&format["size"]).map(|n| n as u64).unwrap_or(0),
        format: format["format_name"].as_str().unwrap_or("unknown").to_string(),
        width: video_stream["width"].as_u64().unwrap_or(0),
        height: video_stream["height"].as_u64().unwrap_or(0),
        codec: video_stream["codec_name"]
            .as_str()
            .unwrap_or("unknown")
            .to_string(),
        fps: parse_fps(video_stream["r_frame_rate"].as_str().unwrap_or("0/1")),
    })
}

/// Parse an ffprobe frame rate such as `30000/1001`, rounded to 2 decimals.
///
/// Malformed input or a zero denominator yields 0.0.
pub fn parse_fps(fps: &str) -> f64 {
    let value = match fps.split_once('/') {
        Some((num, den)) => match (num.trim().parse::<f64>(), den.trim().parse::<f64>()) {
            (Ok(num), Ok(den)) if den != 0.0 => num / den,
            _ => return 0.0,
        },
        None => match fps.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => return 0.0,
        },
    };

    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_as_string_or_number() {
        let json = r#"{"format": {"duration": "1234.567000"}}"#;
        assert_eq!(parse_probe_duration(json).unwrap(), 1234.567);

        let json = r#"{"format": {"duration": 300}}"#;
        assert_eq!(parse_probe_duration(json).unwrap(), 300.0);
    }

    #[test]
    fn test_duration_missing_or_bad() {
        for json in [
            r#"{"format": {}}"#,
            r#"{"format": {"duration": "N/A"}}"#,
            r#"{"format": {"duration": "-5"}}"#,
            "not json",
        ] {
            let err = parse_probe_duration(json).unwrap_err();
            assert!(matches!(err, VidchunkError::DurationProbe(_)), "{json}");
        }
    }

    #[test]
    fn test_media_info() {
        let json = r#"{
            "streams": [
                {"codec_type": "audio", "codec_name": "aac"},
                {"codec_type": "video", "codec_name": "h264", "width": 1920,
                 "height": 1080, "r_frame_rate": "30000/1001"}
            ],
            "format": {"duration": "1200.5", "size": "734003200",
                       "format_name": "mov,mp4,m4a,3gp,3g2,mj2"}
        }"#;

        let info = parse_media_info(json).unwrap();
        assert_eq!(info.duration, 1200.5);
        assert_eq!(info.size_bytes, 734_003_200);
        assert_eq!(info.format, "mov,mp4,m4a,3gp,3g2,mj2");
        assert_eq!((info.width, info.height), (1920, 1080));
        assert_eq!(info.codec, "h264");
        assert_eq!(info.fps, 29.97);
    }

    #[test]
    fn test_media_info_audio_only() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {}}"#;
        let info = parse_media_info(json).unwrap();
        assert_eq!(info.codec, "unknown");
        assert_eq!(info.width, 0);
        assert_eq!(info.fps, 0.0);
    }

    #[test]
    fn test_parse_fps() {
        assert_eq!(parse_fps("25/1"), 25.0);
        assert_eq!(parse_fps("24000/1001"), 23.98);
        assert_eq!(parse_fps("60"), 60.0);
        assert_eq!(parse_fps("0/0"), 0.0);
        assert_eq!(parse_fps("abc"), 0.0);
    }
}
