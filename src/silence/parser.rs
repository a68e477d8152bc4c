//! Line-oriented parser for silence detector diagnostics.
//!
//! Recognizes two message shapes:
//!
//! ```text
//! [silencedetect @ 0x...] silence_start: 12.48
//! [silencedetect @ 0x...] silence_end: 15.02 | silence_duration: 2.54
//! ```
//!
//! Every other line is ignored.

use super::SilenceInterval;
use regex::Regex;
use tracing::{debug, trace};

const NUMBER: &str = r"(-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)";

/// Whether a silence has been opened and not yet closed.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SilenceState {
    Idle,
    Open { start: f64 },
}

/// Incremental parser: feed lines, then call [`SilenceLogParser::finish`].
pub struct SilenceLogParser {
    start_regex: Regex,
    end_regex: Regex,
    min_duration: f64,
    state: SilenceState,
    intervals: Vec<SilenceInterval>,
}

impl SilenceLogParser {
    /// Create a parser that keeps only intervals at least `min_duration` long.
    pub fn new(min_duration: f64) -> Self {
        let start_regex =
            Regex::new(&format!(r"silence_start:\s*{NUMBER}")).expect("Invalid regex");
        let end_regex = Regex::new(&format!(
            r"silence_end:\s*{NUMBER}\s*\|\s*silence_duration:\s*{NUMBER}"
        ))
        .expect("Invalid regex");

        Self {
            start_regex,
            end_regex,
            min_duration,
            state: SilenceState::Idle,
            intervals: Vec::new(),
        }
    }

    /// Consume one diagnostic line.
    pub fn feed_line(&mut self, line: &str) {
        if let Some(caps) = self.end_regex.captures(line) {
            let end = caps[1].parse::<f64>().ok();
            let reported = caps[2].parse::<f64>().ok();
            if let (Some(end), Some(reported)) = (end, reported) {
                self.close(end, reported);
            }
            return;
        }

        if let Some(caps) = self.start_regex.captures(line) {
            if let Ok(start) = caps[1].parse::<f64>() {
                // Only the most recent unmatched start is tracked.
                self.state = SilenceState::Open { start };
            }
        }
    }

    fn close(&mut self, end: f64, reported_duration: f64) {
        let start = match self.state {
            SilenceState::Open { start } => start,
            SilenceState::Idle => {
                // Start message was lost; recover it from the reported length.
                (end - reported_duration).max(0.0)
            }
        };
        self.state = SilenceState::Idle;
        self.keep_if_long_enough(start, end);
    }

    fn keep_if_long_enough(&mut self, start: f64, end: f64) {
        let interval = SilenceInterval::new(start, end);
        if interval.duration >= self.min_duration {
            trace!(start, end, "Silence interval");
            self.intervals.push(interval);
        } else {
            trace!(start, end, min = self.min_duration, "Skipping short silence");
        }
    }

    /// End of stream. A silence still open runs to the end of the media.
    pub fn finish(mut self, media_duration: Option<f64>) -> Vec<SilenceInterval> {
        if let SilenceState::Open { start } = self.state {
            match media_duration {
                Some(total) => self.keep_if_long_enough(start, total),
                None => debug!(start, "Dropping open silence with unknown media length"),
            }
        }
        self.intervals
    }
}

/// Parse a complete diagnostic dump in one go.
pub fn parse_silence_log(
    text: &str,
    min_duration: f64,
    media_duration: Option<f64>,
) -> Vec<SilenceInterval> {
    let mut parser = SilenceLogParser::new(min_duration);
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish(media_duration)
}
