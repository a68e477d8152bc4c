//! Fixed-length range builder.
//!
//! Splits a duration into back-to-back ranges of the target length.

use super::{ChunkRange, MIN_SEGMENT_SECONDS};

/// Build contiguous ranges of `chunk_length` seconds covering `[0, duration]`.
///
/// A duration that fits in one chunk yields the single range `[0, duration]`.
/// Every range is exactly `chunk_length` long except possibly the last. A
/// trailing remainder of `MIN_SEGMENT_SECONDS` or less is folded into the
/// range before it, so the last range may exceed `chunk_length` by that much.
pub fn fixed_ranges(duration: f64, chunk_length: f64) -> Vec<ChunkRange> {
    if duration <= chunk_length {
        return vec![ChunkRange::new(0.0, duration)];
    }

    let mut ranges = Vec::with_capacity((duration / chunk_length).ceil() as usize);
    let mut index = 0u32;
    let mut chunk_start = 0.0;

    while chunk_start < duration {
        // Multiply instead of accumulating so long videos do not drift.
        let chunk_end = (f64::from(index + 1) * chunk_length).min(duration);
        ranges.push(ChunkRange::new(chunk_start, chunk_end));
        chunk_start = chunk_end;
        index += 1;
    }

    if ranges.len() > 1 {
        if let Some(last) = ranges.last().copied() {
            // A full-length last range is never a remainder, even for tiny lengths.
            if last.duration() <= MIN_SEGMENT_SECONDS && last.duration() < chunk_length {
                ranges.pop();
                if let Some(previous) = ranges.last_mut() {
                    previous.end = last.end;
                }
            }
        }
    }

    ranges
}

/// Boundaries between consecutive ranges, excluding 0 and the final end.
pub fn interior_boundaries(ranges: &[ChunkRange]) -> Vec<f64> {
    match ranges.split_last() {
        Some((_, head)) => head.iter().map(|r| r.end).collect(),
        None => Vec::new(),
    }
}
