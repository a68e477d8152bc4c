//! Silence-aware boundary selection.
//!
//! Boundaries are chosen left to right. Each choice narrows the corridor
//! available to the next one, so every chunk before and after an adjusted
//! boundary still meets the minimum length.

use super::{BoundaryDecision, BoundaryReason};
use crate::config::SplitConfig;
use crate::silence::SilenceInterval;
use tracing::debug;

/// No boundary may sit closer than this to its predecessor or to the end.
const EDGE_MARGIN_SECONDS: f64 = 1.0;

/// `min(max(value, lo), hi)`; yields `hi` when the bounds cross instead of panicking.
fn clamp_into(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Midpoint of the silence (clipped to the window) closest to `target`.
///
/// Ties keep the earliest interval.
fn nearest_silence(
    intervals: &[SilenceInterval],
    window_start: f64,
    window_end: f64,
    target: f64,
) -> Option<(f64, SilenceInterval)> {
    let mut best: Option<(f64, SilenceInterval)> = None;

    for interval in intervals {
        let Some(midpoint) = interval.clipped_midpoint(window_start, window_end) else {
            continue;
        };
        let closer = match best {
            Some((current, _)) => (midpoint - target).abs() < (current - target).abs(),
            None => true,
        };
        if closer {
            best = Some((midpoint, *interval));
        }
    }

    best
}

/// Choose a final position for every interior target boundary.
///
/// `targets` are the fixed-length cut points (excluding 0 and `duration`),
/// in ascending order. One decision is returned per target.
pub fn select_boundaries(
    targets: &[f64],
    intervals: &[SilenceInterval],
    config: &SplitConfig,
    duration: f64,
) -> Vec<BoundaryDecision> {
    let window = config.search_window_seconds;
    let min_chunk = config.min_chunk_seconds;
    let total = targets.len();

    let mut decisions = Vec::with_capacity(total);
    let mut previous = 0.0;

    for (idx, &target) in targets.iter().enumerate() {
        let boundaries_left_after = (total - idx - 1) as f64;

        // Leave room for every chunk still to come, including the trailing one.
        let corridor_min = previous + min_chunk;
        let corridor_max = (duration - EDGE_MARGIN_SECONDS)
            .min(duration - min_chunk * (boundaries_left_after + 1.0));

        let rail_lo = previous + EDGE_MARGIN_SECONDS;
        let rail_hi = duration - EDGE_MARGIN_SECONDS;
        let safe_min = clamp_into(corridor_min, rail_lo, rail_hi);
        let safe_max = clamp_into(corridor_max, rail_lo, rail_hi);

        let window_start = safe_min.max(target - window);
        let window_end = safe_max.min(target + window);

        let (boundary, reason, matched_interval) = if safe_min > safe_max {
            // No point satisfies every chunk; stay as close to the fixed cut
            // as the edge rails allow.
            (
                clamp_into(target, rail_lo, rail_hi),
                BoundaryReason::FixedFallbackConstrained,
                None,
            )
        } else if safe_min == safe_max {
            (safe_min, BoundaryReason::FixedFallbackConstrained, None)
        } else if window_start >= window_end {
            (
                clamp_into(target, safe_min, safe_max),
                BoundaryReason::FixedFallbackWindow,
                None,
            )
        } else {
            match nearest_silence(intervals, window_start, window_end, target) {
                Some((midpoint, interval)) => (
                    clamp_into(midpoint, safe_min, safe_max),
                    BoundaryReason::Silence,
                    Some(interval),
                ),
                None => (
                    clamp_into(target, safe_min, safe_max),
                    BoundaryReason::FixedFallback,
                    None,
                ),
            }
        };

        let boundary = clamp_into(boundary, 0.0, duration);

        debug!(
            target_seconds = target,
            boundary,
            %reason,
            shift = boundary - target,
            window_start,
            window_end,
            safe_min,
            safe_max,
            "Boundary {}/{}",
            idx + 1,
            total
        );

        decisions.push(BoundaryDecision {
            target,
            boundary,
            reason,
            shift: boundary - target,
            window_start,
            window_end,
            corridor_min,
            corridor_max,
            safe_min,
            safe_max,
            matched_interval,
        });

        previous = boundary;
    }

    decisions
}
