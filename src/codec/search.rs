// Quality selection: fixed quality, default quality, or target-size search

use crate::codec::jpeg::{EncodeOptions, RgbFrame, compress_or_error};
use crate::config::settings::SearchSettings;
use crate::error::Result;
use crate::logging::LOG_TAG;
use tracing::{debug, info};

fn size_kb(data: &[u8]) -> f64 {
    data.len() as f64 / 1024.0
}

/// Compress `frame`, choosing the quality by policy.
///
/// * `fixed_quality` wins when present.
/// * Without a target size the frame is encoded at `search.default_quality`.
/// * With a target size, the highest quality in
///   `search.min_quality..=search.max_quality` whose output fits is used;
///   if none fits, the `min_quality` result is returned anyway.
///
/// `search` is validated first; out-of-order or out-of-range bounds are a
/// configuration error.
pub fn compress_with_policy(
    frame: &RgbFrame<'_>,
    target_kb: Option<u32>,
    fixed_quality: Option<i32>,
    search: &SearchSettings,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    search.validate()?;

    if let Some(quality) = fixed_quality {
        return compress_or_error(frame, quality, options);
    }

    let Some(target_kb) = target_kb else {
        return compress_or_error(frame, search.default_quality, options);
    };
    let target = f64::from(target_kb);

    let best_case = compress_or_error(frame, search.max_quality, options)?;
    if size_kb(&best_case) <= target {
        debug!(
            target: LOG_TAG,
            quality = search.max_quality,
            size_kb = size_kb(&best_case),
            "Maximum quality already fits target"
        );
        return Ok(best_case);
    }

    let mut low = search.min_quality;
    let mut high = search.max_quality;
    let mut best: Option<(i32, Vec<u8>)> = None;

    while low <= high {
        let mid = low + (high - low) / 2;
        let candidate = compress_or_error(frame, mid, options)?;
        let candidate_kb = size_kb(&candidate);
        debug!(target: LOG_TAG, quality = mid, size_kb = candidate_kb, "Search step");

        if candidate_kb <= target {
            best = Some((mid, candidate));
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    match best {
        Some((quality, data)) => {
            info!(target: LOG_TAG, quality, target_kb, "Selected quality for target size");
            Ok(data)
        }
        None => {
            info!(
                target: LOG_TAG,
                quality = search.min_quality,
                target_kb,
                "No quality fits target size, using minimum"
            );
            compress_or_error(frame, search.min_quality, options)
        }
    }
}
