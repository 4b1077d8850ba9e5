// Quality selection policy

use image::RgbImage;
use turbojpeg_bridge::codec::jpeg::{EncodeOptions, RgbFrame, compress};
use turbojpeg_bridge::codec::search::compress_with_policy;
use turbojpeg_bridge::config::settings::SearchSettings;
use turbojpeg_bridge::error::TurboJpegError;

/// Noisy content so quality has a visible effect on size.
fn noisy_pixels(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x1234_5678;
    RgbImage::from_fn(width, height, |_, _| {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [a, b, c, _] = state.to_le_bytes();
        image::Rgb([a, b, c])
    })
    .into_raw()
}

fn encode_at(frame: &RgbFrame<'_>, quality: i32) -> Vec<u8> {
    compress(frame, quality, &EncodeOptions::default()).expect("reference encode")
}

#[test]
fn test_fixed_quality_wins() {
    let pixels = noisy_pixels(32, 32);
    let frame = RgbFrame::new(&pixels, 32, 32).expect("valid frame");
    let search = SearchSettings::default();

    let result = compress_with_policy(&frame, Some(1), Some(42), &search, &EncodeOptions::default())
        .expect("fixed quality encode");
    assert_eq!(result, encode_at(&frame, 42));
}

#[test]
fn test_no_target_uses_default_quality() {
    let pixels = noisy_pixels(32, 32);
    let frame = RgbFrame::new(&pixels, 32, 32).expect("valid frame");
    let search = SearchSettings::default();

    let result = compress_with_policy(&frame, None, None, &search, &EncodeOptions::default())
        .expect("default quality encode");
    assert_eq!(result, encode_at(&frame, 60));
}

#[test]
fn test_generous_target_returns_max_quality() {
    let pixels = noisy_pixels(16, 16);
    let frame = RgbFrame::new(&pixels, 16, 16).expect("valid frame");
    let search = SearchSettings::default();

    let result =
        compress_with_policy(&frame, Some(10_000), None, &search, &EncodeOptions::default())
            .expect("max quality encode");
    assert_eq!(result, encode_at(&frame, 95));
}

#[test]
fn test_target_selects_highest_fitting_quality() {
    let pixels = noisy_pixels(128, 128);
    let frame = RgbFrame::new(&pixels, 128, 128).expect("valid frame");
    let search = SearchSettings::default();

    let q95 = encode_at(&frame, 95).len();
    let q5 = encode_at(&frame, 5).len();
    assert!(q95 > q5);

    // Halfway between the extremes, rounded up to whole KiB.
    let target_kb = ((q95 + q5) / 2).div_ceil(1024) as u32;
    let result = compress_with_policy(
        &frame,
        Some(target_kb),
        None,
        &search,
        &EncodeOptions::default(),
    )
    .expect("search encode");

    assert!(result.len() as f64 / 1024.0 <= f64::from(target_kb));
    assert!(result.len() < q95, "search should have lowered quality");
}

#[test]
fn test_impossible_target_falls_back_to_min_quality() {
    let pixels = noisy_pixels(64, 64);
    let frame = RgbFrame::new(&pixels, 64, 64).expect("valid frame");
    let search = SearchSettings {
        default_quality: 50,
        min_quality: 20,
        max_quality: 90,
    };

    let result = compress_with_policy(&frame, Some(0), None, &search, &EncodeOptions::default())
        .expect("fallback encode");
    assert_eq!(result, encode_at(&frame, 20));
}

#[test]
fn test_policy_propagates_library_errors() {
    let pixels = noisy_pixels(8, 8);
    let frame = RgbFrame::new(&pixels, 8, 8).expect("valid frame");
    let search = SearchSettings::default();

    let result = compress_with_policy(&frame, None, Some(150), &search, &EncodeOptions::default());
    let err = result.expect_err("quality 150 should fail");
    assert!(err.to_string().contains("quality=150"));
}

#[test]
fn test_policy_rejects_inverted_bounds() {
    let pixels = noisy_pixels(8, 8);
    let frame = RgbFrame::new(&pixels, 8, 8).expect("valid frame");
    let search = SearchSettings {
        default_quality: 50,
        min_quality: 90,
        max_quality: 10,
    };

    let result = compress_with_policy(&frame, Some(1), None, &search, &EncodeOptions::default());
    assert!(matches!(result, Err(TurboJpegError::ConfigError(_))));
}

#[test]
fn test_policy_rejects_out_of_range_bounds() {
    let pixels = noisy_pixels(8, 8);
    let frame = RgbFrame::new(&pixels, 8, 8).expect("valid frame");
    let search = SearchSettings {
        default_quality: 50,
        min_quality: 1,
        max_quality: i32::MAX,
    };

    let result = compress_with_policy(&frame, Some(1), None, &search, &EncodeOptions::default());
    assert!(matches!(result, Err(TurboJpegError::ConfigError(_))));
}

#[test]
fn test_full_quality_range_search() {
    let pixels = noisy_pixels(32, 32);
    let frame = RgbFrame::new(&pixels, 32, 32).expect("valid frame");
    let search = SearchSettings {
        default_quality: 50,
        min_quality: 1,
        max_quality: 100,
    };

    let result = compress_with_policy(&frame, Some(0), None, &search, &EncodeOptions::default())
        .expect("fallback encode");
    assert_eq!(result, encode_at(&frame, 1));
}
