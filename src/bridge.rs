//! JNI entry points for `top.zibin.luban.compression.TurboJpegNative`.
//!
//! Failures never surface as Java exceptions: `compress` and
//! `compressToTargetSize` return `null` and the caller asks `getErrorString`
//! for details on the same thread.

use std::ffi::c_void;
use std::ptr;
use std::sync::OnceLock;

use jni::JNIEnv;
use jni::objects::{JByteArray, JClass, ReleaseMode};
use jni::sys::{JNI_VERSION_1_6, JavaVM, jbyteArray, jint, jstring};
use tracing::{error, info, warn};

use crate::codec::jpeg::{self, RgbFrame};
use crate::codec::search;
use crate::config::{self, settings::Settings};
use crate::error::{Result, TurboJpegError};
use crate::ffi::turbojpeg;
use crate::logging::{self, LOG_TAG};

static SETTINGS: OnceLock<Settings> = OnceLock::new();

fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}

/// Library load hook: read settings once and install logging.
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn JNI_OnLoad(_vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    let (loaded, load_error) = match config::load_settings_from_env() {
        Ok(s) => (s, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    let settings = SETTINGS.get_or_init(|| loaded);

    logging::init(&settings.log_filter);
    if let Some(e) = load_error {
        warn!(target: LOG_TAG, "Ignoring settings from ${}: {e}", config::SETTINGS_ENV);
    }
    info!(
        target: LOG_TAG,
        subsampling = ?settings.encoder.subsampling,
        fast_dct = settings.encoder.fast_dct,
        "TurboJPEG bridge loaded"
    );

    JNI_VERSION_1_6
}

/// `byte[] compress(byte[] rgbData, int width, int height, int quality)`
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn Java_top_zibin_luban_compression_TurboJpegNative_compress<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    rgb_data: JByteArray<'local>,
    width: jint,
    height: jint,
    quality: jint,
) -> jbyteArray {
    match compress_array(&mut env, &rgb_data, width, height, quality) {
        Ok(array) => array.into_raw(),
        Err(_) => {
            clear_pending_exception(&mut env);
            ptr::null_mut()
        }
    }
}

/// `byte[] compressToTargetSize(byte[] rgbData, int width, int height, int targetKb)`
///
/// Picks the highest quality within the configured search bounds whose output
/// fits in `targetKb` KiB. A non-positive `targetKb` encodes at the configured
/// default quality.
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn Java_top_zibin_luban_compression_TurboJpegNative_compressToTargetSize<
    'local,
>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    rgb_data: JByteArray<'local>,
    width: jint,
    height: jint,
    target_kb: jint,
) -> jbyteArray {
    let target_kb = u32::try_from(target_kb).ok().filter(|&kb| kb > 0);
    let result = encode_array(&mut env, &rgb_data, width, height, |frame| {
        let settings = settings();
        search::compress_with_policy(frame, target_kb, None, &settings.search, &settings.encoder)
    });
    match result {
        Ok(array) => array.into_raw(),
        Err(_) => {
            clear_pending_exception(&mut env);
            ptr::null_mut()
        }
    }
}

/// `String getErrorString()`
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn Java_top_zibin_luban_compression_TurboJpegNative_getErrorString<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    match env.new_string(turbojpeg::error_string()) {
        Ok(message) => message.into_raw(),
        Err(e) => {
            error!(target: LOG_TAG, "Failed to create error string: {e}");
            clear_pending_exception(&mut env);
            ptr::null_mut()
        }
    }
}

fn compress_array<'local>(
    env: &mut JNIEnv<'local>,
    rgb_data: &JByteArray<'_>,
    width: jint,
    height: jint,
    quality: jint,
) -> Result<JByteArray<'local>> {
    encode_array(env, rgb_data, width, height, |frame| {
        jpeg::compress(frame, quality, &settings().encoder)
    })
}

/// Pin `rgb_data`, validate it as a `width` x `height` RGB frame, encode it
/// with `encode`, and copy the result into a new `byte[]`.
fn encode_array<'local>(
    env: &mut JNIEnv<'local>,
    rgb_data: &JByteArray<'_>,
    width: jint,
    height: jint,
    encode: impl FnOnce(&RgbFrame<'_>) -> Result<Vec<u8>>,
) -> Result<JByteArray<'local>> {
    let encoded = {
        // Pinned until the end of this block, released with JNI_ABORT.
        let elements = unsafe { env.get_array_elements(rgb_data, ReleaseMode::NoCopyBack) }
            .map_err(|e| {
                error!(target: LOG_TAG, "Failed to get input data: {e}");
                TurboJpegError::input_acquisition(e.to_string())
            })?;
        let pixels =
            unsafe { std::slice::from_raw_parts(elements.as_ptr() as *const u8, elements.len()) };

        let frame = RgbFrame::new(pixels, width, height).inspect_err(|e| {
            error!(target: LOG_TAG, "Rejected input: {e}");
        })?;
        encode(&frame)?
    };

    env.byte_array_from_slice(&encoded).map_err(|e| {
        error!(target: LOG_TAG, "Failed to create byte array: {e}");
        TurboJpegError::output_allocation(e.to_string())
    })
}

fn clear_pending_exception(env: &mut JNIEnv<'_>) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
}
