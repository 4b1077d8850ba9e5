// RGB pixels -> JPEG bytes through libjpeg-turbo

use crate::error::{Result, TurboJpegError};
use crate::ffi::turbojpeg::{self, Compressor, UNKNOWN_ERROR};
use crate::ffi::turbojpeg_sys::{
    TJFLAG_FASTDCT, TJSAMP_420, TJSAMP_422, TJSAMP_440, TJSAMP_444, TJSAMP_GRAY,
};
use crate::logging::LOG_TAG;
use image::RgbImage;
use serde::Deserialize;
use tracing::{error, info};

/// Chroma subsampling applied by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsampling {
    #[default]
    Yuv444,
    Yuv422,
    Yuv420,
    Yuv440,
    Gray,
}

impl Subsampling {
    fn as_raw(self) -> libc::c_int {
        match self {
            Subsampling::Yuv444 => TJSAMP_444,
            Subsampling::Yuv422 => TJSAMP_422,
            Subsampling::Yuv420 => TJSAMP_420,
            Subsampling::Yuv440 => TJSAMP_440,
            Subsampling::Gray => TJSAMP_GRAY,
        }
    }
}

/// Encoder policy. Not chosen per call: the boundary uses one value for the
/// whole process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub subsampling: Subsampling,
    pub fast_dct: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            subsampling: Subsampling::Yuv444,
            fast_dct: true,
        }
    }
}

impl EncodeOptions {
    fn flags(&self) -> libc::c_int {
        if self.fast_dct { TJFLAG_FASTDCT } else { 0 }
    }
}

/// A validated view over tightly packed RGB pixels (3 bytes per pixel).
#[derive(Debug, Clone, Copy)]
pub struct RgbFrame<'a> {
    pixels: &'a [u8],
    width: i32,
    height: i32,
}

impl<'a> RgbFrame<'a> {
    /// Wrap `pixels` as a `width` x `height` RGB image.
    ///
    /// # Returns
    /// `Err` if either dimension is not positive or the buffer length is not
    /// exactly `width * height * 3`.
    pub fn new(pixels: &'a [u8], width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(TurboJpegError::invalid_input(format!(
                "Dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(3))
            .ok_or_else(|| {
                TurboJpegError::invalid_input(format!(
                    "Overflow computing buffer size for {}x{} RGB image",
                    width, height
                ))
            })?;

        if pixels.len() != expected_len {
            return Err(TurboJpegError::invalid_input(format!(
                "RGB data size mismatch: expected {} bytes, got {}",
                expected_len,
                pixels.len()
            )));
        }

        Ok(RgbFrame {
            pixels,
            width,
            height,
        })
    }

    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

/// Compress one RGB frame to JPEG.
///
/// A fresh compressor handle is created for the call and destroyed before
/// returning, as is the library's output buffer; the result is an owned copy.
/// Quality is handed to libjpeg-turbo unchanged, so an out-of-range value
/// fails there and is recorded for [`turbojpeg::error_string`].
pub fn compress(frame: &RgbFrame<'_>, quality: i32, options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut compressor = Compressor::new().inspect_err(|e| {
        error!(target: LOG_TAG, "Failed to initialize compressor: {e}");
    })?;

    let jpeg = compressor
        .compress_rgb(
            frame.pixels,
            frame.width,
            frame.height,
            options.subsampling.as_raw(),
            quality,
            options.flags(),
        )
        .inspect_err(|e| {
            error!(
                target: LOG_TAG,
                width = frame.width,
                height = frame.height,
                quality,
                "Compression failed: {e}"
            );
        })?;

    let data = jpeg.try_to_vec().inspect_err(|e| {
        error!(target: LOG_TAG, "Failed to create output buffer: {e}");
    })?;

    info!(
        target: LOG_TAG,
        width = frame.width,
        height = frame.height,
        quality,
        size = data.len(),
        "Compressed RGB frame"
    );

    Ok(data)
}

/// Like [`compress`], but folds the frame geometry, quality and the thread's
/// library error string into a single compression error.
pub fn compress_or_error(
    frame: &RgbFrame<'_>,
    quality: i32,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    compress(frame, quality, options).map_err(|e| {
        let message = match e {
            TurboJpegError::EncoderInit(_) | TurboJpegError::Compression(_) => {
                let library = turbojpeg::error_string();
                if library == UNKNOWN_ERROR {
                    "JPEG compression failed".to_string()
                } else {
                    library
                }
            }
            other => other.to_string(),
        };
        TurboJpegError::compression(format!(
            "Failed to compress image ({}x{}, quality={}): {}",
            frame.width, frame.height, quality, message
        ))
    })
}

/// Compress an [`RgbImage`] with the given options.
pub fn compress_rgb_image(
    image: &RgbImage,
    quality: i32,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    let width = i32::try_from(image.width()).map_err(|_| {
        TurboJpegError::invalid_input(format!("Image width {} exceeds i32::MAX", image.width()))
    })?;
    let height = i32::try_from(image.height()).map_err(|_| {
        TurboJpegError::invalid_input(format!(
            "Image height {} exceeds i32::MAX",
            image.height()
        ))
    })?;

    let frame = RgbFrame::new(image.as_raw(), width, height)?;
    compress(&frame, quality, options)
}
