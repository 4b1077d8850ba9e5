// Safe wrappers around the TurboJPEG compressor (RAII Drop)

use super::turbojpeg_sys::{
    TJ_NO_ERROR, TJPF_RGB, tjCompress2, tjDestroy, tjFree, tjGetErrorStr, tjGetErrorStr2,
    tjInitCompress, tjhandle,
};
use crate::error::{Result, TurboJpegError};
use libc::{c_char, c_int, c_uchar, c_ulong};
use std::cell::RefCell;
use std::ffi::CStr;
use std::ptr;

/// Returned by [`error_string`] when the calling thread has no recorded failure.
pub const UNKNOWN_ERROR: &str = "Unknown error";

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Message of the most recent failing library call on the calling thread.
///
/// The slot is per thread, like libjpeg-turbo's own error string: a failure
/// on another thread never shows up here, and a later failure on this thread
/// overwrites the message. Read it immediately after the call that failed.
/// Successful calls leave the slot untouched.
///
/// Returns [`UNKNOWN_ERROR`] if nothing has failed on this thread.
pub fn error_string() -> String {
    LAST_ERROR
        .with(|slot| slot.borrow().clone())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

fn record_error(msg: &str) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(msg.to_owned()));
}

/// Record `msg` for [`error_string`] and turn it into a compression error.
fn compression_failure(msg: String) -> TurboJpegError {
    record_error(&msg);
    TurboJpegError::compression(msg)
}

/// Convert a library error string, treating null, empty and "No error" as absent.
fn library_message(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    let msg = unsafe { CStr::from_ptr(raw) }
        .to_string_lossy()
        .trim()
        .to_string();
    if msg.is_empty() || msg == TJ_NO_ERROR {
        None
    } else {
        Some(msg)
    }
}

/// A TurboJPEG compression session.
///
/// The handle is destroyed when the value is dropped, so every exit path
/// of the owning scope releases it.
pub struct Compressor {
    handle: tjhandle,
}

impl Compressor {
    /// Initialize a new compressor handle.
    pub fn new() -> Result<Self> {
        let handle = unsafe { tjInitCompress() };
        if handle.is_null() {
            let msg = library_message(unsafe { tjGetErrorStr() })
                .unwrap_or_else(|| "tjInitCompress returned null".to_string());
            record_error(&msg);
            return Err(TurboJpegError::encoder_init(msg));
        }
        Ok(Compressor { handle })
    }

    /// Compress tightly packed RGB pixels.
    ///
    /// The caller is responsible for `pixels.len() == width * height * 3`;
    /// quality is passed through unchanged and range-checked by the library.
    ///
    /// # Returns
    /// `Ok(JpegBuffer)` owning the library-allocated output, `Err` on failure.
    pub fn compress_rgb(
        &mut self,
        pixels: &[u8],
        width: c_int,
        height: c_int,
        subsamp: c_int,
        quality: c_int,
        flags: c_int,
    ) -> Result<JpegBuffer> {
        let mut jpeg_buf: *mut c_uchar = ptr::null_mut();
        let mut jpeg_size: c_ulong = 0;

        let rc = unsafe {
            tjCompress2(
                self.handle,
                pixels.as_ptr(),
                width,
                0, // pitch: width * 3
                height,
                TJPF_RGB,
                &mut jpeg_buf,
                &mut jpeg_size,
                subsamp,
                quality,
                flags,
            )
        };

        // A failing call can leave a destination buffer behind; wrap it first
        // so it is freed on every path.
        let buffer = JpegBuffer {
            ptr: jpeg_buf,
            len: jpeg_size as usize,
        };

        if rc != 0 {
            let msg = self
                .last_error()
                .unwrap_or_else(|| format!("tjCompress2 failed (rc={rc})"));
            return Err(compression_failure(msg));
        }

        if buffer.ptr.is_null() || buffer.len == 0 {
            return Err(compression_failure(
                "tjCompress2 reported success but produced no data".to_string(),
            ));
        }

        Ok(buffer)
    }

    fn last_error(&self) -> Option<String> {
        library_message(unsafe { tjGetErrorStr2(self.handle) })
            .or_else(|| library_message(unsafe { tjGetErrorStr() }))
    }
}

impl Drop for Compressor {
    fn drop(&mut self) {
        unsafe {
            if !self.handle.is_null() {
                tjDestroy(self.handle);
            }
        }
    }
}

/// JPEG data allocated by libjpeg-turbo, released with `tjFree` on drop.
pub struct JpegBuffer {
    ptr: *mut c_uchar,
    len: usize,
}

impl JpegBuffer {
    pub fn as_slice(&self) -> &[u8] {
        if self.ptr.is_null() {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
        }
    }

    /// Copy the encoded bytes into an owned `Vec`, failing instead of
    /// aborting when the allocation cannot be satisfied.
    pub fn try_to_vec(&self) -> Result<Vec<u8>> {
        let data = self.as_slice();
        let mut out = Vec::new();
        out.try_reserve_exact(data.len()).map_err(|e| {
            TurboJpegError::output_allocation(format!(
                "Failed to allocate {} bytes for JPEG output: {e}",
                data.len()
            ))
        })?;
        out.extend_from_slice(data);
        Ok(out)
    }
}

impl Drop for JpegBuffer {
    fn drop(&mut self) {
        unsafe {
            if !self.ptr.is_null() {
                tjFree(self.ptr);
            }
        }
    }
}
