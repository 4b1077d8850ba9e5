// Raw TurboJPEG surface used by the bridge.
//
// Everything comes from turbojpeg-sys (re-exported by the turbojpeg crate as
// `raw`), which also builds and links libjpeg-turbo. Only the legacy
// single-call compress API is exposed here. Constants are narrowed to the
// `c_int` the legacy functions take.

use ::turbojpeg::raw;
use libc::c_int;

pub use ::turbojpeg::raw::{
    tjCompress2, tjDestroy, tjFree, tjGetErrorStr, tjGetErrorStr2, tjInitCompress, tjhandle,
};

// --- Pixel formats ---

pub const TJPF_RGB: c_int = raw::TJPF_TJPF_RGB as c_int;

// --- Chroma subsampling ---

pub const TJSAMP_444: c_int = raw::TJSAMP_TJSAMP_444 as c_int;
pub const TJSAMP_422: c_int = raw::TJSAMP_TJSAMP_422 as c_int;
pub const TJSAMP_420: c_int = raw::TJSAMP_TJSAMP_420 as c_int;
pub const TJSAMP_GRAY: c_int = raw::TJSAMP_TJSAMP_GRAY as c_int;
pub const TJSAMP_440: c_int = raw::TJSAMP_TJSAMP_440 as c_int;

// --- Flags ---

/// Use the fastest (least accurate) forward DCT.
pub const TJFLAG_FASTDCT: c_int = raw::TJFLAG_FASTDCT as c_int;

/// Message libjpeg-turbo reports for a thread that has not failed yet.
pub const TJ_NO_ERROR: &str = "No error";
