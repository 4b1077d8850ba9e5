pub mod codec;
pub mod config;
pub mod error;
pub mod ffi;
pub mod logging;
pub mod pixels;

#[cfg(feature = "jni")]
pub mod bridge;
