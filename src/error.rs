use thiserror::Error;

#[derive(Debug, Error)]
pub enum TurboJpegError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input acquisition error: {0}")]
    InputAcquisition(String),

    #[error("Encoder init error: {0}")]
    EncoderInit(String),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Output allocation error: {0}")]
    OutputAllocation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`TurboJpegError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl TurboJpegError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create an invalid-input error (rejected before the library is called).
    invalid_input => InvalidInput,
    /// Create an input-buffer acquisition error.
    input_acquisition => InputAcquisition,
    /// Create an encoder initialization error.
    encoder_init => EncoderInit,
    /// Create a compression error.
    compression => Compression,
    /// Create an output-buffer allocation error.
    output_allocation => OutputAllocation,
    /// Create a configuration error.
    config => ConfigError,
}

impl From<serde_yml::Error> for TurboJpegError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(format!("Failed to parse settings YAML: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, TurboJpegError>;
