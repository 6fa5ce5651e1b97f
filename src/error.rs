use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding, pixel access and generation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DibError {
    /// The input does not start with the format's magic bytes (`"BM"` for
    /// BMP, the 8-byte PNG signature, `"GIF"`, or the ICO type word).
    #[error("bad signature: input does not start with the format's magic bytes")]
    BadSignature,

    /// Input ended before a fixed-layout structure could be read.
    #[error("truncated input: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    /// The declared header layout is one this crate does not parse
    /// (info-header size other than 40, planes other than 1, or an
    /// unsupported bit depth / compression for the pixel engine).
    #[error("unsupported header variant: {0}")]
    UnsupportedHeaderVariant(String),

    /// A generator precondition on image dimensions was violated.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Checked pixel access outside the image bounds.
    #[error("pixel index ({row}, {col}) out of bounds for {width}x{height} image")]
    IndexOutOfBounds {
        row: u32,
        col: u32,
        width: u32,
        height: u32,
    },

    /// A configured [`crate::Limits`] bound was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// The operation was cancelled through its [`enough::Stop`] token.
    #[error("operation cancelled")]
    Cancelled(StopReason),

    /// Underlying byte source/sink failure.
    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for DibError {
    fn from(r: StopReason) -> Self {
        DibError::Cancelled(r)
    }
}
