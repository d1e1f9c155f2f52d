use alloc::string::String;
use enough::StopReason;

/// Errors from encoding frames and writing declarations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("unsupported preset: {0:?}")]
    UnsupportedPreset(String),

    #[error("unsupported block size: {0} (expected 8, 16, 24 or 32)")]
    UnsupportedBlockSize(u32),

    #[error("invalid block size: {0:?} (expected 8, 16, 24 or 32)")]
    InvalidBlockSize(String),

    #[error("empty frame: {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    #[error("animation has no frames")]
    EmptySequence,

    #[error("still image must hold exactly one frame, got {0}")]
    StillFrameCount(usize),

    #[error("frame size mismatch: expected {expected:?}, got {actual:?}")]
    FrameSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("failed to write declaration: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for ConvertError {
    fn from(r: StopReason) -> Self {
        ConvertError::Cancelled(r)
    }
}
