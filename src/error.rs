use alloc::string::String;
use enough::StopReason;

use crate::ilbm::ChunkId;

/// Errors from ILBM decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IlbmError {
    #[error("structural mismatch: {0}")]
    StructuralMismatch(Mismatch),

    #[error("required chunk {0} not found")]
    MissingChunk(ChunkId),

    #[error("unsupported BMHD length {0} (expected 20)")]
    UnsupportedHeaderLength(u32),

    #[error("unsupported compression mode {0}")]
    UnsupportedCompression(u8),

    #[error("pixel index {index} out of range for palette of {palette_len} entries")]
    PaletteIndexOutOfRange { index: u8, palette_len: usize },

    #[error("buffer underrun at offset {offset}: need {needed} bytes, {remaining} remaining")]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("vertical scale must be positive, got {0}")]
    InvalidScale(u32),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for IlbmError {
    fn from(r: StopReason) -> Self {
        IlbmError::Cancelled(r)
    }
}

/// Which part of the `FORM` container framing disagreed with the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("expected FORM group tag, found {0}")]
    GroupTag(ChunkId),

    #[error("expected ILBM form type, found {0}")]
    TypeTag(ChunkId),

    #[error("FORM length {declared} + 8 does not match buffer length {actual}")]
    Length { declared: u32, actual: usize },
}
