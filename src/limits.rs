use crate::error::IlbmError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Dimension limits apply to the
/// output raster, i.e. after vertical scaling.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for bitplane and output buffers combined.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check output dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), IlbmError> {
        let pixels = u64::from(width) * u64::from(height);
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds("pixel count", pixels, self.max_pixels)
    }

    /// Check that the decode's working set fits the memory limit.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), IlbmError> {
        exceeds("allocation (bytes)", bytes as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), IlbmError> {
    match limit {
        Some(max) if value > max => Err(IlbmError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
