use crate::error::IlbmError;
use crate::ilbm::Compression;

/// Image metadata from the BMHD, obtained without decoding BODY.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels as stored, before vertical scaling.
    pub height: u32,
    /// Number of bitplanes (index bits per pixel).
    pub planes: u8,
    pub compression: Compression,
    /// CMAP entry count, or `None` if the file has no CMAP.
    pub palette_len: Option<usize>,
    pub x_aspect: u8,
    pub y_aspect: u8,
}

impl ImageInfo {
    /// Probe an ILBM file.
    ///
    /// Validates the `FORM` framing and BMHD the same way a full decode does.
    pub fn from_bytes(data: &[u8]) -> Result<Self, IlbmError> {
        crate::ilbm::probe_header(data)
    }
}
