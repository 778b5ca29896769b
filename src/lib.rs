//! # zenilbm
//!
//! IFF/ILBM (Amiga interleaved bitmap) decoder.
//!
//! Takes the bytes of a `FORM ILBM` file and produces an RGB8 raster (or
//! palette indices) plus the color map. Reading files and encoding the
//! result into another container are left to the caller.
//!
//! ## Supported
//!
//! - 1–8 bitplanes, resolved through a single CMAP
//! - BODY compression 0 (none) and 1 (PackBits / ByteRun1)
//! - Masking modes 0, 2 and 3 (no interleaved mask plane)
//! - Vertical row replication for non-square pixels, default ×2
//!
//! ## Non-Goals
//!
//! - HAM and EHB display modes
//! - Interleaved mask planes (masking 1)
//! - Encoding ILBM
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use zenilbm::{DecodeRequest, ImageInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your ILBM bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{}, {} planes", info.width, info.height, info.planes);
//!
//! // Decode with the default ×2 vertical scale
//! let raster = DecodeRequest::new(data).decode(Unstoppable)?;
//! assert_eq!(raster.height, info.height * 2);
//! # Ok::<(), zenilbm::IlbmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod info;
mod limits;
mod pixel;

pub mod ilbm;

// Re-exports
pub use decode::{DEFAULT_Y_SCALE, DecodeRequest, Raster};
pub use enough::{Stop, Unstoppable};
pub use error::{IlbmError, Mismatch};
pub use ilbm::{BitmapHeader, ChunkId, Compression, Palette};
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Decode ILBM to RGB8 with the default vertical scale.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Raster, IlbmError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode ILBM to palette indices with the default vertical scale.
pub fn decode_indexed(data: &[u8], stop: impl Stop) -> Result<Raster, IlbmError> {
    DecodeRequest::new(data).decode_indexed(stop)
}

/// Probe ILBM dimensions and format without decoding pixels.
pub fn probe(data: &[u8]) -> Result<ImageInfo, IlbmError> {
    ImageInfo::from_bytes(data)
}
