//! IFF `FORM ILBM` decoding stages.
//!
//! [`DecodeRequest`](crate::DecodeRequest) runs these in order; they are public for
//! callers that want to inspect intermediate results:
//!
//! 1. [`index`]: validate the `FORM` framing and locate top-level chunks
//! 2. [`decode_header`], [`decode_palette`], [`decode_planes`]: BMHD, CMAP, BODY
//! 3. [`compose`] / [`compose_indexed`]: bitplanes to pixels

pub mod chunk;
pub mod compose;
pub mod cursor;
pub mod decode;
pub mod packbits;

pub use chunk::{ChunkId, ChunkRecord, ChunkTable, index};
pub use compose::{compose, compose_indexed};
pub use cursor::ByteCursor;
pub use decode::{
    BMHD_LEN, BitmapHeader, Compression, Palette, PlaneSet, decode_header, decode_palette,
    decode_planes,
};
pub use packbits::unpack_bits;

use log::debug;

use crate::decode::Raster;
use crate::error::IlbmError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use enough::Stop;

/// Run the whole pipeline: index, header, palette, planes, compose.
pub(crate) fn decode_ilbm(
    data: &[u8],
    y_scale: u32,
    layout: PixelLayout,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster, IlbmError> {
    if y_scale == 0 {
        return Err(IlbmError::InvalidScale(y_scale));
    }
    let table = index(data)?;
    let header = decode_header(data, table.require(ChunkId::BMHD)?)?;
    header.validate()?;
    debug!(
        "ILBM {}x{} planes={} compression={} masking={}",
        header.width, header.height, header.planes, header.compression, header.masking
    );

    let width = u32::from(header.width);
    let height = u32::from(header.height)
        .checked_mul(y_scale)
        .ok_or(IlbmError::DimensionsTooLarge {
            width,
            height: u32::MAX,
        })?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
        let plane_bytes = header
            .bytes_per_row()
            .saturating_mul(usize::from(header.height))
            .saturating_mul(usize::from(header.planes));
        let out_bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(layout.bytes_per_pixel()))
            .ok_or(IlbmError::DimensionsTooLarge { width, height })?;
        limits.check_memory(plane_bytes.saturating_add(out_bytes))?;
    }
    stop.check()?;

    let palette = decode_palette(data, table.require(ChunkId::CMAP)?)?;
    let planes = decode_planes(data, table.require(ChunkId::BODY)?, &header, stop)?;

    let pixels = match layout {
        PixelLayout::Indexed8 => compose_indexed(&planes, &header, y_scale, stop)?,
        PixelLayout::Rgb8 => compose(&planes, &palette, &header, y_scale, stop)?,
    };
    Ok(Raster::new(pixels, width, height, layout, palette, header))
}

/// Read dimensions and format details without touching BODY.
pub(crate) fn probe_header(data: &[u8]) -> Result<ImageInfo, IlbmError> {
    let table = index(data)?;
    let header = decode_header(data, table.require(ChunkId::BMHD)?)?;
    header.validate()?;
    let palette_len = table.get(ChunkId::CMAP).map(|c| c.length as usize / 3);
    Ok(ImageInfo {
        width: u32::from(header.width),
        height: u32::from(header.height),
        planes: header.planes,
        compression: Compression::from_u8(header.compression)?,
        palette_len,
        x_aspect: header.x_aspect,
        y_aspect: header.y_aspect,
    })
}
