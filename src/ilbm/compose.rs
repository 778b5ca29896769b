//! Bitplanes to indexed and RGB rasters.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::decode::{BitmapHeader, Palette, PlaneSet};
use crate::error::IlbmError;

/// Resolve bitplanes through `palette` into RGB8, repeating each source row
/// `y_scale` times.
///
/// Output is `width * height * y_scale * 3` bytes. Plane 0 supplies the
/// least significant index bit; bit 7 of each byte is the leftmost pixel.
pub fn compose(
    planes: &PlaneSet,
    palette: &Palette,
    header: &BitmapHeader,
    y_scale: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, IlbmError> {
    let width = usize::from(header.width);
    let row_bytes = width * 3;
    let total = output_len(header, y_scale, 3)?;
    check_shape(planes, header)?;

    let mut out = Vec::with_capacity(total);
    let mut indices = vec![0u8; width];
    for y in 0..usize::from(header.height) {
        if y % 16 == 0 {
            stop.check()?;
        }
        index_row(planes, y, &mut indices);
        let start = out.len();
        for &index in &indices {
            let rgb = palette
                .get(usize::from(index))
                .ok_or(IlbmError::PaletteIndexOutOfRange {
                    index,
                    palette_len: palette.len(),
                })?;
            out.extend_from_slice(&rgb);
        }
        replicate_row(&mut out, start, row_bytes, y_scale);
    }
    Ok(out)
}

/// Like [`compose`], but emits palette indices (one byte per pixel) without
/// palette lookup.
pub fn compose_indexed(
    planes: &PlaneSet,
    header: &BitmapHeader,
    y_scale: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, IlbmError> {
    let width = usize::from(header.width);
    let total = output_len(header, y_scale, 1)?;
    check_shape(planes, header)?;

    let mut out = Vec::with_capacity(total);
    for y in 0..usize::from(header.height) {
        if y % 16 == 0 {
            stop.check()?;
        }
        let start = out.len();
        out.resize(start + width, 0);
        index_row(planes, y, &mut out[start..]);
        replicate_row(&mut out, start, width, y_scale);
    }
    Ok(out)
}

/// Overwrite `indices` with the palette indices of source row `y`.
fn index_row(planes: &PlaneSet, y: usize, indices: &mut [u8]) {
    indices.fill(0);
    for i in 0..planes.plane_count() {
        let row = planes.row(i, y);
        for (pixels, &byte) in indices.chunks_mut(8).zip(row) {
            for (x, index) in pixels.iter_mut().enumerate() {
                *index |= ((byte >> (7 - x)) & 1) << i;
            }
        }
    }
}

/// Append `y_scale - 1` copies of the row at `out[start..start + len]`.
fn replicate_row(out: &mut Vec<u8>, start: usize, len: usize, y_scale: u32) {
    for _ in 1..y_scale {
        out.extend_from_within(start..start + len);
    }
}

fn output_len(header: &BitmapHeader, y_scale: u32, bpp: usize) -> Result<usize, IlbmError> {
    if y_scale == 0 {
        return Err(IlbmError::InvalidScale(y_scale));
    }
    let width = u32::from(header.width);
    let height = u32::from(header.height);
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(y_scale as usize))
        .and_then(|n| n.checked_mul(bpp))
        .ok_or(IlbmError::DimensionsTooLarge {
            width,
            height: height.saturating_mul(y_scale),
        })
}

fn check_shape(planes: &PlaneSet, header: &BitmapHeader) -> Result<(), IlbmError> {
    let rows = usize::from(header.height);
    let bpr = header.bytes_per_row();
    let consistent = planes.plane_count() == usize::from(header.planes)
        && planes.bytes_per_row() == bpr
        && (0..planes.plane_count()).all(|i| planes.plane(i).len() >= rows * bpr);
    if !consistent {
        return Err(IlbmError::InvalidHeader(alloc::format!(
            "bitplanes do not match a {}x{}x{} header",
            header.width,
            header.height,
            header.planes
        )));
    }
    Ok(())
}
