//! BMHD, CMAP and BODY decoding.

use alloc::vec::Vec;

use enough::Stop;

use super::chunk::ChunkRecord;
use super::cursor::ByteCursor;
use super::packbits::unpack_row;
use crate::error::IlbmError;

/// Size of the BMHD chunk content.
pub const BMHD_LEN: u32 = 20;

/// BODY compression mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    /// Rows stored verbatim.
    Raw,
    /// Each plane row is PackBits-encoded on its own.
    PackBits,
}

impl Compression {
    pub fn from_u8(value: u8) -> Result<Self, IlbmError> {
        match value {
            0 => Ok(Self::Raw),
            1 => Ok(Self::PackBits),
            other => Err(IlbmError::UnsupportedCompression(other)),
        }
    }
}

/// Contents of the BMHD chunk, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub width: u16,
    pub height: u16,
    pub x_origin: u16,
    pub y_origin: u16,
    pub planes: u8,
    pub masking: u8,
    pub compression: u8,
    pub pad: u8,
    pub transparent_color: u16,
    pub x_aspect: u8,
    pub y_aspect: u8,
    pub page_width: u16,
    pub page_height: u16,
}

impl BitmapHeader {
    /// Bytes in one row of one bitplane. Width is a multiple of 8.
    pub fn bytes_per_row(&self) -> usize {
        usize::from(self.width) / 8
    }

    /// Check the fields the decoder relies on.
    ///
    /// Masking 1 interleaves an extra mask plane into BODY, which this
    /// decoder does not read. Masking 2 (transparent color) and 3 (lasso)
    /// leave the BODY layout unchanged and are accepted.
    pub fn validate(&self) -> Result<(), IlbmError> {
        if self.width == 0 || self.height == 0 {
            return Err(IlbmError::InvalidHeader(alloc::format!(
                "zero dimension {}x{}",
                self.width,
                self.height
            )));
        }
        if self.width % 8 != 0 {
            return Err(IlbmError::InvalidHeader(alloc::format!(
                "width {} is not a multiple of 8",
                self.width
            )));
        }
        if !(1..=8).contains(&self.planes) {
            return Err(IlbmError::InvalidHeader(alloc::format!(
                "unsupported plane count {}",
                self.planes
            )));
        }
        if self.masking == 1 {
            return Err(IlbmError::InvalidHeader(
                "interleaved mask plane not supported".into(),
            ));
        }
        Ok(())
    }
}

/// Decode the BMHD chunk. Its declared length must be exactly 20.
pub fn decode_header(data: &[u8], chunk: &ChunkRecord) -> Result<BitmapHeader, IlbmError> {
    if chunk.length != BMHD_LEN {
        return Err(IlbmError::UnsupportedHeaderLength(chunk.length));
    }
    let mut c = ByteCursor::at(data, chunk.offset);
    Ok(BitmapHeader {
        width: c.read_u16_be()?,
        height: c.read_u16_be()?,
        x_origin: c.read_u16_be()?,
        y_origin: c.read_u16_be()?,
        planes: c.read_u8()?,
        masking: c.read_u8()?,
        compression: c.read_u8()?,
        pad: c.read_u8()?,
        transparent_color: c.read_u16_be()?,
        x_aspect: c.read_u8()?,
        y_aspect: c.read_u8()?,
        page_width: c.read_u16_be()?,
        page_height: c.read_u16_be()?,
    })
}

/// Color map: RGB triples in index order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    rgb: Vec<u8>,
}

impl Palette {
    /// Build a palette from RGB triples.
    pub fn from_colors(colors: &[[u8; 3]]) -> Self {
        Self {
            rgb: colors.iter().flatten().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rgb.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.rgb.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<[u8; 3]> {
        let start = index.checked_mul(3)?;
        let c = self.rgb.get(start..start.checked_add(3)?)?;
        Some([c[0], c[1], c[2]])
    }

    pub fn iter(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.rgb.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Flat `R, G, B, R, G, B, ...` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgb
    }

    /// Entries as typed RGB pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgb(&self) -> &[rgb::RGB8] {
        use rgb::AsPixels as _;
        self.rgb.as_pixels()
    }
}

/// Decode the CMAP chunk: `length / 3` triples, any partial triple ignored.
pub fn decode_palette(data: &[u8], chunk: &ChunkRecord) -> Result<Palette, IlbmError> {
    let entries = chunk.length as usize / 3;
    let mut c = ByteCursor::at(data, chunk.offset);
    let rgb = c.read_bytes(entries * 3)?.to_vec();
    Ok(Palette { rgb })
}

/// One byte array per bitplane, each `height * bytes_per_row` long.
#[derive(Clone, Debug)]
pub struct PlaneSet {
    planes: Vec<Vec<u8>>,
    bytes_per_row: usize,
}

impl PlaneSet {
    fn with_capacity(plane_count: usize, bytes_per_row: usize, capacity: usize) -> Self {
        Self {
            planes: (0..plane_count)
                .map(|_| Vec::with_capacity(capacity))
                .collect(),
            bytes_per_row,
        }
    }

    /// Wrap existing plane data. Every plane must hold whole rows.
    pub fn from_planes(planes: Vec<Vec<u8>>, bytes_per_row: usize) -> Result<Self, IlbmError> {
        let rows = planes.first().map_or(0, |p| p.len() / bytes_per_row.max(1));
        if planes
            .iter()
            .any(|p| bytes_per_row == 0 || p.len() != rows * bytes_per_row)
        {
            return Err(IlbmError::InvalidHeader(
                "bitplanes must be equal length multiples of bytes_per_row".into(),
            ));
        }
        Ok(Self {
            planes,
            bytes_per_row,
        })
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn plane(&self, index: usize) -> &[u8] {
        &self.planes[index]
    }

    /// Row `y` of plane `index`.
    pub fn row(&self, index: usize, y: usize) -> &[u8] {
        let start = y * self.bytes_per_row;
        &self.planes[index][start..start + self.bytes_per_row]
    }
}

/// Decode the BODY chunk into bitplanes.
///
/// Rows are read in scan order; within a row, one run of `bytes_per_row`
/// per plane. Reading may continue past the BODY's declared length up to the
/// end of the buffer.
pub fn decode_planes(
    data: &[u8],
    chunk: &ChunkRecord,
    header: &BitmapHeader,
    stop: &dyn Stop,
) -> Result<PlaneSet, IlbmError> {
    let compression = Compression::from_u8(header.compression)?;
    let bpr = header.bytes_per_row();
    let rows = usize::from(header.height);
    let mut c = ByteCursor::at(data, chunk.offset);
    // Header dimensions are untrusted; cap the up-front reservation by the input size.
    let capacity = (bpr * rows).min(c.remaining());
    let mut planes = PlaneSet::with_capacity(usize::from(header.planes), bpr, capacity);

    for y in 0..rows {
        if y % 16 == 0 {
            stop.check()?;
        }
        for plane in planes.planes.iter_mut() {
            match compression {
                Compression::Raw => plane.extend_from_slice(c.read_bytes(bpr)?),
                Compression::PackBits => unpack_row(&mut c, plane, bpr)?,
            }
        }
    }
    Ok(planes)
}
