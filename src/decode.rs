use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::error::IlbmError;
use crate::ilbm::{self, BitmapHeader, Palette};
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Default vertical replication factor.
///
/// Classic ILBM art was drawn for pixels roughly twice as tall as wide;
/// doubling every row makes it look right on square-pixel displays.
pub const DEFAULT_Y_SCALE: u32 = 2;

/// Decoded ILBM image.
///
/// `height` is the output height, i.e. the BMHD height times the y-scale the
/// image was decoded with.
#[derive(Clone, Debug)]
pub struct Raster {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    palette: Palette,
    header: BitmapHeader,
}

impl Raster {
    pub(crate) fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
        palette: Palette,
        header: BitmapHeader,
    ) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
            palette,
            header,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The CMAP the pixels were resolved through.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The BMHD as stored in the file (unscaled).
    pub fn header(&self) -> &BitmapHeader {
        &self.header
    }

    /// Pixel at `(x, y)`: 3 bytes for `Rgb8`, 1 for `Indexed8`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.layout.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.pixels.get(start..start + bpp)
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`IlbmError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], IlbmError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(IlbmError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`IlbmError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, IlbmError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`IlbmError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, IlbmError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Builder for a single decode call.
///
/// ```no_run
/// use zenilbm::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your ILBM bytes
/// let limits = Limits { max_pixels: Some(4_000_000), ..Default::default() };
/// let raster = DecodeRequest::new(data)
///     .with_y_scale(1)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenilbm::IlbmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    y_scale: u32,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            y_scale: DEFAULT_Y_SCALE,
            limits: None,
        }
    }

    /// Repeat every source row `y_scale` times. Must be positive.
    pub fn with_y_scale(mut self, y_scale: u32) -> Self {
        self.y_scale = y_scale;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode to RGB8 through the CMAP.
    pub fn decode(self, stop: impl Stop) -> Result<Raster, IlbmError> {
        ilbm::decode_ilbm(
            self.data,
            self.y_scale,
            PixelLayout::Rgb8,
            self.limits,
            &stop,
        )
    }

    /// Decode to one palette index per pixel. The CMAP is still required and
    /// returned via [`Raster::palette`], but indices are not checked against it.
    pub fn decode_indexed(self, stop: impl Stop) -> Result<Raster, IlbmError> {
        ilbm::decode_ilbm(
            self.data,
            self.y_scale,
            PixelLayout::Indexed8,
            self.limits,
            &stop,
        )
    }
}
