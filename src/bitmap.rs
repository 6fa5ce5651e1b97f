//! Owned bitmap value: headers plus the raw file buffer.
//!
//! The buffer is the sole owner of pixel storage. The pixel view is always
//! recomputed as `data[PIXEL_DATA_OFFSET..PIXEL_DATA_OFFSET + 4wh]` — there
//! is no cached second pointer to keep in sync across clones and moves.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::DibError;
use crate::header::{
    self, BYTES_PER_PIXEL, Compression, FileHeader, InfoHeader, PIXEL_DATA_OFFSET, ScanlineOrder,
};
use crate::limits::Limits;
use crate::pixel::Pixel;

// ── Probe ───────────────────────────────────────────────────────────

/// Header-only summary of a BMP byte stream, without validating or touching
/// the pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DibInfo {
    pub width: u32,
    /// Absolute row count; see `scanline_order` for storage direction.
    pub height: u32,
    pub bit_count: u16,
    pub compression: Compression,
    pub scanline_order: ScanlineOrder,
}

impl DibInfo {
    /// Probe the two headers. Accepts any declared bit depth and
    /// compression; only the signature and header layout are enforced.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DibError> {
        let _file = header::parse_file_header(data)?;
        let info = header::parse_info_header(data)?;
        Ok(Self {
            width: info.width,
            height: info.rows(),
            bit_count: info.bit_count,
            compression: info.compression,
            scanline_order: info.scanline_order(),
        })
    }
}

// ── Parse request ───────────────────────────────────────────────────

/// Builder for parsing BMP bytes into a [`Bitmap`].
///
/// ```no_run
/// use dibkit::{Limits, ParseRequest, Unstoppable};
///
/// let data: &[u8] = &[];
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let bmp = ParseRequest::new(data).with_limits(&limits).parse(Unstoppable)?;
/// # Ok::<(), dibkit::DibError>(())
/// ```
pub struct ParseRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> ParseRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Validate and copy the input into an owned [`Bitmap`].
    ///
    /// Every header and limit check runs against the borrowed input; the
    /// copy happens only once the input is known to be acceptable.
    pub fn parse(self, stop: impl Stop) -> Result<Bitmap, DibError> {
        stop.check()?;
        let (file, info) = Bitmap::validate(self.data, self.limits)?;
        Ok(Bitmap {
            file,
            info,
            data: self.data.to_vec(),
        })
    }
}

// ── Bitmap ──────────────────────────────────────────────────────────

/// An uncompressed 32-bpp DIB: parsed headers plus the owning byte buffer.
///
/// Cloning deep-copies the buffer. Moving transfers buffer ownership; Rust's
/// move semantics make a moved-from value unreachable, so there is no
/// "emptied source" state to manage.
#[derive(Clone, Debug)]
pub struct Bitmap {
    file: FileHeader,
    info: InfoHeader,
    /// Whole file image: 54 header bytes, then `4 * width * height` pixel
    /// bytes (plus any trailing bytes the parsed file carried).
    data: Vec<u8>,
}

impl Bitmap {
    // ── Construction ────────────────────────────────────────────────

    /// Parse an owned byte buffer. Either every check passes and the buffer
    /// becomes the bitmap's storage, or a typed error is returned and
    /// nothing partially constructed escapes.
    pub fn parse(data: Vec<u8>) -> Result<Self, DibError> {
        let (file, info) = Self::validate(&data, None)?;
        Ok(Self { file, info, data })
    }

    /// Run every parse-time check against a borrowed byte slice. Nothing is
    /// allocated here; callers copy the input only after this succeeds.
    fn validate(
        data: &[u8],
        limits: Option<&Limits>,
    ) -> Result<(FileHeader, InfoHeader), DibError> {
        let file = header::parse_file_header(data)?;
        let info = header::parse_info_header(data)?;
        let pixel_bytes = Self::pixel_region_bytes(&info)?;

        if file.pixel_data_offset as usize != PIXEL_DATA_OFFSET {
            return Err(DibError::UnsupportedHeaderVariant(format!(
                "pixel data offset {}, expected {PIXEL_DATA_OFFSET}",
                file.pixel_data_offset
            )));
        }

        if let Some(limits) = limits {
            limits.check(info.width, info.rows())?;
            limits.check_memory(pixel_bytes)?;
        }

        let needed = (PIXEL_DATA_OFFSET as u64)
            .checked_add(pixel_bytes)
            .filter(|n| *n <= usize::MAX as u64)
            .ok_or_else(|| DibError::InvalidDimensions("file size overflows".into()))?
            as usize;
        if data.len() < needed {
            return Err(DibError::Truncated {
                needed,
                actual: data.len(),
            });
        }

        debug!(
            "parsed {}x{} bitmap, {:?} scanline order",
            info.width,
            info.rows(),
            info.scanline_order()
        );

        Ok((file, info))
    }

    /// Check the info-header fields the pixel engine depends on and return
    /// the byte length of the pixel region.
    fn pixel_region_bytes(info: &InfoHeader) -> Result<u64, DibError> {
        if info.planes != 1 {
            return Err(DibError::UnsupportedHeaderVariant(format!(
                "{} color planes, the format defines exactly 1",
                info.planes
            )));
        }
        if info.bit_count != 32 {
            return Err(DibError::UnsupportedHeaderVariant(format!(
                "{} bits per pixel, the pixel engine supports 32 only",
                info.bit_count
            )));
        }
        if info.compression != Compression::Rgb {
            return Err(DibError::UnsupportedHeaderVariant(format!(
                "compression {:?}, the pixel engine supports uncompressed RGB only",
                info.compression
            )));
        }
        if info.width == 0 || info.height == 0 {
            return Err(DibError::InvalidDimensions(format!(
                "{}x{} image has no pixels",
                info.width, info.height
            )));
        }

        info.pixel_count()
            .ok_or_else(|| DibError::InvalidDimensions("pixel count overflows".into()))?
            .checked_mul(BYTES_PER_PIXEL as u64)
            .ok_or_else(|| DibError::InvalidDimensions("pixel region overflows".into()))
    }

    fn bottom_up_info(width: u32, height: u32) -> Result<InfoHeader, DibError> {
        if width == 0 || height == 0 {
            return Err(DibError::InvalidDimensions(format!(
                "{width}x{height} image has no pixels"
            )));
        }
        if height > i32::MAX as u32 {
            return Err(DibError::InvalidDimensions(format!(
                "height {height} does not fit the signed height field"
            )));
        }
        Ok(InfoHeader {
            width,
            height: height as i32,
            planes: 1,
            bit_count: 32,
            compression: Compression::Rgb,
            image_size: 0,
            x_pixels_per_meter: 2835, // 72 DPI
            y_pixels_per_meter: 2835,
            palette_colors: 0,
            important_colors: 0,
        })
    }

    /// Synthesize a bottom-up 32-bpp bitmap filled with opaque black.
    pub fn new(width: u32, height: u32) -> Result<Self, DibError> {
        let info = Self::bottom_up_info(width, height)?;
        let pixel_bytes = Self::pixel_region_bytes(&info)?;
        let file_size = (PIXEL_DATA_OFFSET as u64)
            .checked_add(pixel_bytes)
            .filter(|n| *n <= u64::from(u32::MAX))
            .ok_or_else(|| DibError::InvalidDimensions("file size overflows u32".into()))?;

        let file = FileHeader {
            file_size: file_size as u32,
            reserved: [0; 4],
            pixel_data_offset: PIXEL_DATA_OFFSET as u32,
        };

        let mut data = vec![0u8; file_size as usize];
        data[..PIXEL_DATA_OFFSET].copy_from_slice(&header::serialize_headers(&file, &info));

        let mut bmp = Self { file, info, data };
        bmp.pixels_mut().fill(Pixel::new(0, 0, 0));
        Ok(bmp)
    }

    /// Build a bitmap from a caller-supplied info header plus pixels in
    /// storage order. This is the constructor to use when the scanline
    /// order matters: a negative `height` field yields a top-down image.
    ///
    /// The file header is synthesized: pixel data at offset 54, file size
    /// `54 + 4 * pixels.len()`, reserved bytes zero.
    pub fn from_headers_and_pixels(info: InfoHeader, pixels: &[Pixel]) -> Result<Self, DibError> {
        let pixel_bytes = Self::pixel_region_bytes(&info)?;
        let expected = pixel_bytes / BYTES_PER_PIXEL as u64;
        if pixels.len() as u64 != expected {
            return Err(DibError::InvalidDimensions(format!(
                "{} pixels supplied for a {}x{} image ({expected} expected)",
                pixels.len(),
                info.width,
                info.rows()
            )));
        }
        let file_size = (PIXEL_DATA_OFFSET as u64)
            .checked_add(pixel_bytes)
            .filter(|n| *n <= u64::from(u32::MAX))
            .ok_or_else(|| DibError::InvalidDimensions("file size overflows u32".into()))?;

        let file = FileHeader {
            file_size: file_size as u32,
            reserved: [0; 4],
            pixel_data_offset: PIXEL_DATA_OFFSET as u32,
        };

        let mut data = vec![0u8; file_size as usize];
        data[..PIXEL_DATA_OFFSET].copy_from_slice(&header::serialize_headers(&file, &info));
        data[PIXEL_DATA_OFFSET..].copy_from_slice(bytemuck::cast_slice(pixels));
        Ok(Self { file, info, data })
    }

    /// Build a bottom-up bitmap from an existing pixel sequence in storage
    /// order. `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Pixel]) -> Result<Self, DibError> {
        Self::from_headers_and_pixels(Self::bottom_up_info(width, height)?, pixels)
    }

    /// Read and parse a BMP file.
    #[cfg(feature = "std")]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, DibError> {
        Self::parse(crate::fs::read_all(path)?)
    }

    // ── Serialization ───────────────────────────────────────────────

    /// Serialize to the on-disk byte layout: 54 header bytes followed by the
    /// pixel bytes. Byte-identical to the parsed input when unmodified.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        out[..PIXEL_DATA_OFFSET].copy_from_slice(&header::serialize_headers(&self.file, &self.info));
        out
    }

    /// Write the serialized image to `path` as a single logical write:
    /// either the whole file lands or the error is reported.
    #[cfg(feature = "std")]
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), DibError> {
        crate::fs::write_all(path, &self.to_bytes())
    }

    // ── Geometry ────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Absolute height. The stored height field keeps its sign; see
    /// [`Bitmap::scanline_order`].
    pub fn height(&self) -> u32 {
        self.info.rows()
    }

    pub fn scanline_order(&self) -> ScanlineOrder {
        self.info.scanline_order()
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info
    }

    // ── Pixel access ────────────────────────────────────────────────

    fn pixel_region(&self) -> core::ops::Range<usize> {
        let len = self.info.width as usize * self.info.rows() as usize * BYTES_PER_PIXEL;
        PIXEL_DATA_OFFSET..PIXEL_DATA_OFFSET + len
    }

    /// The pixel view, in storage order. Indexing the slice directly is the
    /// explicit unchecked path (it panics on out-of-range access); use
    /// [`Bitmap::pixel`] for checked access.
    pub fn pixels(&self) -> &[Pixel] {
        bytemuck::cast_slice(&self.data[self.pixel_region()])
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        let region = self.pixel_region();
        bytemuck::cast_slice_mut(&mut self.data[region])
    }

    /// Storage rows, first stored row first. With bottom-up scanline order
    /// the first stored row is the bottom of the image.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels().chunks_exact(self.info.width as usize)
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Pixel]> {
        let width = self.info.width as usize;
        self.pixels_mut().chunks_exact_mut(width)
    }

    fn checked_index(&self, row: u32, col: u32) -> Result<usize, DibError> {
        if row >= self.height() || col >= self.width() {
            return Err(DibError::IndexOutOfBounds {
                row,
                col,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(row as usize * self.info.width as usize + col as usize)
    }

    /// Checked pixel read at (storage row, column).
    pub fn pixel(&self, row: u32, col: u32) -> Result<Pixel, DibError> {
        let idx = self.checked_index(row, col)?;
        Ok(self.pixels()[idx])
    }

    /// Checked pixel write at (storage row, column).
    pub fn set_pixel(&mut self, row: u32, col: u32, px: Pixel) -> Result<(), DibError> {
        let idx = self.checked_index(row, col)?;
        self.pixels_mut()[idx] = px;
        Ok(())
    }
}

/// Header fields and every pixel byte; trailing bytes past the pixel region
/// do not participate.
impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.file == other.file && self.info == other.info && self.pixels() == other.pixels()
    }
}

impl Eq for Bitmap {}
