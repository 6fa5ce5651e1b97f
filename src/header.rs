//! The two fixed-layout BMP headers.
//!
//! Offsets are fixed by the published format; correctness here is purely a
//! matter of reading the right byte range with the right signedness and
//! endianness. Everything is little-endian.
//!
//! ```text
//! offset  size  field
//!      0     2  signature "BM"
//!      2     4  file size
//!      6     4  reserved
//!     10     4  pixel data offset
//!     14     4  info header size (must be 40)
//!     18     4  width (unsigned)
//!     22     4  height (signed; sign encodes scanline order)
//!     26     2  planes (must be 1)
//!     28     2  bits per pixel
//!     30     4  compression code
//!     34     4  image size (0 when uncompressed)
//!     38     4  x pixels per meter (signed)
//!     42     4  y pixels per meter (signed)
//!     46     4  palette color count
//!     50     4  important color count
//! ```

use alloc::format;

use crate::cursor::Cursor;
use crate::error::DibError;

/// Length of the file header (`BITMAPFILEHEADER`).
pub const FILE_HEADER_LEN: usize = 14;
/// Length of the supported info header (`BITMAPINFOHEADER`).
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the first pixel byte for the supported layout.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;
/// Bytes per pixel for the 32-bpp pixel engine.
pub const BYTES_PER_PIXEL: usize = 4;

const SIGNATURE: [u8; 2] = *b"BM";

/// `BITMAPFILEHEADER` minus the implicit "BM" signature.
///
/// The reserved bytes are carried verbatim so that re-serializing an
/// unmodified file reproduces it byte for byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Declared total file size in bytes.
    pub file_size: u32,
    /// Four reserved bytes; ignored, but preserved on round-trip.
    pub reserved: [u8; 4],
    /// Offset from the start of the file to the pixel data (54 here).
    pub pixel_data_offset: u32,
}

/// BMP compression kind, decoded from the 4-byte code at offset 30.
///
/// Unrecognized codes are kept as [`Compression::Unknown`] with the raw
/// code so serialization can reproduce them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
    Unknown(u32),
}

impl Compression {
    pub fn from_u32(code: u32) -> Self {
        match code {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields => 3,
            Self::Unknown(code) => code,
        }
    }
}

/// Scanline storage order, derived from the sign of the height field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanlineOrder {
    /// Non-negative height: the first stored row is the bottom of the image.
    BottomUp,
    /// Negative height: the first stored row is the top of the image.
    TopDown,
}

/// `BITMAPINFOHEADER` (the 40-byte variant; nothing else is accepted).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub width: u32,
    /// Signed: a negative value means top-down scanline order.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: Compression,
    /// Size of the pixel data in bytes; 0 for uncompressed images.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub palette_colors: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    pub fn scanline_order(&self) -> ScanlineOrder {
        if self.height < 0 {
            ScanlineOrder::TopDown
        } else {
            ScanlineOrder::BottomUp
        }
    }

    /// Number of pixel rows, regardless of scanline order.
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Total pixel count, overflow-checked.
    pub fn pixel_count(&self) -> Option<u64> {
        u64::from(self.width).checked_mul(u64::from(self.rows()))
    }
}

/// Parse the 14-byte file header from the start of `data`.
///
/// The signature check is the sole format gate: anything that does not
/// begin with `"BM"` is [`DibError::BadSignature`], and info-header parsing
/// is never attempted for such input.
pub fn parse_file_header(data: &[u8]) -> Result<FileHeader, DibError> {
    if data.len() < FILE_HEADER_LEN {
        return Err(DibError::Truncated {
            needed: FILE_HEADER_LEN,
            actual: data.len(),
        });
    }
    // Literal byte comparison, not a little-endian u16, so there is no
    // endianness ambiguity in the magic check.
    if data[0..2] != SIGNATURE {
        return Err(DibError::BadSignature);
    }

    let mut cursor = Cursor::new(data);
    cursor.set_position(2)?;
    let file_size = cursor.get_u32_le()?;
    let reserved = cursor.read_fixed_bytes::<4>()?;
    let pixel_data_offset = cursor.get_u32_le()?;

    Ok(FileHeader {
        file_size,
        reserved,
        pixel_data_offset,
    })
}

/// Parse the 40-byte info header starting at offset 14 of `data`.
///
/// A declared header size other than 40 (the extended V2..V5 layouts, or
/// the 12-byte core header) is a hard reject, never a truncated read.
pub fn parse_info_header(data: &[u8]) -> Result<InfoHeader, DibError> {
    if data.len() < PIXEL_DATA_OFFSET {
        return Err(DibError::Truncated {
            needed: PIXEL_DATA_OFFSET,
            actual: data.len(),
        });
    }

    let mut cursor = Cursor::new(data);
    cursor.set_position(FILE_HEADER_LEN)?;

    let header_size = cursor.get_u32_le()?;
    if header_size as usize != INFO_HEADER_LEN {
        return Err(DibError::UnsupportedHeaderVariant(format!(
            "info header size {header_size}, expected {INFO_HEADER_LEN}"
        )));
    }

    let width = cursor.get_u32_le()?;
    let height = cursor.get_i32_le()?;
    let planes = cursor.get_u16_le()?;
    if planes != 1 {
        return Err(DibError::UnsupportedHeaderVariant(format!(
            "planes field is {planes}, expected 1"
        )));
    }
    let bit_count = cursor.get_u16_le()?;
    let compression = Compression::from_u32(cursor.get_u32_le()?);
    let image_size = cursor.get_u32_le()?;
    let x_pixels_per_meter = cursor.get_i32_le()?;
    let y_pixels_per_meter = cursor.get_i32_le()?;
    let palette_colors = cursor.get_u32_le()?;
    let important_colors = cursor.get_u32_le()?;

    trace!(
        "info header: {}x{} {}bpp compression={:?}",
        width, height, bit_count, compression
    );

    Ok(InfoHeader {
        width,
        height,
        planes,
        bit_count,
        compression,
        image_size,
        x_pixels_per_meter,
        y_pixels_per_meter,
        palette_colors,
        important_colors,
    })
}

/// Serialize both headers to the 54-byte on-disk layout.
pub fn serialize_headers(file: &FileHeader, info: &InfoHeader) -> [u8; PIXEL_DATA_OFFSET] {
    let mut out = [0u8; PIXEL_DATA_OFFSET];

    out[0..2].copy_from_slice(&SIGNATURE);
    out[2..6].copy_from_slice(&file.file_size.to_le_bytes());
    out[6..10].copy_from_slice(&file.reserved);
    out[10..14].copy_from_slice(&file.pixel_data_offset.to_le_bytes());

    out[14..18].copy_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out[18..22].copy_from_slice(&info.width.to_le_bytes());
    out[22..26].copy_from_slice(&info.height.to_le_bytes());
    out[26..28].copy_from_slice(&info.planes.to_le_bytes());
    out[28..30].copy_from_slice(&info.bit_count.to_le_bytes());
    out[30..34].copy_from_slice(&info.compression.to_u32().to_le_bytes());
    out[34..38].copy_from_slice(&info.image_size.to_le_bytes());
    out[38..42].copy_from_slice(&info.x_pixels_per_meter.to_le_bytes());
    out[42..46].copy_from_slice(&info.y_pixels_per_meter.to_le_bytes());
    out[46..50].copy_from_slice(&info.palette_colors.to_le_bytes());
    out[50..54].copy_from_slice(&info.important_colors.to_le_bytes());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn sample_headers() -> (FileHeader, InfoHeader) {
        let file = FileHeader {
            file_size: 54 + 16,
            reserved: [0xDE, 0xAD, 0xBE, 0xEF],
            pixel_data_offset: 54,
        };
        let info = InfoHeader {
            width: 2,
            height: 2,
            planes: 1,
            bit_count: 32,
            compression: Compression::Rgb,
            image_size: 0,
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            palette_colors: 0,
            important_colors: 0,
        };
        (file, info)
    }

    #[test]
    fn serialize_parse_roundtrip() {
        let (file, info) = sample_headers();
        let bytes = serialize_headers(&file, &info);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(parse_file_header(&bytes).unwrap(), file);
        assert_eq!(parse_info_header(&bytes).unwrap(), info);
    }

    #[test]
    fn field_offsets() {
        let (file, mut info) = sample_headers();
        info.height = -7;
        info.compression = Compression::Bitfields;
        let bytes = serialize_headers(&file, &info);

        assert_eq!(u32::from_le_bytes(bytes[2..6].try_into().unwrap()), 70);
        assert_eq!(&bytes[6..10], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(u32::from_le_bytes(bytes[10..14].try_into().unwrap()), 54);
        assert_eq!(u32::from_le_bytes(bytes[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(bytes[22..26].try_into().unwrap()), -7);
        assert_eq!(u32::from_le_bytes(bytes[30..34].try_into().unwrap()), 3);
    }

    #[test]
    fn bad_signature_rejected() {
        let (file, info) = sample_headers();
        let mut bytes = serialize_headers(&file, &info).to_vec();
        bytes[0] = b'P';
        assert!(matches!(
            parse_file_header(&bytes),
            Err(DibError::BadSignature)
        ));
    }

    #[test]
    fn short_file_header_is_truncated() {
        assert!(matches!(
            parse_file_header(b"BM\x00"),
            Err(DibError::Truncated { needed: 14, .. })
        ));
    }

    #[test]
    fn extended_header_variant_rejected() {
        let (file, info) = sample_headers();
        let mut bytes = serialize_headers(&file, &info).to_vec();
        // Declare a BITMAPV5HEADER (124 bytes): reject, do not truncate-read.
        bytes[14..18].copy_from_slice(&124u32.to_le_bytes());
        assert!(matches!(
            parse_info_header(&bytes),
            Err(DibError::UnsupportedHeaderVariant(_))
        ));
    }

    #[test]
    fn nonzero_planes_rejected() {
        let (file, info) = sample_headers();
        let mut bytes = serialize_headers(&file, &info).to_vec();
        bytes[26..28].copy_from_slice(&3u16.to_le_bytes());
        assert!(matches!(
            parse_info_header(&bytes),
            Err(DibError::UnsupportedHeaderVariant(_))
        ));
    }

    #[test]
    fn unknown_compression_code_is_preserved() {
        assert_eq!(Compression::from_u32(5), Compression::Unknown(5));
        assert_eq!(Compression::from_u32(5).to_u32(), 5);
        assert_eq!(Compression::from_u32(2), Compression::Rle4);
    }

    #[test]
    fn scanline_order_follows_height_sign() {
        let (_, mut info) = sample_headers();
        assert_eq!(info.scanline_order(), ScanlineOrder::BottomUp);
        info.height = 0;
        assert_eq!(info.scanline_order(), ScanlineOrder::BottomUp);
        info.height = -2;
        assert_eq!(info.scanline_order(), ScanlineOrder::TopDown);
        assert_eq!(info.rows(), 2);
    }

    #[test]
    fn truncated_info_header() {
        let (file, info) = sample_headers();
        let bytes = serialize_headers(&file, &info);
        let short: Vec<u8> = bytes[..40].to_vec();
        assert!(matches!(
            parse_info_header(&short),
            Err(DibError::Truncated { needed: 54, actual: 40 })
        ));
    }
}
