//! GIF header and logical screen descriptor records.

use crate::cursor::Cursor;
use crate::error::DibError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GifVersion {
    Gif87a,
    Gif89a,
}

/// The 6-byte header plus the 7-byte logical screen descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifHeader {
    pub version: GifVersion,
    pub width: u16,
    pub height: u16,
    pub has_global_color_table: bool,
    /// Bits per primary color, 1..=8.
    pub color_resolution: u8,
    /// Entry count of the global color table (0 when absent).
    pub global_color_table_entries: u16,
    pub background_color_index: u8,
    pub pixel_aspect_ratio: u8,
}

impl GifHeader {
    pub fn from_bytes(data: &[u8]) -> Result<Self, DibError> {
        let mut cursor = Cursor::new(data);

        let signature = cursor.read_fixed_bytes::<3>()?;
        if &signature != b"GIF" {
            return Err(DibError::BadSignature);
        }
        let version = match &cursor.read_fixed_bytes::<3>()? {
            b"87a" => GifVersion::Gif87a,
            b"89a" => GifVersion::Gif89a,
            other => {
                return Err(DibError::UnsupportedHeaderVariant(alloc::format!(
                    "GIF version {:?}",
                    core::str::from_utf8(other).unwrap_or("???")
                )));
            }
        };

        let width = cursor.get_u16_le()?;
        let height = cursor.get_u16_le()?;
        let packed = cursor.get_u8()?;
        let background_color_index = cursor.get_u8()?;
        let pixel_aspect_ratio = cursor.get_u8()?;

        let has_global_color_table = packed & 0x80 != 0;
        let color_resolution = ((packed >> 4) & 0x07) + 1;
        let global_color_table_entries = if has_global_color_table {
            2u16 << (packed & 0x07)
        } else {
            0
        };

        Ok(Self {
            version,
            width,
            height,
            has_global_color_table,
            color_resolution,
            global_color_table_entries,
            background_color_index,
            pixel_aspect_ratio,
        })
    }
}
