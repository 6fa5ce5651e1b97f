//! ICO/CUR directory records (`ICONDIR` / `ICONDIRENTRY`).
//!
//! An icon file opens with a 6-byte directory header followed by one
//! 16-byte entry per image. All fields are little-endian. The images the
//! entries point at (PNG or DIB payloads) are not decoded here.

use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::error::DibError;

/// Resource type word at offset 2. Anything else fails the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconResourceType {
    Icon,
    Cursor,
}

/// One 16-byte `ICONDIRENTRY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconDirEntry {
    /// Image width in pixels; the on-disk byte stores 256 as 0.
    pub width: u16,
    /// Image height in pixels; the on-disk byte stores 256 as 0.
    pub height: u16,
    /// Palette size, 0 for non-paletted images.
    pub color_count: u8,
    /// Color planes for icons, hotspot x for cursors.
    pub planes: u16,
    /// Bits per pixel for icons, hotspot y for cursors.
    pub bit_count: u16,
    /// Payload size in bytes.
    pub bytes_in_res: u32,
    /// Payload position from the start of the file.
    pub image_offset: u32,
}

/// The parsed `ICONDIR` and its entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconDirectory {
    pub resource_type: IconResourceType,
    pub entries: Vec<IconDirEntry>,
}

impl IconDirectory {
    /// Parse the directory records from the start of an ICO/CUR file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DibError> {
        let mut cursor = Cursor::new(data);

        // ICO has no magic string; the reserved word and the type word
        // together act as the signature.
        let reserved = cursor.get_u16_le()?;
        let type_word = cursor.get_u16_le()?;
        if reserved != 0 {
            return Err(DibError::BadSignature);
        }
        let resource_type = match type_word {
            1 => IconResourceType::Icon,
            2 => IconResourceType::Cursor,
            _ => return Err(DibError::BadSignature),
        };

        let count = cursor.get_u16_le()?;
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            entries.push(parse_entry(&mut cursor)?);
        }

        trace!("ico directory: {:?}, {} entries", resource_type, count);

        Ok(Self {
            resource_type,
            entries,
        })
    }
}

fn parse_entry(cursor: &mut Cursor<'_>) -> Result<IconDirEntry, DibError> {
    let width_byte = cursor.get_u8()?;
    let height_byte = cursor.get_u8()?;
    let color_count = cursor.get_u8()?;
    cursor.skip(1)?; // reserved
    let planes = cursor.get_u16_le()?;
    let bit_count = cursor.get_u16_le()?;
    let bytes_in_res = cursor.get_u32_le()?;
    let image_offset = cursor.get_u32_le()?;

    Ok(IconDirEntry {
        width: decode_dimension(width_byte),
        height: decode_dimension(height_byte),
        color_count,
        planes,
        bit_count,
        bytes_in_res,
        image_offset,
    })
}

/// Dimension bytes store 256 as 0.
fn decode_dimension(byte: u8) -> u16 {
    if byte == 0 { 256 } else { u16::from(byte) }
}
