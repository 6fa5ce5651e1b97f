//! PNG chunk walking.
//!
//! A PNG file is the 8-byte signature followed by a sequence of chunks:
//! big-endian length, 4-byte type, payload, big-endian CRC. The walker
//! yields the chunk records; it does not inflate or interpret payloads.

use crate::cursor::Cursor;
use crate::error::DibError;

pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// One chunk record, borrowing its payload from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PngChunk<'a> {
    pub length: u32,
    pub chunk_type: [u8; 4],
    pub data: &'a [u8],
    /// CRC as declared in the file; not verified here.
    pub crc: u32,
}

impl PngChunk<'_> {
    /// Chunk type as ASCII, e.g. `"IHDR"`.
    pub fn type_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.chunk_type).ok()
    }
}

/// Iterator over the chunks of a PNG byte stream.
///
/// A malformed chunk (length running past the input) surfaces as an `Err`
/// item, after which iteration ends; a clean end of input ends iteration
/// without an error.
pub struct PngChunkIter<'a> {
    rest: &'a [u8],
    failed: bool,
}

impl<'a> PngChunkIter<'a> {
    /// Validate the PNG signature and position the walker on the first chunk.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self, DibError> {
        if data.len() < PNG_SIGNATURE.len() {
            return Err(DibError::Truncated {
                needed: PNG_SIGNATURE.len(),
                actual: data.len(),
            });
        }
        if data[..8] != PNG_SIGNATURE {
            return Err(DibError::BadSignature);
        }
        Ok(Self {
            rest: &data[8..],
            failed: false,
        })
    }
}

impl<'a> Iterator for PngChunkIter<'a> {
    type Item = Result<PngChunk<'a>, DibError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }

        let mut cursor = Cursor::new(self.rest);
        let chunk = (|| {
            let length = cursor.get_u32_be()?;
            let chunk_type = cursor.read_fixed_bytes::<4>()?;
            let data = cursor.read_slice(length as usize)?;
            let crc = cursor.get_u32_be()?;
            Ok(PngChunk {
                length,
                chunk_type,
                data,
                crc,
            })
        })();

        match chunk {
            Ok(chunk) => {
                self.rest = &self.rest[cursor.position()..];
                Some(Ok(chunk))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
