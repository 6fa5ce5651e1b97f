//! Positioned reader over `&[u8]` for fixed-layout binary records.
//!
//! Every read is fallible: running off the end of the input is
//! [`DibError::Truncated`], never a zero-filled guess.

use crate::error::DibError;

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn want(&self, n: usize) -> Result<(), DibError> {
        let needed = self.pos.checked_add(n).ok_or(DibError::Truncated {
            needed: usize::MAX,
            actual: self.data.len(),
        })?;
        if needed > self.data.len() {
            return Err(DibError::Truncated {
                needed,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), DibError> {
        if pos > self.data.len() {
            return Err(DibError::Truncated {
                needed: pos,
                actual: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), DibError> {
        self.want(n)?;
        self.pos += n;
        Ok(())
    }

    pub(crate) fn get_u8(&mut self) -> Result<u8, DibError> {
        self.want(1)?;
        let b = self.data[self.pos];
        self.pos += 1;
        Ok(b)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, DibError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes::<2>()?))
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, DibError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes::<4>()?))
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, DibError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes::<4>()?))
    }

    /// PNG chunk lengths and CRCs are big-endian.
    pub(crate) fn get_u32_be(&mut self) -> Result<u32, DibError> {
        Ok(u32::from_be_bytes(self.read_fixed_bytes::<4>()?))
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], DibError> {
        self.want(N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(buf)
    }

    pub(crate) fn read_slice(&mut self, n: usize) -> Result<&'a [u8], DibError> {
        self.want(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }
}
