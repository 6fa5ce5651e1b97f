//! Byte source/sink over the filesystem.
//!
//! The codec core only ever sees whole byte buffers; these helpers are the
//! sole place the crate touches paths.

use std::io;
use std::path::Path;

use crate::error::DibError;

/// Read an entire file. A zero-length file is an I/O error, never an
/// empty-but-valid image.
pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<u8>, DibError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(DibError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{} is empty", path.display()),
        )));
    }
    Ok(bytes)
}

/// Write an entire buffer to `path` in one logical write.
pub fn write_all(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), DibError> {
    std::fs::write(path, bytes)?;
    Ok(())
}
