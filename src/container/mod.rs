//! Fixed-layout records for neighboring container formats.
//!
//! These parsers cover the directory/chunk/header *records* of ICO, PNG and
//! GIF — the structures that are laid out byte-for-byte in the file, exactly
//! like the BMP headers. There are no pixel engines behind them; decoding
//! the images those records point at is out of scope.

pub mod gif;
pub mod ico;
pub mod png;
