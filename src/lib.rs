//! # dibkit
//!
//! Windows BMP (device-independent bitmap) codec, plus a small library of
//! per-pixel transforms and procedural image generators.
//!
//! ## What it does
//!
//! - Parses and serializes the classic 54-byte BMP header pair
//!   (`BITMAPFILEHEADER` + `BITMAPINFOHEADER`) with exact byte offsets and
//!   little-endian field order.
//! - Owns the file bytes in a single buffer; the pixel view is computed from
//!   the buffer on demand, never cached as a second pointer.
//! - Pixel engine targets uncompressed 32-bit-per-pixel DIBs. Pixels are
//!   stored in on-disk **BGR + pad** order (see [`Pixel`]).
//! - Transforms: grayscale reductions, threshold negate, channel removal,
//!   horizontal/vertical flips.
//! - Generators: 256-stride gradients, Mandelbrot and Tricorn escape-time
//!   renders, a closed-form "waves" pattern.
//! - Fixed-layout record parsers for ICO directories, PNG chunks and GIF
//!   headers (records only, no pixel engines behind them).
//!
//! ## Non-Goals
//!
//! - RLE-compressed or paletted BMP variants, `BITMAPCOREHEADER`, and the
//!   extended V4/V5 headers — a declared header size other than 40 is a hard
//!   reject, not a best-effort read.
//! - Color management / ICC profiles.
//! - General-purpose resizing.
//!
//! ## Usage
//!
//! ```no_run
//! use dibkit::{Bitmap, GrayscaleMethod, transform};
//!
//! let mut bmp = Bitmap::open("photo.bmp")?;
//! transform::grayscale(&mut bmp, GrayscaleMethod::Luminosity);
//! transform::flip_vertical(&mut bmp);
//! bmp.to_file("photo_gray.bmp")?;
//! # Ok::<(), dibkit::DibError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod log;

mod bitmap;
mod cursor;
mod error;
mod header;
mod limits;
mod pixel;

pub mod container;
pub mod generate;
pub mod transform;

#[cfg(feature = "std")]
pub mod fs;

// Re-exports
pub use bitmap::{Bitmap, DibInfo, ParseRequest};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::DibError;
pub use header::{
    BYTES_PER_PIXEL, Compression, FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader,
    PIXEL_DATA_OFFSET, ScanlineOrder,
};
pub use limits::Limits;
pub use pixel::Pixel;
pub use transform::{ChannelSet, GrayscaleMethod};
