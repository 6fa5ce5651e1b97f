//! Per-pixel and whole-image transforms.
//!
//! Each transform exists in an in-place form taking `&mut Bitmap` and, for
//! the per-pixel maps, a copying form that leaves the receiver untouched and
//! returns the transformed image. The flips are in-place only; copy first
//! for a non-mutating variant.
//!
//! None of the per-pixel maps touch the reserved byte.

use crate::bitmap::Bitmap;
use crate::pixel::Pixel;

/// Grayscale reduction formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrayscaleMethod {
    /// `round((B + G + R) / 3)`, computed in a wide accumulator.
    Average,
    /// `round(0.299 R + 0.587 G + 0.114 B)` (ITU-R BT.601 weights).
    WeightedAverage,
    /// `round(0.2126 R + 0.7152 G + 0.0722 B)` (ITU-R BT.709 weights).
    Luminosity,
    /// 255 where the truncating integer average `(B + G + R) / 3` is at
    /// least 128, otherwise 0.
    Binary,
}

/// Color channel combination for [`remove_channels`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelSet {
    Red,
    Green,
    Blue,
    RedGreen,
    RedBlue,
    GreenBlue,
}

impl ChannelSet {
    fn clears_red(self) -> bool {
        matches!(self, Self::Red | Self::RedGreen | Self::RedBlue)
    }

    fn clears_green(self) -> bool {
        matches!(self, Self::Green | Self::RedGreen | Self::GreenBlue)
    }

    fn clears_blue(self) -> bool {
        matches!(self, Self::Blue | Self::RedBlue | Self::GreenBlue)
    }
}

/// Round-half-up for non-negative accumulators; `f32::round` lives in std
/// and this crate builds without it.
fn round_to_u8(v: f32) -> u8 {
    (v + 0.5) as u8
}

fn gray_value(px: Pixel, method: GrayscaleMethod) -> u8 {
    let sum = u32::from(px.blue) + u32::from(px.green) + u32::from(px.red);
    match method {
        GrayscaleMethod::Average => round_to_u8(sum as f32 / 3.0),
        GrayscaleMethod::WeightedAverage => round_to_u8(
            0.299 * f32::from(px.red) + 0.587 * f32::from(px.green) + 0.114 * f32::from(px.blue),
        ),
        GrayscaleMethod::Luminosity => round_to_u8(
            0.2126 * f32::from(px.red) + 0.7152 * f32::from(px.green) + 0.0722 * f32::from(px.blue),
        ),
        // Truncating division, deliberately: 383/3 = 127 stays black.
        GrayscaleMethod::Binary => {
            if sum / 3 >= 128 {
                255
            } else {
                0
            }
        }
    }
}

/// Collapse each pixel's color channels to a single gray value, in place.
pub fn grayscale(bmp: &mut Bitmap, method: GrayscaleMethod) {
    for px in bmp.pixels_mut() {
        let v = gray_value(*px, method);
        px.blue = v;
        px.green = v;
        px.red = v;
    }
}

/// Copying variant of [`grayscale`].
pub fn grayscaled(bmp: &Bitmap, method: GrayscaleMethod) -> Bitmap {
    let mut out = bmp.clone();
    grayscale(&mut out, method);
    out
}

fn negate_channel(v: u8) -> u8 {
    if v >= 128 { 255 } else { 0 }
}

/// Posterize each color channel to its extreme: values of 128 and above
/// become 255, the rest become 0.
///
/// This is a threshold operation, not a photographic negative; it is
/// idempotent rather than self-inverse.
pub fn negate(bmp: &mut Bitmap) {
    for px in bmp.pixels_mut() {
        px.blue = negate_channel(px.blue);
        px.green = negate_channel(px.green);
        px.red = negate_channel(px.red);
    }
}

/// Copying variant of [`negate`].
pub fn negated(bmp: &Bitmap) -> Bitmap {
    let mut out = bmp.clone();
    negate(&mut out);
    out
}

/// Zero the named channel(s) of every pixel, in place. Other channels and
/// the reserved byte are untouched.
pub fn remove_channels(bmp: &mut Bitmap, channels: ChannelSet) {
    let (clear_r, clear_g, clear_b) = (
        channels.clears_red(),
        channels.clears_green(),
        channels.clears_blue(),
    );
    for px in bmp.pixels_mut() {
        if clear_r {
            px.red = 0;
        }
        if clear_g {
            px.green = 0;
        }
        if clear_b {
            px.blue = 0;
        }
    }
}

/// Copying variant of [`remove_channels`].
pub fn with_channels_removed(bmp: &Bitmap, channels: ChannelSet) -> Bitmap {
    let mut out = bmp.clone();
    remove_channels(&mut out, channels);
    out
}

/// Reverse pixel order within every row, in place. An odd-width image keeps
/// its middle column where it is.
pub fn flip_horizontal(bmp: &mut Bitmap) {
    for row in bmp.rows_mut() {
        let half = row.len() / 2;
        let (left, right) = row.split_at_mut(half);
        for (l, r) in left.iter_mut().zip(right.iter_mut().rev()) {
            core::mem::swap(l, r);
        }
    }
}

/// Reverse row order, in place. An odd-height image keeps its middle row
/// where it is.
pub fn flip_vertical(bmp: &mut Bitmap) {
    let width = bmp.width() as usize;
    let half_rows = bmp.height() as usize / 2;
    let pixels = bmp.pixels_mut();
    let (top, bottom) = pixels.split_at_mut(half_rows * width);
    for (trow, brow) in top
        .chunks_exact_mut(width)
        .zip(bottom.chunks_exact_mut(width).rev())
    {
        trow.swap_with_slice(brow);
    }
}
