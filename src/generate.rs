//! Procedural image generators: gradients, escape-time fractals, waves.
//!
//! The fractal coordinate mappings reproduce the historical behavior of this
//! engine exactly, including the simplified Mandelbrot mapping — see
//! [`mandelbrot`]. Escape-time renders check their [`Stop`] token once per
//! row.

use alloc::format;

use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::DibError;
use crate::pixel::Pixel;

/// Iteration-count palette used when the caller has no colormap of its own.
/// The palette length sets the iteration cap (16 here).
pub const DEFAULT_COLORMAP: [Pixel; 16] = [
    Pixel::new(66, 30, 15),
    Pixel::new(25, 7, 26),
    Pixel::new(9, 1, 47),
    Pixel::new(4, 4, 73),
    Pixel::new(0, 7, 100),
    Pixel::new(12, 44, 138),
    Pixel::new(24, 82, 177),
    Pixel::new(57, 125, 209),
    Pixel::new(134, 181, 229),
    Pixel::new(211, 236, 248),
    Pixel::new(241, 233, 191),
    Pixel::new(248, 201, 95),
    Pixel::new(255, 170, 0),
    Pixel::new(204, 128, 0),
    Pixel::new(153, 87, 0),
    Pixel::new(106, 52, 3),
];

/// Color for pixels whose iteration count reaches the cap (points that never
/// escaped, i.e. the fractal interior).
pub const DEFAULT_FOREGROUND: Pixel = Pixel::new(0, 0, 0);

// ── Gradient ────────────────────────────────────────────────────────

/// Synthesize a three-axis color ramp.
///
/// The canvas is partitioned into a grid of 256-pixel stride windows: blue
/// rises with the row inside each vertical block, green falls with it, and
/// red rises with the column inside each horizontal stride. The reserved
/// byte is 0xFF throughout.
///
/// Both dimensions must be positive multiples of 256; the sweep is only
/// defined on whole stride windows, so anything else is
/// [`DibError::InvalidDimensions`] rather than a silently malformed ramp.
pub fn gradient(height: u32, width: u32) -> Result<Bitmap, DibError> {
    if height == 0 || width == 0 || height % 256 != 0 || width % 256 != 0 {
        return Err(DibError::InvalidDimensions(format!(
            "gradient requires positive multiples of 256, got {width}x{height}"
        )));
    }

    let mut bmp = Bitmap::new(width, height)?;
    for (row_idx, row) in bmp.rows_mut().enumerate() {
        let sweep = (row_idx % 256) as u8;
        for (col_idx, px) in row.iter_mut().enumerate() {
            let stride = (col_idx % 256) as u8;
            *px = Pixel::new(sweep, 255 - sweep, stride);
        }
    }
    Ok(bmp)
}

// ── Escape-time fractals ────────────────────────────────────────────

/// Iterate the quadratic recurrence from z = 0 and report how many steps ran
/// before |z|² reached 4, capped at `cap`.
///
/// The imaginary component is updated first and the real component is then
/// computed from the *already updated* imaginary value. That sequencing is
/// load-bearing: it is what this renderer has always drawn, and reordering
/// it produces a visibly different image.
fn escape_time(cr: f64, ci: f64, cap: usize, conjugate: bool) -> usize {
    let mut zr = 0.0f64;
    let mut zi = 0.0f64;
    let mut iters = 0usize;
    while iters < cap && zr * zr + zi * zi < 4.0 {
        let cross = 2.0 * zr * zi;
        zi = if conjugate { -cross } else { cross } + ci;
        zr = zr * zr - zi * zi + cr;
        iters += 1;
    }
    iters
}

fn render_escape_time(
    bmp: &mut Bitmap,
    colormap: &[Pixel],
    foreground: Pixel,
    stop: &dyn Stop,
    conjugate: bool,
    map: impl Fn(f64, f64) -> (f64, f64),
) -> Result<(), DibError> {
    let w = bmp.width() as f64;
    let h = bmp.height() as f64;
    let cap = colormap.len();

    for (row_idx, row) in bmp.rows_mut().enumerate() {
        stop.check()?;
        for (col_idx, px) in row.iter_mut().enumerate() {
            let (cr, ci) = map(col_idx as f64 / w, row_idx as f64 / h);
            let iters = escape_time(cr, ci, cap, conjugate);
            *px = if iters == cap {
                foreground
            } else {
                colormap[iters]
            };
        }
    }
    Ok(())
}

/// Render the Mandelbrot set (z ← z² + c) into an existing bitmap.
///
/// The pixel-to-plane mapping is simply c = (col/width, row/height). This is
/// not the textbook (-2, 0.47) × (-1.12, 1.12) viewport; the simplified
/// mapping is kept deliberately, quirks and all. The iteration cap is
/// `colormap.len()`; capped pixels take `foreground`, escaped pixels take
/// `colormap[iterations]`.
pub fn mandelbrot(
    bmp: &mut Bitmap,
    colormap: &[Pixel],
    foreground: Pixel,
    stop: impl Stop,
) -> Result<(), DibError> {
    render_escape_time(bmp, colormap, foreground, &stop, false, |x, y| (x, y))
}

/// Render the Tricorn set (z ← conj(z)² + c) into an existing bitmap.
///
/// Same iteration and coloring contract as [`mandelbrot`], with the
/// sign-negated cross term and a (-2.5, 1) × (-1, 1) viewport.
pub fn tricorn(
    bmp: &mut Bitmap,
    colormap: &[Pixel],
    foreground: Pixel,
    stop: impl Stop,
) -> Result<(), DibError> {
    render_escape_time(bmp, colormap, foreground, &stop, true, |x, y| {
        (-2.5 + x * 3.5, -1.0 + y * 2.0)
    })
}

// ── Waves ───────────────────────────────────────────────────────────

/// Fill an existing bitmap with a closed-form interference pattern.
///
/// Each channel is a sum of a sine and a cosine of the scaled row×col
/// product, shifted into 0..=255. Purely decorative, deterministic, no
/// error states.
pub fn waves(bmp: &mut Bitmap) {
    fn to_channel(v: f64) -> u8 {
        // v is a sin + cos sum in [-2, 2].
        ((v + 2.0) * 63.75) as u8
    }

    for (row_idx, row) in bmp.rows_mut().enumerate() {
        for (col_idx, px) in row.iter_mut().enumerate() {
            let t = (row_idx as f64) * (col_idx as f64);
            let blue = to_channel(libm::sin(t * 2e-4) + libm::cos(t * 7e-4));
            let green = to_channel(libm::sin(t * 5e-4) + libm::cos(t * 3e-4));
            let red = to_channel(libm::sin(t * 9e-4) + libm::cos(t * 1e-4));
            *px = Pixel::new(blue, green, red);
        }
    }
}
