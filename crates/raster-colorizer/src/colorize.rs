//! Sample-to-RGBA colorization.
//!
//! One pass over the grid: resolve the value range, mask nodata, clamp and
//! rescale each value onto the 256-slot spectrum, then look every slot up in
//! the palette table.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{ColorizeError, ColorizeResult};
use crate::mask::{mask_nodata, Cell};
use crate::palette::PaletteTable;
use crate::pixel::PixelBuffer;
use crate::range::{resolve_range, ValueRange};
use crate::sample::{Sample, SampleArray};
use crate::scale::palette_index;

/// Minimum pixels to benefit from parallel row processing
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

/// Per-call settings for [`colorize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorizeOptions<T> {
    /// Value mapped to the first spectrum color. Computed from the data if unset.
    pub min_val: Option<f64>,
    /// Value mapped to the last spectrum color. Computed from the data if unset.
    pub max_val: Option<f64>,
    /// Samples equal to this render with the nodata color.
    pub nodata_val: T,
}

impl<T: Sample> Default for ColorizeOptions<T> {
    fn default() -> Self {
        Self {
            min_val: None,
            max_val: None,
            nodata_val: T::zero(),
        }
    }
}

impl<T: Sample> ColorizeOptions<T> {
    pub fn with_range(mut self, min_val: f64, max_val: f64) -> Self {
        self.min_val = Some(min_val);
        self.max_val = Some(max_val);
        self
    }

    pub fn with_min(mut self, min_val: f64) -> Self {
        self.min_val = Some(min_val);
        self
    }

    pub fn with_max(mut self, max_val: f64) -> Self {
        self.max_val = Some(max_val);
        self
    }

    pub fn with_nodata(mut self, nodata_val: T) -> Self {
        self.nodata_val = nodata_val;
        self
    }
}

/// Render a sample grid through a palette table.
///
/// The output has the same width and height as the input. Samples equal to
/// `nodata_val` (and NaN samples) take the palette's nodata color; everything
/// else is clamped to the range and truncated onto slots `0..=255`.
///
/// An empty grid yields an empty buffer without resolving a range.
///
/// # Errors
/// - `InvalidRange` if a bound must be computed and no sample is finite, or
///   a supplied bound is not finite
/// - `IndexOutOfRange` if a computed slot falls outside the palette table,
///   which clamping rules out for finite ranges
pub fn colorize<T: Sample>(
    samples: &SampleArray<T>,
    palette: &PaletteTable,
    options: &ColorizeOptions<T>,
) -> ColorizeResult<PixelBuffer> {
    let width = samples.width();
    let height = samples.height();

    if samples.is_empty() {
        return Ok(PixelBuffer::new(width, height, Vec::new()));
    }

    let range = resolve_range(samples, options.min_val, options.max_val)?;
    if range.is_degenerate() {
        warn!(
            value = range.min_val,
            "Degenerate value range, all data maps to the first palette color"
        );
    }

    let cells = mask_nodata(samples, options.nodata_val);
    debug!(
        width,
        height,
        masked = cells.iter().filter(|c| c.is_missing()).count(),
        "Masked nodata samples"
    );

    let mut pixels = vec![0u8; width * height * 4];
    let render_row = |(row, out): (usize, &mut [u8])| {
        fill_row(row, &cells[row * width..(row + 1) * width], out, &range, palette)
    };

    if width * height >= PARALLEL_THRESHOLD {
        pixels
            .par_chunks_mut(width * 4)
            .enumerate()
            .try_for_each(render_row)?;
    } else {
        pixels
            .chunks_mut(width * 4)
            .enumerate()
            .try_for_each(render_row)?;
    }

    Ok(PixelBuffer::new(width, height, pixels))
}

/// Resolve one row of cells into RGBA bytes.
fn fill_row(
    row: usize,
    cells: &[Cell],
    out: &mut [u8],
    range: &ValueRange,
    palette: &PaletteTable,
) -> ColorizeResult<()> {
    for (col, (&cell, pixel)) in cells.iter().zip(out.chunks_exact_mut(4)).enumerate() {
        let index =
            palette_index(cell, range).ok_or(ColorizeError::IndexOutOfRange { row, col })?;
        pixel.copy_from_slice(&palette.color(index).to_array());
    }
    Ok(())
}
