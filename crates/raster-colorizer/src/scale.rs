//! Clamping and linear rescaling onto palette indices.

use crate::mask::Cell;
use crate::palette::{NODATA_INDEX, SPECTRUM_SIZE};
use crate::range::ValueRange;

/// Highest index reachable by a real sample.
const SPECTRUM_MAX: f64 = (SPECTRUM_SIZE - 1) as f64;

/// A slot in the palette table: `0..=255` for data, 256 for nodata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaletteIndex(u16);

impl PaletteIndex {
    /// The slot reserved for nodata.
    pub const NODATA: PaletteIndex = PaletteIndex(NODATA_INDEX as u16);

    /// Index for a spectrum slot, or `None` if `index` is outside `0..=256`.
    pub fn new(index: usize) -> Option<Self> {
        if index <= NODATA_INDEX {
            Some(PaletteIndex(index as u16))
        } else {
            None
        }
    }

    /// Truncate a real-valued index toward zero.
    ///
    /// Returns `None` for NaN, infinities and anything outside `[0, 256)`.
    pub fn from_scaled(scaled: f64) -> Option<Self> {
        if scaled.is_finite() && (0.0..SPECTRUM_SIZE as f64).contains(&scaled) {
            // `as` truncates toward zero
            Some(PaletteIndex(scaled as u16))
        } else {
            None
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    pub fn is_nodata(self) -> bool {
        self == Self::NODATA
    }
}

/// Clamp into the range, lower bound first.
///
/// `f64::clamp` panics on inverted ranges; applying the bounds one after the
/// other sends every value of an inverted range to `max_val`.
pub fn clamp_to_range(v: f64, range: &ValueRange) -> f64 {
    let v = if v < range.min_val { range.min_val } else { v };
    if v > range.max_val {
        range.max_val
    } else {
        v
    }
}

/// Real-valued spectrum position of an already clamped value.
///
/// Degenerate ranges map everything to 0. Ranges too wide for `f64`
/// arithmetic are scaled on halved operands instead.
pub fn scale_value(v: f64, range: &ValueRange) -> f64 {
    if range.is_degenerate() {
        return 0.0;
    }
    let scaled = (v - range.min_val) * SPECTRUM_MAX / range.span();
    if scaled.is_finite() {
        return scaled;
    }

    // Halves of finite values never overflow when subtracted
    let offset = v / 2.0 - range.min_val / 2.0;
    let span = range.max_val / 2.0 - range.min_val / 2.0;
    (offset / span * SPECTRUM_MAX).min(SPECTRUM_MAX)
}

/// Palette slot for one masked cell.
///
/// `None` means the computed index fell outside the table. Clamping keeps
/// every finite range inside it, so this marks a broken invariant.
pub fn palette_index(cell: Cell, range: &ValueRange) -> Option<PaletteIndex> {
    match cell {
        Cell::Missing => Some(PaletteIndex::NODATA),
        Cell::Value(v) => PaletteIndex::from_scaled(scale_value(clamp_to_range(v, range), range)),
    }
}
