//! Nodata masking.
//!
//! Each sample is classified before any clamping happens, so a nodata
//! sentinel is recognised regardless of where it lies relative to the value
//! range.

use crate::sample::{Sample, SampleArray};

/// A sample after masking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Real measurement, widened to `f64`. May be infinite.
    Value(f64),
    /// Nodata sentinel or NaN. Rendered with the nodata color.
    Missing,
}

impl Cell {
    /// Classify one sample against the nodata sentinel.
    ///
    /// The comparison is exact and done in the sample's own type. NaN never
    /// equals the sentinel, so it is caught separately.
    pub fn classify<T: Sample>(sample: T, nodata_val: T) -> Self {
        if sample == nodata_val {
            return Cell::Missing;
        }
        match sample.to_f64() {
            Some(v) if !v.is_nan() => Cell::Value(v),
            _ => Cell::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

/// Classify every sample in row-major order. Does not touch the input.
pub fn mask_nodata<T: Sample>(samples: &SampleArray<T>, nodata_val: T) -> Vec<Cell> {
    samples
        .data()
        .iter()
        .map(|&s| Cell::classify(s, nodata_val))
        .collect()
}
