//! Value range resolution.

use tracing::debug;

use crate::error::{ColorizeError, ColorizeResult};
use crate::sample::{Sample, SampleArray};

/// The data range that maps onto the palette spectrum.
///
/// `min_val` maps to the first spectrum color and `max_val` to the last.
/// Equal or inverted bounds are allowed; see [`crate::scale`] for how they
/// are scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min_val: f64,
    pub max_val: f64,
}

impl ValueRange {
    pub fn new(min_val: f64, max_val: f64) -> Self {
        Self { min_val, max_val }
    }

    /// Width of the range. Negative for inverted ranges.
    pub fn span(&self) -> f64 {
        self.max_val - self.min_val
    }

    /// True when both bounds are equal, so no linear mapping exists.
    pub fn is_degenerate(&self) -> bool {
        self.min_val == self.max_val
    }
}

/// Minimum and maximum over the finite samples, or `None` if there are none.
///
/// NaN and infinities are skipped. The nodata sentinel is not: range
/// resolution is independent of masking.
pub fn finite_extent<T: Sample>(samples: &SampleArray<T>) -> Option<(f64, f64)> {
    samples
        .data()
        .iter()
        .filter_map(|s| s.to_f64())
        .filter(|v| v.is_finite())
        .fold(None, |extent, v| match extent {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Produce a concrete range from optional caller bounds.
///
/// Supplied bounds are used verbatim. Missing bounds are computed from the
/// finite samples.
pub fn resolve_range<T: Sample>(
    samples: &SampleArray<T>,
    min_val: Option<f64>,
    max_val: Option<f64>,
) -> ColorizeResult<ValueRange> {
    for (name, bound) in [("min_val", min_val), ("max_val", max_val)] {
        if let Some(v) = bound {
            if !v.is_finite() {
                return Err(ColorizeError::InvalidRange(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
    }

    if let (Some(min_val), Some(max_val)) = (min_val, max_val) {
        return Ok(ValueRange::new(min_val, max_val));
    }

    let (data_min, data_max) = finite_extent(samples).ok_or_else(|| {
        ColorizeError::InvalidRange(
            "no finite samples available to compute the value range".to_string(),
        )
    })?;

    let range = ValueRange::new(min_val.unwrap_or(data_min), max_val.unwrap_or(data_max));
    debug!(
        min_val = range.min_val,
        max_val = range.max_val,
        auto_min = min_val.is_none(),
        auto_max = max_val.is_none(),
        "Computed value range from samples"
    );

    Ok(range)
}
