//! Sample grids: the numeric input to the colorizer.

use num_traits::{ToPrimitive, Zero};

use crate::error::{ColorizeError, ColorizeResult};

/// Element types that can be colorized.
///
/// Any primitive integer or float qualifies. Samples are compared against the
/// nodata sentinel in their own type and converted to `f64` for scaling.
pub trait Sample: Copy + PartialEq + ToPrimitive + Zero + Send + Sync {}

impl<T> Sample for T where T: Copy + PartialEq + ToPrimitive + Zero + Send + Sync {}

/// A `height x width` grid of samples in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleArray<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Sample> SampleArray<T> {
    /// Wrap row-major data. The length must equal `width * height`.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> ColorizeResult<Self> {
        // No slice can match dimensions whose product overflows
        let expected = width.checked_mul(height).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(ColorizeError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Build a grid from a list of rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> ColorizeResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return Err(ColorizeError::ShapeMismatch {
                    expected: width * height,
                    actual: data.len() + row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self { data, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major sample data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Sample at (row, col), if inside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }
}
