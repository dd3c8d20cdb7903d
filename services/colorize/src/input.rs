//! Sample grid loading.

use std::path::Path;

use anyhow::{Context, Result};
use raster_colorizer::SampleArray;

/// Parse a grid from JSON: an array of rows of numbers.
///
/// `null` entries become NaN and therefore render with the nodata color.
pub fn grid_from_json(json: &str) -> Result<SampleArray<f64>> {
    let rows: Vec<Vec<Option<f64>>> =
        serde_json::from_str(json).context("Sample grid must be a JSON array of number rows")?;

    let rows: Vec<Vec<f64>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        .collect();

    Ok(SampleArray::from_rows(rows)?)
}

/// Load a grid from a JSON file.
pub fn load_grid(path: &Path) -> Result<SampleArray<f64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample grid {}", path.display()))?;
    grid_from_json(&content).with_context(|| format!("Invalid sample grid {}", path.display()))
}
