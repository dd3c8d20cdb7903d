//! Palette lookup tables.
//!
//! A palette table is built elsewhere (from color stops, colormap names,
//! etc.) and handed to the colorizer finished. Only its shape is checked
//! here: 256 spectrum colors followed by one nodata color, four channels
//! each.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ColorizeError, ColorizeResult};
use crate::scale::PaletteIndex;

/// Number of spectrum slots.
pub const SPECTRUM_SIZE: usize = 256;

/// Slot holding the nodata color.
pub const NODATA_INDEX: usize = SPECTRUM_SIZE;

/// Total entries in a palette table.
pub const PALETTE_SIZE: usize = SPECTRUM_SIZE + 1;

const CHANNELS: usize = 4;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// A 257-entry RGBA lookup table.
///
/// Serialized as a JSON array of `[r, g, b, a]` arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct PaletteTable {
    colors: Vec<Color>,
}

impl PaletteTable {
    /// Build a table from exactly 257 colors, nodata last.
    pub fn from_colors(colors: Vec<Color>) -> ColorizeResult<Self> {
        if colors.len() != PALETTE_SIZE {
            return Err(ColorizeError::InvalidPalette(format!(
                "expected {} entries, got {}",
                PALETTE_SIZE,
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    /// Build a table from 256 spectrum colors and a separate nodata color.
    pub fn with_nodata(spectrum: Vec<Color>, nodata: Color) -> ColorizeResult<Self> {
        let mut colors = spectrum;
        colors.push(nodata);
        Self::from_colors(colors)
    }

    /// Build a table from packed RGBA bytes (257 * 4 bytes).
    pub fn from_flat(bytes: &[u8]) -> ColorizeResult<Self> {
        if bytes.len() != PALETTE_SIZE * CHANNELS {
            return Err(ColorizeError::InvalidPalette(format!(
                "expected {} bytes, got {}",
                PALETTE_SIZE * CHANNELS,
                bytes.len()
            )));
        }
        let colors = bytes
            .chunks_exact(CHANNELS)
            .map(|c| Color::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self { colors })
    }

    /// Load a table from a JSON string.
    pub fn from_json(json_str: &str) -> ColorizeResult<Self> {
        let rows: Vec<Vec<u8>> = serde_json::from_str(json_str)?;
        Self::try_from(rows)
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> ColorizeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Color for a resolved index. Always present.
    pub fn color(&self, index: PaletteIndex) -> Color {
        self.colors[index.get()]
    }

    /// Color at a raw slot number, if inside the table.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn nodata_color(&self) -> Color {
        self.colors[NODATA_INDEX]
    }

    /// The 256 data colors, low to high.
    pub fn spectrum(&self) -> &[Color] {
        &self.colors[..SPECTRUM_SIZE]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl TryFrom<Vec<Vec<u8>>> for PaletteTable {
    type Error = ColorizeError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let colors = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| match row.as_slice() {
                &[r, g, b, a] => Ok(Color::new(r, g, b, a)),
                _ => Err(ColorizeError::InvalidPalette(format!(
                    "entry {} has {} channels, expected {}",
                    i,
                    row.len(),
                    CHANNELS
                ))),
            })
            .collect::<ColorizeResult<Vec<_>>>()?;
        Self::from_colors(colors)
    }
}

impl From<PaletteTable> for Vec<Vec<u8>> {
    fn from(table: PaletteTable) -> Self {
        table
            .colors
            .into_iter()
            .map(|c| c.to_array().to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_ramp() -> Vec<Color> {
        (0..=255u8).map(|i| Color::new(i, i, i, 255)).collect()
    }

    #[test]
    fn test_with_nodata() {
        let table = PaletteTable::with_nodata(grey_ramp(), Color::transparent()).unwrap();
        assert_eq!(table.colors().len(), PALETTE_SIZE);
        assert_eq!(table.nodata_color(), Color::transparent());
        assert_eq!(table.spectrum()[200], Color::new(200, 200, 200, 255));
        assert_eq!(table.color(PaletteIndex::NODATA), Color::transparent());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let result = PaletteTable::from_colors(grey_ramp());
        assert!(matches!(result, Err(ColorizeError::InvalidPalette(_))));

        let result = PaletteTable::from_flat(&[0u8; 256 * 4]);
        assert!(matches!(result, Err(ColorizeError::InvalidPalette(_))));
    }

    #[test]
    fn test_from_flat() {
        let mut bytes = Vec::with_capacity(PALETTE_SIZE * 4);
        for i in 0..PALETTE_SIZE {
            bytes.extend_from_slice(&[(i % 256) as u8, 0, 0, 255]);
        }
        let table = PaletteTable::from_flat(&bytes).unwrap();
        assert_eq!(table.get(10), Some(Color::new(10, 0, 0, 255)));
        assert_eq!(table.get(PALETTE_SIZE), None);
    }

    #[test]
    fn test_channel_width_rejected() {
        let mut rows: Vec<Vec<u8>> = vec![vec![0, 0, 0, 255]; PALETTE_SIZE];
        rows[12] = vec![0, 0, 0];
        let err = PaletteTable::try_from(rows).unwrap_err();
        assert!(err.to_string().contains("entry 12 has 3 channels"));
    }
}
