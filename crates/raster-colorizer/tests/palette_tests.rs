//! Tests for palette table construction and loading.

use raster_colorizer::{Color, ColorizeError, PaletteTable, NODATA_INDEX, PALETTE_SIZE};
use std::io::Write;

fn table_json(entries: usize, channels: usize) -> String {
    let entry = vec!["10"; channels].join(", ");
    let rows: Vec<String> = (0..entries).map(|_| format!("[{entry}]")).collect();
    format!("[{}]", rows.join(", "))
}

#[test]
fn test_from_json_valid() {
    let json = table_json(PALETTE_SIZE, 4);
    let table = PaletteTable::from_json(&json).unwrap();
    assert_eq!(table.colors().len(), 257);
    assert_eq!(table.nodata_color(), Color::new(10, 10, 10, 10));
}

#[test]
fn test_from_json_wrong_length() {
    let err = PaletteTable::from_json(&table_json(256, 4)).unwrap_err();
    assert!(matches!(err, ColorizeError::InvalidPalette(_)));
    assert!(err.to_string().contains("expected 257 entries, got 256"));
}

#[test]
fn test_from_json_wrong_channels() {
    let err = PaletteTable::from_json(&table_json(PALETTE_SIZE, 3)).unwrap_err();
    assert!(matches!(err, ColorizeError::InvalidPalette(_)));
}

#[test]
fn test_from_json_channel_out_of_byte_range() {
    let json = table_json(PALETTE_SIZE, 4).replacen("10", "300", 1);
    let err = PaletteTable::from_json(&json).unwrap_err();
    assert!(matches!(err, ColorizeError::Json(_)));
}

#[test]
fn test_serde_round_trip_shape() {
    let spectrum: Vec<Color> = (0..=255u8).map(|i| Color::new(0, i, 0, 255)).collect();
    let table = PaletteTable::with_nodata(spectrum, Color::transparent()).unwrap();

    let json = serde_json::to_string(&table).unwrap();
    assert!(json.starts_with("[[0,0,0,255],[0,1,0,255]"));
    assert!(json.ends_with("[0,0,0,0]]"));

    let parsed: PaletteTable = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, table);
}

#[test]
fn test_serde_deserialize_validates() {
    let result: Result<PaletteTable, _> = serde_json::from_str(&table_json(10, 4));
    assert!(result.is_err());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(table_json(PALETTE_SIZE, 4).as_bytes()).unwrap();

    let table = PaletteTable::from_file(file.path()).unwrap();
    assert_eq!(table.get(NODATA_INDEX), Some(Color::new(10, 10, 10, 10)));
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PaletteTable::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ColorizeError::Io(_)));
}
