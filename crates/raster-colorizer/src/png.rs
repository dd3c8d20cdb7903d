//! PNG encoding for colorized rasters.
//!
//! A colorized raster holds at most 257 distinct colors, so it usually fits
//! an indexed PNG:
//! - **Indexed PNG (color type 3)**: used when the image has ≤256 unique
//!   colors. Smaller files, faster to compress.
//! - **RGBA PNG (color type 6)**: fallback when all 257 palette entries
//!   appear.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{ColorizeError, ColorizeResult};
use crate::pixel::PixelBuffer;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PNG_PALETTE: usize = 256;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode a pixel buffer as PNG, choosing indexed or RGBA encoding.
///
/// Images with a zero dimension cannot be represented in PNG and are
/// rejected.
pub fn encode_png(buffer: &PixelBuffer) -> ColorizeResult<Vec<u8>> {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return Err(ColorizeError::Encode(format!(
            "cannot encode a {width}x{height} image"
        )));
    }
    if width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(ColorizeError::Encode(format!(
            "image dimensions {width}x{height} exceed PNG limits"
        )));
    }

    match index_colors(buffer.as_bytes()) {
        Some((colors, indices)) => {
            debug!(width, height, colors = colors.len(), "Encoding indexed PNG");
            encode_indexed(width, height, &colors, &indices)
        }
        None => {
            debug!(width, height, "Encoding RGBA PNG");
            encode_rgba(buffer.as_bytes(), width, height)
        }
    }
}

/// Encode and write a PNG file.
///
/// Missing parent directories are created and an existing file is
/// overwritten.
pub fn save_png(buffer: &PixelBuffer, path: impl AsRef<Path>) -> ColorizeResult<()> {
    let path = path.as_ref();
    let png = encode_png(buffer)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, &png)?;

    debug!(path = %path.display(), bytes = png.len(), "Wrote PNG");
    Ok(())
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(rgba: &[u8]) -> u32 {
    u32::from_le_bytes([rgba[0], rgba[1], rgba[2], rgba[3]])
}

/// Build a PNG palette and per-pixel indices.
///
/// Returns `None` once more than 256 distinct colors are seen.
fn index_colors(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PNG_PALETTE);
    let mut colors: Vec<[u8; 4]> = Vec::with_capacity(MAX_PNG_PALETTE);
    let mut indices = Vec::with_capacity(pixels.len() / 4);

    for rgba in pixels.chunks_exact(4) {
        let key = pack_color(rgba);
        let index = match lookup.get(&key) {
            Some(&index) => index,
            None => {
                if colors.len() == MAX_PNG_PALETTE {
                    return None;
                }
                let index = colors.len() as u8;
                colors.push([rgba[0], rgba[1], rgba[2], rgba[3]]);
                lookup.insert(key, index);
                index
            }
        };
        indices.push(index);
    }

    Some((colors, indices))
}

/// Indexed PNG (color type 3) with a tRNS chunk when any entry is not opaque.
fn encode_indexed(
    width: usize,
    height: usize,
    colors: &[[u8; 4]],
    indices: &[u8],
) -> ColorizeResult<Vec<u8>> {
    let mut png = PNG_SIGNATURE.to_vec();

    write_chunk(&mut png, b"IHDR", &header(width, height, 3));

    let plte: Vec<u8> = colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if colors.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = colors.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Truecolor-with-alpha PNG (color type 6).
fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> ColorizeResult<Vec<u8>> {
    let mut png = PNG_SIGNATURE.to_vec();

    write_chunk(&mut png, b"IHDR", &header(width, height, 6));

    let idat = deflate_scanlines(pixels, width * 4)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// IHDR payload for an 8-bit, non-interlaced image.
fn header(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    ihdr
}

/// Prefix every scanline with filter type 0 and zlib-compress the result.
fn deflate_scanlines(data: &[u8], row_bytes: usize) -> ColorizeResult<Vec<u8>> {
    let rows = data.len() / row_bytes;
    let mut raw = Vec::with_capacity(rows * (row_bytes + 1));
    for line in data.chunks_exact(row_bytes) {
        raw.push(0);
        raw.extend_from_slice(line);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&raw).map_err(compression_error)?;
    encoder.finish().map_err(compression_error)
}

fn compression_error(err: std::io::Error) -> ColorizeError {
    ColorizeError::Encode(format!("IDAT compression failed: {err}"))
}

/// Append a length-prefixed, CRC-terminated chunk.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
