//! Value-to-color mapping for gridded measurement data.
//!
//! Turns a 2-D array of numeric samples into an RGBA raster for web map
//! clients:
//! - Range resolution (explicit or auto-computed from finite samples)
//! - Nodata masking
//! - Clamping and linear rescaling onto a 256-slot index space
//! - Lookup through a 257-entry palette table (slot 256 is nodata)
//! - PNG encoding of the result

pub mod colorize;
pub mod error;
pub mod mask;
pub mod palette;
pub mod pixel;
pub mod png;
pub mod range;
pub mod sample;
pub mod scale;

pub use colorize::{colorize, ColorizeOptions};
pub use error::{ColorizeError, ColorizeResult};
pub use mask::{mask_nodata, Cell};
pub use palette::{Color, PaletteTable, NODATA_INDEX, PALETTE_SIZE};
pub use pixel::PixelBuffer;
pub use range::{resolve_range, ValueRange};
pub use sample::{Sample, SampleArray};
pub use scale::{palette_index, PaletteIndex};
