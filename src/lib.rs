//! Photomosaic generation by greedy average-color matching
//!
//! Source images are reduced to their average RGB color and cached as a
//! palette. A target image is split into a grid of sections, each section is
//! assigned the palette image with the lowest penalized color distance, and
//! the matched images are tiled into the final collage.

#![forbid(unsafe_code)]

/// Average color, color distance and hex encoding
pub mod color;
/// Target image division into colored grid sections
pub mod grid;
/// Input/output operations, configuration, CLI and error handling
pub mod io;
/// Greedy section-to-image matching with a repetition penalty
pub mod matching;
/// Source image categorization and palette caching
pub mod palette;
/// Collage composition from matched source images
pub mod render;

pub use color::Color;
pub use io::error::{MosaicError, Result};
