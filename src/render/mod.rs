//! Composition of matched source images into the final collage

/// Grid canvas rendering and tile preparation
pub mod collage;

pub use collage::{CollageRenderer, fit_tile, prepare_tiles};
