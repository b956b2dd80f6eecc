//! Source image palette: per-file metadata, batch categorization and caching

/// JSON persistence of categorized palettes
pub mod cache;
/// Parallel categorization of source image files
pub mod categorize;
/// Metadata record of a single source image
pub mod metadata;

pub use cache::{load_palette, palette_entries, save_palette};
pub use categorize::{Categorization, SkippedFile, categorize_directory, categorize_files};
pub use metadata::ImageMetadata;
