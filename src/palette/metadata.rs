//! Metadata record of a single source image

use crate::color::{Color, average_color, color_to_hex};
use crate::io::error::Result;
use crate::io::image::load_rgb_image;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything the palette knows about one source image
///
/// Field names double as the keys of the JSON cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Path the image was read from; unique key within a palette
    pub filepath: PathBuf,
    /// Base file name
    pub filename: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Average color as `[r, g, b]`
    pub avg_color_rgb: Color,
    /// Average color as `#rrggbb`
    pub avg_color_hex: String,
}

impl ImageMetadata {
    /// Decode an image file and describe it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or decoded
    /// - The decoded image has no pixels
    pub fn from_path(path: &Path) -> Result<Self> {
        let image = load_rgb_image(path)?;
        Self::from_image(path, &image)
    }

    /// Describe an already decoded image as if read from `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn from_image(path: &Path, image: &RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        let avg_color_rgb = average_color(image)?;

        Ok(Self {
            filepath: path.to_path_buf(),
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            width,
            height,
            avg_color_rgb,
            avg_color_hex: color_to_hex(avg_color_rgb),
        })
    }
}
