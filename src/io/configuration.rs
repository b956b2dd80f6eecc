//! Mosaic constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};

// Matching
/// Default multiplicative penalty applied per prior use of a source image
pub const DEFAULT_PENALTY: f64 = 0.15;

// Target grid and rendering
/// Default number of grid columns across the target image
pub const DEFAULT_GRID_COLUMNS: u32 = 50;
/// Default number of grid rows down the target image
pub const DEFAULT_GRID_ROWS: u32 = 50;
/// Default edge length of one rendered cell in pixels
pub const DEFAULT_CELL_SIZE: u32 = 20;

// Source discovery and caching
/// File extensions recognised as images when scanning directories
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];
/// Default location of the source palette cache
pub const DEFAULT_CACHE_FILE: &str = "cache/source_palette.json";
/// Number of sample records logged after categorization
pub const SUMMARY_SAMPLE_COUNT: usize = 3;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to collage filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// File extension (and therefore format) of rendered collages
pub const OUTPUT_EXTENSION: &str = "png";

/// Parameters of a single collage run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollageConfig {
    /// Grid columns across the target
    pub columns: u32,
    /// Grid rows down the target
    pub rows: u32,
    /// Rendered cell edge length in pixels
    pub cell_size: u32,
    /// Repetition penalty handed to the matcher
    pub penalty: f64,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            rows: DEFAULT_GRID_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
            penalty: DEFAULT_PENALTY,
        }
    }
}

impl CollageConfig {
    /// Check every parameter before any matching or rendering starts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `columns`, `rows` or `cell_size` is zero
    /// - `penalty` is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(invalid_parameter("columns", &self.columns, &"must be positive"));
        }
        if self.rows == 0 {
            return Err(invalid_parameter("rows", &self.rows, &"must be positive"));
        }
        if self.cell_size == 0 {
            return Err(invalid_parameter(
                "cell_size",
                &self.cell_size,
                &"must be positive",
            ));
        }
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(invalid_parameter(
                "penalty",
                &self.penalty,
                &"must be a finite value >= 0",
            ));
        }
        Ok(())
    }
}

/// Default extension list as owned strings
pub fn default_extensions() -> Vec<String> {
    SUPPORTED_EXTENSIONS.iter().map(ToString::to_string).collect()
}
