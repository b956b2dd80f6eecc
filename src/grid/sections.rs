//! Section grid extraction from a target image

use crate::color::Color;
use crate::color::average::average_region;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::{GenericImageView, Rgb};
use ndarray::Array2;
use std::fmt;

/// Grid coordinate of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId {
    /// Zero-based row, top to bottom
    pub row: usize,
    /// Zero-based column, left to right
    pub col: usize,
}

impl SectionId {
    /// Section at the given row and column
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

/// Average colors of every section of a target image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGrid {
    colors: Array2<Color>,
}

impl SectionGrid {
    /// Split an image into `columns x rows` sections and average each one
    ///
    /// Section edges sit at `i * extent / count` (integer division), so the
    /// sections cover every pixel and differ in size by at most one pixel.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `columns` or `rows` is zero
    /// - `columns` exceeds the image width or `rows` exceeds its height
    pub fn from_image<I>(image: &I, columns: u32, rows: u32) -> Result<Self>
    where
        I: GenericImageView<Pixel = Rgb<u8>>,
    {
        let (width, height) = image.dimensions();
        if columns == 0 || columns > width {
            return Err(invalid_parameter(
                "columns",
                &columns,
                &format!("must be between 1 and the image width {width}"),
            ));
        }
        if rows == 0 || rows > height {
            return Err(invalid_parameter(
                "rows",
                &rows,
                &format!("must be between 1 and the image height {height}"),
            ));
        }

        let mut colors = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            let (y0, y1) = (edge(row, height, rows), edge(row + 1, height, rows));
            for col in 0..columns {
                let (x0, x1) = (edge(col, width, columns), edge(col + 1, width, columns));
                colors.push(average_region(image, x0, y0, x1 - x0, y1 - y0)?);
            }
        }

        let colors = Array2::from_shape_vec((rows as usize, columns as usize), colors).map_err(
            |e| MosaicError::Computation {
                operation: "section grid",
                reason: e.to_string(),
            },
        )?;

        Ok(Self { colors })
    }

    /// Number of grid columns
    pub fn columns(&self) -> usize {
        self.colors.ncols()
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.colors.nrows()
    }

    /// Average color of one section
    pub fn color_at(&self, id: SectionId) -> Option<Color> {
        self.colors.get((id.row, id.col)).copied()
    }

    /// Section colors indexed by `(row, col)`
    pub const fn colors(&self) -> &Array2<Color> {
        &self.colors
    }

    /// Sections with their colors in row-major order
    ///
    /// This is the order collages feed to the matcher.
    pub fn sections(&self) -> Vec<(SectionId, Color)> {
        self.colors
            .indexed_iter()
            .map(|((row, col), &color)| (SectionId::new(row, col), color))
            .collect()
    }
}

// Pixel offset of the `index`-th boundary when `extent` is split into `count` parts
fn edge(index: u32, extent: u32, count: u32) -> u32 {
    (u64::from(index) * u64::from(extent) / u64::from(count)) as u32
}
