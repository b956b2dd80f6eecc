//! Grid canvas rendering and tile preparation

use crate::grid::SectionId;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::load_rgb_image;
use crate::matching::MatchResult;
use image::imageops::{self, FilterType};
use image::RgbImage;
use rayon::prelude::*;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::path::PathBuf;

/// Interpolation used when shrinking or enlarging tiles
pub const TILE_FILTER: FilterType = FilterType::Triangle;

/// Resize a tile to `cell_size x cell_size`, borrowing it when it already fits
pub fn fit_tile(image: &RgbImage, cell_size: u32) -> Cow<'_, RgbImage> {
    if image.dimensions() == (cell_size, cell_size) {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(imageops::resize(image, cell_size, cell_size, TILE_FILTER))
    }
}

/// Decode and fit each distinct source image once
///
/// Work runs on the rayon pool. Images that fail to decode are logged and
/// left out of the returned map.
pub fn prepare_tiles<'a, T>(ids: T, cell_size: u32) -> HashMap<PathBuf, RgbImage>
where
    T: IntoIterator<Item = &'a PathBuf>,
{
    let distinct: Vec<&PathBuf> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();

    distinct
        .into_par_iter()
        .filter_map(|path| match load_rgb_image(path) {
            Ok(image) => Some((path.clone(), fit_tile(&image, cell_size).into_owned())),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Skipping tile");
                None
            }
        })
        .collect()
}

/// Fixed-size grid canvas that source images are tiled into
///
/// The canvas starts black and every cell that receives no tile stays black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollageRenderer {
    columns: u32,
    rows: u32,
    cell_size: u32,
}

impl CollageRenderer {
    /// Create a renderer for a `columns x rows` grid of square cells
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any argument is zero
    /// - The canvas width or height does not fit in `u32`
    pub fn new(columns: u32, rows: u32, cell_size: u32) -> Result<Self> {
        if columns == 0 {
            return Err(invalid_parameter("columns", &columns, &"must be positive"));
        }
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"must be positive"));
        }
        if cell_size == 0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &"must be positive",
            ));
        }
        if columns.checked_mul(cell_size).is_none() || rows.checked_mul(cell_size).is_none() {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &format!("canvas of {columns}x{rows} cells would overflow"),
            ));
        }

        Ok(Self {
            columns,
            rows,
            cell_size,
        })
    }

    /// Canvas `(width, height)` in pixels
    pub const fn canvas_dimensions(&self) -> (u32, u32) {
        (self.columns * self.cell_size, self.rows * self.cell_size)
    }

    /// Cell edge length in pixels
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Tile images into the grid in row-major order
    ///
    /// A shorter sequence leaves the remaining cells black; tiles beyond the
    /// grid capacity are ignored.
    pub fn render<'a, T>(&self, tiles: T) -> RgbImage
    where
        T: IntoIterator<Item = &'a RgbImage>,
    {
        let (width, height) = self.canvas_dimensions();
        let mut canvas = RgbImage::new(width, height);
        let cells = (0..self.rows).flat_map(|row| (0..self.columns).map(move |col| (row, col)));

        for ((row, col), tile) in cells.zip(tiles) {
            self.place(&mut canvas, row, col, tile);
        }

        canvas
    }

    /// Tile each matched image into the cell of its section
    ///
    /// Sections outside the grid and images missing from `tiles` leave their
    /// cell black.
    pub fn render_matches<I>(
        &self,
        result: &MatchResult<SectionId, I>,
        tiles: &HashMap<I, RgbImage>,
    ) -> RgbImage
    where
        I: Eq + Hash + std::fmt::Debug,
    {
        let (width, height) = self.canvas_dimensions();
        let mut canvas = RgbImage::new(width, height);
        let mut missing = 0usize;

        for (section, image_id) in result.assignments() {
            let (Ok(row), Ok(col)) = (u32::try_from(section.row), u32::try_from(section.col))
            else {
                missing += 1;
                continue;
            };
            if row >= self.rows || col >= self.columns {
                missing += 1;
                continue;
            }
            match tiles.get(image_id) {
                Some(tile) => self.place(&mut canvas, row, col, tile),
                None => {
                    tracing::debug!(%section, image = ?image_id, "No tile for section");
                    missing += 1;
                }
            }
        }

        if missing > 0 {
            tracing::warn!(missing, "Cells left black");
        }
        canvas
    }

    fn place(&self, canvas: &mut RgbImage, row: u32, col: u32, tile: &RgbImage) {
        let fitted = fit_tile(tile, self.cell_size);
        let x = i64::from(col) * i64::from(self.cell_size);
        let y = i64::from(row) * i64::from(self.cell_size);
        imageops::replace(canvas, &*fitted, x, y);
    }
}
