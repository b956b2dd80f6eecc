//! Tests for collage canvas rendering and tile preparation

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::MosaicError;
    use photomosaic::grid::SectionId;
    use photomosaic::matching::SectionMatcher;
    use photomosaic::render::{CollageRenderer, fit_tile, prepare_tiles};
    use std::borrow::Cow;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn solid(size: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(size, size, Rgb(color))
    }

    // Tests zero arguments and overflowing canvases are rejected
    // Verified by removing the overflow check
    #[test]
    fn test_new_validation() {
        assert!(matches!(
            CollageRenderer::new(0, 1, 1),
            Err(MosaicError::InvalidParameter { .. })
        ));
        assert!(matches!(
            CollageRenderer::new(1, 0, 1),
            Err(MosaicError::InvalidParameter { .. })
        ));
        assert!(matches!(
            CollageRenderer::new(1, 1, 0),
            Err(MosaicError::InvalidParameter {
                parameter: "cell_size",
                ..
            })
        ));
        assert!(CollageRenderer::new(u32::MAX, 1, 2).is_err());
    }

    // Tests the canvas is columns wide and rows high
    // Verified by swapping columns and rows
    #[test]
    fn test_canvas_dimensions() {
        let renderer = CollageRenderer::new(3, 2, 10).unwrap();
        assert_eq!(renderer.canvas_dimensions(), (30, 20));
        assert_eq!(renderer.cell_size(), 10);
        assert_eq!(renderer.render(std::iter::empty()).dimensions(), (30, 20));
    }

    // Tests tiles fill cells in row-major order
    // Verified by filling columns first
    #[test]
    fn test_render_row_major() {
        let renderer = CollageRenderer::new(2, 2, 4).unwrap();
        let tiles = [
            solid(4, [255, 0, 0]),
            solid(4, [0, 255, 0]),
            solid(4, [0, 0, 255]),
            solid(4, [9, 9, 9]),
        ];

        let canvas = renderer.render(tiles.iter());

        assert_eq!(canvas.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(7, 0), &Rgb([0, 255, 0]));
        assert_eq!(canvas.get_pixel(0, 7), &Rgb([0, 0, 255]));
        assert_eq!(canvas.get_pixel(7, 7), &Rgb([9, 9, 9]));
    }

    // Tests missing tiles leave black cells and extra tiles are ignored
    // Verified by wrapping the tile iterator
    #[test]
    fn test_render_short_and_long_sequences() {
        let renderer = CollageRenderer::new(2, 1, 3).unwrap();

        let short = renderer.render([solid(3, [200, 200, 200])].iter());
        assert_eq!(short.get_pixel(0, 0), &Rgb([200, 200, 200]));
        assert_eq!(short.get_pixel(5, 2), &Rgb([0, 0, 0]));

        let long_tiles = [
            solid(3, [1, 1, 1]),
            solid(3, [2, 2, 2]),
            solid(3, [3, 3, 3]),
        ];
        let long = renderer.render(long_tiles.iter());
        assert_eq!(long.dimensions(), (6, 3));
        assert_eq!(long.get_pixel(5, 0), &Rgb([2, 2, 2]));
    }

    // Tests tiles are resized to the cell
    // Verified by pasting tiles at their original size
    #[test]
    fn test_render_resizes_tiles() {
        let renderer = CollageRenderer::new(1, 1, 6).unwrap();
        let tile = RgbImage::from_pixel(2, 17, Rgb([0, 0, 255]));

        let canvas = renderer.render([tile].iter());
        for pixel in canvas.pixels() {
            assert_eq!(pixel.0[0], 0);
            assert!(pixel.0[2] >= 254);
        }
    }

    // Tests fitting borrows tiles that are already the right size
    // Verified by always resizing
    #[test]
    fn test_fit_tile() {
        let exact = solid(8, [5, 5, 5]);
        assert!(matches!(fit_tile(&exact, 8), Cow::Borrowed(_)));

        let resized = fit_tile(&exact, 3);
        assert!(matches!(resized, Cow::Owned(_)));
        assert_eq!(resized.dimensions(), (3, 3));
    }

    // Tests matches are placed at their section coordinates
    // Verified by placing matches in processing order
    #[test]
    fn test_render_matches() {
        let renderer = CollageRenderer::new(2, 1, 2).unwrap();
        let sections = vec![
            (SectionId::new(0, 1), [255, 255, 255]),
            (SectionId::new(0, 0), [0, 0, 0]),
        ];
        let palette = vec![("dark", [10, 10, 10]), ("light", [250, 250, 250])];
        let result = SectionMatcher::new(0.0)
            .unwrap()
            .match_sections(&sections, &palette)
            .unwrap();

        let mut tiles = HashMap::new();
        tiles.insert("dark", solid(2, [10, 10, 10]));
        tiles.insert("light", solid(2, [250, 250, 250]));

        let canvas = renderer.render_matches(&result, &tiles);
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([10, 10, 10]));
        assert_eq!(canvas.get_pixel(3, 1), &Rgb([250, 250, 250]));
    }

    // Tests cells without a tile or outside the grid stay black
    // Verified by panicking on missing tiles
    #[test]
    fn test_render_matches_missing_tiles() {
        let renderer = CollageRenderer::new(1, 1, 2).unwrap();
        let sections = vec![(SectionId::new(0, 0), [0, 0, 0]), (SectionId::new(5, 5), [0, 0, 0])];
        let result = SectionMatcher::new(0.0)
            .unwrap()
            .match_sections(&sections, &[("gone", [0, 0, 0])])
            .unwrap();

        let tiles: HashMap<&str, RgbImage> = HashMap::new();
        let canvas = renderer.render_matches(&result, &tiles);
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    // Tests tile preparation decodes each image once and skips failures
    // Verified by propagating decode errors
    #[test]
    fn test_prepare_tiles() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.png");
        solid(9, [40, 80, 120]).save(&good).unwrap();
        let missing = temp_dir.path().join("missing.png");

        let ids: Vec<PathBuf> = vec![good.clone(), missing, good.clone()];
        let tiles = prepare_tiles(ids.iter(), 3);

        assert_eq!(tiles.len(), 1);
        let tile = tiles.get(&good).unwrap();
        assert_eq!(tile.dimensions(), (3, 3));
        let expected = [40u8, 80, 120];
        for (channel, want) in tile.get_pixel(1, 1).0.iter().zip(expected) {
            assert!(channel.abs_diff(want) <= 1, "{channel} vs {want}");
        }
    }
}
