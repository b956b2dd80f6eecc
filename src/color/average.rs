//! Average color of an RGB image or image region

use super::Color;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::{GenericImageView, Rgb};

/// Arithmetic mean of each channel over all pixels
///
/// Channel sums are accumulated in `u64` and each mean is truncated towards
/// zero, so a uniform image always yields its own color exactly.
///
/// # Errors
///
/// Returns an error if the image has zero width or zero height
pub fn average_color<I>(image: &I) -> Result<Color>
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let (width, height) = image.dimensions();
    average_region(image, 0, 0, width, height)
}

/// Average color of the `width x height` rectangle whose top-left corner is `(x, y)`
///
/// # Errors
///
/// Returns an error if:
/// - The rectangle has no pixels
/// - The rectangle extends past the image bounds
pub fn average_region<I>(image: &I, x: u32, y: u32, width: u32, height: u32) -> Result<Color>
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count == 0 {
        return Err(MosaicError::EmptyImage { width, height });
    }

    let (image_width, image_height) = image.dimensions();
    let fits = |start: u32, extent: u32, limit: u32| {
        start.checked_add(extent).is_some_and(|end| end <= limit)
    };
    if !fits(x, width, image_width) || !fits(y, height, image_height) {
        return Err(invalid_parameter(
            "region",
            &format!("{width}x{height}+{x}+{y}"),
            &format!("must lie within the {image_width}x{image_height} image"),
        ));
    }

    let mut sums = [0u64; 3];
    for row in y..y + height {
        for col in x..x + width {
            let pixel = image.get_pixel(col, row);
            for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += u64::from(channel);
            }
        }
    }

    // Each mean is bounded by the largest channel value, so the narrowing is lossless
    Ok(sums.map(|sum| (sum / pixel_count) as u8))
}
