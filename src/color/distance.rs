//! Straight-line distance between two colors in RGB space

use super::Color;

/// Euclidean RGB distance with equal channel weights
///
/// Ranges from `0.0` for identical colors to `255 * sqrt(3)` for black
/// against white.
pub fn euclidean_rgb(a: Color, b: Color) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let diff = f64::from(x) - f64::from(y);
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}
