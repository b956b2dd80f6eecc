//! Color signatures of images and the distance between them

/// Per-channel average color of images and image regions
pub mod average;
/// Euclidean distance in RGB space
pub mod distance;
/// Hex string encoding of colors
pub mod hex;

/// Mean RGB value of an image or region, one byte per channel
pub type Color = [u8; 3];

pub use average::average_color;
pub use distance::euclidean_rgb;
pub use hex::{color_to_hex, hex_to_color};
