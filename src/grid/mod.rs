//! Division of a target image into a grid of colored sections

/// Section grid extraction
pub mod sections;

pub use sections::{SectionGrid, SectionId};
