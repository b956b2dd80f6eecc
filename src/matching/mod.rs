//! Assignment of target sections to palette images

/// Greedy penalized nearest-color matcher
pub mod matcher;
/// Per-run usage counting of palette images
pub mod usage;

pub use matcher::{MatchResult, SectionMatcher};
pub use usage::UsageCounter;
