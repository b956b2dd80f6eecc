//! Input/output operations and error handling

/// Command-line interface and batch orchestration
pub mod cli;
/// Defaults and run configuration
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Image discovery, decoding and export
pub mod image;
/// Progress bars for scans and collage batches
pub mod progress;
