//! Error types and context management for mosaic operations

use std::fmt;
use std::path::{Path, PathBuf};

const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// A configured directory or cache file does not exist
    InputNotFound {
        /// Path that was looked up
        path: PathBuf,
        /// What the path was expected to hold
        what: &'static str,
    },

    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Image or region without any pixels
    EmptyImage {
        /// Width of the offending image
        width: u32,
        /// Height of the offending image
        height: u32,
    },

    /// Matching requested against a palette without candidates
    EmptyPalette {
        /// Number of sections waiting for an assignment
        sections: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The same identifier was supplied twice in an ordered input
    DuplicateIdentifier {
        /// Which input carried the duplicate (section or image)
        kind: &'static str,
        /// Debug rendering of the repeated identifier
        id: String,
    },

    /// Palette cache content is inconsistent
    InvalidCache {
        /// Path of the cache file
        path: PathBuf,
        /// Description of the inconsistency
        reason: String,
    },

    /// Palette cache could not be encoded or decoded
    Serialization {
        /// Path of the cache file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical or structural computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound { path, what } => {
                write!(f, "{what} not found: '{}'", path.display())
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::EmptyImage { width, height } => {
                write!(f, "Image has no pixels ({width}x{height})")
            }
            Self::EmptyPalette { sections } => {
                write!(
                    f,
                    "Cannot match {sections} sections against an empty palette"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DuplicateIdentifier { kind, id } => {
                write!(f, "Duplicate {kind} identifier {id}")
            }
            Self::InvalidCache { path, reason } => {
                write!(f, "Invalid palette cache '{}': {reason}", path.display())
            }
            Self::Serialization { path, source } => {
                write!(
                    f,
                    "Failed to (de)serialize palette cache '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the failing operation was working on
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Attaches file and operation information to errors converted without it
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the path context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                MosaicError::ImageLoad { path, .. }
                | MosaicError::ImageExport { path, .. }
                | MosaicError::Serialization { path, .. } => {
                    if let Some(known) = &context.path {
                        if path.as_os_str() == UNKNOWN_PATH {
                            known.clone_into(path);
                        }
                    }
                }
                MosaicError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(known) = &context.path {
                        if path.as_os_str() == UNKNOWN_PATH {
                            known.clone_into(path);
                        }
                    }
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: &Path) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for MosaicError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an input-not-found error
pub fn input_not_found(path: &Path, what: &'static str) -> MosaicError {
    MosaicError::InputNotFound {
        path: path.to_path_buf(),
        what,
    }
}
