//! Error types and context management for tiling operations

use crate::spatial::geometry::{Rect, Size};
use std::fmt;
use std::path::{Path, PathBuf};

const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum TilingError {
    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an output image to disk
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

    /// Source data doesn't meet the engine's requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Two buffers that must share a grid have different sizes
    DimensionMismatch {
        /// Which buffer disagreed
        what: &'static str,
        /// Size it was required to have
        expected: Size,
        /// Size it actually had
        found: Size,
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

    /// A copy region does not fit inside its buffer
    RegionOutOfBounds {
        /// The offending region
        region: Rect,
        /// Size of the buffer it was applied to
        bounds: Size,
    },

    /// Number of blend layers outside the supported range
    LayerCount {
        /// Layers supplied
        count: usize,
        /// Maximum supported
        max: usize,
    },

    /// Internal computation or stage sequencing failure
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::DimensionMismatch {
                what,
                expected,
                found,
            } => {
                write!(f, "Dimension mismatch in {what}: expected {expected}, found {found}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::RegionOutOfBounds { region, bounds } => {
                write!(f, "Region {region} does not fit inside {bounds}")
            }
            Self::LayerCount { count, max } => {
                write!(f, "Blend needs between 1 and {max} layers, got {count}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for TilingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TilingError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the failing operation worked on
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches errors converted without context (such as through `?`) with file details
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
    E: Into<TilingError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only file-backed errors carry a path worth replacing
            match &mut error {
                TilingError::ImageLoad { path, .. } | TilingError::ImageExport { path, .. } => {
                    if let Some(context_path) = &context.path {
                        if path.as_os_str() == UNKNOWN_PATH {
                            path.clone_from(context_path);
                        }
                    }
                }
                TilingError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(context_path) = &context.path {
                        if path.as_os_str() == UNKNOWN_PATH {
                            path.clone_from(context_path);
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

impl From<image::ImageError> for TilingError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for TilingError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilingError {
    TilingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> TilingError {
    TilingError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
