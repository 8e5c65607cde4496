//! Error types for the reflection engine

use thiserror::Error;

/// Result type for reflection operations
pub type Result<T> = std::result::Result<T, ReflectError>;

/// Reflection engine errors.
///
/// A failed walk returns no derived schema and no path set, only the error;
/// well-formed input never fails partway through a branch.
#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("walk depth {requested} exceeds the supported maximum of {max}")]
    DepthOutOfRange { requested: usize, max: usize },

    #[error("malformed schema: duplicate field `{name}` in record at `{path}`")]
    DuplicateField { name: String, path: String },
}
