//! FFI error types.

use gpuinfo_core::ClassificationError;

/// Errors that can occur at the C boundary.
#[derive(Debug, thiserror::Error)]
pub enum FfiError {
    /// A required pointer argument was null.
    #[error("null pointer passed for '{argument}'")]
    NullPointer { argument: &'static str },

    /// A C string argument was not valid UTF-8.
    #[error("'{argument}' is not valid UTF-8")]
    InvalidUtf8 { argument: &'static str },

    /// A numeric argument was out of range.
    #[error("invalid argument: {detail}")]
    InvalidArgument { detail: String },

    /// Classification of the device name failed.
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// A string destined for C contained an interior NUL byte.
    #[error("string contains an interior NUL byte: {0}")]
    InteriorNul(#[from] std::ffi::NulError),
}

/// Result type alias for FFI operations.
pub type Result<T> = std::result::Result<T, FfiError>;
