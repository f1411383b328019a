//! Error types for chip classification.

use std::fmt;

/// A rule axis queried independently during table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    CoreCount,
    ClockFrequency,
    Bandwidth,
    SystemLevelCache,
    /// FP32 ALUs per core.
    FloatAlus,
    /// Int32 ALUs per core.
    IntegerAlus,
    /// Metal capability family ladder.
    Family,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoreCount => write!(f, "core count"),
            Self::ClockFrequency => write!(f, "clock frequency"),
            Self::Bandwidth => write!(f, "bandwidth"),
            Self::SystemLevelCache => write!(f, "system-level cache"),
            Self::FloatAlus => write!(f, "FP32 ALUs"),
            Self::IntegerAlus => write!(f, "Int32 ALUs"),
            Self::Family => write!(f, "GPU family"),
        }
    }
}

/// Errors that can occur while classifying a device name.
///
/// Every variant carries the offending device name so callers can surface
/// it without keeping the input around.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    /// The name does not start with a known family prefix.
    #[error("unrecognized GPU family: '{name}'")]
    UnrecognizedFamily { name: String },

    /// No parsable generation number follows the family prefix.
    #[error("malformed generation in '{name}': expected digits after the family prefix")]
    MalformedGeneration { name: String },

    /// The tier could not be resolved to one the axis requires.
    #[error("unrecognized GPU tier in '{name}' ({axis} lookup)")]
    UnrecognizedTier { name: String, axis: Axis },

    /// No rule applies and the carry-forward policy does not cover it.
    #[error("unrecognized GPU: '{name}' (no {axis} rule)")]
    UnrecognizedRule { name: String, axis: Axis },
}

impl ClassificationError {
    /// The device name that failed to classify.
    pub fn name(&self) -> &str {
        match self {
            Self::UnrecognizedFamily { name }
            | Self::MalformedGeneration { name }
            | Self::UnrecognizedTier { name, .. }
            | Self::UnrecognizedRule { name, .. } => name,
        }
    }

    /// The lookup axis that failed, if the failure happened after parsing.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Self::UnrecognizedTier { axis, .. } | Self::UnrecognizedRule { axis, .. } => {
                Some(*axis)
            }
            _ => None,
        }
    }
}

/// Result type for classification operations.
pub type Result<T> = std::result::Result<T, ClassificationError>;
