//! Error types for the framegold codec

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the framegold codec
///
/// Unrecognized protocol identifiers are deliberately not represented here:
/// a payload whose protocol id has no registered decoder is left as raw
/// bytes, not reported as a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A field value does not fit its declared width (construction-time)
    #[error("value {value:#x} out of range for field '{field}' (max {max:#x})")]
    ValueConstraint {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// Fewer bytes available than the fixed header requires (parse-time)
    #[error("{frame} frame truncated: need at least {needed} bytes, got {got}")]
    TruncatedFrame {
        frame: &'static str,
        needed: usize,
        got: usize,
    },

    /// Recomputed IPv4 header checksum disagrees with the wire value (parse-time, fatal)
    #[error("IPv4 header checksum mismatch: wire {wire:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { wire: u16, computed: u16 },
}

impl Error {
    /// Create a value-constraint error for a named field
    pub fn value_constraint(field: &'static str, value: u64, max: u64) -> Self {
        Error::ValueConstraint { field, value, max }
    }

    /// Create a truncated-frame error for a named frame type
    pub fn truncated(frame: &'static str, needed: usize, got: usize) -> Self {
        Error::TruncatedFrame { frame, needed, got }
    }
}
