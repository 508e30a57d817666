//! Core types for band-plan construction
//!
//! Defines the band category tag shared by every primitive range and the
//! error taxonomy for the whole crate. All fallible operations return
//! [`BandResult`].
//!
//! ## Error taxonomy
//!
//! - [`BandError::InvalidBound`] — a constructor received a negative,
//!   inverted, or non-finite cutoff. Fails before any band is produced.
//! - [`BandError::RangeConflict`] — a pass band and a stop band numerically
//!   overlap. Carries the tightest overlapping interval derivable from the
//!   two conflicting ranges, not just "overlap detected".
//! - [`BandError::UnsupportedVariant`] — an operation received a band
//!   variant it cannot combine. Unreachable while the variant set stays
//!   closed and matching stays exhaustive.
//!
//! All three are logical specification errors: the failed operation leaves
//! prior state untouched and there is nothing to retry.

use serde::{Deserialize, Serialize};

/// Result type for band-plan operations
pub type BandResult<T> = Result<T, BandError>;

/// Whether a band lets frequencies through or rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandCategory {
    /// Frequencies in the band are let through
    Pass,
    /// Frequencies in the band are rejected
    Stop,
}

impl std::fmt::Display for BandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandCategory::Pass => write!(f, "pass"),
            BandCategory::Stop => write!(f, "stop"),
        }
    }
}

/// Errors that can occur while building a band plan
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BandError {
    #[error("invalid band bound: {0}")]
    InvalidBound(String),

    #[error("pass/stop range overlap: {low}~{high}")]
    RangeConflict { low: f64, high: f64 },

    #[error("unsupported band variant: {0}")]
    UnsupportedVariant(&'static str),
}
