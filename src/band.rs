//! Primitive Frequency Bands — the atoms of a band plan
//!
//! A [`Band`] describes one frequency-selective region on the non-negative
//! frequency axis `[0, +inf)`: low-pass, high-pass, band-pass, band-stop, or
//! the universal all-range element. Bands are immutable value objects
//! created by validating constructors; the merge and conflict machinery in
//! [`crate::band_plan`] is driven entirely by the three-way overlap
//! predicate defined here.
//!
//! The variant set is deliberately closed: every pairwise combination rule
//! is an exhaustive `match`, so adding a variant is a compile error until
//! every combination is decided.
//!
//! ## Example
//!
//! ```rust
//! use firband::band::{Band, BandOrder};
//!
//! let low = Band::low_pass(10.0).unwrap();
//! let band = Band::band_pass(20.0, 30.0).unwrap();
//! assert_eq!(low.compare(&band), BandOrder::Below);
//! assert_eq!(low.to_string(), "[0,10]");
//!
//! // Touching endpoints count as overlap, so abutting bands coalesce.
//! let touching = Band::band_pass(10.0, 15.0).unwrap();
//! assert_eq!(low.compare(&touching), BandOrder::Overlap);
//! ```

use crate::types::{BandCategory, BandError, BandResult};
use serde::{Deserialize, Serialize};

/// One primitive frequency band.
///
/// Pass variants cover the interval given by [`Band::min`]..[`Band::max`].
/// `BandStop` is a stop-band descriptor compared only by its `(low, high)`
/// pair; see DESIGN.md for the open question on its geometric reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Passes `[0, cutoff]`
    LowPass { cutoff: f64 },
    /// Passes `[cutoff, +inf)`
    HighPass { cutoff: f64 },
    /// Passes `[low, high]`
    BandPass { low: f64, high: f64 },
    /// Rejects the band described by `(low, high)`
    BandStop { low: f64, high: f64 },
    /// Passes the entire axis `[0, +inf)`; absorbs any further pass band
    All,
}

/// Three-way, overlap-aware ordering between two bands.
///
/// This predicate is both the sort key and the merge trigger for the
/// aggregates in [`crate::band_plan`]; it must be used identically in both
/// roles so every aggregate stays sorted and fully merged after insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandOrder {
    /// Entirely below the other band (`self.max < other.min`)
    Below,
    /// The intervals share at least one point; touching endpoints count
    Overlap,
    /// Entirely above the other band (`self.min > other.max`)
    Above,
}

impl Band {
    /// Create a low-pass band `[0, cutoff]`.
    pub fn low_pass(cutoff: f64) -> BandResult<Self> {
        check_cutoff("cutoff", cutoff)?;
        Ok(Band::LowPass { cutoff })
    }

    /// Create a high-pass band `[cutoff, +inf)`.
    pub fn high_pass(cutoff: f64) -> BandResult<Self> {
        check_cutoff("cutoff", cutoff)?;
        Ok(Band::HighPass { cutoff })
    }

    /// Create a band-pass band `[low, high]`.
    pub fn band_pass(low: f64, high: f64) -> BandResult<Self> {
        check_pair(low, high)?;
        Ok(Band::BandPass { low, high })
    }

    /// Create a band-stop descriptor over `(low, high)`.
    pub fn band_stop(low: f64, high: f64) -> BandResult<Self> {
        check_pair(low, high)?;
        Ok(Band::BandStop { low, high })
    }

    /// Which side of the pass/stop divide this band is on.
    pub fn category(&self) -> BandCategory {
        match self {
            Band::BandStop { .. } => BandCategory::Stop,
            _ => BandCategory::Pass,
        }
    }

    /// Lower bound of the band's interval.
    pub fn min(&self) -> f64 {
        match *self {
            Band::LowPass { .. } | Band::All => 0.0,
            Band::HighPass { cutoff } => cutoff,
            Band::BandPass { low, .. } | Band::BandStop { low, .. } => low,
        }
    }

    /// Upper bound of the band's interval (`+inf` for high-pass and all-range).
    pub fn max(&self) -> f64 {
        match *self {
            Band::LowPass { cutoff } => cutoff,
            Band::HighPass { .. } | Band::All => f64::INFINITY,
            Band::BandPass { high, .. } | Band::BandStop { high, .. } => high,
        }
    }

    /// Compare two bands under the overlap-aware three-way ordering.
    pub fn compare(&self, other: &Band) -> BandOrder {
        if self.max() < other.min() {
            BandOrder::Below
        } else if self.min() > other.max() {
            BandOrder::Above
        } else {
            BandOrder::Overlap
        }
    }

    /// The tightest interval shared by two bands, if they overlap.
    pub fn overlap_with(&self, other: &Band) -> Option<(f64, f64)> {
        match self.compare(other) {
            BandOrder::Overlap => Some((
                self.min().max(other.min()),
                self.max().min(other.max()),
            )),
            _ => None,
        }
    }

    /// Check a pass band against a stop band (in either order).
    ///
    /// Same-category pairs never conflict; they merge instead. An
    /// opposite-category overlap is a contradiction in the plan and is
    /// reported with the concrete overlapping interval.
    pub fn conflict_with(&self, other: &Band) -> BandResult<()> {
        if self.category() == other.category() {
            return Ok(());
        }
        if let Some((low, high)) = self.overlap_with(other) {
            return Err(BandError::RangeConflict { low, high });
        }
        Ok(())
    }

    /// Fold two same-category overlapping bands into their interval union.
    ///
    /// Pass unions are reclassified by their resulting bounds; stop unions
    /// stay band-stop descriptors.
    pub(crate) fn union(&self, other: &Band) -> Band {
        let low = self.min().min(other.min());
        let high = self.max().max(other.max());
        match self.category() {
            BandCategory::Pass => Band::pass_from_bounds(low, high),
            BandCategory::Stop => Band::BandStop { low, high },
        }
    }

    /// Classify a pass interval by its bounds.
    pub(crate) fn pass_from_bounds(low: f64, high: f64) -> Band {
        if low <= 0.0 && high.is_infinite() {
            Band::All
        } else if low <= 0.0 {
            Band::LowPass { cutoff: high }
        } else if high.is_infinite() {
            Band::HighPass { cutoff: low }
        } else {
            Band::BandPass { low, high }
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Band::LowPass { cutoff } => write!(f, "[0,{}]", cutoff),
            Band::HighPass { cutoff } => write!(f, "[{},inf)", cutoff),
            Band::BandPass { low, high } => write!(f, "[{},{}]", low, high),
            Band::BandStop { low, high } => write!(f, "stop:[{},{}]", low, high),
            Band::All => write!(f, "all range"),
        }
    }
}

fn check_cutoff(name: &str, value: f64) -> BandResult<()> {
    if !value.is_finite() {
        return Err(BandError::InvalidBound(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    if value < 0.0 {
        return Err(BandError::InvalidBound(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_pair(low: f64, high: f64) -> BandResult<()> {
    check_cutoff("low", low)?;
    check_cutoff("high", high)?;
    if low > high {
        return Err(BandError::InvalidBound(format!(
            "low ({}) must not exceed high ({})",
            low, high
        )));
    }
    Ok(())
}
