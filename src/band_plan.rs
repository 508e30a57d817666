//! Band Plans — merged, conflict-checked filter specifications
//!
//! A [`BandPlan`] is built up incrementally by [`BandPlan::add`]: start from
//! one primitive [`Band`] and keep adding. The plan changes shape as it
//! grows — a single band becomes a pass (or stop) aggregate once a second,
//! non-overlapping band of the same category arrives, a combined plan is
//! created the first time pass and stop bands must coexist, and a pass side
//! that grows to cover the whole axis collapses to the all-range sentinel.
//!
//! Two invariants hold after every `add`:
//!
//! - each aggregate is sorted ascending and fully merged (no two members
//!   overlap; touching endpoints coalesce),
//! - no pass member numerically overlaps a stop member — a violating `add`
//!   fails with [`BandError::RangeConflict`] naming the overlapping
//!   interval, and the previous plan is left untouched.
//!
//! ## Example
//!
//! ```rust
//! use firband::{Band, BandPlan};
//!
//! let plan = BandPlan::from(Band::low_pass(10.0).unwrap())
//!     .add(Band::band_pass(20.0, 30.0).unwrap()).unwrap()
//!     .add(Band::high_pass(10000.0).unwrap()).unwrap()
//!     .add(Band::band_stop(35.0, 38.0).unwrap()).unwrap();
//! assert_eq!(
//!     plan.describe().join(" "),
//!     "[0,10] [20,30] [10000,inf) stop:[35,38]"
//! );
//!
//! // A stop band cutting through an accepted pass band is rejected.
//! let err = plan.add(Band::band_stop(10.0, 2000.0).unwrap());
//! assert!(err.is_err());
//! ```

use crate::band::{Band, BandOrder};
use crate::types::{BandCategory, BandError, BandResult};

/// Sorted, fully merged collection of pass bands.
///
/// Invariant: every member is pass-category, no two members overlap, and
/// the sequence ascends by interval position.
#[derive(Debug, Clone, PartialEq)]
pub struct PassBands {
    bands: Vec<Band>,
}

impl PassBands {
    fn single(band: Band) -> Self {
        Self { bands: vec![band] }
    }

    fn pair(a: Band, b: Band) -> Self {
        debug_assert!(a.compare(&b) != BandOrder::Overlap);
        let bands = match a.compare(&b) {
            BandOrder::Below => vec![a, b],
            _ => vec![b, a],
        };
        Self { bands }
    }

    /// The member bands, ascending.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    fn merge(&mut self, band: Band) {
        merge_into(&mut self.bands, band);
    }

    fn is_all(&self) -> bool {
        self.bands.len() == 1 && matches!(self.bands[0], Band::All)
    }

    fn check_against(&self, band: &Band) -> BandResult<()> {
        for b in &self.bands {
            b.conflict_with(band)?;
        }
        Ok(())
    }
}

/// Sorted, fully merged collection of stop bands.
///
/// The stop-category analogue of [`PassBands`]. Stop bands have no
/// absorbing all-range element, so there is no sentinel collapse here.
#[derive(Debug, Clone, PartialEq)]
pub struct StopBands {
    bands: Vec<Band>,
}

impl StopBands {
    fn single(band: Band) -> Self {
        Self { bands: vec![band] }
    }

    fn pair(a: Band, b: Band) -> Self {
        debug_assert!(a.compare(&b) != BandOrder::Overlap);
        let bands = match a.compare(&b) {
            BandOrder::Below => vec![a, b],
            _ => vec![b, a],
        };
        Self { bands }
    }

    /// The member bands, ascending.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    fn merge(&mut self, band: Band) {
        merge_into(&mut self.bands, band);
    }

    fn check_against(&self, band: &Band) -> BandResult<()> {
        for b in &self.bands {
            b.conflict_with(band)?;
        }
        Ok(())
    }
}

/// Insert a band into a sorted, merged sequence, keeping it sorted and
/// merged: members below the new band are kept, the contiguous run of
/// overlapping members is folded into one interval union (reclassified by
/// its resulting bounds), members above are kept.
fn merge_into(bands: &mut Vec<Band>, new: Band) {
    let mut merged = new;
    let mut below = Vec::with_capacity(bands.len() + 1);
    let mut above = Vec::new();
    for b in bands.drain(..) {
        match b.compare(&merged) {
            BandOrder::Below => below.push(b),
            BandOrder::Overlap => merged = b.union(&merged),
            BandOrder::Above => above.push(b),
        }
    }
    below.push(merged);
    below.append(&mut above);
    *bands = below;
}

/// A pass side and a stop side under mutual exclusivity.
///
/// Every mutation re-checks the new band against the entire opposite side
/// before anything is merged, so a rejected add is never partially applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedBands {
    pass: PassBands,
    stop: StopBands,
}

impl CombinedBands {
    fn new(pass: PassBands, stop: StopBands) -> BandResult<Self> {
        for p in pass.bands() {
            if p.category() != BandCategory::Pass {
                return Err(BandError::UnsupportedVariant("stop band on the pass side"));
            }
        }
        for s in stop.bands() {
            if s.category() != BandCategory::Stop {
                return Err(BandError::UnsupportedVariant("pass band on the stop side"));
            }
        }
        for p in pass.bands() {
            for s in stop.bands() {
                p.conflict_with(s)?;
            }
        }
        Ok(Self { pass, stop })
    }

    /// Pass-side members, ascending.
    pub fn pass_bands(&self) -> &[Band] {
        self.pass.bands()
    }

    /// Stop-side members, ascending.
    pub fn stop_bands(&self) -> &[Band] {
        self.stop.bands()
    }

    fn with_pass(&self, band: Band) -> BandResult<Self> {
        self.stop.check_against(&band)?;
        let mut pass = self.pass.clone();
        pass.merge(band);
        Ok(Self {
            pass,
            stop: self.stop.clone(),
        })
    }

    fn with_stop(&self, band: Band) -> BandResult<Self> {
        self.pass.check_against(&band)?;
        let mut stop = self.stop.clone();
        stop.merge(band);
        Ok(Self {
            pass: self.pass.clone(),
            stop,
        })
    }
}

/// A filter specification in whatever shape it currently has.
///
/// `add` returns the new authoritative handle; the old one stays valid
/// (nothing is mutated in place), which also makes a rejected add trivially
/// recoverable.
#[derive(Debug, Clone, PartialEq)]
pub enum BandPlan {
    /// One primitive band, either category
    Single(Band),
    /// Two or more merged pass bands
    Pass(PassBands),
    /// Two or more merged stop bands
    Stop(StopBands),
    /// Pass and stop sides coexisting under mutual exclusivity
    Combined(CombinedBands),
    /// The entire axis is passed; absorbs pass bands, rejects stop bands
    All,
}

impl From<Band> for BandPlan {
    fn from(band: Band) -> Self {
        BandPlan::from_band(band)
    }
}

impl BandPlan {
    fn from_band(band: Band) -> Self {
        match band {
            Band::All => BandPlan::All,
            b => BandPlan::Single(b),
        }
    }

    /// Add a primitive band, returning the plan's new shape.
    ///
    /// All conflict checks run before any merge is committed: on `Err` the
    /// plan this was called on is unchanged and remains the authoritative
    /// handle.
    pub fn add(&self, band: Band) -> BandResult<BandPlan> {
        match self {
            BandPlan::All => {
                // Absorbs any pass band; any stop band contradicts the
                // already-claimed full axis.
                Band::All.conflict_with(&band)?;
                Ok(BandPlan::All)
            }
            BandPlan::Single(a) => add_pair(*a, band),
            BandPlan::Pass(p) => match band.category() {
                BandCategory::Pass => {
                    if let Band::All = band {
                        tracing::debug!("all-range band absorbs existing pass bands");
                        return Ok(BandPlan::All);
                    }
                    let mut merged = p.clone();
                    merged.merge(band);
                    if merged.is_all() {
                        tracing::debug!("pass bands collapsed to the all-range sentinel");
                        Ok(BandPlan::All)
                    } else {
                        Ok(BandPlan::Pass(merged))
                    }
                }
                BandCategory::Stop => {
                    let combined = CombinedBands::new(p.clone(), StopBands::single(band))?;
                    tracing::debug!(
                        "stop band joins {} pass bands, building combined plan",
                        combined.pass_bands().len()
                    );
                    Ok(BandPlan::Combined(combined))
                }
            },
            BandPlan::Stop(s) => match band.category() {
                BandCategory::Stop => {
                    let mut merged = s.clone();
                    merged.merge(band);
                    Ok(BandPlan::Stop(merged))
                }
                BandCategory::Pass => {
                    let combined = CombinedBands::new(PassBands::single(band), s.clone())?;
                    Ok(BandPlan::Combined(combined))
                }
            },
            BandPlan::Combined(c) => {
                tracing::trace!("adding {} band {} to combined plan", band.category(), band);
                match band.category() {
                    BandCategory::Pass => Ok(BandPlan::Combined(c.with_pass(band)?)),
                    BandCategory::Stop => Ok(BandPlan::Combined(c.with_stop(band)?)),
                }
            }
        }
    }

    /// The primitive members in internal order: ascending by position,
    /// pass side before stop side for combined plans.
    pub fn bands(&self) -> Vec<Band> {
        match self {
            BandPlan::Single(b) => vec![*b],
            BandPlan::Pass(p) => p.bands().to_vec(),
            BandPlan::Stop(s) => s.bands().to_vec(),
            BandPlan::Combined(c) => {
                let mut v = c.pass_bands().to_vec();
                v.extend_from_slice(c.stop_bands());
                v
            }
            BandPlan::All => vec![Band::All],
        }
    }

    /// Human-readable band descriptors in internal order.
    pub fn describe(&self) -> Vec<String> {
        self.bands().iter().map(|b| b.to_string()).collect()
    }

    /// Superpose the FIR coefficients of every member band.
    ///
    /// Each member is synthesized independently at the same
    /// `(sample_rate, half_order)` and the vectors (all of length
    /// `2 * half_order + 1`) are summed elementwise. If any member is not
    /// representable as a finite vector — the all-range identity is the
    /// canonical case — the whole result is `None`.
    pub fn fir_coefficients(&self, sample_rate: f64, half_order: usize) -> Option<Vec<f64>> {
        let len = 2 * half_order + 1;
        let mut acc = vec![0.0; len];
        for band in self.bands() {
            let coeffs = band.fir_coefficients(sample_rate, half_order)?;
            debug_assert_eq!(coeffs.len(), len);
            for (a, c) in acc.iter_mut().zip(&coeffs) {
                *a += c;
            }
        }
        Some(acc)
    }
}

/// Combine two lone primitives — the pairwise rules of the algebra.
fn add_pair(a: Band, b: Band) -> BandResult<BandPlan> {
    match (a.category(), b.category()) {
        (BandCategory::Pass, BandCategory::Pass) => {
            if matches!(a, Band::All) || matches!(b, Band::All) {
                return Ok(BandPlan::All);
            }
            match a.compare(&b) {
                BandOrder::Overlap => Ok(BandPlan::from_band(a.union(&b))),
                _ => Ok(BandPlan::Pass(PassBands::pair(a, b))),
            }
        }
        (BandCategory::Stop, BandCategory::Stop) => match a.compare(&b) {
            BandOrder::Overlap => Ok(BandPlan::Single(a.union(&b))),
            _ => Ok(BandPlan::Stop(StopBands::pair(a, b))),
        },
        (BandCategory::Pass, BandCategory::Stop) => {
            CombinedBands::new(PassBands::single(a), StopBands::single(b))
                .map(BandPlan::Combined)
        }
        (BandCategory::Stop, BandCategory::Pass) => {
            CombinedBands::new(PassBands::single(b), StopBands::single(a))
                .map(BandPlan::Combined)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low(c: f64) -> Band {
        Band::low_pass(c).unwrap()
    }
    fn high(c: f64) -> Band {
        Band::high_pass(c).unwrap()
    }
    fn pass(l: f64, h: f64) -> Band {
        Band::band_pass(l, h).unwrap()
    }
    fn stop(l: f64, h: f64) -> Band {
        Band::band_stop(l, h).unwrap()
    }

    fn shown(plan: &BandPlan) -> String {
        plan.describe().join(" ")
    }

    #[test]
    fn test_two_disjoint_pass_bands_make_aggregate() {
        let plan = BandPlan::from(low(10.0)).add(pass(20.0, 30.0)).unwrap();
        assert_eq!(shown(&plan), "[0,10] [20,30]");
        assert!(matches!(plan, BandPlan::Pass(_)));
    }

    #[test]
    fn test_overlapping_lone_pass_bands_stay_single() {
        let plan = BandPlan::from(low(10.0)).add(low(5.0)).unwrap();
        assert_eq!(shown(&plan), "[0,10]");

        let plan = BandPlan::from(pass(1.0, 5.0)).add(pass(3.0, 8.0)).unwrap();
        assert_eq!(shown(&plan), "[1,8]");
    }

    #[test]
    fn test_lowpass_bridging_highpass_collapses_to_all() {
        let plan = BandPlan::from(low(10.0)).add(high(5.0)).unwrap();
        assert_eq!(plan, BandPlan::All);
    }

    #[test]
    fn test_sentinel_absorbs_any_pass_band() {
        for band in [low(10.0), high(99.0), pass(3.0, 7.0), Band::All] {
            let plan = BandPlan::All.add(band).unwrap();
            assert_eq!(plan, BandPlan::All, "sentinel must absorb {}", band);
        }
    }

    #[test]
    fn test_sentinel_rejects_any_stop_band() {
        match BandPlan::All.add(stop(35.0, 38.0)) {
            Err(BandError::RangeConflict { low, high }) => {
                assert_eq!(low, 35.0);
                assert_eq!(high, 38.0);
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_closure_after_many_adds() {
        let mut plan = BandPlan::from(pass(50.0, 60.0));
        for band in [
            low(10.0),
            pass(20.0, 30.0),
            pass(25.0, 40.0),
            high(10000.0),
            pass(58.0, 70.0),
        ] {
            plan = plan.add(band).unwrap();
        }
        let bands = plan.bands();
        for window in bands.windows(2) {
            assert_eq!(
                window[0].compare(&window[1]),
                BandOrder::Below,
                "{} should sort strictly below {}",
                window[0],
                window[1]
            );
        }
        assert_eq!(shown(&plan), "[0,10] [20,40] [50,70] [10000,inf)");
    }

    #[test]
    fn test_touching_pass_bands_coalesce() {
        let plan = BandPlan::from(pass(10.0, 20.0)).add(pass(20.0, 30.0)).unwrap();
        assert_eq!(shown(&plan), "[10,30]");
    }

    #[test]
    fn test_stop_bands_merge_without_sentinel() {
        let plan = BandPlan::from(stop(310.0, 400.0))
            .add(stop(310.0, 400.0))
            .unwrap()
            .add(stop(390.0, 500.0))
            .unwrap();
        assert_eq!(shown(&plan), "stop:[310,500]");
        assert!(matches!(plan, BandPlan::Single(_)));

        let plan = plan.add(stop(600.0, 700.0)).unwrap();
        assert_eq!(shown(&plan), "stop:[310,500] stop:[600,700]");
        assert!(matches!(plan, BandPlan::Stop(_)));
    }

    #[test]
    fn test_conflict_symmetry() {
        let plan = BandPlan::from(pass(20.0, 30.0)).add(high(10000.0)).unwrap();

        // Disjoint stop band is accepted.
        assert!(plan.add(stop(35.0, 38.0)).is_ok());

        // A stop band cutting through [20,30] is rejected with the
        // concrete overlapping interval.
        match plan.add(stop(10.0, 2000.0)) {
            Err(BandError::RangeConflict { low, high }) => {
                assert_eq!((low, high), (20.0, 30.0));
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_conflict_reports_first_member_in_ascending_order() {
        // [0,10] touches stop:[10,2000] at exactly 10; touching counts as
        // overlap, so the degenerate point interval is reported before the
        // wider clash with [20,30] is ever reached.
        let plan = BandPlan::from(low(10.0)).add(pass(20.0, 30.0)).unwrap();
        match plan.add(stop(10.0, 2000.0)) {
            Err(BandError::RangeConflict { low, high }) => {
                assert_eq!((low, high), (10.0, 10.0));
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_pass_into_stop_plan() {
        let plan = BandPlan::from(stop(35.0, 38.0))
            .add(stop(60.0, 80.0))
            .unwrap();
        let plan = plan.add(pass(20.0, 30.0)).unwrap();
        assert_eq!(shown(&plan), "[20,30] stop:[35,38] stop:[60,80]");

        // All-range pass over a stop aggregate names the first stop band.
        let stops = BandPlan::from(stop(35.0, 38.0)).add(stop(60.0, 80.0)).unwrap();
        match stops.add(Band::All) {
            Err(BandError::RangeConflict { low, high }) => {
                assert_eq!((low, high), (35.0, 38.0));
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_rejected_add_leaves_plan_usable() {
        let plan = BandPlan::from(pass(20.0, 30.0)).add(stop(35.0, 38.0)).unwrap();
        let before = plan.clone();
        assert!(plan.add(pass(34.0, 40.0)).is_err());
        assert_eq!(plan, before);
        // The prior handle still accepts valid bands.
        assert!(plan.add(pass(50.0, 60.0)).is_ok());
    }

    #[test]
    fn test_order_independence_of_final_shape() {
        let bands = [low(10.0), pass(20.0, 30.0), high(10000.0), stop(35.0, 38.0)];
        let expected = "[0,10] [20,30] [10000,inf) stop:[35,38]";

        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let order = [a, b, c, d];
                        let mut seen = [false; 4];
                        for &i in &order {
                            seen[i] = true;
                        }
                        if seen != [true; 4] {
                            continue;
                        }
                        let mut plan = BandPlan::from(bands[a]);
                        for &i in &order[1..] {
                            plan = plan.add(bands[i]).unwrap_or_else(|e| {
                                panic!("order {:?} failed: {}", order, e)
                            });
                        }
                        assert_eq!(shown(&plan), expected, "order {:?}", order);
                    }
                }
            }
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let plan = BandPlan::from(low(10.0));

        let plan = plan.add(pass(20.0, 30.0)).unwrap();
        assert_eq!(shown(&plan), "[0,10] [20,30]");

        let plan = plan.add(high(10000.0)).unwrap();
        assert_eq!(shown(&plan), "[0,10] [20,30] [10000,inf)");

        let plan = plan.add(stop(35.0, 38.0)).unwrap();
        assert_eq!(shown(&plan), "[0,10] [20,30] [10000,inf) stop:[35,38]");
        assert!(matches!(plan, BandPlan::Combined(_)));

        // [1,30] bridges [0,10] and [20,30] into [0,30].
        let plan = plan.add(pass(1.0, 30.0)).unwrap();
        assert_eq!(shown(&plan), "[0,30] [10000,inf) stop:[35,38]");

        // [60,80] touches neither [0,30] nor [10000,inf): accepted.
        let plan = plan.add(stop(60.0, 80.0)).unwrap();
        assert_eq!(shown(&plan), "[0,30] [10000,inf) stop:[35,38] stop:[60,80]");
    }

    #[test]
    fn test_combined_construction_checks_eagerly() {
        // Lone pass + lone stop that overlap must fail at construction.
        assert!(BandPlan::from(low(100.0)).add(stop(35.0, 38.0)).is_err());
        assert!(BandPlan::from(stop(35.0, 38.0)).add(low(100.0)).is_err());
    }

    #[test]
    fn test_superposition_length_and_none_propagation() {
        let half_order = 16;
        let plan = BandPlan::from(low(100.0)).add(pass(200.0, 300.0)).unwrap();
        let coeffs = plan.fir_coefficients(1000.0, half_order).unwrap();
        assert_eq!(coeffs.len(), 2 * half_order + 1);

        let combined = plan.add(stop(400.0, 450.0)).unwrap();
        let coeffs = combined.fir_coefficients(1000.0, half_order).unwrap();
        assert_eq!(coeffs.len(), 2 * half_order + 1);

        // The all-range identity has no finite vector, and that propagates.
        assert_eq!(BandPlan::All.fir_coefficients(1000.0, half_order), None);
    }

    #[test]
    fn test_unsupported_variant_is_defensive() {
        // Internal constructor guard; unreachable through the public API.
        let err = CombinedBands::new(
            PassBands::single(stop(1.0, 2.0)),
            StopBands::single(stop(3.0, 4.0)),
        );
        assert!(matches!(err, Err(BandError::UnsupportedVariant(_))));
    }
}
