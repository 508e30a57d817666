//! # Composable FIR Band-Plan Algebra
//!
//! This crate builds frequency-selective filter specifications out of
//! primitive bands — low-pass, high-pass, band-pass, band-stop — and keeps
//! the growing specification consistent at every step:
//!
//! - **Band algebra**: same-category bands merge into sorted,
//!   non-overlapping aggregates; touching bands coalesce; a pass side that
//!   grows to cover the whole axis collapses to the all-range sentinel.
//! - **Conflict checking**: a pass band and a stop band that numerically
//!   overlap are a contradiction, rejected immediately with the concrete
//!   overlapping frequency interval in the error.
//! - **Coefficient synthesis**: each band is designed in isolation with the
//!   windowed-sinc method and the composite filter is the elementwise sum
//!   of the per-band vectors (superposition).
//! - **Streaming application**: the resulting coefficients run as an online
//!   per-sample filter, alone or chained with other transforms.
//!
//! ## Signal Flow
//!
//! ```text
//! Band::low_pass(..) ──┐
//! Band::band_pass(..) ─┼─ BandPlan::add ─► merged, conflict-checked plan
//! Band::band_stop(..) ─┘                        │
//!                                               ▼
//!                        fir_coefficients ─► Σ per-band windowed sinc
//!                                               │
//!                                               ▼
//!                            FirFilter / FilterChain (per-sample)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use firband::{Band, BandPlan};
//!
//! let plan = BandPlan::from(Band::low_pass(10.0)?)
//!     .add(Band::band_pass(20.0, 30.0)?)?
//!     .add(Band::high_pass(10000.0)?)?
//!     .add(Band::band_stop(35.0, 38.0)?)?;
//!
//! assert_eq!(
//!     plan.describe().join(" "),
//!     "[0,10] [20,30] [10000,inf) stop:[35,38]"
//! );
//!
//! // A stop band overlapping an accepted pass band is rejected, and the
//! // error names the conflicting interval.
//! let err = plan.add(Band::band_stop(15.0, 2000.0)?).unwrap_err();
//! assert_eq!(err.to_string(), "pass/stop range overlap: 20~30");
//!
//! // Synthesize the composite FIR coefficients (65 taps here).
//! let coeffs = plan.fir_coefficients(48_000.0, 32).unwrap();
//! assert_eq!(coeffs.len(), 65);
//! # Ok::<(), firband::BandError>(())
//! ```

pub mod band;
pub mod band_plan;
pub mod fir_design;
pub mod logging;
pub mod online_filter;
pub mod types;
pub mod windows;

pub use band::{Band, BandOrder};
pub use band_plan::{BandPlan, CombinedBands, PassBands, StopBands};
pub use online_filter::{FilterChain, FirFilter, MedianFilter, OnlineFilter, RealOnlineFilter};
pub use types::{BandCategory, BandError, BandResult};
