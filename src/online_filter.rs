//! Streaming Filter Application
//!
//! Online (per-sample) application of FIR coefficient vectors and arbitrary
//! per-sample transforms. Filters maintain internal state between calls, so
//! a single instance processes an unbounded stream; [`MedianFilter`] is a
//! nonlinear stage for impulse-noise removal, and [`FilterChain`] runs a
//! sequence of heterogeneous filters back to back.
//!
//! ## Example
//!
//! ```rust
//! use firband::{Band, BandPlan};
//! use firband::online_filter::{FirFilter, RealOnlineFilter};
//!
//! let plan = BandPlan::from(Band::low_pass(100.0).unwrap());
//! let mut filter = FirFilter::from_plan(&plan, 1000.0, 32).unwrap();
//!
//! // DC settles to unity through a low-pass design.
//! let mut out = 0.0;
//! for _ in 0..100 {
//!     out = filter.process_real(1.0);
//! }
//! assert!((out - 1.0).abs() < 0.01);
//! ```

use crate::band_plan::BandPlan;
use num_complex::Complex64;

/// Core trait for streaming single-sample filters.
///
/// Complex samples are the general case; filters with real coefficients can
/// additionally implement [`RealOnlineFilter`] to skip the conversion.
pub trait OnlineFilter: Send + Sync {
    /// Process a single complex sample through the filter.
    fn process(&mut self, input: Complex64) -> Complex64;

    /// Process a block of samples, returning filtered output.
    fn process_block(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        input.iter().map(|&s| self.process(s)).collect()
    }

    /// Process samples in place.
    fn process_inplace(&mut self, samples: &mut [Complex64]) {
        for s in samples.iter_mut() {
            *s = self.process(*s);
        }
    }

    /// Reset filter state (clear delay lines, accumulators).
    fn reset(&mut self);
}

/// Trait for filters that can process real-valued samples directly.
pub trait RealOnlineFilter: OnlineFilter {
    /// Process a single real-valued sample.
    fn process_real(&mut self, input: f64) -> f64;

    /// Process a block of real samples.
    fn process_real_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&s| self.process_real(s)).collect()
    }

    /// Process real samples in place.
    fn process_real_inplace(&mut self, samples: &mut [f64]) {
        for s in samples.iter_mut() {
            *s = self.process_real(*s);
        }
    }
}

/// FIR filter using direct convolution over a circular delay line.
#[derive(Debug, Clone)]
pub struct FirFilter {
    /// Filter coefficients (impulse response)
    coeffs: Vec<f64>,
    /// Delay line for complex samples
    delay_line: Vec<Complex64>,
    /// Delay line for real samples
    delay_line_real: Vec<f64>,
    /// Current position in delay line
    delay_idx: usize,
}

impl FirFilter {
    /// Create a new FIR filter with the given coefficients.
    pub fn new(coeffs: Vec<f64>) -> Self {
        assert!(!coeffs.is_empty(), "coefficient vector must not be empty");
        let len = coeffs.len();
        Self {
            coeffs,
            delay_line: vec![Complex64::new(0.0, 0.0); len],
            delay_line_real: vec![0.0; len],
            delay_idx: 0,
        }
    }

    /// Build the composite filter for a whole band plan.
    ///
    /// Superposes the plan's per-band coefficient vectors; returns `None`
    /// when the plan is not synthesizable as a finite vector (a plan
    /// holding the all-range band).
    pub fn from_plan(plan: &BandPlan, sample_rate: f64, half_order: usize) -> Option<Self> {
        plan.fir_coefficients(sample_rate, half_order).map(Self::new)
    }

    /// Get the filter coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Get the number of taps.
    pub fn num_taps(&self) -> usize {
        self.coeffs.len()
    }

    /// Group delay in samples; half the filter length for linear phase.
    pub fn group_delay_samples(&self) -> usize {
        (self.coeffs.len() - 1) / 2
    }
}

impl OnlineFilter for FirFilter {
    fn process(&mut self, input: Complex64) -> Complex64 {
        self.delay_line[self.delay_idx] = input;

        let mut output = Complex64::new(0.0, 0.0);
        let len = self.coeffs.len();
        for i in 0..len {
            let delay_pos = (self.delay_idx + len - i) % len;
            output += self.delay_line[delay_pos] * self.coeffs[i];
        }

        self.delay_idx = (self.delay_idx + 1) % len;
        output
    }

    fn reset(&mut self) {
        for s in self.delay_line.iter_mut() {
            *s = Complex64::new(0.0, 0.0);
        }
        for s in self.delay_line_real.iter_mut() {
            *s = 0.0;
        }
        self.delay_idx = 0;
    }
}

impl RealOnlineFilter for FirFilter {
    fn process_real(&mut self, input: f64) -> f64 {
        self.delay_line_real[self.delay_idx] = input;

        let mut output = 0.0;
        let len = self.coeffs.len();
        for i in 0..len {
            let delay_pos = (self.delay_idx + len - i) % len;
            output += self.delay_line_real[delay_pos] * self.coeffs[i];
        }

        self.delay_idx = (self.delay_idx + 1) % len;
        output
    }
}

/// Sliding-window state shared by the real and imaginary median paths:
/// a ring buffer in arrival order plus a sorted cache of the same samples.
#[derive(Debug, Clone)]
struct MedianWindow {
    /// Samples in arrival order; `offset` points at the newest one
    buffer: Vec<f64>,
    /// The buffered samples, kept sorted
    cache: Vec<f64>,
    offset: usize,
    filled: bool,
}

impl MedianWindow {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size],
            cache: Vec::with_capacity(size),
            offset: 0,
            filled: false,
        }
    }

    fn push(&mut self, sample: f64) -> f64 {
        self.offset = if self.offset == 0 {
            self.buffer.len() - 1
        } else {
            self.offset - 1
        };
        if self.filled {
            // Drop the oldest sample from the cache, insert the new one
            let oldest = self.buffer[self.offset];
            let out = self.cache.partition_point(|&v| v < oldest);
            self.cache.remove(out);
            let ins = self.cache.partition_point(|&v| v < sample);
            self.cache.insert(ins, sample);
        } else {
            let ins = self.cache.partition_point(|&v| v < sample);
            self.cache.insert(ins, sample);
            if self.cache.len() == self.buffer.len() {
                self.filled = true;
            }
        }
        self.buffer[self.offset] = sample;

        let mid = self.cache.len() / 2;
        if mid * 2 == self.cache.len() {
            (self.cache[mid - 1] + self.cache[mid]) / 2.0
        } else {
            self.cache[mid]
        }
    }

    fn reset(&mut self) {
        self.filled = false;
        self.cache.clear();
        self.offset = 0;
    }
}

/// Sliding-window median filter for impulse noise removal.
///
/// Nonlinear stage that replaces each sample with the median of the last
/// `2 * half_win + 1` samples, removing impulsive outliers while preserving
/// edges. While still filling, the median of the samples seen so far is
/// returned (the mean of the two middle values for an even count). Complex
/// samples are filtered component-wise.
#[derive(Debug, Clone)]
pub struct MedianFilter {
    re: MedianWindow,
    im: MedianWindow,
}

impl MedianFilter {
    /// Create a median filter over a window of `2 * half_win + 1` samples.
    pub fn new(half_win: usize) -> Self {
        let size = 2 * half_win + 1;
        Self {
            re: MedianWindow::new(size),
            im: MedianWindow::new(size),
        }
    }

    /// The window length in samples.
    pub fn window_size(&self) -> usize {
        self.re.buffer.len()
    }
}

impl OnlineFilter for MedianFilter {
    fn process(&mut self, input: Complex64) -> Complex64 {
        Complex64::new(self.re.push(input.re), self.im.push(input.im))
    }

    fn reset(&mut self) {
        self.re.reset();
        self.im.reset();
    }
}

impl RealOnlineFilter for MedianFilter {
    fn process_real(&mut self, input: f64) -> f64 {
        self.re.push(input)
    }
}

/// Applies a sequence of filters back to back, sample by sample.
///
/// The output of each stage feeds the next; resetting the chain resets
/// every stage.
#[derive(Default)]
pub struct FilterChain {
    stages: Vec<Box<dyn OnlineFilter>>,
}

impl FilterChain {
    /// Create an empty chain (identity transform).
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage to the end of the chain.
    pub fn push(&mut self, stage: Box<dyn OnlineFilter>) {
        self.stages.push(stage);
    }

    /// Number of stages in the chain.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl OnlineFilter for FilterChain {
    fn process(&mut self, input: Complex64) -> Complex64 {
        let mut sample = input;
        for stage in self.stages.iter_mut() {
            sample = stage.process(sample);
        }
        sample
    }

    fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
    }
}
