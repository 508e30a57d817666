//! Windowed-Sinc FIR Kernel — per-band coefficient synthesis
//!
//! Designs the coefficient vector for one primitive band in isolation:
//! low-pass via truncated sinc with a Blackman window, high-pass via
//! spectral inversion, band-pass as the difference of two low-pass designs,
//! band-stop as low-pass plus high-pass. Every vector has length
//! `2 * half_order + 1` and the low-pass design is normalized to unity DC
//! gain.
//!
//! The dispatch entry point is [`Band::fir_coefficients`]; it returns
//! `None` for the all-range band, whose identity response is a no-op
//! rather than a finite convolution vector the superposition in
//! [`crate::band_plan`] could sum.
//!
//! ## Example
//!
//! ```rust
//! use firband::fir_design;
//!
//! let coeffs = fir_design::low_pass(100.0, 1000.0, 16);
//! assert_eq!(coeffs.len(), 33);
//! let dc: f64 = coeffs.iter().sum();
//! assert!((dc - 1.0).abs() < 1e-6);
//! ```

use crate::band::Band;
use crate::windows::Window;
use std::f64::consts::PI;

/// Design a low-pass filter `[0, cutoff_hz]` using the windowed-sinc method.
///
/// # Arguments
/// * `cutoff_hz` - Cutoff frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `half_order` - Half the filter order; the vector has `2*half_order + 1` taps
pub fn low_pass(cutoff_hz: f64, sample_rate: f64, half_order: usize) -> Vec<f64> {
    design_lowpass_windowed(cutoff_hz, sample_rate, half_order, Window::Blackman)
}

/// Design a high-pass filter `[cutoff_hz, +inf)` via spectral inversion.
pub fn high_pass(cutoff_hz: f64, sample_rate: f64, half_order: usize) -> Vec<f64> {
    let mut coeffs = low_pass(cutoff_hz, sample_rate, half_order);
    spectral_invert(&mut coeffs);
    coeffs
}

/// Design a band-pass filter `[low_hz, high_hz]` as LPF(high) − LPF(low).
pub fn band_pass(low_hz: f64, high_hz: f64, sample_rate: f64, half_order: usize) -> Vec<f64> {
    let lpf_high = low_pass(high_hz, sample_rate, half_order);
    let lpf_low = low_pass(low_hz, sample_rate, half_order);
    lpf_high
        .iter()
        .zip(lpf_low.iter())
        .map(|(h, l)| h - l)
        .collect()
}

/// Design a band-stop (notch) filter rejecting `[low_hz, high_hz]` as
/// LPF(low) + HPF(high).
pub fn band_stop(low_hz: f64, high_hz: f64, sample_rate: f64, half_order: usize) -> Vec<f64> {
    let lpf_low = low_pass(low_hz, sample_rate, half_order);
    let hpf_high = high_pass(high_hz, sample_rate, half_order);
    lpf_low
        .iter()
        .zip(hpf_high.iter())
        .map(|(l, h)| l + h)
        .collect()
}

impl Band {
    /// Synthesize this band's FIR contribution in isolation.
    ///
    /// Returns `None` when the band has no finite coefficient vector; the
    /// all-range identity is the only such case.
    pub fn fir_coefficients(&self, sample_rate: f64, half_order: usize) -> Option<Vec<f64>> {
        match *self {
            Band::LowPass { cutoff } => Some(low_pass(cutoff, sample_rate, half_order)),
            Band::HighPass { cutoff } => Some(high_pass(cutoff, sample_rate, half_order)),
            Band::BandPass { low, high } => {
                Some(band_pass(low, high, sample_rate, half_order))
            }
            Band::BandStop { low, high } => {
                Some(band_stop(low, high, sample_rate, half_order))
            }
            Band::All => None,
        }
    }
}

/// Negate all coefficients and add 1 to the center tap, turning a low-pass
/// response into its high-pass complement.
fn spectral_invert(coeffs: &mut [f64]) {
    let center = coeffs.len() / 2;
    for c in coeffs.iter_mut() {
        *c = -*c;
    }
    coeffs[center] += 1.0;
}

fn design_lowpass_windowed(
    cutoff_hz: f64,
    sample_rate: f64,
    half_order: usize,
    window: Window,
) -> Vec<f64> {
    let num_taps = 2 * half_order + 1;
    let fc = cutoff_hz / sample_rate; // Normalized cutoff (0 to 0.5)
    let mid = half_order as f64;

    let window_coeffs = window.generate(num_taps);
    let mut coeffs = Vec::with_capacity(num_taps);

    for i in 0..num_taps {
        let n = i as f64;
        let sinc = if (n - mid).abs() < 1e-10 {
            2.0 * PI * fc
        } else {
            (2.0 * PI * fc * (n - mid)).sin() / (n - mid)
        };
        coeffs.push(sinc * window_coeffs[i]);
    }

    // Normalize to unity gain at DC
    let sum: f64 = coeffs.iter().sum();
    if sum.abs() > 1e-10 {
        for c in coeffs.iter_mut() {
            *c /= sum;
        }
    }

    coeffs
}
