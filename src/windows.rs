//! Window Functions for FIR Design
//!
//! Tapering windows applied to the truncated sinc impulse response to
//! control sidelobe level at the cost of main-lobe width.
//!
//! | Window      | Sidelobe Level | Use Case                  |
//! |-------------|----------------|---------------------------|
//! | Rectangular | -13 dB         | High frequency resolution |
//! | Hamming     | -43 dB         | General purpose           |
//! | Hann        | -32 dB         | Spectral analysis         |
//! | Blackman    | -58 dB         | High dynamic range        |
//!
//! ## Example
//!
//! ```rust
//! use firband::windows::Window;
//!
//! let w = Window::Hamming.generate(64);
//! assert_eq!(w.len(), 64);
//! ```

use std::f64::consts::PI;

/// Window function type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Rectangular window (no windowing)
    Rectangular,
    /// Hamming window: 0.54 - 0.46*cos(2πn/N)
    Hamming,
    /// Hann (Hanning) window: 0.5*(1 - cos(2πn/N))
    Hann,
    /// Blackman window: 0.42 - 0.5*cos(2πn/N) + 0.08*cos(4πn/N)
    Blackman,
}

impl Default for Window {
    fn default() -> Self {
        Window::Blackman
    }
}

impl Window {
    /// Generate window coefficients for the given length.
    pub fn generate(&self, length: usize) -> Vec<f64> {
        match self {
            Window::Rectangular => rectangular_window(length),
            Window::Hamming => hamming_window(length),
            Window::Hann => hann_window(length),
            Window::Blackman => blackman_window(length),
        }
    }
}

/// Generate a rectangular (boxcar) window.
pub fn rectangular_window(length: usize) -> Vec<f64> {
    vec![1.0; length]
}

/// Generate a Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(N-1)).
pub fn hamming_window(length: usize) -> Vec<f64> {
    if length == 0 {
        return vec![];
    }
    if length == 1 {
        return vec![1.0];
    }

    let n_minus_1 = (length - 1) as f64;
    (0..length)
        .map(|n| 0.54 - 0.46 * (2.0 * PI * n as f64 / n_minus_1).cos())
        .collect()
}

/// Generate a Hann window: w[n] = 0.5*(1 - cos(2πn/(N-1))).
pub fn hann_window(length: usize) -> Vec<f64> {
    if length == 0 {
        return vec![];
    }
    if length == 1 {
        return vec![1.0];
    }

    let n_minus_1 = (length - 1) as f64;
    (0..length)
        .map(|n| 0.5 * (1.0 - (2.0 * PI * n as f64 / n_minus_1).cos()))
        .collect()
}

/// Generate a Blackman window: w[n] = 0.42 - 0.5*cos(x) + 0.08*cos(2x).
pub fn blackman_window(length: usize) -> Vec<f64> {
    if length == 0 {
        return vec![];
    }
    if length == 1 {
        return vec![1.0];
    }

    let n_minus_1 = (length - 1) as f64;
    (0..length)
        .map(|n| {
            let x = 2.0 * PI * n as f64 / n_minus_1;
            0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
        })
        .collect()
}
