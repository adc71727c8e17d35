//! Analysis window generation
//!
//! All windows are symmetric (denominator N-1). A single-point window is
//! `[1.0]` for every kind; a zero-length window is an error.

use crate::error::{DspError, Result};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann ("hanning") window: w[n] = 0.5 - 0.5*cos(2πn/(N-1))
    #[default]
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(N-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(N-1)) + 0.08*cos(4πn/(N-1))
    Blackman,

    /// Rectangular window (no weighting)
    Rectangular,
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of coefficients (N >= 1)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..N-1
pub fn generate_window(window_type: WindowType, length: usize) -> Result<Vec<f64>> {
    if length == 0 {
        return Err(DspError::InvalidLength { what: "window", len: 0 });
    }
    if length == 1 {
        return Ok(vec![1.0]);
    }

    let span = (length - 1) as f64;
    let window = (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / span;
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * angle.cos(),
                WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
                WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
                WindowType::Rectangular => 1.0,
            }
        })
        .collect();

    Ok(window)
}

/// Hann window of `length` points
pub fn hanning(length: usize) -> Result<Vec<f64>> {
    generate_window(WindowType::Hann, length)
}

/// Blackman window of `length` points
pub fn blackman(length: usize) -> Result<Vec<f64>> {
    generate_window(WindowType::Blackman, length)
}
