//! Spectral feature extraction
//!
//! Per-bin magnitude, phase and decibel conversion over transform output,
//! plus the bin-to-Hz mapping.

use crate::complex::{self, Complex};
use crate::error::{ensure_finite, ensure_finite_complex, DspError, Result};

/// Magnitude floor applied before taking the logarithm, so a zero bin maps to
/// -240 dB instead of -Inf
pub const DB_FLOOR: f64 = 1e-12;

/// Elementwise |X[k]|
pub fn magnitude(spectrum: &[Complex]) -> Result<Vec<f64>> {
    ensure_finite_complex(spectrum, "spectrum")?;
    Ok(spectrum.iter().map(|&c| complex::magnitude(c)).collect())
}

/// Elementwise atan2(im, re) in (-π, π]; an all-zero bin has phase 0
pub fn phase(spectrum: &[Complex]) -> Result<Vec<f64>> {
    ensure_finite_complex(spectrum, "spectrum")?;
    Ok(spectrum.iter().map(|&c| complex::phase(c)).collect())
}

/// 20·log10(max(m, DB_FLOOR))
pub fn decibels_from_magnitude(magnitudes: &[f64]) -> Result<Vec<f64>> {
    ensure_finite(magnitudes, "magnitudes")?;
    Ok(magnitudes
        .iter()
        .map(|&m| 20.0 * m.max(DB_FLOOR).log10())
        .collect())
}

/// Raw bin frequencies k·sample_rate/n for k = 0..n
///
/// Not folded: bins above n/2 map above Nyquist. Callers that want only the
/// non-negative half slice `[..n / 2 + 1]` themselves.
pub fn fft_frequencies(n: usize, sample_rate: f64) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(DspError::InvalidLength { what: "frequency axis", len: 0 });
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(DspError::InvalidArgument(format!(
            "sample rate must be positive and finite, got {sample_rate}"
        )));
    }

    let bin_width = sample_rate / n as f64;
    Ok((0..n).map(|k| k as f64 * bin_width).collect())
}
