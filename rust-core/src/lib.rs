//! Delia - Spectral DSP Engine
//!
//! Pure computation library: test-signal generation, exact-length forward and
//! inverse FFT, spectral features, FFT convolution and short-time analysis.
//!
//! The functions at the crate root run on [`FftEngine::shared`]. Callers that
//! want to own the plan cache construct an [`FftEngine`] and use the module
//! functions that take one explicitly.

pub mod complex;
pub mod error;
pub mod filters;
pub mod generator;
pub mod spectrum;

pub use complex::Complex;
pub use error::{DspError, Result};
pub use filters::{blackman, generate_window, hanning, WindowType};
pub use generator::sine_wave;
pub use spectrum::{
    apply_window, decibels_from_magnitude, fft_frequencies, magnitude, phase, FftEngine, StftConfig,
};

/// Forward FFT of a real signal (full N-bin spectrum)
pub fn fft(signal: &[f64]) -> Result<Vec<Complex>> {
    FftEngine::shared().forward(signal)
}

/// Inverse FFT, real part only
pub fn ifft(spectrum: &[Complex]) -> Result<Vec<f64>> {
    FftEngine::shared().inverse(spectrum)
}

/// Linear convolution via FFT, length len(a)+len(b)-1
pub fn fft_convolve(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    filters::convolve::fft_convolve(FftEngine::shared(), a, b)
}

/// Short-time FFT with a caller-supplied window; trailing partial frame dropped
pub fn stft(
    signal: &[f64],
    frame_size: usize,
    hop_size: usize,
    window: &[f64],
) -> Result<Vec<Vec<Complex>>> {
    spectrum::stft::stft(FftEngine::shared(), signal, frame_size, hop_size, window)
}
