//! Spectral analysis with FFT

pub mod fft;
pub mod windowing;
pub mod analysis;
pub mod stft;

pub use fft::FftEngine;
pub use windowing::{apply_window, window_signal};
pub use analysis::{decibels_from_magnitude, fft_frequencies, magnitude, phase, DB_FLOOR};
pub use stft::{frame_count, spectrogram, StftConfig};
