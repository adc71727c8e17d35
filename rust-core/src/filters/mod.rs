//! Window generation and FFT convolution

pub mod windows;
pub mod convolve;

pub use windows::{WindowType, generate_window, hanning, blackman};
pub use convolve::{circular_convolve, direct_convolve};
