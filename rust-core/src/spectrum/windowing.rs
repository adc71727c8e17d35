//! Applying windows to time-domain signals before FFT

use crate::error::{ensure_finite, DspError, Result};
use crate::filters::windows::{generate_window, WindowType};

/// Multiply a signal by a window, elementwise
///
/// # Arguments
/// * `window` - Window coefficients, same length as `signal`
/// * `signal` - Input signal (left untouched)
///
/// # Returns
/// Windowed copy of the signal
pub fn apply_window(window: &[f64], signal: &[f64]) -> Result<Vec<f64>> {
    if signal.is_empty() {
        return Err(DspError::InvalidLength { what: "signal", len: 0 });
    }
    if window.len() != signal.len() {
        return Err(DspError::InvalidArgument(format!(
            "window length {} does not match signal length {}",
            window.len(),
            signal.len()
        )));
    }
    ensure_finite(window, "window")?;
    ensure_finite(signal, "signal")?;

    Ok(signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect())
}

/// Generate a window matching the signal length and apply it
pub fn window_signal(signal: &[f64], window_type: WindowType) -> Result<Vec<f64>> {
    let window = generate_window(window_type, signal.len())?;
    apply_window(&window, signal)
}
