//! Short-time Fourier transform
//!
//! Frames start at 0, hop, 2·hop, ... while the whole frame fits in the
//! signal. A trailing partial frame is dropped, never zero-padded. Every
//! frame yields a full complex spectrum of `frame_size` bins, in time order.

use super::fft::FftEngine;
use crate::complex::{self, Complex};
use crate::error::{check_overflow, ensure_finite, DspError, Result};
use crate::filters::windows::{generate_window, WindowType};
use ndarray::Array2;
use rayon::prelude::*;

/// STFT configuration for callers that do not supply their own window
#[derive(Debug, Clone)]
pub struct StftConfig {
    /// Frame length in samples (also the transform length)
    pub frame_size: usize,

    /// Stride between consecutive frame starts
    pub hop_size: usize,

    /// Window applied to every frame
    pub window_type: WindowType,

    /// Transform frames on the rayon pool
    pub parallel: bool,
}

impl Default for StftConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 512,
            window_type: WindowType::Hann,
            parallel: true,
        }
    }
}

/// Number of whole frames that fit in a signal of `signal_len` samples
///
/// A zero frame or hop size gives zero frames here; [`stft`] rejects those
/// parameters with `InvalidArgument` instead.
pub fn frame_count(signal_len: usize, frame_size: usize, hop_size: usize) -> usize {
    if frame_size == 0 || hop_size == 0 || frame_size > signal_len {
        0
    } else {
        (signal_len - frame_size) / hop_size + 1
    }
}

/// STFT with a caller-supplied window, frames transformed in parallel
///
/// # Arguments
/// * `signal` - Input signal
/// * `frame_size` - Frame length (> 0)
/// * `hop_size` - Frame stride (> 0)
/// * `window` - Window coefficients, exactly `frame_size` long
///
/// # Returns
/// One spectrum per frame. Empty when the signal is shorter than one frame.
pub fn stft(
    engine: &FftEngine,
    signal: &[f64],
    frame_size: usize,
    hop_size: usize,
    window: &[f64],
) -> Result<Vec<Vec<Complex>>> {
    run(engine, signal, frame_size, hop_size, window, true)
}

/// STFT driven by a [`StftConfig`]
pub fn stft_with_config(
    engine: &FftEngine,
    signal: &[f64],
    config: &StftConfig,
) -> Result<Vec<Vec<Complex>>> {
    if config.frame_size == 0 {
        return Err(DspError::InvalidArgument("frame size must be positive".into()));
    }
    let window = generate_window(config.window_type, config.frame_size)?;
    run(
        engine,
        signal,
        config.frame_size,
        config.hop_size,
        &window,
        config.parallel,
    )
}

/// Magnitude spectrogram, shape (frames, frame_size/2 + 1)
///
/// Keeps only the non-negative frequency half of each frame's spectrum.
pub fn spectrogram(engine: &FftEngine, signal: &[f64], config: &StftConfig) -> Result<Array2<f64>> {
    let spectra = stft_with_config(engine, signal, config)?;
    let bins = config.frame_size / 2 + 1;

    Ok(Array2::from_shape_fn((spectra.len(), bins), |(t, k)| {
        complex::magnitude(spectra[t][k])
    }))
}

fn run(
    engine: &FftEngine,
    signal: &[f64],
    frame_size: usize,
    hop_size: usize,
    window: &[f64],
    parallel: bool,
) -> Result<Vec<Vec<Complex>>> {
    if frame_size == 0 {
        return Err(DspError::InvalidArgument("frame size must be positive".into()));
    }
    if hop_size == 0 {
        return Err(DspError::InvalidArgument("hop size must be positive".into()));
    }
    if window.len() != frame_size {
        return Err(DspError::InvalidArgument(format!(
            "window length {} does not match frame size {}",
            window.len(),
            frame_size
        )));
    }
    ensure_finite(window, "window")?;
    ensure_finite(signal, "signal")?;

    let frames = frame_count(signal.len(), frame_size, hop_size);
    if frames == 0 {
        return Ok(Vec::new());
    }

    let plan = engine.plan(frame_size)?;
    log::debug!(
        "STFT: {} samples -> {} frames of {} (hop {}, parallel: {})",
        signal.len(),
        frames,
        frame_size,
        hop_size,
        parallel
    );

    let transform_frame = |index: usize| -> Result<Vec<Complex>> {
        let start = index * hop_size;
        let mut buffer: Vec<Complex> = signal[start..start + frame_size]
            .iter()
            .zip(window.iter())
            .map(|(&s, &w)| Complex::new(s * w, 0.0))
            .collect();

        plan.process(&mut buffer);
        check_overflow(&buffer, "STFT frame")?;
        Ok(buffer)
    };

    if parallel {
        (0..frames).into_par_iter().map(&transform_frame).collect()
    } else {
        (0..frames).map(&transform_frame).collect()
    }
}
