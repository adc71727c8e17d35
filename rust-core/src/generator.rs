//! Test-signal generation

use crate::error::{check_overflow_real, DspError, Result};
use std::f64::consts::PI;

/// Sampled sinusoid x[n] = amp·sin(2π·freq·n/sample_rate)
///
/// Produces round(sample_rate·duration) samples. Negative frequencies are
/// valid and flip the phase. A zero duration yields an empty signal.
///
/// # Arguments
/// * `freq` - Frequency in Hz (any finite value)
/// * `amp` - Peak amplitude
/// * `sample_rate` - Sample rate in Hz (> 0)
/// * `duration` - Length in seconds (>= 0)
pub fn sine_wave(freq: f64, amp: f64, sample_rate: f64, duration: f64) -> Result<Vec<f64>> {
    for (name, value) in [
        ("frequency", freq),
        ("amplitude", amp),
        ("sample rate", sample_rate),
        ("duration", duration),
    ] {
        if !value.is_finite() {
            return Err(DspError::InvalidArgument(format!("{name} must be finite, got {value}")));
        }
    }
    if sample_rate <= 0.0 {
        return Err(DspError::InvalidArgument(format!(
            "sample rate must be positive, got {sample_rate}"
        )));
    }
    if duration < 0.0 {
        return Err(DspError::InvalidArgument(format!(
            "duration must be non-negative, got {duration}"
        )));
    }

    // Allocations are capped at isize::MAX bytes
    let max_samples = isize::MAX as usize / std::mem::size_of::<f64>();
    let count = (sample_rate * duration).round();
    if !count.is_finite() || count > max_samples as f64 {
        return Err(DspError::NumericOverflow(format!(
            "sample count {count} does not fit in memory"
        )));
    }
    let count = count as usize;

    let mut signal: Vec<f64> = Vec::new();
    signal.try_reserve_exact(count).map_err(|e| {
        DspError::NumericOverflow(format!("cannot allocate {count} samples: {e}"))
    })?;

    let step = 2.0 * PI * freq / sample_rate;
    signal.extend((0..count).map(|n| amp * (step * n as f64).sin()));

    check_overflow_real(&signal, "sine generator")?;
    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_rate_sine() {
        let signal = sine_wave(1.0, 1.0, 4.0, 1.0).unwrap();
        let expected = [0.0, 1.0, 0.0, -1.0];

        assert_eq!(signal.len(), 4);
        for (a, b) in signal.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sample_count_rounding() {
        assert_eq!(sine_wave(440.0, 0.5, 44100.0, 0.1).unwrap().len(), 4410);
        // 3.6 samples rounds up
        assert_eq!(sine_wave(1.0, 1.0, 12.0, 0.3).unwrap().len(), 4);
    }

    #[test]
    fn test_negative_frequency_flips_phase() {
        let pos = sine_wave(3.0, 2.0, 50.0, 0.5).unwrap();
        let neg = sine_wave(-3.0, 2.0, 50.0, 0.5).unwrap();
        for (p, n) in pos.iter().zip(neg.iter()) {
            assert!((p + n).abs() < 1e-12);
        }
    }

    #[test]
    fn test_amplitude_bound() {
        let signal = sine_wave(440.0, 0.5, 44100.0, 0.05).unwrap();
        assert!(signal.iter().all(|&s| s.abs() <= 0.5 + 1e-12));
    }

    #[test]
    fn test_zero_duration() {
        assert!(sine_wave(100.0, 1.0, 44100.0, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            sine_wave(1.0, 1.0, 0.0, 1.0),
            Err(DspError::InvalidArgument(_))
        ));
        assert!(matches!(
            sine_wave(1.0, 1.0, -8000.0, 1.0),
            Err(DspError::InvalidArgument(_))
        ));
        assert!(matches!(
            sine_wave(1.0, 1.0, 8000.0, -0.5),
            Err(DspError::InvalidArgument(_))
        ));
        assert!(matches!(
            sine_wave(f64::NAN, 1.0, 8000.0, 1.0),
            Err(DspError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_oversized_request() {
        assert!(matches!(
            sine_wave(1.0, 1.0, 1e300, 1e300),
            Err(DspError::NumericOverflow(_))
        ));
    }

    #[test]
    fn test_count_beyond_allocation_limit() {
        // 2e18 samples is a finite count but more than isize::MAX bytes of f64
        assert!(matches!(
            sine_wave(1.0, 1.0, 1e18, 2.0),
            Err(DspError::NumericOverflow(_))
        ));
    }
}
