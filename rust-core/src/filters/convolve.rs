//! FFT-based convolution
//!
//! Linear convolution by the convolution theorem: zero-pad both inputs to a
//! power of two covering len(a)+len(b)-1, multiply the spectra, transform
//! back and truncate. Complexity O(N log N) vs O(N*M) for the direct sum.

use crate::complex::{Complex, ZERO};
use crate::error::{
    check_overflow, check_overflow_real, ensure_finite, ensure_finite_complex, DspError, Result,
};
use crate::spectrum::FftEngine;

fn check_inputs(a: &[f64], b: &[f64]) -> Result<()> {
    if a.is_empty() || b.is_empty() {
        return Err(DspError::InvalidArgument(format!(
            "convolution inputs must be non-empty (got lengths {} and {})",
            a.len(),
            b.len()
        )));
    }
    ensure_finite(a, "first convolution input")?;
    ensure_finite(b, "second convolution input")
}

/// Power-of-two transform length covering `out_len`
fn padded_size(out_len: usize) -> Result<usize> {
    out_len
        .checked_next_power_of_two()
        .ok_or(DspError::InvalidLength { what: "convolution", len: out_len })
}

/// Linear convolution of two real sequences through the FFT
///
/// # Returns
/// Sequence of length len(a)+len(b)-1, equal to the direct convolution within
/// floating-point tolerance
pub fn fft_convolve(engine: &FftEngine, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_inputs(a, b)?;

    let out_len = a.len() + b.len() - 1;
    let fft_size = padded_size(out_len)?;
    let plan = engine.plan(fft_size)?;

    // 1. Zero-pad both inputs into complex buffers
    let mut a_buf = vec![ZERO; fft_size];
    let mut b_buf = vec![ZERO; fft_size];
    for (dst, &x) in a_buf.iter_mut().zip(a.iter()) {
        *dst = Complex::new(x, 0.0);
    }
    for (dst, &x) in b_buf.iter_mut().zip(b.iter()) {
        *dst = Complex::new(x, 0.0);
    }

    // 2. Forward FFT of both
    plan.process(&mut a_buf);
    plan.process(&mut b_buf);

    // 3. Multiply in frequency domain (convolution in time domain)
    for (x, &y) in a_buf.iter_mut().zip(b_buf.iter()) {
        *x *= y;
    }

    // 4. Inverse FFT (normalized) and truncate to the linear length
    plan.process_inverse(&mut a_buf);
    let output: Vec<f64> = a_buf[..out_len].iter().map(|c| c.re).collect();

    check_overflow_real(&output, "FFT convolution")?;
    Ok(output)
}

/// Circular convolution of two equal-length complex sequences
///
/// y[n] = Σ x[k]·h[(n-k) mod N], computed exactly at length N.
pub fn circular_convolve(engine: &FftEngine, x: &[Complex], h: &[Complex]) -> Result<Vec<Complex>> {
    if x.len() != h.len() {
        return Err(DspError::InvalidArgument(format!(
            "circular convolution needs equal lengths (got {} and {})",
            x.len(),
            h.len()
        )));
    }
    ensure_finite_complex(x, "first convolution input")?;
    ensure_finite_complex(h, "second convolution input")?;

    let plan = engine.plan(x.len())?;
    let mut x_buf = x.to_vec();
    let mut h_buf = h.to_vec();

    plan.process(&mut x_buf);
    plan.process(&mut h_buf);
    for (a, &b) in x_buf.iter_mut().zip(h_buf.iter()) {
        *a *= b;
    }
    plan.process_inverse(&mut x_buf);

    check_overflow(&x_buf, "circular convolution")?;
    Ok(x_buf)
}

/// Direct O(N*M) linear convolution, y[n] = Σ a[k]·b[n-k]
pub fn direct_convolve(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_inputs(a, b)?;

    let mut output = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &h) in b.iter().enumerate() {
            output[i + j] += x * h;
        }
    }

    check_overflow_real(&output, "direct convolution")?;
    Ok(output)
}
