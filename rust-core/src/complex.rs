//! Complex arithmetic core
//!
//! Bins are `num_complex::Complex<f64>`, which already carries add, sub, mul
//! and conjugate. This module pins down construction and the two polar
//! accessors whose edge conventions the rest of the crate relies on.

use std::f64::consts::PI;

pub use num_complex::Complex64 as Complex;

/// Complex zero, used for buffer initialization and zero-padding
pub const ZERO: Complex = Complex::new(0.0, 0.0);

/// Construct from magnitude and phase (radians)
#[inline]
pub fn from_polar(magnitude: f64, phase: f64) -> Complex {
    Complex::from_polar(magnitude, phase)
}

/// sqrt(re² + im²), computed without intermediate overflow
#[inline]
pub fn magnitude(c: Complex) -> f64 {
    c.re.hypot(c.im)
}

/// atan2(im, re) folded into (-π, π]
///
/// The origin (including either signed zero) maps to 0.
#[inline]
pub fn phase(c: Complex) -> f64 {
    if c.re == 0.0 && c.im == 0.0 {
        return 0.0;
    }
    let angle = c.im.atan2(c.re);
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

/// e^(i·angle)
#[inline]
pub(crate) fn unit(angle: f64) -> Complex {
    let (sin, cos) = angle.sin_cos();
    Complex::new(cos, sin)
}
