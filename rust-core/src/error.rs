//! Error type shared by every engine operation

use num_complex::Complex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Invalid length for {what}: {len}")]
    InvalidLength { what: &'static str, len: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),
}

pub type Result<T> = std::result::Result<T, DspError>;

/// Reject NaN/Inf samples before any computation starts
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(DspError::InvalidArgument(format!(
            "{what} contains a non-finite value at index {idx}"
        ))),
        None => Ok(()),
    }
}

pub(crate) fn ensure_finite_complex(values: &[Complex<f64>], what: &str) -> Result<()> {
    match values.iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        Some(idx) => Err(DspError::InvalidArgument(format!(
            "{what} contains a non-finite bin at index {idx}"
        ))),
        None => Ok(()),
    }
}

/// Output check: finite input may still overflow to Inf during accumulation
pub(crate) fn check_overflow(values: &[Complex<f64>], what: &str) -> Result<()> {
    if values.iter().all(|c| c.re.is_finite() && c.im.is_finite()) {
        Ok(())
    } else {
        Err(DspError::NumericOverflow(format!("{what} produced a non-finite result")))
    }
}

pub(crate) fn check_overflow_real(values: &[f64], what: &str) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(DspError::NumericOverflow(format!("{what} produced a non-finite result")))
    }
}
