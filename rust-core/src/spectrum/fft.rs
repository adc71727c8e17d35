//! FFT engine with exact-length transforms
//!
//! Power-of-two lengths run an iterative radix-2 Cooley-Tukey transform.
//! Every other length goes through Bluestein's chirp-z algorithm, which
//! re-expresses the DFT as a circular convolution on a power-of-two length,
//! so callers always get a spectrum of exactly the input length.
//!
//! Twiddle tables and Bluestein chirps are built once per length and kept in
//! a plan cache owned by the engine. Clones of an engine share the cache.

use crate::complex::{self, Complex, ZERO};
use crate::error::{check_overflow, ensure_finite, ensure_finite_complex, DspError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, OnceLock};

/// Precomputed tables for one transform length
///
/// Plans only ever run the unnormalized forward transform; the inverse is
/// derived from it via conjugation.
pub(crate) enum Plan {
    /// N = 1: the transform is the identity
    Identity,

    Radix2 {
        /// exp(-2πi·k/N) for k = 0..N/2
        twiddles: Vec<Complex>,
        /// log2(N)
        levels: u32,
    },

    Bluestein {
        len: usize,
        /// exp(-πi·k²/N) for k = 0..N
        chirp: Vec<Complex>,
        /// Forward transform of the conjugate chirp, laid out circularly on M points
        kernel: Vec<Complex>,
        /// Radix-2 plan of length M >= 2N + 1
        inner: Arc<Plan>,
    },
}

impl Plan {
    fn radix2(n: usize) -> Self {
        let twiddles = (0..n / 2)
            .map(|k| complex::unit(-2.0 * PI * k as f64 / n as f64))
            .collect();

        Plan::Radix2 {
            twiddles,
            levels: n.trailing_zeros(),
        }
    }

    fn bluestein(n: usize, inner: Arc<Plan>) -> Self {
        let m = inner.len();

        // k² is reduced mod 2N before scaling so the angle stays accurate for large k
        let modulus = 2 * n as u128;
        let chirp: Vec<Complex> = (0..n)
            .map(|k| {
                let k2 = (k as u128 * k as u128) % modulus;
                complex::unit(-PI * k2 as f64 / n as f64)
            })
            .collect();

        let mut kernel = vec![ZERO; m];
        kernel[0] = chirp[0].conj();
        for k in 1..n {
            let c = chirp[k].conj();
            kernel[k] = c;
            kernel[m - k] = c;
        }
        inner.process(&mut kernel);

        Plan::Bluestein {
            len: n,
            chirp,
            kernel,
            inner,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Plan::Identity => 1,
            Plan::Radix2 { twiddles, .. } => twiddles.len() * 2,
            Plan::Bluestein { len, .. } => *len,
        }
    }

    /// Unnormalized forward transform, in place
    pub(crate) fn process(&self, buffer: &mut [Complex]) {
        debug_assert_eq!(buffer.len(), self.len());

        match self {
            Plan::Identity => {}
            Plan::Radix2 { twiddles, levels } => radix2_in_place(buffer, twiddles, *levels),
            Plan::Bluestein {
                len,
                chirp,
                kernel,
                inner,
            } => {
                let m = kernel.len();
                let mut work = vec![ZERO; m];
                for ((w, &x), &c) in work.iter_mut().zip(buffer.iter()).zip(chirp.iter()) {
                    *w = x * c;
                }

                // Circular convolution with the conjugate chirp
                inner.process(&mut work);
                for (w, &k) in work.iter_mut().zip(kernel.iter()) {
                    *w *= k;
                }
                inner.process_inverse(&mut work);

                for ((out, &w), &c) in buffer.iter_mut().zip(work.iter()).zip(chirp.iter()).take(*len) {
                    *out = w * c;
                }
            }
        }
    }

    /// Normalized inverse transform, in place
    ///
    /// ifft(X) = conj(fft(conj(X))) / N
    pub(crate) fn process_inverse(&self, buffer: &mut [Complex]) {
        for c in buffer.iter_mut() {
            *c = c.conj();
        }
        self.process(buffer);

        let scale = 1.0 / buffer.len() as f64;
        for c in buffer.iter_mut() {
            *c = c.conj() * scale;
        }
    }
}

/// Iterative decimation-in-time radix-2 butterfly
fn radix2_in_place(buffer: &mut [Complex], twiddles: &[Complex], levels: u32) {
    let n = buffer.len();

    // Bit-reversed addressing permutation
    for i in 0..n {
        let j = reverse_bits(i, levels);
        if j > i {
            buffer.swap(i, j);
        }
    }

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let table_step = n / size;

        for start in (0..n).step_by(size) {
            for j in 0..half {
                let lo = start + j;
                let hi = lo + half;
                let t = buffer[hi] * twiddles[j * table_step];
                buffer[hi] = buffer[lo] - t;
                buffer[lo] += t;
            }
        }

        size *= 2;
    }
}

#[inline]
fn reverse_bits(value: usize, width: u32) -> usize {
    if width == 0 {
        0
    } else {
        value.reverse_bits() >> (usize::BITS - width)
    }
}

/// FFT engine owning a lazily populated plan cache
///
/// Cheap to clone; clones share the same cache. Safe to use from many threads
/// at once: lookups take a read lock, and a missing plan is built outside any
/// lock and then inserted under the write lock (first insert wins).
#[derive(Clone, Default)]
pub struct FftEngine {
    plans: Arc<RwLock<HashMap<usize, Arc<Plan>>>>,
}

impl FftEngine {
    /// Create an engine with an empty plan cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide engine used by the crate-level convenience functions
    pub fn shared() -> &'static FftEngine {
        static ENGINE: OnceLock<FftEngine> = OnceLock::new();
        ENGINE.get_or_init(FftEngine::new)
    }

    /// Fetch (or build) the plan for a transform length
    pub(crate) fn plan(&self, n: usize) -> Result<Arc<Plan>> {
        if n == 0 {
            return Err(DspError::InvalidLength { what: "transform", len: 0 });
        }

        if let Some(plan) = self.plans.read().get(&n) {
            return Ok(Arc::clone(plan));
        }

        // Bluestein plans recurse into the cache for their inner length,
        // so no lock may be held while building
        let built = if n == 1 {
            Plan::Identity
        } else if n.is_power_of_two() {
            Plan::radix2(n)
        } else {
            let m = (2 * n + 1)
                .checked_next_power_of_two()
                .ok_or(DspError::InvalidLength { what: "transform", len: n })?;
            Plan::bluestein(n, self.plan(m)?)
        };
        log::debug!("built FFT plan for length {n}");

        let mut plans = self.plans.write();
        Ok(Arc::clone(plans.entry(n).or_insert_with(|| Arc::new(built))))
    }

    /// Forward DFT of a real signal
    ///
    /// X[k] = Σ x[n]·exp(-2πi·k·n/N) for k = 0..N, returned in full (no
    /// Hermitian folding).
    pub fn forward(&self, signal: &[f64]) -> Result<Vec<Complex>> {
        ensure_finite(signal, "signal")?;
        let mut buffer: Vec<Complex> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
        self.run(&mut buffer, false)?;
        Ok(buffer)
    }

    /// Forward DFT of a complex sequence
    pub fn forward_complex(&self, input: &[Complex]) -> Result<Vec<Complex>> {
        ensure_finite_complex(input, "input")?;
        let mut buffer = input.to_vec();
        self.run(&mut buffer, false)?;
        Ok(buffer)
    }

    /// Inverse DFT, keeping only the real part
    ///
    /// x[n] = (1/N)·Σ X[k]·exp(+2πi·k·n/N). The imaginary residue is dropped; for
    /// a Hermitian spectrum it is at rounding-error level.
    pub fn inverse(&self, spectrum: &[Complex]) -> Result<Vec<f64>> {
        Ok(self
            .inverse_complex(spectrum)?
            .into_iter()
            .map(|c| c.re)
            .collect())
    }

    /// Inverse DFT returning the full complex sequence
    pub fn inverse_complex(&self, spectrum: &[Complex]) -> Result<Vec<Complex>> {
        ensure_finite_complex(spectrum, "spectrum")?;
        let mut buffer = spectrum.to_vec();
        self.run(&mut buffer, true)?;
        Ok(buffer)
    }

    /// Transform lengths with a cached plan, ascending
    pub fn cached_lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.plans.read().keys().copied().collect();
        lengths.sort_unstable();
        lengths
    }

    fn run(&self, buffer: &mut [Complex], inverse: bool) -> Result<()> {
        let plan = self.plan(buffer.len())?;
        log::trace!("fft len={} inverse={inverse}", buffer.len());

        if inverse {
            plan.process_inverse(buffer);
        } else {
            plan.process(buffer);
        }

        check_overflow(buffer, if inverse { "inverse FFT" } else { "forward FFT" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// O(N²) reference DFT
    fn naive_dft(input: &[Complex]) -> Vec<Complex> {
        let n = input.len();
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .enumerate()
                    .map(|(j, &x)| {
                        let angle = -2.0 * PI * ((j * k) % n) as f64 / n as f64;
                        x * complex::unit(angle)
                    })
                    .sum()
            })
            .collect()
    }

    fn test_signal(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (0.37 * i as f64).sin() + 0.5 * (1.3 * i as f64).cos() - 0.1 * i as f64 / n as f64)
            .collect()
    }

    fn assert_close(a: &[Complex], b: &[Complex], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert!((x - y).norm() < tol, "bin {}: {} vs {}", i, x, y);
        }
    }

    #[test]
    fn test_fft_dc_signal() {
        let engine = FftEngine::new();
        let spectrum = engine.forward(&vec![1.0; 16]).unwrap();

        assert!((spectrum[0].re - 16.0).abs() < 1e-12);
        for bin in &spectrum[1..] {
            assert!(bin.norm() < 1e-12);
        }
    }

    #[test]
    fn test_matches_naive_dft() {
        let engine = FftEngine::new();

        // Powers of two, primes, and composite non-powers of two
        for &n in &[2, 3, 4, 5, 7, 8, 12, 17, 64, 100, 127, 256] {
            let signal = test_signal(n);
            let complex_signal: Vec<Complex> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();

            let fast = engine.forward(&signal).unwrap();
            let slow = naive_dft(&complex_signal);
            assert_close(&fast, &slow, 1e-9 * n as f64);
        }
    }

    #[test]
    fn test_complex_input() {
        let engine = FftEngine::new();
        let input: Vec<Complex> = (0..10)
            .map(|i| Complex::new(i as f64, -(i as f64) * 0.5))
            .collect();

        assert_close(&engine.forward_complex(&input).unwrap(), &naive_dft(&input), 1e-9);
    }

    #[test]
    fn test_roundtrip() {
        let engine = FftEngine::new();

        for &n in &[1, 2, 7, 16, 30, 1000] {
            let signal = test_signal(n);
            let restored = engine.inverse(&engine.forward(&signal).unwrap()).unwrap();

            for (a, b) in signal.iter().zip(restored.iter()) {
                assert!((a - b).abs() < 1e-9, "n={}: {} vs {}", n, a, b);
            }
        }
    }

    #[test]
    fn test_complex_roundtrip() {
        let engine = FftEngine::new();
        let input: Vec<Complex> = (0..12).map(|i| complex::unit(0.3 * i as f64) * 2.0).collect();

        let restored = engine
            .inverse_complex(&engine.forward_complex(&input).unwrap())
            .unwrap();
        assert_close(&restored, &input, 1e-12);
    }

    #[test]
    fn test_single_sample_is_identity() {
        let engine = FftEngine::new();
        let spectrum = engine.forward(&[3.5]).unwrap();
        assert_eq!(spectrum, vec![Complex::new(3.5, 0.0)]);
        assert_eq!(engine.inverse(&spectrum).unwrap(), vec![3.5]);
    }

    #[test]
    fn test_empty_is_invalid_length() {
        let engine = FftEngine::new();
        assert!(matches!(
            engine.forward(&[]),
            Err(DspError::InvalidLength { len: 0, .. })
        ));
        assert!(matches!(
            engine.inverse(&[]),
            Err(DspError::InvalidLength { len: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let engine = FftEngine::new();
        assert!(matches!(
            engine.forward(&[1.0, f64::NAN]),
            Err(DspError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.inverse(&[Complex::new(f64::INFINITY, 0.0)]),
            Err(DspError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_overflow_reported() {
        let engine = FftEngine::new();
        let signal = vec![f64::MAX; 4];
        assert!(matches!(
            engine.forward(&signal),
            Err(DspError::NumericOverflow(_))
        ));
    }

    #[test]
    fn test_input_not_mutated() {
        let engine = FftEngine::new();
        let spectrum = engine.forward(&test_signal(9)).unwrap();
        let copy = spectrum.clone();
        engine.inverse(&spectrum).unwrap();
        assert_eq!(spectrum, copy);
    }

    #[test]
    fn test_plan_cache() {
        let engine = FftEngine::new();
        assert!(engine.cached_lengths().is_empty());

        engine.forward(&test_signal(8)).unwrap();
        assert_eq!(engine.cached_lengths(), vec![8]);

        // Bluestein for 5 pulls in its radix-2 inner length (16)
        engine.forward(&test_signal(5)).unwrap();
        assert_eq!(engine.cached_lengths(), vec![5, 8, 16]);

        // Clones share the cache
        let clone = engine.clone();
        clone.forward(&test_signal(3)).unwrap();
        assert!(engine.cached_lengths().contains(&3));
    }

    #[test]
    fn test_concurrent_first_use() {
        let engine = FftEngine::new();
        let signal = test_signal(60);
        let expected = engine.clone().forward(&signal).unwrap();
        let fresh = FftEngine::new();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let spectrum = fresh.forward(&signal).unwrap();
                    assert_close(&spectrum, &expected, 1e-12);
                });
            }
        });

        assert_eq!(fresh.cached_lengths(), vec![60, 128]);
    }

    #[test]
    fn test_reverse_bits() {
        assert_eq!(reverse_bits(0b001, 3), 0b100);
        assert_eq!(reverse_bits(0b110, 3), 0b011);
        assert_eq!(reverse_bits(0, 0), 0);
    }
}
