//! Magnitude spectra of tapered windows
//!
//! Builds the real-valued magnitude spectrum of one window (or a whole signal
//! treated as one window): a Tukey taper is applied first, then the magnitude
//! of the real FFT is taken. Bin frequencies are `k / (N * dt)` for
//! `k = 0..=N/2`. Given identical inputs the result is bit-identical.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use crate::error::AnalysisError;

/// A single-sided magnitude spectrum derived from one window
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Bin frequencies in Hz, strictly ascending, length `N/2 + 1`
    pub frequencies: Vec<f64>,
    /// Non-negative bin magnitudes, same length as `frequencies`
    pub magnitudes: Vec<f64>,
    /// Nyquist frequency of the source window, in Hz
    pub nyquist: f64,
}

impl Spectrum {
    /// Conversion factor between spectrum bins and Hz (bins per Hz)
    pub fn samples_per_hz(&self) -> f64 {
        self.magnitudes.len() as f64 / self.nyquist
    }
}

/// Tukey (tapered cosine) window of length `n`
///
/// `alpha = 0` is rectangular, `alpha = 1` is a Hann window. Matches the
/// symmetric form used for spectral tapering.
pub fn tukey(n: usize, alpha: f64) -> Vec<f64> {
    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![1.0];
    }
    if alpha <= 0.0 {
        return vec![1.0; n];
    }
    let alpha = alpha.min(1.0);

    let mut w = Vec::with_capacity(n);
    for k in 0..n {
        let x = k as f64 / (n - 1) as f64;
        let v = if x < alpha / 2.0 {
            0.5 * (1.0 + (2.0 * std::f64::consts::PI / alpha * (x - alpha / 2.0)).cos())
        } else if x <= 1.0 - alpha / 2.0 {
            1.0
        } else {
            0.5 * (1.0 + (2.0 * std::f64::consts::PI / alpha * (x - 1.0 + alpha / 2.0)).cos())
        };
        w.push(v);
    }
    w
}

/// Reusable spectrum builder for windows of a fixed length
///
/// Plans the FFT and precomputes the taper once so that batch paths
/// (tonality, harmonic matching) pay the setup cost a single time.
pub struct SpectrumBuilder {
    fft: Arc<dyn Fft<f64>>,
    taper: Vec<f64>,
    n: usize,
    delta: f64,
    nyquist: f64,
}

impl SpectrumBuilder {
    /// Create a builder for `n`-sample windows with sample spacing `delta`
    /// seconds and Tukey taper fraction `alpha`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `n == 0`, `delta <= 0` or
    /// `alpha` is outside [0, 1].
    pub fn new(n: usize, delta: f64, alpha: f64) -> Result<Self, AnalysisError> {
        if n == 0 {
            return Err(AnalysisError::InvalidParameter(
                "Spectrum of an empty window".to_string(),
            ));
        }
        if !(delta.is_finite() && delta > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "Sample spacing must be positive, got {}",
                delta
            )));
        }
        if !(0.0..=1.0).contains(&alpha) {
            return Err(AnalysisError::InvalidParameter(format!(
                "Taper fraction must be in [0, 1], got {}",
                alpha
            )));
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);

        Ok(Self {
            fft,
            taper: tukey(n, alpha),
            n,
            delta,
            nyquist: 0.5 / delta,
        })
    }

    /// Window length in samples
    pub fn window_len(&self) -> usize {
        self.n
    }

    /// Bin frequencies in Hz for the builder's window length
    pub fn frequencies(&self) -> Vec<f64> {
        (0..=self.n / 2)
            .map(|k| k as f64 / (self.n as f64 * self.delta))
            .collect()
    }

    /// Magnitude spectrum of one window
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `samples` does not match the planned
    /// window length.
    pub fn magnitudes(&self, samples: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        if samples.len() != self.n {
            return Err(AnalysisError::InvalidParameter(format!(
                "Window of {} samples, builder planned for {}",
                samples.len(),
                self.n
            )));
        }

        let mut buffer: Vec<Complex<f64>> = samples
            .iter()
            .zip(self.taper.iter())
            .map(|(&x, &w)| Complex::new(x * w, 0.0))
            .collect();
        self.fft.process(&mut buffer);

        Ok(buffer[..=self.n / 2].iter().map(|c| c.norm()).collect())
    }

    /// Full spectrum (frequencies + magnitudes) of one window
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `samples` does not match the planned
    /// window length.
    pub fn spectrum(&self, samples: &[f64]) -> Result<Spectrum, AnalysisError> {
        Ok(Spectrum {
            frequencies: self.frequencies(),
            magnitudes: self.magnitudes(samples)?,
            nyquist: self.nyquist,
        })
    }
}

/// Magnitude spectrum of a whole sample array treated as one window
///
/// Convenience wrapper over [`SpectrumBuilder`] for single-shot use.
///
/// # Errors
///
/// Returns `InvalidParameter` for an empty array, a non-positive sample
/// spacing or an out-of-range taper fraction.
pub fn magnitude_spectrum(samples: &[f64], delta: f64, alpha: f64) -> Result<Spectrum, AnalysisError> {
    log::debug!(
        "Computing magnitude spectrum: {} samples, dt={:.6} s, alpha={}",
        samples.len(),
        delta,
        alpha
    );
    SpectrumBuilder::new(samples.len(), delta, alpha)?.spectrum(samples)
}
