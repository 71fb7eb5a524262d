//! Configuration parameters for feature extraction
//!
//! Each component takes an explicit parameter struct; there is no global
//! configuration state inside the core. Frequencies are in Hz, durations in
//! seconds, fractions in [0, 1).

use serde::{Deserialize, Serialize};

/// Parameters for the tonality (characteristic function) estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TonalityConfig {
    /// Analysis window length in seconds (default: 5.0)
    pub window_s: f64,

    /// Fractional overlap between consecutive windows, in [0, 1) (default: 0.5)
    pub overlap: f64,

    /// Tukey taper fraction applied before the FFT, in [0, 1] (default: 0.1)
    pub taper_alpha: f64,

    /// Maximum number of coherent peaks accepted per window (default: 5)
    pub k: usize,

    /// Width of the local slice around each accepted peak, in Hz (default: 1.0)
    pub bin_width_hz: f64,

    /// Length of the trailing rolling-mean normalization window, in seconds
    /// (default: 30.0). The first `long_win - 1` normalized values are NaN.
    pub long_win_s: f64,
}

impl Default for TonalityConfig {
    fn default() -> Self {
        Self {
            window_s: 5.0,
            overlap: 0.5,
            taper_alpha: 0.1,
            k: 5,
            bin_width_hz: 1.0,
            long_win_s: 30.0,
        }
    }
}

/// Spectrum-smoothing filter used for the peak-detection baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineFilter {
    /// Median filter with zero-padded edges (coda analysis)
    Median,
    /// Savitzky-Golay filter of polynomial order 1 (legacy path); equals a
    /// centered moving average in the interior with linear-fit edge handling
    SavitzkyGolay,
}

/// Parameters for the spectral peak extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakConfig {
    /// Detection-threshold multiplier applied to the smoothed baseline
    /// (default: 3.0). A bin qualifies when `norm >= factor * baseline`.
    pub factor: f64,

    /// Minimum horizontal separation between peaks, in Hz (default: 0.3)
    pub distance_hz: f64,

    /// Minimum topographic prominence of a peak, in normalized magnitude
    /// units (default: 0.04)
    pub prominence_min: f64,

    /// Length of the baseline smoothing window, in Hz (default: 3.0)
    pub window_length_hz: f64,

    /// Baseline smoothing filter (default: median)
    pub baseline: BaselineFilter,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            factor: 3.0,
            distance_hz: 0.3,
            prominence_min: 0.04,
            window_length_hz: 3.0,
            baseline: BaselineFilter::Median,
        }
    }
}

/// Parameters for the YIN pitch tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Analysis window length in seconds (default: 5.0)
    pub window_s: f64,

    /// Fractional overlap between consecutive windows, in [0, 1) (default: 0.5)
    pub overlap: f64,

    /// Minimum acceptable fundamental frequency, in Hz (default: 0.5).
    /// Estimates at or below this value are discarded to NaN.
    pub freqmin: f64,

    /// YIN absolute threshold on the cumulative mean normalized difference
    /// (default: 0.1). No lag below the threshold means no pitch.
    pub thresh: f64,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            window_s: 5.0,
            overlap: 0.5,
            freqmin: 0.5,
            thresh: 0.1,
        }
    }
}

/// Parameters for the harmonic matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonicConfig {
    /// Highest harmonic number accepted (default: 10)
    pub n_harmonics_max: u32,

    /// Length of the per-window spectrum smoothing window, in Hz (default: 3.0)
    pub window_length_hz: f64,

    /// Detection-threshold multiplier applied to the smoothed spectrum
    /// (default: 3.0)
    pub factor: f64,

    /// Minimum acceptable peak frequency, in Hz (default: 0.5)
    pub freqmin: f64,

    /// Tukey taper fraction applied before the FFT, in [0, 1] (default: 0.1)
    pub taper_alpha: f64,
}

impl Default for HarmonicConfig {
    fn default() -> Self {
        Self {
            n_harmonics_max: 10,
            window_length_hz: 3.0,
            factor: 3.0,
            freqmin: 0.5,
            taper_alpha: 0.1,
        }
    }
}
