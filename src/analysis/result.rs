//! Result types produced by the feature extraction engine
//!
//! All times are absolute epoch seconds, all frequencies Hz, all amplitudes
//! in the physical units of the input trace (callers may rescale). Q values
//! are dimensionless.

use serde::{Deserialize, Serialize};

/// One detected spectral resonance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakRecord {
    /// Peak frequency in Hz; always one of the spectrum's bin frequencies
    pub frequency: f64,
    /// Peak magnitude in native units (unnormalized)
    pub amplitude: f64,
    /// Q from the half-power bandwidth; `None` for a degenerate peak whose
    /// half-power crossing is not bracketed within the spectrum
    pub q_f: Option<f64>,
}

/// Full result of a coda (tonal event) analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodaAnalysis {
    /// Spectrum bin frequencies in Hz
    pub frequencies: Vec<f64>,
    /// Magnitude spectrum normalized by its maximum
    pub spectrum_norm: Vec<f64>,
    /// Smoothed baseline the detection threshold was derived from
    pub spectrum_smooth: Vec<f64>,
    /// Detected peaks, ascending in frequency
    pub peaks: Vec<PeakRecord>,
    /// Q from the amplitude decay rate, relative to the lowest-frequency
    /// peak; `None` when no peaks were found
    pub q_alpha: Option<f64>,
}

/// Tonality (characteristic function) time series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TonalitySeries {
    /// Absolute window start times in seconds, one per analysis window
    pub times: Vec<f64>,
    /// Raw cumulative tonality per window
    pub raw: Vec<f64>,
    /// Raw series divided by its trailing rolling mean; the first
    /// `long_win - 1` values are NaN by construction
    pub normalized: Vec<f64>,
    /// Spacing between consecutive points in seconds (the hop duration)
    pub delta: f64,
}

/// One pitch estimate at an analysis time step
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PitchPoint {
    /// Absolute window-center time in seconds
    pub time: f64,
    /// Tracked fundamental frequency in Hz; NaN when no lag satisfied the
    /// threshold or the candidate fell at or below the configured minimum
    pub frequency: f64,
    /// YIN cumulative mean normalized difference at the winning lag
    /// (lower is more confident); NaN when `frequency` is NaN
    pub confidence: f64,
}

impl PitchPoint {
    /// Whether this step carries a usable pitch estimate
    pub fn is_valid(&self) -> bool {
        self.frequency.is_finite()
    }
}

/// Pitch estimates over a trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchSeries {
    /// One point per analysis window, in temporal order
    pub points: Vec<PitchPoint>,
}

impl PitchSeries {
    /// Number of steps with a finite pitch estimate
    pub fn valid_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_valid()).count()
    }
}

/// One spectral peak matched to a harmonic of the tracked fundamental
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonicRecord {
    /// Harmonic number: `round(max(f_peak, f1) / min(f_peak, f1))`, >= 1
    pub number: u32,
    /// Absolute time of the analysis step in seconds
    pub time: f64,
    /// Peak frequency in Hz
    pub frequency: f64,
    /// Peak magnitude in native units
    pub amplitude: f64,
}

/// Aggregate statistics over a harmonic tremor event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TremorSummary {
    /// Time of the earliest harmonic record, absolute seconds
    pub start_time: f64,
    /// Time of the latest harmonic record, absolute seconds
    pub end_time: f64,
    /// Event duration in seconds
    pub duration: f64,
    /// RMS amplitude of the trace over the event span
    pub amplitude: f64,
    /// Minimum fundamental (number == 1) frequency; NaN without fundamentals
    pub fmin: f64,
    /// Maximum fundamental frequency; NaN without fundamentals
    pub fmax: f64,
    /// Mean fundamental frequency; NaN without fundamentals
    pub fmean: f64,
    /// Sample standard deviation of the fundamental frequency; NaN for
    /// fewer than two fundamental records
    pub fstd: f64,
    /// Median fundamental frequency; NaN without fundamentals
    pub fmedian: f64,
    /// Distinct harmonic numbers present, ascending
    pub harmonics: Vec<u32>,
    /// Number of distinct harmonic numbers
    pub n_harmonics: usize,
    /// True when only odd harmonic numbers are present
    pub odd: bool,
}

/// Full result of a harmonic tremor analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TremorAnalysis {
    /// Tracked pitch over the trace
    pub pitch: PitchSeries,
    /// Accepted harmonic records across all valid time steps
    pub records: Vec<HarmonicRecord>,
    /// Aggregate statistics; `None` when no records were accepted
    pub summary: Option<TremorSummary>,
}
