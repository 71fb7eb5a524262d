//! # Tremor DSP
//!
//! A feature extraction engine for tonal volcano-seismic signals, providing
//! spectral peak characterization for coda ("tornillo") events and
//! fundamental-frequency tracking with harmonic matching for tremor events.
//!
//! ## Features
//!
//! - **Coda analysis**: spectral peak extraction against an adaptively
//!   smoothed baseline, with half-power-bandwidth and decay-rate Q factors
//! - **Tonality**: a per-window characteristic function measuring how
//!   concentrated a spectrum's energy is in a few narrow peaks
//! - **Tremor analysis**: YIN pitch tracking plus harmonic-number matching
//!   of spectral peaks, aggregated into event statistics
//!
//! ## Quick Start
//!
//! ```no_run
//! use tremor_dsp::{analyze_coda, PeakConfig, Signal};
//!
//! // Pre-processed (detrended, bandpassed) samples and time metadata
//! let samples: Vec<f64> = vec![]; // Your waveform snippet
//! let signal = Signal::new(samples, 100.0, 0.0)?;
//!
//! let result = analyze_coda(&signal, &PeakConfig::default())?;
//! for peak in &result.peaks {
//!     println!("{:.2} Hz  q_f={:?}", peak.frequency, peak.q_f);
//! }
//! # Ok::<(), tremor_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Signal -> Framer -> Spectrum -> { Tonality | Peaks | Pitch -> Harmonics }
//! ```
//!
//! All components are pure, single-threaded batch transforms over in-memory
//! arrays: no I/O, no shared state, bit-identical outputs for identical
//! inputs. Waveform acquisition, preprocessing, persistence and plotting
//! belong to external layers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod signal;
pub mod spectrum;

// Re-export main types
pub use analysis::result::{
    CodaAnalysis, HarmonicRecord, PeakRecord, PitchPoint, PitchSeries, TonalitySeries,
    TremorAnalysis, TremorSummary,
};
pub use config::{BaselineFilter, HarmonicConfig, PeakConfig, PitchConfig, TonalityConfig};
pub use error::AnalysisError;
pub use features::pitch::track_pitch;
pub use features::tonality::tonality;
pub use signal::{Signal, Window};
pub use spectrum::{magnitude_spectrum, Spectrum, SpectrumBuilder};

/// Coda (tonal event) analysis
///
/// Extracts spectral peaks and the two Q estimates from a pre-processed
/// trace. An empty peak set is a valid outcome.
///
/// # Arguments
///
/// * `signal` - Detrended, bandpassed waveform snippet
/// * `config` - Peak extraction parameters
///
/// # Errors
///
/// Returns `AnalysisError` for invalid parameters, or when peaks were found
/// but the trace is too short for the decay regression.
pub fn analyze_coda(
    signal: &Signal,
    config: &PeakConfig,
) -> Result<CodaAnalysis, AnalysisError> {
    features::peaks::extract_peaks(signal, config)
}

/// Harmonic tremor analysis
///
/// Tracks the fundamental frequency across the trace, matches spectral
/// peaks to integer harmonics of it, and aggregates the accepted records
/// into an event summary. A trace with no reliable tone yields an empty
/// record set and no summary.
///
/// # Arguments
///
/// * `signal` - Detrended, bandpassed waveform snippet
/// * `pitch_config` - YIN tracking parameters (window, overlap, threshold)
/// * `harmonic_config` - Harmonic matching parameters
///
/// # Errors
///
/// Returns `AnalysisError` for invalid parameters or a trace too short for
/// one analysis block.
pub fn analyze_tremor(
    signal: &Signal,
    pitch_config: &PitchConfig,
    harmonic_config: &HarmonicConfig,
) -> Result<TremorAnalysis, AnalysisError> {
    log::debug!(
        "Tremor analysis: {} samples at {} Hz",
        signal.len(),
        signal.sample_rate()
    );

    let pitch = track_pitch(signal, pitch_config)?;
    let records = features::harmonics::match_harmonics(
        signal,
        &pitch,
        pitch_config.window_s,
        pitch_config.overlap,
        harmonic_config,
    )?;
    let summary = features::harmonics::summarize(signal, &records);

    Ok(TremorAnalysis {
        pitch,
        records,
        summary,
    })
}
