//! Spectral peak extraction for coda (tonal event) analysis
//!
//! Finds discrete resonant peaks in a trace's magnitude spectrum against an
//! adaptively smoothed baseline and characterizes each peak with a
//! half-power-bandwidth Q, plus one decay-rate Q per analysis.
//!
//! The trace is expected to be detrended and bandpassed already; this module
//! never mutates it.

pub mod detect;
pub mod quality;
pub mod smoothing;

use crate::analysis::result::{CodaAnalysis, PeakRecord};
use crate::config::{BaselineFilter, PeakConfig};
use crate::error::AnalysisError;
use crate::signal::Signal;
use crate::spectrum::magnitude_spectrum;

/// Extract spectral peaks and Q estimates from a trace
///
/// Pipeline: magnitude spectrum (whole trace as one window, no taper),
/// normalization by the spectrum maximum, baseline smoothing, local-maxima
/// detection with a per-bin height threshold `factor * baseline`, a minimum
/// peak separation and a prominence floor, then `q_f` per peak and a single
/// `q_alpha` from the time-domain decay.
///
/// An empty peak set is a valid outcome, not an error; `q_alpha` is `None`
/// in that case. An all-zero trace yields an empty peak set.
///
/// # Errors
///
/// Returns `InvalidParameter` when the converted smoothing window does not
/// fit the spectrum, and `InsufficientData` when peaks were found but the
/// trace is too short for the decay regression.
pub fn extract_peaks(signal: &Signal, config: &PeakConfig) -> Result<CodaAnalysis, AnalysisError> {
    log::debug!(
        "Extracting peaks: {} samples at {} Hz, factor={}, distance={} Hz",
        signal.len(),
        signal.sample_rate(),
        config.factor,
        config.distance_hz
    );

    let spectrum = magnitude_spectrum(signal.samples(), signal.delta(), 0.0)?;
    let fft = &spectrum.magnitudes;
    let m = fft.len();

    let max = fft.iter().cloned().fold(0.0f64, f64::max);
    if max <= 0.0 {
        // All-zero trace: nothing to normalize, nothing to find
        log::debug!("Spectrum is identically zero, no peaks");
        return Ok(CodaAnalysis {
            frequencies: spectrum.frequencies,
            spectrum_norm: vec![0.0; m],
            spectrum_smooth: vec![0.0; m],
            peaks: vec![],
            q_alpha: None,
        });
    }

    let norm: Vec<f64> = fft.iter().map(|&v| v / max).collect();

    // Convert Hz-denominated parameters to bins
    let samples_per_hz = spectrum.samples_per_hz();
    let distance = (config.distance_hz * samples_per_hz).floor().max(1.0);
    let mut window_length = (config.window_length_hz * samples_per_hz) as usize;
    if window_length % 2 == 0 {
        window_length += 1;
    }
    if window_length >= m {
        return Err(AnalysisError::InvalidParameter(format!(
            "Smoothing window of {} bins ({} Hz) does not fit a {}-bin spectrum",
            window_length, config.window_length_hz, m
        )));
    }

    let smooth = match config.baseline {
        BaselineFilter::Median => smoothing::median_filter(&norm, window_length)?,
        BaselineFilter::SavitzkyGolay => smoothing::savgol_filter(&norm, window_length)?,
    };

    let min_height: Vec<f64> = smooth.iter().map(|&s| config.factor * s).collect();
    let peaks = detect::find_spectral_peaks(&norm, &min_height, distance, Some(config.prominence_min));

    if peaks.is_empty() {
        log::debug!("No peaks above threshold");
        return Ok(CodaAnalysis {
            frequencies: spectrum.frequencies,
            spectrum_norm: norm,
            spectrum_smooth: smooth,
            peaks: vec![],
            q_alpha: None,
        });
    }

    let records: Vec<PeakRecord> = peaks
        .iter()
        .map(|&p| PeakRecord {
            frequency: spectrum.frequencies[p],
            amplitude: fft[p],
            q_f: quality::q_from_bandwidth(&spectrum.frequencies, fft, p),
        })
        .collect();

    // Decay Q relative to the lowest-frequency accepted peak
    let f1 = records[0].frequency;
    let q_alpha = quality::q_from_decay(signal, f1)?;

    log::debug!("Found {} peaks, q_alpha={:.2}", records.len(), q_alpha);

    Ok(CodaAnalysis {
        frequencies: spectrum.frequencies,
        spectrum_norm: norm,
        spectrum_smooth: smooth,
        peaks: records,
        q_alpha: Some(q_alpha),
    })
}
