//! Harmonic-peak matching against a tracked fundamental
//!
//! For each analysis step with a valid pitch estimate, searches that
//! window's spectrum for peaks and classifies each one by its integer
//! frequency ratio to the fundamental. The searched span is bracketed by
//! the first and last finite pitch estimates, padded by half a window on
//! each side.

use crate::analysis::result::{HarmonicRecord, PitchSeries};
use crate::config::HarmonicConfig;
use crate::error::AnalysisError;
use crate::features::peaks::detect::find_spectral_peaks;
use crate::features::peaks::smoothing::median_filter;
use crate::signal::Signal;
use crate::spectrum::SpectrumBuilder;

/// Match spectral peaks to harmonics of the tracked fundamental
///
/// `window_s` and `overlap` must be the framing the pitch series was
/// tracked with, so the re-windowed spectra line up with the pitch steps.
/// The minimum peak separation scales with the current fundamental
/// (`floor(f1 * samples_per_hz) / 2` bins, at least 1), so closely spaced
/// overtones of a low fundamental are still resolved.
///
/// # Returns
///
/// Accepted records across all valid steps; an empty collection when the
/// pitch series holds no finite estimate.
///
/// # Errors
///
/// Returns `InvalidParameter` when the converted smoothing window does not
/// fit the per-window spectrum, and `InsufficientData` when the bracketed
/// span cannot hold one analysis window.
pub fn match_harmonics(
    signal: &Signal,
    pitch: &PitchSeries,
    window_s: f64,
    overlap: f64,
    config: &HarmonicConfig,
) -> Result<Vec<HarmonicRecord>, AnalysisError> {
    let valid: Vec<usize> = pitch
        .points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.is_valid().then_some(i))
        .collect();
    let (&first, &last) = match (valid.first(), valid.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => {
            log::debug!("No finite pitch estimates, nothing to match");
            return Ok(vec![]);
        }
    };

    // Bracket the span of finite estimates, padded by half a window
    let rel_start = pitch.points[first].time - signal.start_time() - window_s / 2.0;
    let rel_end = pitch.points[last].time - signal.start_time() + window_s / 2.0;
    let trimmed = signal.slice_seconds(rel_start, rel_end)?;

    let frames = trimmed.frames(window_s, overlap)?;
    let w_size = frames.window_len();
    let builder = SpectrumBuilder::new(w_size, trimmed.delta(), config.taper_alpha)?;
    let frequencies = builder.frequencies();

    let m = w_size / 2 + 1;
    let samples_per_hz = m as f64 / trimmed.nyquist();
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

    log::debug!(
        "Matching harmonics over {} steps, w_size={}, smoothing={} bins",
        last - first + 1,
        w_size,
        window_length
    );

    let mut records = Vec::new();
    for (window, point) in frames.zip(pitch.points[first..=last].iter()) {
        if !point.is_valid() {
            continue;
        }
        let f1 = point.frequency;

        let magnitudes = builder.magnitudes(window.samples)?;
        let smooth = median_filter(&magnitudes, window_length)?;
        let min_height: Vec<f64> = smooth.iter().map(|&s| config.factor * s).collect();

        let distance = ((f1 * samples_per_hz).floor() / 2.0).max(1.0);
        let peaks = find_spectral_peaks(&magnitudes, &min_height, distance, None);

        for p in peaks {
            let f_peak = frequencies[p];
            let min_f = f_peak.min(f1);
            let max_f = f_peak.max(f1);
            let q = (max_f / min_f).round();
            if f_peak >= config.freqmin && q >= 1.0 && q <= config.n_harmonics_max as f64 {
                records.push(HarmonicRecord {
                    number: q as u32,
                    time: point.time,
                    frequency: f_peak,
                    amplitude: magnitudes[p],
                });
            }
        }
    }

    log::debug!("Accepted {} harmonic records", records.len());
    Ok(records)
}
