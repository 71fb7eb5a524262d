//! Tonality (characteristic function) estimation for coda detection
//!
//! Frames the trace into overlapping tapered windows, scores each window's
//! spectrum with the cumulative tonality measure, and normalizes the
//! resulting series by its own trailing rolling mean so the baseline sits
//! near 1. The normalized series is what downstream detection thresholds.

mod cft;
mod rolling;

use crate::analysis::result::TonalitySeries;
use crate::config::TonalityConfig;
use crate::error::AnalysisError;
use crate::signal::Signal;
use crate::spectrum::SpectrumBuilder;

/// Compute the normalized tonality series of a trace
///
/// Windows must be processed in temporal order: the rolling-mean baseline is
/// position-dependent. The first `long_win - 1` normalized values are NaN
/// (no full trailing history).
///
/// # Errors
///
/// Returns `InvalidParameter` when `k < 1`, the converted bin width is zero
/// or at least as wide as the spectrum, or the rolling window is shorter
/// than one hop; `InsufficientData` when the trace holds no full window.
pub fn tonality(signal: &Signal, config: &TonalityConfig) -> Result<TonalitySeries, AnalysisError> {
    if config.k < 1 {
        return Err(AnalysisError::InvalidParameter(format!(
            "Tonality needs at least one accepted peak, got k={}",
            config.k
        )));
    }

    let frames = signal.frames(config.window_s, config.overlap)?;
    let w_size = frames.window_len();
    let hop_s = frames.hop_seconds();

    let builder = SpectrumBuilder::new(w_size, signal.delta(), config.taper_alpha)?;
    let m = w_size / 2 + 1;
    let samples_per_hz = m as f64 / signal.nyquist();
    let bin_width = (config.bin_width_hz * samples_per_hz) as usize;
    if bin_width < 1 || bin_width >= m {
        return Err(AnalysisError::InvalidParameter(format!(
            "Bin width of {} Hz converts to {} bins, spectrum has {}",
            config.bin_width_hz, bin_width, m
        )));
    }

    let long_win = (config.long_win_s / hop_s) as usize;
    if long_win < 1 {
        return Err(AnalysisError::InvalidParameter(format!(
            "Rolling window of {} s is shorter than one {:.3} s hop",
            config.long_win_s, hop_s
        )));
    }

    log::debug!(
        "Tonality: w_size={}, hop={:.3} s, bin_width={} bins, long_win={} points",
        w_size,
        hop_s,
        bin_width,
        long_win
    );

    let mut times = Vec::new();
    let mut raw = Vec::new();
    for window in frames {
        let magnitudes = builder.magnitudes(window.samples)?;
        times.push(window.start_time);
        raw.push(cft::cft_window(&magnitudes, config.k, bin_width));
    }

    let normalized = rolling::rolling_mean_normalize(&raw, long_win);

    log::debug!(
        "Tonality series of {} points, {} normalized values defined",
        raw.len(),
        normalized.iter().filter(|v| v.is_finite()).count()
    );

    Ok(TonalitySeries {
        times,
        raw,
        normalized,
        delta: hop_s,
    })
}
