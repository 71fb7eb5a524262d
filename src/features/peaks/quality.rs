//! Quality-factor estimates for spectral peaks
//!
//! Two independent Q estimates: `q_f` from the half-power bandwidth of a
//! peak, and `q_alpha` from the exponential decay rate of the time-domain
//! amplitude envelope.

use crate::error::AnalysisError;
use crate::signal::Signal;

/// RMS envelope window length in seconds
const RMS_WINDOW_S: f64 = 2.0;
/// RMS envelope hop in seconds
const RMS_STEP_S: f64 = 1.0;

/// Half-power bandwidth edges of the peak at index `peak`
///
/// Walks away from the peak on each side until the magnitude first drops
/// below half the peak magnitude, then linearly interpolates the exact
/// crossing frequency between the two bracketing bins.
///
/// Returns `None` when a crossing is not bracketed before a spectrum
/// boundary (degenerate peak): the peak is still a peak, but its bandwidth
/// is undefined within this spectrum.
pub fn half_power_width(freq: &[f64], fft: &[f64], peak: usize) -> Option<(f64, f64)> {
    let half = fft[peak] / 2.0;

    // Left side: the last bin at or above the half level, and the first below
    let mut idx_lr = peak;
    loop {
        if idx_lr == 0 {
            return None;
        }
        if fft[idx_lr - 1] < half {
            break;
        }
        idx_lr -= 1;
    }
    let idx_ll = idx_lr - 1;
    let freq_left = (half - fft[idx_ll]) * (freq[idx_lr] - freq[idx_ll])
        / (fft[idx_lr] - fft[idx_ll])
        + freq[idx_ll];

    // Right side, mirrored
    let mut idx_rl = peak;
    loop {
        if idx_rl + 1 >= fft.len() {
            return None;
        }
        if fft[idx_rl + 1] < half {
            break;
        }
        idx_rl += 1;
    }
    let idx_rr = idx_rl + 1;
    let freq_right = (half - fft[idx_rl]) * (freq[idx_rr] - freq[idx_rl])
        / (fft[idx_rr] - fft[idx_rl])
        + freq[idx_rl];

    Some((freq_left, freq_right))
}

/// Q from the half-power bandwidth: `f_peak / (f_right - f_left)`
///
/// `None` marks a degenerate peak whose half-power crossing never occurs
/// within the spectrum bounds.
pub fn q_from_bandwidth(freq: &[f64], fft: &[f64], peak: usize) -> Option<f64> {
    half_power_width(freq, fft, peak).map(|(left, right)| freq[peak] / (right - left))
}

/// Q from the amplitude decay rate: `pi * f1 / (-slope)`
///
/// Slides a fixed 2 s window with a 1 s hop across the trace, takes the RMS
/// amplitude of each window, and linearly regresses the natural log of the
/// RMS series against time. `f1` is the frequency of the lowest accepted
/// spectral peak.
///
/// # Errors
///
/// Returns `InsufficientData` when fewer than two RMS windows fit the trace.
pub fn q_from_decay(signal: &Signal, f1: f64) -> Result<f64, AnalysisError> {
    let w_size = (RMS_WINDOW_S * signal.sample_rate()) as usize;
    let step = (RMS_STEP_S * signal.sample_rate()) as usize;
    if w_size == 0 || step == 0 || signal.len() < w_size + step {
        return Err(AnalysisError::InsufficientData(format!(
            "Need at least two {} s RMS windows to regress a decay slope, trace is {:.2} s",
            RMS_WINDOW_S,
            signal.duration()
        )));
    }

    let samples = signal.samples();
    let mut times = Vec::new();
    let mut log_amplitude = Vec::new();
    let mut offset = 0;
    while offset + w_size <= samples.len() {
        let window = &samples[offset..offset + w_size];
        let rms = (window.iter().map(|&x| x * x).sum::<f64>() / w_size as f64).sqrt();
        times.push(offset as f64 / signal.sample_rate());
        log_amplitude.push(rms.ln());
        offset += step;
    }

    log::debug!(
        "Decay regression over {} RMS windows, f1={:.3} Hz",
        times.len(),
        f1
    );

    let (slope, _intercept) = linreg::linear_regression::<f64, f64, f64>(&times, &log_amplitude)
        .map_err(|e| AnalysisError::InsufficientData(format!("Decay regression failed: {}", e)))?;

    Ok(std::f64::consts::PI * f1 / -slope)
}
