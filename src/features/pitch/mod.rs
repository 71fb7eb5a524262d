//! Fundamental-frequency tracking over a trace
//!
//! Slides a YIN analysis block across the trace and emits one
//! (time, pitch, confidence) point per hop, aligned to window centers.
//! Steps without a qualifying lag, or whose candidate falls at or below the
//! configured minimum frequency, carry NaN — "no reliable tone", not an
//! error.

pub mod yin;

use crate::analysis::result::{PitchPoint, PitchSeries};
use crate::config::PitchConfig;
use crate::error::AnalysisError;
use crate::signal::Signal;

/// Track the fundamental frequency of a trace
///
/// Window length and overlap define the hop; each analysis block spans
/// `w_size + tau_max` samples with `tau_max = w_size - 1`, so the usable lag
/// range always fits the block.
///
/// # Errors
///
/// Returns `InvalidParameter` for a non-positive window length, an
/// out-of-range overlap, a window under two samples, a zero hop, or a
/// non-positive threshold; `InsufficientData` when not even one analysis
/// block fits the trace.
pub fn track_pitch(signal: &Signal, config: &PitchConfig) -> Result<PitchSeries, AnalysisError> {
    if !(config.window_s.is_finite() && config.window_s > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "Window length must be positive, got {} s",
            config.window_s
        )));
    }
    if !(0.0..1.0).contains(&config.overlap) {
        return Err(AnalysisError::InvalidParameter(format!(
            "Overlap must be in [0, 1), got {}",
            config.overlap
        )));
    }
    if !(config.thresh.is_finite() && config.thresh > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "YIN threshold must be positive, got {}",
            config.thresh
        )));
    }

    let fs = signal.sample_rate();
    let w_size = (config.window_s * fs) as usize;
    if w_size < 2 {
        return Err(AnalysisError::InvalidParameter(format!(
            "Window of {} s holds fewer than two samples at {} Hz",
            config.window_s, fs
        )));
    }
    let hop = (w_size as f64 - w_size as f64 * config.overlap) as usize;
    if hop == 0 {
        return Err(AnalysisError::InvalidParameter(format!(
            "Hop of zero samples (window {} samples, overlap {})",
            w_size, config.overlap
        )));
    }
    let tau_max = w_size - 1;

    let block_len = w_size + tau_max;
    let samples = signal.samples();
    if samples.len() < block_len {
        return Err(AnalysisError::InsufficientData(format!(
            "Trace of {} samples is shorter than one {}-sample analysis block",
            samples.len(),
            block_len
        )));
    }
    let num_hops = (samples.len() - block_len) / hop + 1;

    log::debug!(
        "Tracking pitch: w_size={}, tau_max={}, hop={}, {} hops",
        w_size,
        tau_max,
        hop,
        num_hops
    );

    let mut scratch = yin::YinScratch::new(tau_max);
    let mut points = Vec::with_capacity(num_hops);
    for n in 0..num_hops {
        let idx0 = n * hop;
        let block = &samples[idx0..idx0 + block_len];
        let (confidence, pitch) = yin::yin_block(block, fs, w_size, tau_max, config.thresh, &mut scratch);

        // Window-center timestamp
        let time = signal.start_time() + (n * hop) as f64 / fs + hop as f64 / fs / 2.0;
        if pitch > config.freqmin {
            points.push(PitchPoint {
                time,
                frequency: pitch,
                confidence,
            });
        } else {
            points.push(PitchPoint {
                time,
                frequency: f64::NAN,
                confidence: f64::NAN,
            });
        }
    }

    let series = PitchSeries { points };
    log::debug!(
        "Pitch series: {} of {} steps valid",
        series.valid_count(),
        num_hops
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine_signal(n: usize, fs: f64, f0: f64) -> Signal {
        let samples = (0..n).map(|i| (2.0 * PI * f0 * i as f64 / fs).sin()).collect();
        Signal::new(samples, fs, 0.0).unwrap()
    }

    #[test]
    fn test_tracks_detuned_sine() {
        let fs = 1000.0;
        let f0 = 19.92;
        let signal = sine_signal(10_000, fs, f0);
        let config = PitchConfig {
            window_s: 0.2,
            overlap: 0.5,
            freqmin: 0.5,
            thresh: 0.1,
        };
        let series = track_pitch(&signal, &config).unwrap();
        assert!(!series.points.is_empty());
        assert_eq!(series.valid_count(), series.points.len());
        for p in &series.points {
            assert!(
                (p.frequency - f0).abs() / f0 < 0.01,
                "pitch {} off from {}",
                p.frequency,
                f0
            );
            assert!(p.confidence < 0.1);
        }
    }

    #[test]
    fn test_times_are_window_centers() {
        let fs = 1000.0;
        let signal = sine_signal(10_000, fs, 19.92);
        let config = PitchConfig {
            window_s: 0.2,
            overlap: 0.5,
            freqmin: 0.5,
            thresh: 0.1,
        };
        // w_size = 200, hop = 100 -> t[n] = (n * 100 + 50) / 1000
        let series = track_pitch(&signal, &config).unwrap();
        for (n, p) in series.points.iter().enumerate() {
            let expected = (n * 100 + 50) as f64 / fs;
            assert!((p.time - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_below_freqmin_is_discarded() {
        let fs = 1000.0;
        let f0 = 19.92;
        let signal = sine_signal(10_000, fs, f0);
        let config = PitchConfig {
            window_s: 0.2,
            overlap: 0.5,
            freqmin: 25.0, // above the tone
            thresh: 0.1,
        };
        let series = track_pitch(&signal, &config).unwrap();
        assert_eq!(series.valid_count(), 0);
        for p in &series.points {
            assert!(p.frequency.is_nan());
            assert!(p.confidence.is_nan());
        }
    }

    #[test]
    fn test_too_short_trace() {
        let signal = sine_signal(300, 1000.0, 19.92);
        let config = PitchConfig {
            window_s: 0.2,
            overlap: 0.5,
            freqmin: 0.5,
            thresh: 0.1,
        };
        assert!(matches!(
            track_pitch(&signal, &config),
            Err(AnalysisError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        let signal = sine_signal(1000, 1000.0, 19.92);
        let base = PitchConfig {
            window_s: 0.2,
            overlap: 0.5,
            freqmin: 0.5,
            thresh: 0.1,
        };
        for bad in [
            PitchConfig { window_s: 0.0, ..base.clone() },
            PitchConfig { overlap: 1.0, ..base.clone() },
            PitchConfig { thresh: 0.0, ..base.clone() },
            PitchConfig { window_s: 0.001, ..base.clone() },
        ] {
            assert!(matches!(
                track_pitch(&signal, &bad),
                Err(AnalysisError::InvalidParameter(_))
            ));
        }
    }
}
