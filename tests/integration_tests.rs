//! Integration tests over synthetic seismic signals

use std::f64::consts::PI;
use tremor_dsp::{
    analyze_coda, analyze_tremor, tonality, track_pitch, AnalysisError, HarmonicConfig,
    PeakConfig, PitchConfig, Signal, TonalityConfig,
};

/// Decaying sum of sinusoids: a synthetic tonal coda event
fn coda_event(fs: f64, duration_s: f64, components: &[(f64, f64)], alpha: f64) -> Signal {
    let n = (fs * duration_s) as usize;
    let samples: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / fs;
            let env = (-alpha * t).exp();
            components
                .iter()
                .map(|&(f, a)| a * env * (2.0 * PI * f * t).sin())
                .sum()
        })
        .collect();
    Signal::new(samples, fs, 0.0).unwrap()
}

/// Steady sum of harmonics of `f0`: a synthetic tremor event
fn tremor_event(fs: f64, duration_s: f64, f0: f64, amps: &[f64]) -> Signal {
    let n = (fs * duration_s) as usize;
    let samples: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / fs;
            amps.iter()
                .enumerate()
                .map(|(h, &a)| a * (2.0 * PI * (h + 1) as f64 * f0 * t).sin())
                .sum()
        })
        .collect();
    Signal::new(samples, fs, 0.0).unwrap()
}

/// Deterministic pseudo-noise (linear congruential, no RNG dependency)
fn noise_signal(n: usize, fs: f64, amplitude: f64) -> Signal {
    let mut state: u64 = 0x9E3779B97F4A7C15;
    let samples: Vec<f64> = (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let u = (state >> 11) as f64 / (1u64 << 53) as f64;
            amplitude * (2.0 * u - 1.0)
        })
        .collect();
    Signal::new(samples, fs, 0.0).unwrap()
}

#[test]
fn coda_single_tone_yields_one_peak_within_a_bin() {
    let fs = 100.0;
    let f0 = 8.0;
    let signal = coda_event(fs, 30.0, &[(f0, 1.0)], 0.3);
    let result = analyze_coda(&signal, &PeakConfig::default()).unwrap();

    assert_eq!(result.peaks.len(), 1);
    let bin_width = fs / signal.len() as f64;
    assert!((result.peaks[0].frequency - f0).abs() < bin_width);

    // Both Q estimates are defined and positive for a clean resonance
    assert!(result.peaks[0].q_f.unwrap() > 0.0);
    assert!(result.q_alpha.unwrap() > 0.0);
}

#[test]
fn coda_two_tones_yield_two_peaks() {
    let fs = 100.0;
    let f0 = 6.0;
    let signal = coda_event(fs, 30.0, &[(f0, 1.0), (2.0 * f0, 1.0)], 0.3);
    let result = analyze_coda(&signal, &PeakConfig::default()).unwrap();

    assert_eq!(result.peaks.len(), 2);
    let bin_width = fs / signal.len() as f64;
    assert!((result.peaks[0].frequency - f0).abs() < bin_width);
    assert!((result.peaks[1].frequency - 2.0 * f0).abs() < bin_width);
}

#[test]
fn coda_all_zero_signal_returns_empty_without_nan() {
    let signal = Signal::new(vec![0.0; 2000], 100.0, 0.0).unwrap();
    let result = analyze_coda(&signal, &PeakConfig::default()).unwrap();
    assert!(result.peaks.is_empty());
    assert!(result.q_alpha.is_none());
    assert!(result.spectrum_norm.iter().all(|v| v.is_finite()));
}

#[test]
fn yin_tracks_a_pure_sinusoid_within_one_percent() {
    let fs = 1000.0;
    let f0 = 62.2; // between integer-lag frequencies
    let signal = {
        let samples: Vec<f64> = (0..20_000)
            .map(|i| (2.0 * PI * f0 * i as f64 / fs).sin())
            .collect();
        Signal::new(samples, fs, 0.0).unwrap()
    };
    let config = PitchConfig {
        window_s: 0.1, // >= 3 / f0 seconds
        overlap: 0.5,
        freqmin: 0.5,
        thresh: 0.1,
    };
    let series = track_pitch(&signal, &config).unwrap();
    assert!(series.valid_count() > 0);
    for p in series.points.iter().filter(|p| p.is_valid()) {
        assert!(
            (p.frequency - f0).abs() / f0 < 0.01,
            "pitch {} deviates from {}",
            p.frequency,
            f0
        );
    }
}

#[test]
fn tremor_harmonics_are_exactly_one_two_three() {
    let fs = 100.0;
    let f0 = 4.98;
    let signal = tremor_event(fs, 60.0, f0, &[1.0, 0.6, 0.4]);
    let pitch_config = PitchConfig {
        window_s: 2.0,
        overlap: 0.5,
        freqmin: 0.5,
        thresh: 0.1,
    };
    let result = analyze_tremor(&signal, &pitch_config, &HarmonicConfig::default()).unwrap();

    assert!(result.pitch.valid_count() > 0);
    for p in result.pitch.points.iter().filter(|p| p.is_valid()) {
        assert!((p.frequency - f0).abs() / f0 < 0.02);
    }

    let summary = result.summary.expect("records should produce a summary");
    assert_eq!(summary.harmonics, vec![1, 2, 3]);
    assert!(!summary.odd);
    assert!((summary.fmean - f0).abs() < 0.5);
    assert!(summary.duration > 0.0);
    assert!(summary.amplitude > 0.0);
}

#[test]
fn tremor_on_noise_has_no_summary() {
    let signal = noise_signal(20_000, 100.0, 1.0);
    let pitch_config = PitchConfig {
        window_s: 2.0,
        overlap: 0.5,
        freqmin: 0.5,
        thresh: 0.05,
    };
    let result = analyze_tremor(&signal, &pitch_config, &HarmonicConfig::default()).unwrap();
    if result.pitch.valid_count() == 0 {
        assert!(result.records.is_empty());
        assert!(result.summary.is_none());
    }
}

#[test]
fn tonality_flags_a_tone_and_keeps_noise_bounded() {
    let fs = 100.0;
    let n = 12_000;
    let tone = {
        let samples: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 8.0 * i as f64 / fs).sin())
            .collect();
        Signal::new(samples, fs, 0.0).unwrap()
    };
    let noise = noise_signal(n, fs, 1.0);

    let config = TonalityConfig::default();
    let tone_series = tonality(&tone, &config).unwrap();
    let noise_series = tonality(&noise, &config).unwrap();

    let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
    assert!(mean(&tone_series.raw) > 3.0 * mean(&noise_series.raw));
    assert!(mean(&noise_series.raw) < 10.0 * config.k as f64);

    // Rolling-mean head is NaN, the rest finite (raw series has no NaNs)
    let hop = config.window_s * (1.0 - config.overlap);
    let long_win = (config.long_win_s / hop) as usize;
    assert!(tone_series.normalized[..long_win - 1]
        .iter()
        .all(|v| v.is_nan()));
    assert!(tone_series.normalized[long_win - 1..]
        .iter()
        .all(|v| v.is_finite()));
}

#[test]
fn components_are_deterministic() {
    let signal = coda_event(100.0, 30.0, &[(7.0, 1.0)], 0.25);
    let a = analyze_coda(&signal, &PeakConfig::default()).unwrap();
    let b = analyze_coda(&signal, &PeakConfig::default()).unwrap();
    assert_eq!(a.spectrum_norm, b.spectrum_norm);
    assert_eq!(a.q_alpha, b.q_alpha);

    let pitch_config = PitchConfig {
        window_s: 2.0,
        overlap: 0.5,
        freqmin: 0.5,
        thresh: 0.1,
    };
    let tremor_signal = tremor_event(100.0, 60.0, 4.98, &[1.0, 0.6]);
    let t1 = analyze_tremor(&tremor_signal, &pitch_config, &HarmonicConfig::default()).unwrap();
    let t2 = analyze_tremor(&tremor_signal, &pitch_config, &HarmonicConfig::default()).unwrap();
    assert_eq!(t1.records.len(), t2.records.len());
    for (r1, r2) in t1.records.iter().zip(t2.records.iter()) {
        assert_eq!(r1.number, r2.number);
        assert_eq!(r1.frequency, r2.frequency);
        assert_eq!(r1.amplitude, r2.amplitude);
    }
}

#[test]
fn error_taxonomy_distinguishes_parameter_and_data_failures() {
    let signal = coda_event(100.0, 30.0, &[(8.0, 1.0)], 0.3);

    // Invalid parameter: smoothing window wider than the spectrum
    let bad = PeakConfig {
        window_length_hz: 100.0,
        ..PeakConfig::default()
    };
    assert!(matches!(
        analyze_coda(&signal, &bad),
        Err(AnalysisError::InvalidParameter(_))
    ));

    // Insufficient data: trace shorter than one YIN block
    let short = coda_event(100.0, 3.0, &[(8.0, 1.0)], 0.3);
    let pitch_config = PitchConfig {
        window_s: 2.0,
        overlap: 0.5,
        freqmin: 0.5,
        thresh: 0.1,
    };
    assert!(matches!(
        track_pitch(&short, &pitch_config),
        Err(AnalysisError::InsufficientData(_))
    ));
}
