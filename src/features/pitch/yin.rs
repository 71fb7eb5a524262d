//! YIN fundamental-frequency estimation for one block
//!
//! Time-domain difference function with cumulative mean normalization and an
//! absolute-threshold candidate search. This is the hottest code path in the
//! engine: the loops run over contiguous slices with no allocation, the
//! scratch buffers are owned by the caller and reused across hops.

/// Reusable scratch buffers for [`yin_block`]
#[derive(Debug, Clone)]
pub struct YinScratch {
    r: Vec<f64>,
    d: Vec<f64>,
}

impl YinScratch {
    /// Buffers sized for `tau_max` lags
    pub fn new(tau_max: usize) -> Self {
        Self {
            r: vec![0.0; tau_max],
            d: vec![0.0; tau_max],
        }
    }
}

/// Pitch estimate for one windowed block of signal
///
/// `data` must hold at least `w_size + tau_max` samples. Computes
/// `r[tau] = sum_i (x[i] - x[i+tau])^2` over the first `w_size` samples for
/// `tau = 0..tau_max`, normalizes to the cumulative mean normalized
/// difference `d` (`d[0] = 1`), and among lags with `d[tau] < thresh` picks
/// the one with the smallest `d` (first index on ties).
///
/// # Returns
///
/// `(confidence, pitch)` where confidence is the winning `d[tau]` and pitch
/// is `fs / tau`; `(NaN, NaN)` when no lag beats the threshold — no pitch
/// found is not an error.
pub fn yin_block(
    data: &[f64],
    fs: f64,
    w_size: usize,
    tau_max: usize,
    thresh: f64,
    scratch: &mut YinScratch,
) -> (f64, f64) {
    debug_assert!(data.len() >= w_size + tau_max);
    debug_assert_eq!(scratch.r.len(), tau_max);

    let r = &mut scratch.r[..tau_max];
    let d = &mut scratch.d[..tau_max];

    // Difference function
    for (tau, r_tau) in r.iter_mut().enumerate() {
        let mut acc = 0.0;
        let base = &data[..w_size];
        let shifted = &data[tau..tau + w_size];
        for (&a, &b) in base.iter().zip(shifted.iter()) {
            let diff = a - b;
            acc += diff * diff;
        }
        *r_tau = acc;
    }

    // Cumulative mean normalized difference
    d[0] = 1.0;
    let mut s = r[0];
    for tau in 1..tau_max {
        s += r[tau];
        d[tau] = r[tau] / (s / tau as f64);
    }

    // Global minimum below the absolute threshold, not the first dip
    let mut best: Option<usize> = None;
    for (tau, &value) in d.iter().enumerate() {
        if value < thresh && best.map_or(true, |b| value < d[b]) {
            best = Some(tau);
        }
    }

    match best {
        Some(tau) => (d[tau], fs / tau as f64),
        None => (f64::NAN, f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(n: usize, fs: f64, f0: f64) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * f0 * i as f64 / fs).sin()).collect()
    }

    #[test]
    fn test_pure_sine_pitch_within_one_percent() {
        let fs = 1000.0;
        let f0 = 19.92; // slightly off the integer-lag grid
        let w_size = 200;
        let tau_max = w_size - 1;
        let data = sine(w_size + tau_max, fs, f0);
        let mut scratch = YinScratch::new(tau_max);

        let (confidence, pitch) = yin_block(&data, fs, w_size, tau_max, 0.1, &mut scratch);
        assert!(confidence.is_finite());
        assert!(confidence < 0.1);
        assert!(
            (pitch - f0).abs() / f0 < 0.01,
            "pitch {} should be within 1% of {}",
            pitch,
            f0
        );
    }

    #[test]
    fn test_no_candidate_returns_nan() {
        // White-ish aperiodic data never drops below a strict threshold
        let data: Vec<f64> = (0..400)
            .map(|i| (((i * 7919) % 104729) as f64 / 104729.0) - 0.5)
            .collect();
        let mut scratch = YinScratch::new(199);
        let (confidence, pitch) = yin_block(&data, 100.0, 200, 199, 0.01, &mut scratch);
        assert!(confidence.is_nan());
        assert!(pitch.is_nan());
    }

    #[test]
    fn test_zero_signal_returns_nan() {
        let data = vec![0.0; 400];
        let mut scratch = YinScratch::new(199);
        let (confidence, pitch) = yin_block(&data, 100.0, 200, 199, 0.1, &mut scratch);
        // 0/0 normalization never qualifies
        assert!(confidence.is_nan());
        assert!(pitch.is_nan());
    }

    #[test]
    fn test_scratch_reuse_matches_fresh() {
        let fs = 1000.0;
        let a = sine(399, fs, 19.92);
        let b = sine(399, fs, 31.3);
        let mut reused = YinScratch::new(199);
        let _ = yin_block(&a, fs, 200, 199, 0.1, &mut reused);
        let with_reuse = yin_block(&b, fs, 200, 199, 0.1, &mut reused);

        let mut fresh = YinScratch::new(199);
        let from_fresh = yin_block(&b, fs, 200, 199, 0.1, &mut fresh);
        assert_eq!(with_reuse, from_fresh);
    }
}
