//! Trailing rolling-mean normalization of the tonality series
//!
//! Divides each raw value by the mean of its trailing `long_win`-sample
//! window. The first `long_win - 1` outputs have no full history and are
//! NaN — intentional, not an error. The computation is sequential by
//! construction: each output depends on the position of its trailing window.

/// Normalize `raw` by its trailing rolling mean over `long_win` samples
///
/// NaN inputs poison every window they fall in, matching rolling-mean
/// semantics; downstream aggregation propagates them silently.
pub(crate) fn rolling_mean_normalize(raw: &[f64], long_win: usize) -> Vec<f64> {
    debug_assert!(long_win >= 1);

    let mut out = vec![f64::NAN; raw.len()];
    for i in 0..raw.len() {
        if i + 1 < long_win {
            continue;
        }
        let window = &raw[i + 1 - long_win..=i];
        let mean = window.iter().sum::<f64>() / long_win as f64;
        out[i] = raw[i] / mean;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_is_nan() {
        let raw = vec![1.0; 10];
        let out = rolling_mean_normalize(&raw, 4);
        for v in &out[..3] {
            assert!(v.is_nan());
        }
        for v in &out[3..] {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_baseline_is_one_for_constant_series() {
        let raw = vec![3.7; 50];
        let out = rolling_mean_normalize(&raw, 10);
        assert!(out[9..].iter().all(|v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_spike_stands_out() {
        let mut raw = vec![1.0; 30];
        raw[20] = 10.0;
        let out = rolling_mean_normalize(&raw, 10);
        // The spike is divided by a mean dominated by ones
        assert!(out[20] > 5.0);
        assert!((out[15] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_poisons_trailing_windows() {
        let mut raw = vec![1.0; 20];
        raw[10] = f64::NAN;
        let out = rolling_mean_normalize(&raw, 5);
        for v in &out[10..15] {
            assert!(v.is_nan());
        }
        assert!((out[15] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_longer_than_series_is_all_nan() {
        let raw = vec![1.0; 5];
        let out = rolling_mean_normalize(&raw, 10);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
