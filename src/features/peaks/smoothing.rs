//! Baseline smoothing filters for spectral peak detection
//!
//! The peak detector thresholds a spectrum against an adaptively smoothed
//! version of itself. Coda analysis uses a median filter; the legacy path
//! uses a Savitzky-Golay filter of polynomial order 1, which in the interior
//! reduces to a centered moving average with least-squares linear fits at the
//! edges.

use crate::error::AnalysisError;

/// Median of a set of values (average of the two middles for even counts)
///
/// Returns NaN for an empty slice so that degenerate inputs propagate as NaN
/// instead of panicking.
pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) * 0.5
    } else {
        sorted[mid]
    }
}

/// Median filter with zero-padded edges
///
/// Each output sample is the median of a `kernel`-sample neighborhood;
/// positions outside the signal count as zeros, so the first and last
/// `kernel/2` outputs are biased low.
///
/// # Arguments
///
/// * `x` - Input signal
/// * `kernel` - Window length in samples (odd, at most `x.len()`)
///
/// # Errors
///
/// Returns `InvalidParameter` if `kernel` is even, zero, or wider than the
/// signal.
pub fn median_filter(x: &[f64], kernel: usize) -> Result<Vec<f64>, AnalysisError> {
    if kernel == 0 || kernel % 2 == 0 {
        return Err(AnalysisError::InvalidParameter(format!(
            "Median filter kernel must be odd and positive, got {}",
            kernel
        )));
    }
    if kernel > x.len() {
        return Err(AnalysisError::InvalidParameter(format!(
            "Median filter kernel of {} samples exceeds signal length {}",
            kernel,
            x.len()
        )));
    }

    let half = kernel / 2;
    let mut out = Vec::with_capacity(x.len());
    let mut window = vec![0.0; kernel];
    for i in 0..x.len() {
        for (j, slot) in window.iter_mut().enumerate() {
            let pos = i as isize - half as isize + j as isize;
            *slot = if pos < 0 || pos >= x.len() as isize {
                0.0
            } else {
                x[pos as usize]
            };
        }
        out.push(median(&window));
    }
    Ok(out)
}

/// Savitzky-Golay filter of polynomial order 1
///
/// For a symmetric window a first-order fit evaluated at the window center
/// equals the window mean, so the interior is a centered moving average. The
/// first and last `window / 2` outputs come from a least-squares line fitted
/// to the first (respectively last) `window` samples, evaluated at the edge
/// positions.
///
/// # Arguments
///
/// * `x` - Input signal
/// * `window` - Window length in samples (odd, at least 3, at most `x.len()`)
///
/// # Errors
///
/// Returns `InvalidParameter` if `window` is even, smaller than 3, or wider
/// than the signal.
pub fn savgol_filter(x: &[f64], window: usize) -> Result<Vec<f64>, AnalysisError> {
    if window < 3 || window % 2 == 0 {
        return Err(AnalysisError::InvalidParameter(format!(
            "Savitzky-Golay window must be odd and at least 3, got {}",
            window
        )));
    }
    if window > x.len() {
        return Err(AnalysisError::InvalidParameter(format!(
            "Savitzky-Golay window of {} samples exceeds signal length {}",
            window,
            x.len()
        )));
    }

    let half = window / 2;
    let n = x.len();
    let mut out = vec![0.0; n];

    // Interior: centered moving average
    for i in half..n - half {
        let sum: f64 = x[i - half..=i + half].iter().sum();
        out[i] = sum / window as f64;
    }

    // Edges: line fitted to the first/last `window` samples
    let positions: Vec<f64> = (0..window).map(|j| j as f64).collect();
    let (slope, intercept) = linreg::linear_regression::<f64, f64, f64>(&positions, &x[..window])
        .map_err(|e| AnalysisError::InvalidParameter(format!("Edge fit failed: {}", e)))?;
    for (i, slot) in out.iter_mut().enumerate().take(half) {
        *slot = intercept + slope * i as f64;
    }

    let (slope, intercept) =
        linreg::linear_regression::<f64, f64, f64>(&positions, &x[n - window..])
            .map_err(|e| AnalysisError::InvalidParameter(format!("Edge fit failed: {}", e)))?;
    for i in n - half..n {
        out[i] = intercept + slope * (i - (n - window)) as f64;
    }

    Ok(out)
}
