//! Local-maxima peak detection against a per-bin height threshold
//!
//! A subset of the classic find-peaks contract: plateau-aware local maxima,
//! a per-bin minimum height, a minimum horizontal distance (highest peaks
//! kept first) and an optional topographic prominence floor. Returned indices
//! are ascending, so a detected peak always sits on an actual bin of the
//! input array.

/// Find peaks in `x`
///
/// # Arguments
///
/// * `x` - Signal to search (typically a magnitude spectrum)
/// * `min_height` - Per-bin minimum height; a candidate at bin `i` survives
///   when `x[i] >= min_height[i]`
/// * `distance` - Minimum separation between kept peaks, in samples (>= 1);
///   when two candidates are closer, the higher one wins
/// * `prominence_min` - Optional topographic prominence floor
///
/// # Returns
///
/// Ascending indices of the peaks that pass all filters. An empty result is
/// not an error.
pub fn find_spectral_peaks(
    x: &[f64],
    min_height: &[f64],
    distance: f64,
    prominence_min: Option<f64>,
) -> Vec<usize> {
    debug_assert_eq!(x.len(), min_height.len());

    let mut peaks = local_maxima(x);
    log::debug!("{} local maxima in {} bins", peaks.len(), x.len());

    // Height filter
    peaks.retain(|&p| x[p] >= min_height[p]);

    // Distance filter: walk candidates from highest to lowest and suppress
    // anything closer than `distance` to an already-kept peak
    if peaks.len() > 1 {
        let mut order: Vec<usize> = (0..peaks.len()).collect();
        order.sort_by(|&a, &b| {
            x[peaks[b]]
                .partial_cmp(&x[peaks[a]])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(peaks[a].cmp(&peaks[b]))
        });

        let mut keep = vec![true; peaks.len()];
        for &rank in &order {
            if !keep[rank] {
                continue;
            }
            let here = peaks[rank] as f64;
            for (other, flag) in keep.iter_mut().enumerate() {
                if other != rank && *flag && (peaks[other] as f64 - here).abs() < distance {
                    // Suppress only strictly lower-priority candidates
                    let cmp = x[peaks[other]]
                        .partial_cmp(&x[peaks[rank]])
                        .unwrap_or(std::cmp::Ordering::Equal);
                    if cmp == std::cmp::Ordering::Less
                        || (cmp == std::cmp::Ordering::Equal && peaks[other] > peaks[rank])
                    {
                        *flag = false;
                    }
                }
            }
        }
        peaks = peaks
            .into_iter()
            .zip(keep)
            .filter_map(|(p, k)| k.then_some(p))
            .collect();
    }

    // Prominence filter
    if let Some(p_min) = prominence_min {
        peaks.retain(|&p| prominence(x, p) >= p_min);
    }

    log::debug!("{} peaks after filtering", peaks.len());
    peaks
}

/// Plateau-aware local maxima (interior bins only)
///
/// A flat-topped maximum is reported at the midpoint of its plateau. The
/// first and last bins are never peaks.
fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }

    let mut i = 1;
    let i_max = x.len() - 1;
    while i < i_max {
        if x[i - 1] < x[i] {
            let mut i_ahead = i + 1;
            while i_ahead < i_max && x[i_ahead] == x[i] {
                i_ahead += 1;
            }
            if x[i_ahead] < x[i] {
                peaks.push((i + i_ahead - 1) / 2);
                i = i_ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Topographic prominence of the peak at `p`
///
/// On each side, the base is the lowest point between the peak and the
/// nearest strictly higher bin (or the signal boundary). Prominence is the
/// peak height above the higher of the two bases.
pub fn prominence(x: &[f64], p: usize) -> f64 {
    let height = x[p];

    let mut left_min = height;
    let mut i = p;
    while i > 0 {
        i -= 1;
        if x[i] > height {
            break;
        }
        if x[i] < left_min {
            left_min = x[i];
        }
    }

    let mut right_min = height;
    let mut i = p;
    while i + 1 < x.len() {
        i += 1;
        if x[i] > height {
            break;
        }
        if x[i] < right_min {
            right_min = x[i];
        }
    }

    height - left_min.max(right_min)
}
