//! Per-window cumulative tonality (characteristic function)
//!
//! Greedy coherent-peak counting on one magnitude spectrum: the `k` largest
//! spectral bins that are not within half a bin width of an already-accepted
//! bin each contribute the reciprocal of the median of their local slice,
//! normalized by the slice maximum. A spectrum concentrated in few narrow
//! peaks scores high; a flat spectrum scores near `k / median(uniform)`.

/// Cumulative tonality of one magnitude spectrum
///
/// `bin_width` is the slice width in spectrum bins (already converted from
/// Hz by the caller). Out-of-range slice positions are filled with the
/// median of the in-range part — not zero, which would bias the local
/// normalization. A slice whose maximum is zero contributes nothing but
/// still occupies an accepted-peak slot, keeping all-zero spectra finite.
pub(crate) fn cft_window(sx: &[f64], k: usize, bin_width: usize) -> f64 {
    let m = sx.len();
    let half = bin_width as f64 / 2.0;

    // Bin indices by descending magnitude; ties broken by ascending index
    // for determinism
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| {
        sx[b].partial_cmp(&sx[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut c = 0.0;
    let mut effective: Vec<usize> = Vec::with_capacity(k);
    let mut slice = vec![0.0; bin_width];

    for (rank, &idx) in order.iter().enumerate() {
        // Coherence rule: skip bins too close to an accepted peak
        if rank > 0
            && effective.iter().any(|&e| {
                (idx as f64) < e as f64 + half && (idx as f64) > e as f64 - half
            })
        {
            continue;
        }

        if effective.len() >= k {
            break;
        }

        // Symmetric slice around the accepted bin, bounds truncated toward zero
        let mut left = (idx as f64 - half) as isize;
        let mut right = (idx as f64 + half) as isize;

        let mut left_pad = 0usize;
        if left < 0 {
            left_pad = (-left) as usize;
            left = 0;
        }
        let mut right_pad = 0usize;
        if right >= m as isize {
            right_pad = (right - m as isize + 1) as usize;
            right = m as isize - 1;
        }
        let (left, right) = (left as usize, right as usize);

        slice.iter_mut().for_each(|v| *v = 0.0);
        let span = right - left;
        slice[left_pad..left_pad + span].copy_from_slice(&sx[left..right]);

        // Pad missing edge samples with the median of the in-range part
        if left_pad != 0 || right_pad != 0 {
            let med_partial = median_of(&sx[left..right]);
            for v in slice.iter_mut().take(left_pad) {
                *v = med_partial;
            }
            for v in slice[left_pad + span..].iter_mut() {
                *v = med_partial;
            }
        }

        let max = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if max > 0.0 {
            let normalized: Vec<f64> = slice.iter().map(|&v| v / max).collect();
            let med = median_of(&normalized);
            c += 1.0 / med;
        }
        effective.push(idx);
    }

    c
}

fn median_of(values: &[f64]) -> f64 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_spectrum_is_bounded() {
        // Uniform spectrum: every slice normalizes to all ones, median 1,
        // so each accepted peak contributes exactly 1
        let sx = vec![1.0; 101];
        let c = cft_window(&sx, 5, 10);
        assert!((c - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_tone_dominates() {
        // One sharp line on a low floor scores far above the flat baseline
        let mut sx = vec![0.01; 101];
        sx[50] = 1.0;
        let c_tone = cft_window(&sx, 5, 10);
        let c_flat = cft_window(&vec![1.0; 101], 5, 10);
        assert!(
            c_tone > 5.0 * c_flat,
            "tonal window {} should clearly exceed flat baseline {}",
            c_tone,
            c_flat
        );
    }

    #[test]
    fn test_coherence_rule_separates_accepted_bins() {
        // Two top bins one apart: the second must be skipped, the third
        // accepted bin comes from elsewhere
        let mut sx = vec![0.1; 101];
        sx[50] = 1.0;
        sx[51] = 0.9;
        sx[80] = 0.8;
        let c_k2 = cft_window(&sx, 2, 10);
        // k = 2 accepts bins 50 and 80; bin 51 lies within half a bin width
        // of 50. If 51 were accepted instead, the slice around it would
        // contain the 1.0 bin and score differently.
        let mut sx_without_neighbor = sx.clone();
        sx_without_neighbor[51] = 0.1;
        let c_ref = cft_window(&sx_without_neighbor, 2, 10);
        // The 0.9 neighbor sits inside the accepted slice around bin 50 in
        // both cases' medians only marginally; the scores must agree on
        // which bins were accepted (50 and 80), hence be close
        assert!((c_k2 - c_ref).abs() / c_ref < 0.2);
    }

    #[test]
    fn test_zero_spectrum_is_finite() {
        let sx = vec![0.0; 101];
        let c = cft_window(&sx, 5, 10);
        assert_eq!(c, 0.0);
    }

    #[test]
    fn test_edge_peak_uses_median_padding() {
        // Peak at bin 0: half the slice is out of range and must be filled
        // with the median of the in-range part, not zeros
        let mut sx = vec![0.2; 101];
        sx[0] = 1.0;
        let c = cft_window(&sx, 1, 10);
        assert!(c.is_finite());
        assert!(c > 0.0);
    }

    #[test]
    fn test_deterministic_under_ties() {
        let sx: Vec<f64> = (0..101).map(|i| ((i * 7) % 13) as f64).collect();
        let a = cft_window(&sx, 5, 8);
        let b = cft_window(&sx, 5, 8);
        assert_eq!(a, b);
    }
}
