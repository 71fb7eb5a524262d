//! Aggregate statistics over a harmonic tremor event
//!
//! Groups the accepted harmonic records into one summary row: fundamental
//! frequency statistics, the set of harmonic numbers present, parity, event
//! duration and a representative RMS amplitude over the event span.
//! Aggregations over empty or NaN inputs propagate NaN rather than failing.

use crate::analysis::result::{HarmonicRecord, TremorSummary};
use crate::signal::Signal;

/// Summarize a set of harmonic records
///
/// Returns `None` for an empty record set — no event, not an error.
/// Fundamental statistics (`fmin`..`fmedian`) are NaN when no record has
/// harmonic number 1; `fstd` is the sample standard deviation and is NaN
/// for fewer than two fundamental records.
pub fn summarize(signal: &Signal, records: &[HarmonicRecord]) -> Option<TremorSummary> {
    if records.is_empty() {
        return None;
    }

    let start_time = records.iter().map(|r| r.time).fold(f64::INFINITY, f64::min);
    let end_time = records.iter().map(|r| r.time).fold(f64::NEG_INFINITY, f64::max);
    let duration = end_time - start_time;

    // Representative amplitude: RMS of the trace over the event span
    let amplitude = signal
        .slice_seconds(
            start_time - signal.start_time(),
            end_time - signal.start_time(),
        )
        .map(|span| {
            let sum_sq: f64 = span.samples().iter().map(|&x| x * x).sum();
            (sum_sq / span.len() as f64).sqrt()
        })
        .unwrap_or(f64::NAN);

    let fundamentals: Vec<f64> = records
        .iter()
        .filter(|r| r.number == 1)
        .map(|r| r.frequency)
        .collect();
    let (fmin, fmax, fmean, fstd, fmedian) = frequency_stats(&fundamentals);

    let mut harmonics: Vec<u32> = records.iter().map(|r| r.number).collect();
    harmonics.sort_unstable();
    harmonics.dedup();
    let odd = !harmonics.iter().any(|h| h % 2 == 0);
    let n_harmonics = harmonics.len();

    log::debug!(
        "Tremor summary: {} records, {} harmonics, fmean={:.3} Hz, {:.1} s",
        records.len(),
        n_harmonics,
        fmean,
        duration
    );

    Some(TremorSummary {
        start_time,
        end_time,
        duration,
        amplitude,
        fmin,
        fmax,
        fmean,
        fstd,
        fmedian,
        harmonics,
        n_harmonics,
        odd,
    })
}

fn frequency_stats(values: &[f64]) -> (f64, f64, f64, f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN);
    }

    let fmin = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let fmax = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let fmean = values.iter().sum::<f64>() / values.len() as f64;

    let fstd = if values.len() < 2 {
        f64::NAN
    } else {
        let var = values.iter().map(|&v| (v - fmean).powi(2)).sum::<f64>()
            / (values.len() - 1) as f64;
        var.sqrt()
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    let fmedian = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) * 0.5
    } else {
        sorted[mid]
    };

    (fmin, fmax, fmean, fstd, fmedian)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: u32, time: f64, frequency: f64) -> HarmonicRecord {
        HarmonicRecord {
            number,
            time,
            frequency,
            amplitude: 1.0,
        }
    }

    fn flat_signal() -> Signal {
        Signal::new(vec![2.0; 1000], 100.0, 0.0).unwrap()
    }

    #[test]
    fn test_empty_records_no_summary() {
        assert!(summarize(&flat_signal(), &[]).is_none());
    }

    #[test]
    fn test_parity_flag() {
        let sig = flat_signal();
        let even = [record(1, 1.0, 5.0), record(2, 2.0, 10.0), record(3, 3.0, 15.0)];
        let summary = summarize(&sig, &even).unwrap();
        assert!(!summary.odd);
        assert_eq!(summary.harmonics, vec![1, 2, 3]);
        assert_eq!(summary.n_harmonics, 3);

        let odd_only = [record(1, 1.0, 5.0), record(3, 2.0, 15.0), record(5, 3.0, 25.0)];
        let summary = summarize(&sig, &odd_only).unwrap();
        assert!(summary.odd);
    }

    #[test]
    fn test_fundamental_statistics() {
        let sig = flat_signal();
        let records = [
            record(1, 1.0, 4.8),
            record(1, 2.0, 5.0),
            record(1, 3.0, 5.2),
            record(2, 2.0, 10.0),
        ];
        let summary = summarize(&sig, &records).unwrap();
        assert!((summary.fmin - 4.8).abs() < 1e-12);
        assert!((summary.fmax - 5.2).abs() < 1e-12);
        assert!((summary.fmean - 5.0).abs() < 1e-12);
        assert!((summary.fmedian - 5.0).abs() < 1e-12);
        assert!((summary.fstd - 0.2).abs() < 1e-9);
        assert!((summary.duration - 2.0).abs() < 1e-12);
        // RMS of a constant-amplitude trace is that amplitude
        assert!((summary.amplitude - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_fundamental_has_nan_std() {
        let sig = flat_signal();
        let records = [record(1, 1.0, 5.0)];
        let summary = summarize(&sig, &records).unwrap();
        assert!(summary.fstd.is_nan());
        assert!((summary.fmean - 5.0).abs() < 1e-12);
        assert_eq!(summary.duration, 0.0);
    }

    #[test]
    fn test_no_fundamental_propagates_nan() {
        let sig = flat_signal();
        let records = [record(2, 1.0, 10.0), record(3, 2.0, 15.0)];
        let summary = summarize(&sig, &records).unwrap();
        assert!(summary.fmean.is_nan());
        assert!(summary.fmedian.is_nan());
        assert!(!summary.odd);
    }
}
