//! Signal and windowing primitives
//!
//! A [`Signal`] is an immutable, pre-processed waveform snippet (detrended and
//! bandpassed by the excluded acquisition layer). The core never mutates a
//! caller-supplied signal; every derived product is a new allocation.
//!
//! [`Signal::frames`] slices a signal into overlapping fixed-length windows,
//! stepping by `hop = length * (1 - overlap)` samples and discarding a final
//! partial window. The returned iterator is lazy, finite and restartable
//! (it is `Clone` and borrows the signal).

use crate::error::AnalysisError;

/// A sampled waveform with time metadata
#[derive(Debug, Clone)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: f64,
    start_time: f64,
}

impl Signal {
    /// Create a signal from samples, a sample rate in Hz, and an absolute
    /// start timestamp in seconds (sub-second precision)
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `sample_rate` is not a positive finite
    /// number, or `InsufficientData` if `samples` is empty.
    pub fn new(samples: Vec<f64>, sample_rate: f64, start_time: f64) -> Result<Self, AnalysisError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "Sample rate must be positive and finite, got {}",
                sample_rate
            )));
        }
        if samples.is_empty() {
            return Err(AnalysisError::InsufficientData(
                "Empty sample array".to_string(),
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
            start_time,
        })
    }

    /// Amplitude samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Absolute start timestamp in seconds
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal holds no samples (never true for a constructed signal)
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample spacing in seconds
    pub fn delta(&self) -> f64 {
        1.0 / self.sample_rate
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Nyquist frequency in Hz
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// A new signal holding the samples between two offsets in seconds
    /// relative to the signal start, clamped to the signal bounds
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the clamped span holds no samples.
    pub fn slice_seconds(&self, from_s: f64, to_s: f64) -> Result<Signal, AnalysisError> {
        let i0 = ((from_s * self.sample_rate).floor().max(0.0)) as usize;
        let i1 = (((to_s * self.sample_rate).ceil()) as usize).min(self.samples.len());
        if i0 >= i1 {
            return Err(AnalysisError::InsufficientData(format!(
                "Empty slice [{:.3} s, {:.3} s] of a {:.3} s signal",
                from_s,
                to_s,
                self.duration()
            )));
        }
        Ok(Signal {
            samples: self.samples[i0..i1].to_vec(),
            sample_rate: self.sample_rate,
            start_time: self.start_time + i0 as f64 / self.sample_rate,
        })
    }

    /// Iterate over overlapping fixed-length windows
    ///
    /// # Arguments
    ///
    /// * `window_s` - Window length in seconds (must be positive)
    /// * `overlap` - Fractional overlap in [0, 1)
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-positive window length or an
    /// out-of-range overlap, and `InsufficientData` if the signal is shorter
    /// than one window.
    pub fn frames(&self, window_s: f64, overlap: f64) -> Result<Frames<'_>, AnalysisError> {
        if !(window_s.is_finite() && window_s > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "Window length must be positive, got {} s",
                window_s
            )));
        }
        if !(0.0..1.0).contains(&overlap) {
            return Err(AnalysisError::InvalidParameter(format!(
                "Overlap must be in [0, 1), got {}",
                overlap
            )));
        }

        let w_size = (window_s * self.sample_rate) as usize;
        if w_size == 0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "Window of {} s holds no samples at {} Hz",
                window_s, self.sample_rate
            )));
        }
        if w_size > self.samples.len() {
            return Err(AnalysisError::InsufficientData(format!(
                "Signal of {} samples is shorter than one {}-sample window",
                self.samples.len(),
                w_size
            )));
        }

        // Truncating cast; overlap < 1 keeps the hop >= 1
        let hop = (w_size as f64 - w_size as f64 * overlap) as usize;

        log::debug!(
            "Framing {} samples: w_size={}, hop={}",
            self.samples.len(),
            w_size,
            hop
        );

        Ok(Frames {
            signal: self,
            w_size,
            hop,
            offset: 0,
        })
    }
}

/// One fixed-length window of a signal
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    /// Window samples
    pub samples: &'a [f64],
    /// Offset of the first sample within the parent signal
    pub offset: usize,
    /// Absolute start timestamp in seconds
    pub start_time: f64,
    /// Sample rate in Hz (inherited from the parent signal)
    pub sample_rate: f64,
}

/// Lazy iterator over overlapping windows of a signal
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    signal: &'a Signal,
    w_size: usize,
    hop: usize,
    offset: usize,
}

impl<'a> Frames<'a> {
    /// Window length in samples
    pub fn window_len(&self) -> usize {
        self.w_size
    }

    /// Hop length in samples
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Hop duration in seconds
    pub fn hop_seconds(&self) -> f64 {
        self.hop as f64 / self.signal.sample_rate()
    }

    /// Number of full windows that fit in the signal
    pub fn count_windows(&self) -> usize {
        let n = self.signal.len();
        if n < self.w_size {
            0
        } else {
            (n - self.w_size) / self.hop + 1
        }
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Window<'a>> {
        let end = self.offset.checked_add(self.w_size)?;
        if end > self.signal.len() {
            return None;
        }
        let window = Window {
            samples: &self.signal.samples()[self.offset..end],
            offset: self.offset,
            start_time: self.signal.start_time() + self.offset as f64 / self.signal.sample_rate(),
            sample_rate: self.signal.sample_rate(),
        };
        self.offset += self.hop;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.offset + self.w_size > self.signal.len() {
            0
        } else {
            (self.signal.len() - self.offset - self.w_size) / self.hop + 1
        };
        (remaining, Some(remaining))
    }
}
