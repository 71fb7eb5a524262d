//! Error types for the feature extraction engine

use std::fmt;

/// Errors that can occur during feature extraction
///
/// "No peaks found" and "no pitch found" are not errors: they are
/// represented as empty collections or NaN values in the results.
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// Invalid parameter (non-positive window length, out-of-range
    /// overlap/taper fraction, smoothing window wider than the spectrum, ...)
    InvalidParameter(String),

    /// Too few samples for the requested operation (shorter than one
    /// analysis window, too few RMS windows to regress a decay slope, ...)
    InsufficientData(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            AnalysisError::InsufficientData(msg) => write!(f, "Insufficient data: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}
