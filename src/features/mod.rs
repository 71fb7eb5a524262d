//! Feature extraction modules
//!
//! The non-trivial algorithms of the engine:
//! - Tonality: per-window characteristic function for coda detection
//! - Peaks: spectral resonance extraction with two Q estimates
//! - Pitch: YIN fundamental-frequency tracking
//! - Harmonics: harmonic-number matching and tremor summaries

pub mod harmonics;
pub mod peaks;
pub mod pitch;
pub mod tonality;
