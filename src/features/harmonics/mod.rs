//! Harmonic analysis of tremor events
//!
//! Couples the tracked fundamental with per-window spectral peak searches
//! to assign integer harmonic numbers, then aggregates the accepted records
//! into one event summary.

pub mod matcher;
pub mod summary;

pub use matcher::match_harmonics;
pub use summary::summarize;
