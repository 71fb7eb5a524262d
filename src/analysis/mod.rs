//! Result and record types
//!
//! Structured numeric outputs consumed by the excluded GUI/persistence
//! layers: coda peak sets with Q estimates, tonality and pitch time series,
//! harmonic records and tremor event summaries.

pub mod result;

pub use result::{
    CodaAnalysis, HarmonicRecord, PeakRecord, PitchPoint, PitchSeries, TonalitySeries,
    TremorAnalysis, TremorSummary,
};
