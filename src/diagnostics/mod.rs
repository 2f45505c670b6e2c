//! Run diagnostics: stage timings and the serializable run report.

pub mod report;
pub mod timing;

pub use report::RadonReport;
pub use timing::{StageTiming, TimingBreakdown};
