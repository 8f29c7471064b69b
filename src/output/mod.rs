//! Report structures and output formatting

pub mod report;
pub mod formatter;

pub use formatter::{ReportGenerator, OutputFormatter};
pub use report::{CandidateSummary, ScreeningReport};
