//! Hinge Stats - summary statistics for a Hinge dating app data export
//!
//! This library turns a `matches.json` export into like/match statistics.
//! It implements a single-pass pipeline: load, normalize, scan match
//! timestamps, classify entries, aggregate, then report and chart.

pub mod config;
pub mod core;
pub mod models;
pub mod render;
pub mod services;

// Re-export commonly used types
pub use crate::core::{run, Analyzer, MalformedTimestampPolicy, PipelineError};
pub use models::{CategoryCounts, FlatRow, FlatTable, InteractionCategory, MatchSpan, Report, Summary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let report = Analyzer::default().analyze(&[]).unwrap();
        assert_eq!(report.counts, CategoryCounts::default());
    }
}
