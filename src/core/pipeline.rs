use crate::core::{
    aggregator::summarize,
    classifier::partition,
    normalizer::normalize,
    timestamps::{scan_match_timestamps, MalformedTimestampPolicy, ScanError},
};
use crate::models::Report;
use crate::render::chart::ChartError;
use crate::services::loader::{load_export, LoadError};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Any failure that aborts a run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl PipelineError {
    /// Name of the stage that failed, for user-facing messages
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Load(_) => "load",
            PipelineError::Scan(_) => "scan",
            PipelineError::Chart(_) => "chart",
            PipelineError::Config(_) => "config",
            PipelineError::Output(_) => "report",
        }
    }
}

/// Export analysis orchestrator
///
/// # Pipeline Stages
/// 1. Normalize entries into flat rows
/// 2. Scan match timestamps
/// 3. Classify rows into interaction categories
/// 4. Aggregate counts into summary statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    policy: MalformedTimestampPolicy,
}

impl Analyzer {
    pub fn new(policy: MalformedTimestampPolicy) -> Self {
        Self { policy }
    }

    /// Load an export from disk and analyze it
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<Report, PipelineError> {
        let entries = load_export(path)?;
        self.analyze(&entries)
    }

    /// Analyze already loaded export entries
    pub fn analyze(&self, entries: &[Value]) -> Result<Report, PipelineError> {
        // Stage 1: flatten
        let table = normalize(entries);

        // Stage 2: timestamps come from the raw entries, not the rows
        let scan = scan_match_timestamps(entries, self.policy)?;
        let span = scan.span();

        // Stage 3: classify
        let counts = partition(&table).counts();

        // Stage 4: aggregate
        let summary = summarize(&counts);

        tracing::info!(
            "Analyzed {} entries: {} likes sent, {} likes received",
            table.len(),
            summary.total_likes_sent,
            summary.total_likes_received
        );

        Ok(Report {
            entries: table.len(),
            counts,
            summary,
            span,
            malformed_timestamps: scan.malformed,
        })
    }
}

/// Run the default (strict) pipeline over an export file
pub fn run<P: AsRef<Path>>(path: P) -> Result<Report, PipelineError> {
    Analyzer::default().run(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_export() {
        let entries = vec![
            json!({"like": {"x": 1}, "match": [{"timestamp": "2024-01-01 10:00:00"}]}),
            json!({"like": {"x": 1}}),
            json!({"match": [{"timestamp": "2024-01-02 10:00:00"}]}),
            json!({}),
        ];

        let report = Analyzer::default().analyze(&entries).unwrap();

        assert_eq!(report.entries, 4);
        assert_eq!(report.counts.outgoing_match, 1);
        assert_eq!(report.counts.outgoing_no_match, 1);
        assert_eq!(report.counts.incoming_match, 1);
        assert_eq!(report.counts.incoming_no_match, 1);
        assert_eq!(report.summary.match_percent_from_likes_sent, Some(50));
        assert_eq!(report.summary.match_percent_from_likes_received, Some(50));

        let span = report.span.unwrap();
        assert_eq!(span.duration, chrono::TimeDelta::days(1));
    }

    #[test]
    fn test_empty_export() {
        let report = Analyzer::default().analyze(&[]).unwrap();

        assert_eq!(report.entries, 0);
        assert_eq!(report.counts.total(), 0);
        assert_eq!(report.summary.match_percent_from_likes_sent, None);
        assert_eq!(report.summary.match_percent_from_likes_received, None);
        assert!(report.span.is_none());
    }

    #[test]
    fn test_scan_failure_names_stage() {
        let entries = vec![json!({"match": [{"timestamp": "yesterday"}]})];

        let err = Analyzer::default().analyze(&entries).unwrap_err();
        assert_eq!(err.stage(), "scan");

        let report = Analyzer::new(MalformedTimestampPolicy::Skip)
            .analyze(&entries)
            .unwrap();
        assert_eq!(report.malformed_timestamps, 1);
        assert_eq!(report.counts.incoming_match, 1);
    }

    #[test]
    fn test_missing_file_names_stage() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path().join("nope.json")).unwrap_err();

        assert_eq!(err.stage(), "load");
        assert!(matches!(err, PipelineError::Load(LoadError::NotFound { .. })));
    }
}
