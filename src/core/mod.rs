// Core pipeline exports
pub mod aggregator;
pub mod classifier;
pub mod normalizer;
pub mod pipeline;
pub mod timestamps;

pub use aggregator::{summarize, rounded_percent};
pub use classifier::{classify, partition, Partition};
pub use normalizer::normalize;
pub use pipeline::{run, Analyzer, PipelineError};
pub use timestamps::{scan_match_timestamps, format_duration, MalformedTimestampPolicy, ScanError, TimestampScan};
