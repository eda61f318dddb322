// Model exports
pub mod domain;
pub mod report;

pub use domain::{FlatRow, FlatTable, InteractionCategory, CategoryCounts, MatchSpan};
pub use report::{Summary, Report};
