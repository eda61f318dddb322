use serde::Serialize;
use crate::models::domain::{CategoryCounts, MatchSpan};

/// Aggregate like/match statistics for both directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_likes_sent: usize,
    pub total_matches_from_likes_sent: usize,
    /// `None` when no likes were sent
    pub match_percent_from_likes_sent: Option<u32>,
    pub total_likes_received: usize,
    pub total_matches_from_likes_received: usize,
    /// `None` when no likes were received
    pub match_percent_from_likes_received: Option<u32>,
}

impl Summary {
    /// True when either side had nothing to compute a percentage from
    pub fn is_degenerate(&self) -> bool {
        self.total_likes_sent == 0 || self.total_likes_received == 0
    }
}

/// Everything a single run computes from an export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub entries: usize,
    pub counts: CategoryCounts,
    pub summary: Summary,
    /// `None` when the export contains no match timestamps
    pub span: Option<MatchSpan>,
    /// Timestamps skipped under the lenient policy
    pub malformed_timestamps: usize,
}
