use crate::models::{CategoryCounts, FlatRow, FlatTable, InteractionCategory};

/// Column marking an outgoing like
pub const LIKE_FIELD: &str = "like";
/// Column marking a match
pub const MATCH_FIELD: &str = "match";

/// Assign a row to exactly one interaction category
///
/// Only the presence of the `like` and `match` fields is considered.
#[inline]
pub fn classify(row: &FlatRow) -> InteractionCategory {
    match (row.is_present(LIKE_FIELD), row.is_present(MATCH_FIELD)) {
        (true, true) => InteractionCategory::OutgoingMatch,
        (true, false) => InteractionCategory::OutgoingNoMatch,
        (false, true) => InteractionCategory::IncomingMatch,
        (false, false) => InteractionCategory::IncomingNoMatch,
    }
}

/// Four disjoint views over a table's rows, stored as row indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub outgoing_match: Vec<usize>,
    pub outgoing_no_match: Vec<usize>,
    pub incoming_match: Vec<usize>,
    pub incoming_no_match: Vec<usize>,
}

impl Partition {
    pub fn rows(&self, category: InteractionCategory) -> &[usize] {
        match category {
            InteractionCategory::OutgoingMatch => &self.outgoing_match,
            InteractionCategory::OutgoingNoMatch => &self.outgoing_no_match,
            InteractionCategory::IncomingMatch => &self.incoming_match,
            InteractionCategory::IncomingNoMatch => &self.incoming_no_match,
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            outgoing_match: self.outgoing_match.len(),
            outgoing_no_match: self.outgoing_no_match.len(),
            incoming_match: self.incoming_match.len(),
            incoming_no_match: self.incoming_no_match.len(),
        }
    }
}

/// Split a table into the four interaction categories
pub fn partition(table: &FlatTable) -> Partition {
    let mut partition = Partition::default();

    for (index, row) in table.rows.iter().enumerate() {
        let bucket = match classify(row) {
            InteractionCategory::OutgoingMatch => &mut partition.outgoing_match,
            InteractionCategory::OutgoingNoMatch => &mut partition.outgoing_no_match,
            InteractionCategory::IncomingMatch => &mut partition.incoming_match,
            InteractionCategory::IncomingNoMatch => &mut partition.incoming_no_match,
        };
        bucket.push(index);
    }

    tracing::debug!("Partitioned {} rows: {:?}", table.len(), partition.counts());

    partition
}
