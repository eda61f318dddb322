use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One flattened export entry
///
/// Holds only the cells the entry itself produced; columns contributed by
/// other entries are absent. A leaf that is JSON `null` is kept as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRow {
    cells: BTreeMap<String, Option<Value>>,
}

impl FlatRow {
    pub fn new(cells: BTreeMap<String, Option<Value>>) -> Self {
        Self { cells }
    }

    /// Value of a dotted column, `None` for missing or null cells
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column).and_then(Option::as_ref)
    }

    /// Whether a top-level field carries any non-null value in this row
    ///
    /// A field is present when the column named after it, or any column
    /// nested under it (`like.0.timestamp`), holds a value.
    pub fn is_present(&self, field: &str) -> bool {
        self.cells.iter().any(|(column, value)| {
            value.is_some() && column_belongs_to(column, field)
        })
    }

    pub fn cells(&self) -> &BTreeMap<String, Option<Value>> {
        &self.cells
    }

    /// Number of cells stored for this entry
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[inline]
fn column_belongs_to(column: &str, field: &str) -> bool {
    match column.strip_prefix(field) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// Flattened export, one row per entry in entry order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatTable {
    /// Column names in first-seen order across all entries
    pub columns: Vec<String>,
    pub rows: Vec<FlatRow>,
}

impl FlatTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total cells stored across all rows
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(FlatRow::len).sum()
    }
}

/// Four-way classification of an entry by like/match presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionCategory {
    /// Like sent and matched
    OutgoingMatch,
    /// Like sent, no match
    OutgoingNoMatch,
    /// Matched without an outgoing like
    IncomingMatch,
    /// Neither like nor match recorded
    IncomingNoMatch,
}

impl InteractionCategory {
    pub const ALL: [InteractionCategory; 4] = [
        InteractionCategory::OutgoingMatch,
        InteractionCategory::OutgoingNoMatch,
        InteractionCategory::IncomingMatch,
        InteractionCategory::IncomingNoMatch,
    ];

    /// Human readable label used on charts
    pub fn label(self) -> &'static str {
        match self {
            InteractionCategory::OutgoingMatch => "Outgoing Matches",
            InteractionCategory::OutgoingNoMatch => "Outgoing No Matches",
            InteractionCategory::IncomingMatch => "Incoming Matches",
            InteractionCategory::IncomingNoMatch => "Incoming No Matches",
        }
    }
}

/// Number of rows per interaction category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub outgoing_match: usize,
    pub outgoing_no_match: usize,
    pub incoming_match: usize,
    pub incoming_no_match: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: InteractionCategory) -> usize {
        match category {
            InteractionCategory::OutgoingMatch => self.outgoing_match,
            InteractionCategory::OutgoingNoMatch => self.outgoing_no_match,
            InteractionCategory::IncomingMatch => self.incoming_match,
            InteractionCategory::IncomingNoMatch => self.incoming_no_match,
        }
    }

    pub fn total(&self) -> usize {
        self.outgoing_match + self.outgoing_no_match + self.incoming_match + self.incoming_no_match
    }
}

/// Earliest and latest match timestamps and the time between them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub earliest: chrono::NaiveDateTime,
    pub latest: chrono::NaiveDateTime,
    #[serde(serialize_with = "duration_seconds::serialize")]
    pub duration: chrono::TimeDelta,
    /// Number of timestamps the span was computed from
    pub count: usize,
}

/// Serializes a `TimeDelta` as whole seconds
mod duration_seconds {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(delta: &chrono::TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(delta.num_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(cells: &[(&str, Option<Value>)]) -> FlatRow {
        FlatRow::new(
            cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_presence_uses_nested_columns() {
        let r = row(&[
            ("like.0.timestamp", Some(json!("2024-01-01 10:00:00"))),
            ("match.0.timestamp", None),
        ]);

        assert!(r.is_present("like"));
        assert!(!r.is_present("match"));
    }

    #[test]
    fn test_presence_ignores_prefix_lookalikes() {
        let r = row(&[("likes_count", Some(json!(3))), ("match", None)]);

        assert!(!r.is_present("like"));
        assert!(!r.is_present("match"));
    }

    #[test]
    fn test_scalar_column_presence() {
        let r = row(&[("like", Some(json!(true)))]);
        assert!(r.is_present("like"));
        assert_eq!(r.get("like"), Some(&json!(true)));
        assert_eq!(r.get("match"), None);
    }

    #[test]
    fn test_counts_total() {
        let counts = CategoryCounts {
            outgoing_match: 1,
            outgoing_no_match: 2,
            incoming_match: 3,
            incoming_no_match: 4,
        };
        assert_eq!(counts.total(), 10);
        assert_eq!(counts.get(InteractionCategory::IncomingMatch), 3);
    }
}
