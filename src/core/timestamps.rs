use crate::models::MatchSpan;
use crate::services::loader::json_kind;
use chrono::NaiveDateTime;
use serde_json::Value;
use thiserror::Error;

/// Format of every `timestamp` string in the export
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised while collecting match timestamps
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Entry {entry}: {message}")]
    Malformed { entry: usize, message: String },

    #[error("Entry {entry}: timestamp {value:?} does not match YYYY-MM-DD HH:MM:SS: {source}")]
    Timestamp {
        entry: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// What to do with a timestamp string that fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedTimestampPolicy {
    /// Fail the run on the first bad timestamp
    #[default]
    Abort,
    /// Skip bad timestamps and count them
    Skip,
}

/// Parsed match timestamps in export order
#[derive(Debug, Clone, Default)]
pub struct TimestampScan {
    pub timestamps: Vec<NaiveDateTime>,
    pub malformed: usize,
}

impl TimestampScan {
    /// Earliest, latest and elapsed time, or `None` without any timestamps
    pub fn span(&self) -> Option<MatchSpan> {
        let earliest = *self.timestamps.iter().min()?;
        let latest = *self.timestamps.iter().max()?;

        Some(MatchSpan {
            earliest,
            latest,
            duration: latest - earliest,
            count: self.timestamps.len(),
        })
    }
}

/// Collect every `match[*].timestamp` across the raw export entries
pub fn scan_match_timestamps(
    entries: &[Value],
    policy: MalformedTimestampPolicy,
) -> Result<TimestampScan, ScanError> {
    let mut scan = TimestampScan::default();

    for (entry_index, entry) in entries.iter().enumerate() {
        let events = match entry.get("match") {
            None | Some(Value::Null) => continue,
            Some(Value::Array(events)) => events,
            Some(other) => {
                return Err(ScanError::Malformed {
                    entry: entry_index,
                    message: format!("`match` is {}, expected an array", json_kind(other)),
                })
            }
        };

        for event in events {
            let Value::Object(fields) = event else {
                return Err(ScanError::Malformed {
                    entry: entry_index,
                    message: format!("match event is {}, expected an object", json_kind(event)),
                });
            };

            let raw = match fields.get("timestamp") {
                None => continue,
                Some(Value::String(raw)) => raw,
                Some(other) => {
                    return Err(ScanError::Malformed {
                        entry: entry_index,
                        message: format!("`timestamp` is {}, expected a string", json_kind(other)),
                    })
                }
            };

            match NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
                Ok(ts) => scan.timestamps.push(ts),
                Err(source) => match policy {
                    MalformedTimestampPolicy::Abort => {
                        return Err(ScanError::Timestamp {
                            entry: entry_index,
                            value: raw.clone(),
                            source,
                        })
                    }
                    MalformedTimestampPolicy::Skip => {
                        tracing::warn!("Skipping malformed timestamp {:?} in entry {}", raw, entry_index);
                        scan.malformed += 1;
                    }
                },
            }
        }
    }

    tracing::info!(
        "Collected {} match timestamps ({} malformed)",
        scan.timestamps.len(),
        scan.malformed
    );

    Ok(scan)
}

/// Render a duration the way the summary prints it: `N days, H:MM:SS`
pub fn format_duration(duration: chrono::TimeDelta) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let clock = format!("{}:{:02}:{:02}", hours, minutes, seconds);
    match days {
        0 => format!("{}{}", sign, clock),
        1 => format!("{}1 day, {}", sign, clock),
        n => format!("{}{} days, {}", sign, n, clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_span_over_entries() {
        let entries = vec![
            json!({"match": [{"timestamp": "2024-03-05 08:00:00"}]}),
            json!({"like": {"x": 1}}),
            json!({"match": [{"timestamp": "2024-01-01 10:00:00"}, {"timestamp": "2024-02-01 10:00:00"}]}),
        ];

        let scan = scan_match_timestamps(&entries, MalformedTimestampPolicy::Abort).unwrap();
        let span = scan.span().unwrap();

        assert_eq!(span.count, 3);
        assert_eq!(span.earliest, at(2024, 1, 1, 10));
        assert_eq!(span.latest, at(2024, 3, 5, 8));
    }

    #[test]
    fn test_no_timestamps_is_no_data() {
        let entries = vec![json!({}), json!({"match": [{"chat": "hi"}]}), json!({"match": null})];

        let scan = scan_match_timestamps(&entries, MalformedTimestampPolicy::Abort).unwrap();

        assert!(scan.timestamps.is_empty());
        assert!(scan.span().is_none());
    }

    #[test]
    fn test_malformed_timestamp_aborts() {
        let entries = vec![json!({"match": [{"timestamp": "2024/01/01"}]})];

        let result = scan_match_timestamps(&entries, MalformedTimestampPolicy::Abort);

        match result {
            Err(ScanError::Timestamp { entry, value, .. }) => {
                assert_eq!(entry, 0);
                assert_eq!(value, "2024/01/01");
            }
            other => panic!("expected timestamp error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_timestamp_skipped() {
        let entries = vec![json!({"match": [
            {"timestamp": "not a date"},
            {"timestamp": "2024-01-01 10:00:00"}
        ]})];

        let scan = scan_match_timestamps(&entries, MalformedTimestampPolicy::Skip).unwrap();

        assert_eq!(scan.timestamps.len(), 1);
        assert_eq!(scan.malformed, 1);
    }

    #[test]
    fn test_match_must_be_array() {
        let entries = vec![json!({"match": {"timestamp": "2024-01-01 10:00:00"}})];

        let result = scan_match_timestamps(&entries, MalformedTimestampPolicy::Skip);
        assert!(matches!(result, Err(ScanError::Malformed { entry: 0, .. })));
    }

    #[test]
    fn test_timestamp_must_be_string() {
        let entries = vec![json!({"match": [{"timestamp": 1704103200}]})];

        let result = scan_match_timestamps(&entries, MalformedTimestampPolicy::Abort);
        assert!(matches!(result, Err(ScanError::Malformed { .. })));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::TimeDelta::zero()), "0:00:00");
        assert_eq!(format_duration(chrono::TimeDelta::days(1)), "1 day, 0:00:00");
        assert_eq!(
            format_duration(chrono::TimeDelta::days(40) + chrono::TimeDelta::seconds(3_725)),
            "40 days, 1:02:05"
        );
    }
}
