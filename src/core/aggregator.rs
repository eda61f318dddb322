use crate::models::{CategoryCounts, Summary};

/// Compute like/match totals and percentages from category counts
///
/// Percentages are left as `None` when their denominator is zero.
pub fn summarize(counts: &CategoryCounts) -> Summary {
    let total_likes_sent = counts.outgoing_match + counts.outgoing_no_match;
    let total_likes_received = counts.incoming_match + counts.incoming_no_match;

    let summary = Summary {
        total_likes_sent,
        total_matches_from_likes_sent: counts.outgoing_match,
        match_percent_from_likes_sent: rounded_percent(counts.outgoing_match, total_likes_sent),
        total_likes_received,
        total_matches_from_likes_received: counts.incoming_match,
        match_percent_from_likes_received: rounded_percent(counts.incoming_match, total_likes_received),
    };

    if summary.is_degenerate() {
        tracing::info!(
            "Percentages partly undefined: {} likes sent, {} likes received",
            total_likes_sent,
            total_likes_received
        );
    }

    summary
}

/// `part / whole * 100` rounded half-to-even, `None` for an empty whole
///
/// Integer arithmetic keeps ties exact (12.5 -> 12, 37.5 -> 38).
pub fn rounded_percent(part: usize, whole: usize) -> Option<u32> {
    if whole == 0 {
        return None;
    }

    let scaled = part as u128 * 100;
    let whole = whole as u128;
    let quotient = scaled / whole;
    let remainder = scaled % whole;

    let rounded = match (remainder * 2).cmp(&whole) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    };

    u32::try_from(rounded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_counts() {
        let counts = CategoryCounts {
            outgoing_match: 1,
            outgoing_no_match: 1,
            incoming_match: 1,
            incoming_no_match: 1,
        };

        let summary = summarize(&counts);

        assert_eq!(summary.total_likes_sent, 2);
        assert_eq!(summary.total_matches_from_likes_sent, 1);
        assert_eq!(summary.match_percent_from_likes_sent, Some(50));
        assert_eq!(summary.total_likes_received, 2);
        assert_eq!(summary.total_matches_from_likes_received, 1);
        assert_eq!(summary.match_percent_from_likes_received, Some(50));
        assert!(!summary.is_degenerate());
    }

    #[test]
    fn test_zero_likes_sent() {
        let counts = CategoryCounts {
            incoming_match: 3,
            ..CategoryCounts::default()
        };

        let summary = summarize(&counts);

        assert_eq!(summary.total_likes_sent, 0);
        assert_eq!(summary.match_percent_from_likes_sent, None);
        assert_eq!(summary.match_percent_from_likes_received, Some(100));
        assert!(summary.is_degenerate());
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(rounded_percent(1, 8), Some(12));
        assert_eq!(rounded_percent(3, 8), Some(38));
        assert_eq!(rounded_percent(5, 8), Some(62));
        assert_eq!(rounded_percent(1, 200), Some(0));
        assert_eq!(rounded_percent(3, 200), Some(2));
    }

    #[test]
    fn test_round_non_ties() {
        assert_eq!(rounded_percent(1, 3), Some(33));
        assert_eq!(rounded_percent(2, 3), Some(67));
        assert_eq!(rounded_percent(0, 7), Some(0));
        assert_eq!(rounded_percent(7, 7), Some(100));
    }

    #[test]
    fn test_sent_identity_holds() {
        for (om, onm) in [(0, 0), (0, 5), (4, 0), (13, 29)] {
            let counts = CategoryCounts {
                outgoing_match: om,
                outgoing_no_match: onm,
                ..CategoryCounts::default()
            };
            let summary = summarize(&counts);
            assert_eq!(
                summary.total_likes_sent,
                summary.total_matches_from_likes_sent + counts.outgoing_no_match
            );
        }
    }
}
