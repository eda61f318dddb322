use crate::core::timestamps::format_duration;
use crate::models::Report;
use std::io::Write;

/// Print the run's statistics as plain text, in a fixed order
pub fn write_summary<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    match &report.span {
        Some(span) => {
            writeln!(out, "The first match was on: {}", span.earliest.format("%Y-%m-%d"))?;
            writeln!(out, "The latest match was on: {}", span.latest.format("%Y-%m-%d"))?;
            writeln!(
                out,
                "The duration between the earliest and latest timestamps is: {}",
                format_duration(span.duration)
            )?;
        }
        None => writeln!(out, "No valid timestamps found in the data.")?,
    }

    if report.malformed_timestamps > 0 {
        writeln!(out, "Skipped malformed timestamps: {}", report.malformed_timestamps)?;
    }

    let s = &report.summary;
    writeln!(out, "Total Likes Sent: {}", s.total_likes_sent)?;
    writeln!(out, "Total Matches from Likes Sent: {}", s.total_matches_from_likes_sent)?;
    writeln!(
        out,
        "Match % from Likes Sent: {}",
        percent_or_undefined(s.match_percent_from_likes_sent, "no likes sent")
    )?;
    writeln!(out, "Total Likes Received: {}", s.total_likes_received)?;
    writeln!(out, "Total Matches from Likes Received: {}", s.total_matches_from_likes_received)?;
    writeln!(
        out,
        "Match % from Likes Received: {}",
        percent_or_undefined(s.match_percent_from_likes_received, "no likes received")
    )?;

    Ok(())
}

/// Emit the report as pretty-printed JSON
pub fn write_json<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

fn percent_or_undefined(percent: Option<u32>, reason: &str) -> String {
    match percent {
        Some(p) => format!("{} %", p),
        None => format!("undefined ({})", reason),
    }
}
