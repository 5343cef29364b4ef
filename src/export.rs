//! Report-row construction and CSV export.
//!
//! Export rows are ordered key/value pairs: the header line is the literal
//! keys of the first row, in insertion order. Fields are comma-joined with
//! no quoting or escaping — embedded commas in exported values are NOT
//! protected. That is a known limitation of the format the downstream
//! spreadsheet consumers expect; do not silently "fix" it without product
//! sign-off.

use crate::aggregate::agent_daily_summary;
use crate::roster::Roster;
use crate::types::CallRecord;

/// One export row: keys in insertion order.
pub type ExportRow = Vec<(String, String)>;

/// Render rows as CSV. Empty input renders as an empty string.
pub fn to_csv(rows: &[ExportRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let header = first
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = vec![header];
    for row in rows {
        lines.push(
            row.iter()
                .map(|(_, value)| value.as_str())
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// The daily per-agent report: one row per roster agent with that day's
/// totals, team name resolved for display ("No Team" for orphans).
pub fn daily_report(records: &[CallRecord], roster: &Roster, date: &str) -> Vec<ExportRow> {
    roster
        .agents
        .iter()
        .map(|agent| {
            let summary = agent_daily_summary(records, &agent.id, date);
            vec![
                ("Agent ID".to_string(), agent.id.clone()),
                ("Agent Name".to_string(), agent.name.clone()),
                ("Team".to_string(), roster.team_label(agent)),
                ("Date".to_string(), date.to_string()),
                ("Total Calls".to_string(), summary.total_calls.to_string()),
                (
                    "Total Call Time (minutes)".to_string(),
                    summary.total_call_time.to_string(),
                ),
                ("Total Sales".to_string(), summary.total_sales.to_string()),
                (
                    "Average Call Time (minutes)".to_string(),
                    format!("{:.2}", summary.average_call_time),
                ),
            ]
        })
        .collect()
}

/// Raw record dump, one row per stored [`CallRecord`].
pub fn raw_report(records: &[CallRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .map(|record| {
            vec![
                ("Agent ID".to_string(), record.agent_id.clone()),
                ("Date".to_string(), record.date.clone()),
                ("Hour".to_string(), record.hour.to_string()),
                ("Calls Made".to_string(), record.calls_made.to_string()),
                (
                    "Total Call Time (minutes)".to_string(),
                    record.total_call_time.to_string(),
                ),
                ("Sales Made".to_string(), record.sales_made.to_string()),
            ]
        })
        .collect()
}

/// Minutes → "1h 5m" / "45m" display form.
pub fn format_time(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// 24-hour bucket → "2:00 PM" display form.
pub fn format_hour(hour: u8) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display = if hour > 12 {
        hour - 12
    } else if hour == 0 {
        12
    } else {
        hour
    };
    format!("{}:00 {}", display, period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Agent, Team};

    fn roster() -> Roster {
        Roster::new(
            vec![
                Agent {
                    id: "a1".to_string(),
                    name: "John Smith".to_string(),
                    email: "john@x.com".to_string(),
                    team_id: Some("t1".to_string()),
                    is_active: true,
                },
                Agent {
                    id: "a2".to_string(),
                    name: "Orphan".to_string(),
                    email: "o@x.com".to_string(),
                    team_id: None,
                    is_active: true,
                },
            ],
            vec![Team {
                id: "t1".to_string(),
                name: "Alpha".to_string(),
                color: "#3b82f6".to_string(),
                campaign_id: None,
            }],
            Vec::new(),
        )
    }

    #[test]
    fn test_to_csv_header_from_first_row_keys() {
        let rows = vec![vec![
            ("Name".to_string(), "John".to_string()),
            ("Calls".to_string(), "5".to_string()),
        ]];
        assert_eq!(to_csv(&rows), "Name,Calls\nJohn,5");
    }

    #[test]
    fn test_to_csv_empty_is_empty_string() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_to_csv_does_not_quote_embedded_commas() {
        // Documented limitation: values are joined verbatim.
        let rows = vec![vec![("Name".to_string(), "Smith, John".to_string())]];
        assert_eq!(to_csv(&rows), "Name\nSmith, John");
    }

    #[test]
    fn test_daily_report_rows() {
        let records = vec![CallRecord {
            agent_id: "a1".to_string(),
            date: "2024-01-01".to_string(),
            hour: 9,
            calls_made: 8,
            total_call_time: 15,
            sales_made: 1,
        }];
        let rows = daily_report(&records, &roster(), "2024-01-01");

        assert_eq!(rows.len(), 2);
        let john: Vec<&str> = rows[0].iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(
            john,
            vec!["a1", "John Smith", "Alpha", "2024-01-01", "8", "15", "1", "1.88"]
        );
        // Orphan agent buckets under "No Team" with zeroed metrics.
        let orphan: Vec<&str> = rows[1].iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(orphan[2], "No Team");
        assert_eq!(orphan[7], "0.00");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(45), "45m");
        assert_eq!(format_time(65), "1h 5m");
        assert_eq!(format_time(120), "2h 0m");
        assert_eq!(format_time(0), "0m");
    }

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(8), "8:00 AM");
        assert_eq!(format_hour(12), "12:00 PM");
        assert_eq!(format_hour(14), "2:00 PM");
        assert_eq!(format_hour(17), "5:00 PM");
    }
}
