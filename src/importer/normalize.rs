//! Row normalization and validation: resolved raw fields → [`CallRecord`]
//! candidates.
//!
//! Row-level problems never abort the batch. An unknown agent becomes an
//! accumulated error string and the row is dropped; a cell that fails
//! numeric parsing coerces to 0. Both paths return the surviving records
//! together with the error list so the caller can report partial success.

use crate::importer::columns::{AgentColumns, CallColumns, POS_AGENT_NAME, POS_CALLS, POS_SECONDS};
use crate::importer::csv::RawTable;
use crate::roster::{AgentImportRow, Roster};
use crate::types::{CallRecord, FIRST_HOUR, LAST_HOUR};

/// Parse-or-zero numeric coercion: leading decimal digits parse as the
/// value, anything else (blank, absent, garbage) reads as 0. Never raises.
pub fn parse_or_zero(value: Option<&str>) -> u32 {
    let Some(value) = value else { return 0 };
    let digits: String = value.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Seconds → whole minutes, rounded to nearest (90s → 2m, 89s → 1m).
pub fn seconds_to_minutes(seconds: u32) -> u32 {
    (seconds + 30) / 60
}

/// Pull an hour to the nearest business-hour boundary. The manual import
/// path clamps; the email path (subject-driven) rejects instead — see
/// [`crate::subject`].
pub fn clamp_hour(hour: u32) -> u8 {
    hour.clamp(FIRST_HOUR as u32, LAST_HOUR as u32) as u8
}

/// Normalize header-resolved call rows. `now_hour` is the wall-clock hour
/// used when the file has no hour column (clamped like everything else).
pub fn normalize_call_rows(
    table: &RawTable,
    cols: &CallColumns,
    roster: &Roster,
    date: &str,
    now_hour: u8,
) -> (Vec<CallRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for row in &table.rows {
        let Some(name) = RawTable::value(row, cols.agent_name) else {
            // Rows without a name carry nothing attributable; skip silently.
            continue;
        };

        let Some(agent) = roster.find_agent_by_name(name) else {
            errors.push(format!("Agent \"{}\" not found", name));
            continue;
        };

        let calls = parse_or_zero(RawTable::value(row, cols.calls));
        let seconds = parse_or_zero(cols.seconds.and_then(|i| RawTable::value(row, i)));
        let sales = parse_or_zero(cols.sales.and_then(|i| RawTable::value(row, i)));

        let hour = match cols.hour.and_then(|i| RawTable::value(row, i)) {
            Some(raw) => clamp_hour(parse_or_zero(Some(raw))),
            None => clamp_hour(now_hour as u32),
        };

        records.push(CallRecord {
            agent_id: agent.id.clone(),
            date: date.to_string(),
            hour,
            calls_made: calls,
            total_call_time: seconds_to_minutes(seconds),
            sales_made: sales,
        });
    }

    (records, errors)
}

/// Normalize fixed-position rows from an email attachment. The hour comes
/// from the email subject and applies to every row; sales are not present in
/// the dialer export and default to 0.
pub fn normalize_positional_rows(
    rows: &[Vec<String>],
    roster: &Roster,
    date: &str,
    hour: u8,
) -> (Vec<CallRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for row in rows {
        let name = RawTable::value(row, POS_AGENT_NAME);
        let calls = RawTable::value(row, POS_CALLS);
        let (Some(name), Some(calls)) = (name, calls) else {
            continue;
        };

        let Some(agent) = roster.find_agent_by_name(name) else {
            errors.push(format!("Agent \"{}\" not found", name));
            continue;
        };

        let seconds = parse_or_zero(RawTable::value(row, POS_SECONDS));

        records.push(CallRecord {
            agent_id: agent.id.clone(),
            date: date.to_string(),
            hour,
            calls_made: parse_or_zero(Some(calls)),
            total_call_time: seconds_to_minutes(seconds),
            sales_made: 0,
        });
    }

    (records, errors)
}

/// Validate agent-import rows: every row needs non-blank name, email, and
/// team values; anything else is dropped.
pub fn normalize_agent_rows(table: &RawTable, cols: &AgentColumns) -> Vec<AgentImportRow> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let name = RawTable::value(row, cols.name)?;
            let email = RawTable::value(row, cols.email)?;
            let team = RawTable::value(row, cols.team)?;
            Some(AgentImportRow {
                name: name.to_string(),
                email: email.to_string(),
                team_name: team.to_string(),
            })
        })
        .collect()
}
