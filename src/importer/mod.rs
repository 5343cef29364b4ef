//! Import pipeline orchestration.
//!
//! Three entry points, one per ingestion path:
//! - [`import_agent_csv`] — roster uploads (name/email/team headers),
//!   returning a creation plan the caller persists;
//! - [`import_call_csv`] — manual call-data uploads with header-resolved
//!   columns and the clamp-into-business-hours policy;
//! - [`import_email_attachment`] — fixed-position dialer exports, with the
//!   hour already extracted from the email subject.
//!
//! Error policy (see [`crate::error`]): structural problems abort before any
//! write, row problems accumulate into the report, store rejections fail the
//! whole batch with the store's message intact.

pub mod columns;
pub mod csv;
pub mod normalize;

use crate::error::ImportError;
use crate::roster::{plan_agent_import, AgentImportPlan, Roster};
use crate::store::CallRecordStore;

use columns::{AgentColumns, CallColumns};
use csv::{parse_positional, RawTable};

/// Outcome of a call-data import: what was written, what was skipped, why.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub row_errors: Vec<String>,
}

impl ImportReport {
    /// User-facing summary line: "Imported 12 records. Skipped 4 rows:
    /// e1, e2, e3 and 1 more".
    pub fn message(&self) -> String {
        let mut message = format!("Imported {} records", self.imported);
        if !self.row_errors.is_empty() {
            let shown: Vec<&str> = self.row_errors.iter().take(3).map(|e| e.as_str()).collect();
            message.push_str(&format!(
                ". Skipped {} rows: {}",
                self.row_errors.len(),
                shown.join(", ")
            ));
            if self.row_errors.len() > 3 {
                message.push_str(&format!(" and {} more", self.row_errors.len() - 3));
            }
        }
        message
    }
}

/// Import a manual call-data CSV and write it to the store as one batch.
///
/// `now_hour` supplies the default hour for files without an hour column.
/// `selected_hours`, when non-empty, restricts the batch to those hour
/// buckets before writing — other buckets for the same agent/date are left
/// untouched (selective replace).
pub fn import_call_csv(
    content: &str,
    roster: &Roster,
    store: &mut dyn CallRecordStore,
    date: &str,
    now_hour: u8,
    selected_hours: &[u8],
) -> Result<ImportReport, ImportError> {
    let table = RawTable::parse(content);
    if table.is_empty() {
        return Ok(ImportReport::default());
    }

    let cols = CallColumns::resolve(&table.headers)?;
    let (mut records, row_errors) =
        normalize::normalize_call_rows(&table, &cols, roster, date, now_hour);

    if !selected_hours.is_empty() {
        records.retain(|r| selected_hours.contains(&r.hour));
    }

    if !records.is_empty() {
        store
            .upsert(&records)
            .map_err(|e| ImportError::Write(e.to_string()))?;
    }

    if !row_errors.is_empty() {
        log::warn!("Call import skipped {} rows", row_errors.len());
    }
    log::info!("Imported {} call records for {}", records.len(), date);

    Ok(ImportReport { imported: records.len(), row_errors })
}

/// Import a manual call-data CSV dated today, defaulting absent hours to the
/// current wall-clock hour.
pub fn import_call_csv_today(
    content: &str,
    roster: &Roster,
    store: &mut dyn CallRecordStore,
    selected_hours: &[u8],
) -> Result<ImportReport, ImportError> {
    let now = chrono::Local::now();
    let date = now.format("%Y-%m-%d").to_string();
    let hour = chrono::Timelike::hour(&now) as u8;
    import_call_csv(content, roster, store, &date, hour, selected_hours)
}

/// Import a fixed-position email attachment. The caller has already
/// extracted `hour` from the subject (and skipped the email if it had none).
pub fn import_email_attachment(
    content: &str,
    roster: &Roster,
    store: &mut dyn CallRecordStore,
    date: &str,
    hour: u8,
) -> Result<ImportReport, ImportError> {
    let rows = parse_positional(content);
    let (records, row_errors) = normalize::normalize_positional_rows(&rows, roster, date, hour);

    if !records.is_empty() {
        store
            .upsert(&records)
            .map_err(|e| ImportError::Write(e.to_string()))?;
    }

    if !row_errors.is_empty() {
        log::warn!("Email import skipped {} rows", row_errors.len());
    }

    Ok(ImportReport { imported: records.len(), row_errors })
}

/// Parse an agent-roster CSV into a creation plan (new teams + agents).
/// Pure — the caller persists the plan. Empty input yields an empty plan.
pub fn import_agent_csv(content: &str, roster: &Roster) -> Result<AgentImportPlan, ImportError> {
    let table = RawTable::parse(content);
    if table.is_empty() {
        return Ok(AgentImportPlan::default());
    }

    let cols = AgentColumns::resolve(&table.headers)?;
    let rows = normalize::normalize_agent_rows(&table, &cols);
    Ok(plan_agent_import(roster, &rows))
}
