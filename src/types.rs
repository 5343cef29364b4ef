//! Core data model for the reporting pipeline.
//!
//! Records flow CSV → import pipeline → store → aggregation, so every type
//! here is a plain value with serde derives (camelCase, consumed by the
//! frontend). Dates travel as ISO-8601 `YYYY-MM-DD` strings; lexical order
//! on them is chronological order, which the aggregation code relies on.

use serde::{Deserialize, Serialize};

/// First hour of the business day (8am).
pub const FIRST_HOUR: u8 = 8;
/// Last hour of the business day (the 17:00–18:00 bucket).
pub const LAST_HOUR: u8 = 17;

/// The ten fixed hourly buckets 8..=17. Hourly rollups always emit all of
/// them, zero-filled, never sparse.
pub fn business_hours() -> impl Iterator<Item = u8> {
    FIRST_HOUR..=LAST_HOUR
}

/// Whether an hour falls inside the business-hours window.
pub fn is_business_hour(hour: u8) -> bool {
    (FIRST_HOUR..=LAST_HOUR).contains(&hour)
}

/// A call-center agent. `name` is the join key used by CSV import
/// (case-insensitive, trimmed, exact match).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    /// `None` for orphaned agents; rollups bucket these under "No Team".
    #[serde(default)]
    pub team_id: Option<String>,
    pub is_active: bool,
}

/// A team of agents, belonging to one campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    /// Display color (hex) used by the frontend.
    pub color: String,
    #[serde(default)]
    pub campaign_id: Option<String>,
}

/// A campaign owning zero or more teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub color: String,
    pub is_active: bool,
}

/// One hour of one agent's activity on one date — the atomic unit of the
/// whole system. Uniquely identified by `(agent_id, date, hour)`; an upsert
/// at an existing key fully replaces the prior value, it never accumulates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub agent_id: String,
    /// ISO-8601 calendar date, e.g. "2024-01-01".
    pub date: String,
    /// Business hour, 8..=17.
    pub hour: u8,
    pub calls_made: u32,
    /// Total call time in whole minutes.
    pub total_call_time: u32,
    pub sales_made: u32,
}

/// The unique key of a [`CallRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallKey {
    pub agent_id: String,
    pub date: String,
    pub hour: u8,
}

impl From<&CallRecord> for CallKey {
    fn from(record: &CallRecord) -> Self {
        Self {
            agent_id: record.agent_id.clone(),
            date: record.date.clone(),
            hour: record.hour,
        }
    }
}

/// Date filter applied by aggregation queries: a single date, or an
/// inclusive range.
#[derive(Debug, Clone)]
pub enum DateFilter {
    On(String),
    Between { start: String, end: String },
}

impl DateFilter {
    /// Whether an ISO date string falls inside the filter. String comparison
    /// is sufficient — ISO dates sort chronologically.
    pub fn matches(&self, date: &str) -> bool {
        match self {
            DateFilter::On(d) => date == d,
            DateFilter::Between { start, end } => date >= start.as_str() && date <= end.as_str(),
        }
    }
}

/// One agent's totals for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDailySummary {
    pub agent_id: String,
    pub date: String,
    pub total_calls: u32,
    pub total_call_time: u32,
    pub total_sales: u32,
    /// `total_call_time / total_calls`, 0.0 when no calls.
    pub average_call_time: f64,
}

/// Rollup across every agent in a team.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub team_id: String,
    pub total_calls: u32,
    pub total_call_time: u32,
    pub total_sales: u32,
    pub agent_count: usize,
    pub average_call_time: f64,
    pub average_calls_per_agent: f64,
}

/// Rollup across every team (transitively, every agent) in a campaign.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub campaign_id: String,
    pub total_calls: u32,
    pub total_call_time: u32,
    pub total_sales: u32,
    pub agent_count: usize,
    pub team_count: usize,
    pub average_call_time: f64,
    /// `total_sales / total_calls × 100`, 0.0 when no calls.
    pub conversion_rate: f64,
}

/// One of the ten fixed hourly buckets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlySummary {
    pub hour: u8,
    pub total_calls: u32,
    pub total_call_time: u32,
    pub total_sales: u32,
    /// Distinct agents with at least one record in this bucket.
    pub active_agents: usize,
    pub average_call_time: f64,
}

/// One cell of the agent × hour grid.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentHourCell {
    pub hour: u8,
    pub calls: u32,
    pub call_time: u32,
    pub sales: u32,
}

/// One row of the agent × hour grid: always exactly ten cells, 8..=17.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentHourRow {
    pub agent_id: String,
    pub hours: Vec<AgentHourCell>,
}

/// One day of a single agent's date-range time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: String,
    pub total_calls: u32,
    pub total_call_time: u32,
    pub total_sales: u32,
}
