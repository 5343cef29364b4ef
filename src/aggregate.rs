//! Rollup computation over a record snapshot.
//!
//! Every function here is a pure read: records plus roster in, summaries
//! out. Nothing is cached or incrementally maintained — callers pass the
//! full record set (typically a fresh store snapshot) on every query, so
//! concurrent calls are trivially consistent with whatever snapshot each
//! one observed.

use std::collections::{BTreeMap, HashSet};

use crate::roster::Roster;
use crate::types::{
    business_hours, Agent, AgentDailySummary, AgentHourCell, AgentHourRow, CallRecord,
    CampaignSummary, DailyPoint, DateFilter, HourlySummary, TeamSummary,
};

/// `total_time / total_calls`, 0.0 when no calls.
pub fn average_call_time(total_time: u32, total_calls: u32) -> f64 {
    if total_calls > 0 {
        f64::from(total_time) / f64::from(total_calls)
    } else {
        0.0
    }
}

/// `total_calls / agent_count`, 0.0 when the cohort is empty.
pub fn calls_per_agent(total_calls: u32, agent_count: usize) -> f64 {
    if agent_count > 0 {
        f64::from(total_calls) / agent_count as f64
    } else {
        0.0
    }
}

/// `sales / calls × 100`, 0.0 when no calls.
pub fn conversion_rate(total_sales: u32, total_calls: u32) -> f64 {
    if total_calls > 0 {
        f64::from(total_sales) / f64::from(total_calls) * 100.0
    } else {
        0.0
    }
}

/// Running totals accumulated over a record subset.
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    calls: u32,
    time: u32,
    sales: u32,
}

impl Totals {
    fn add(&mut self, record: &CallRecord) {
        self.calls += record.calls_made;
        self.time += record.total_call_time;
        self.sales += record.sales_made;
    }
}

fn sum_where<'a>(
    records: impl IntoIterator<Item = &'a CallRecord>,
    mut pred: impl FnMut(&CallRecord) -> bool,
) -> Totals {
    let mut totals = Totals::default();
    for record in records {
        if pred(record) {
            totals.add(record);
        }
    }
    totals
}

/// One agent's totals for one date.
pub fn agent_daily_summary(
    records: &[CallRecord],
    agent_id: &str,
    date: &str,
) -> AgentDailySummary {
    let t = sum_where(records, |r| r.agent_id == agent_id && r.date == date);
    AgentDailySummary {
        agent_id: agent_id.to_string(),
        date: date.to_string(),
        total_calls: t.calls,
        total_call_time: t.time,
        total_sales: t.sales,
        average_call_time: average_call_time(t.time, t.calls),
    }
}

/// Daily summary for every roster agent, in roster order.
pub fn daily_summaries(records: &[CallRecord], roster: &Roster, date: &str) -> Vec<AgentDailySummary> {
    roster
        .agents
        .iter()
        .map(|agent| agent_daily_summary(records, &agent.id, date))
        .collect()
}

/// Per-team rollup for every roster team, in roster order.
pub fn team_summaries(records: &[CallRecord], roster: &Roster, filter: &DateFilter) -> Vec<TeamSummary> {
    let by_team = roster.agents_by_team();
    roster
        .teams
        .iter()
        .map(|team| {
            let members = by_team.get(team.id.as_str()).cloned().unwrap_or_default();
            let member_ids: HashSet<&str> = members.iter().map(|a| a.id.as_str()).collect();
            let t = sum_where(records, |r| {
                member_ids.contains(r.agent_id.as_str()) && filter.matches(&r.date)
            });
            TeamSummary {
                team_id: team.id.clone(),
                total_calls: t.calls,
                total_call_time: t.time,
                total_sales: t.sales,
                agent_count: members.len(),
                average_call_time: average_call_time(t.time, t.calls),
                average_calls_per_agent: calls_per_agent(t.calls, members.len()),
            }
        })
        .collect()
}

/// Per-campaign rollup: every member team, transitively every member agent.
pub fn campaign_summaries(
    records: &[CallRecord],
    roster: &Roster,
    filter: &DateFilter,
) -> Vec<CampaignSummary> {
    roster
        .campaigns
        .iter()
        .map(|campaign| {
            let team_ids: HashSet<&str> = roster.team_ids_of_campaign(&campaign.id).into_iter().collect();
            let member_ids: HashSet<&str> = roster
                .agents
                .iter()
                .filter(|a| a.team_id.as_deref().is_some_and(|t| team_ids.contains(t)))
                .map(|a| a.id.as_str())
                .collect();
            let t = sum_where(records, |r| {
                member_ids.contains(r.agent_id.as_str()) && filter.matches(&r.date)
            });
            CampaignSummary {
                campaign_id: campaign.id.clone(),
                total_calls: t.calls,
                total_call_time: t.time,
                total_sales: t.sales,
                agent_count: member_ids.len(),
                team_count: team_ids.len(),
                average_call_time: average_call_time(t.time, t.calls),
                conversion_rate: conversion_rate(t.sales, t.calls),
            }
        })
        .collect()
}

/// Hourly rollup: always exactly ten buckets for hours 8..=17, zero-filled
/// where no data exists, never sparse. `campaign` optionally restricts the
/// records to agents transitively belonging to that campaign.
pub fn hourly_breakdown(
    records: &[CallRecord],
    roster: &Roster,
    filter: &DateFilter,
    campaign: Option<&str>,
) -> Vec<HourlySummary> {
    let member_ids: Option<HashSet<&str>> = campaign.map(|campaign_id| {
        let team_ids: HashSet<&str> = roster.team_ids_of_campaign(campaign_id).into_iter().collect();
        roster
            .agents
            .iter()
            .filter(|a| a.team_id.as_deref().is_some_and(|t| team_ids.contains(t)))
            .map(|a| a.id.as_str())
            .collect()
    });

    let in_scope = |r: &CallRecord| {
        filter.matches(&r.date)
            && member_ids
                .as_ref()
                .map_or(true, |ids| ids.contains(r.agent_id.as_str()))
    };

    business_hours()
        .map(|hour| {
            let mut totals = Totals::default();
            let mut active: HashSet<&str> = HashSet::new();
            for record in records {
                if record.hour == hour && in_scope(record) {
                    totals.add(record);
                    active.insert(record.agent_id.as_str());
                }
            }
            HourlySummary {
                hour,
                total_calls: totals.calls,
                total_call_time: totals.time,
                total_sales: totals.sales,
                active_agents: active.len(),
                average_call_time: average_call_time(totals.time, totals.calls),
            }
        })
        .collect()
}

/// The agent × hour grid for one date: one row per given agent, each with
/// exactly ten cells.
pub fn agent_hour_matrix(records: &[CallRecord], agents: &[Agent], date: &str) -> Vec<AgentHourRow> {
    agents
        .iter()
        .map(|agent| {
            let hours = business_hours()
                .map(|hour| {
                    let t = sum_where(records, |r| {
                        r.agent_id == agent.id && r.date == date && r.hour == hour
                    });
                    AgentHourCell {
                        hour,
                        calls: t.calls,
                        call_time: t.time,
                        sales: t.sales,
                    }
                })
                .collect();
            AgentHourRow { agent_id: agent.id.clone(), hours }
        })
        .collect()
}

/// Date-range time series for a single agent: matching records grouped by
/// date, summed per day, ascending by date string (ISO lexical order is
/// chronological order).
pub fn agent_time_series(
    records: &[CallRecord],
    agent_id: &str,
    filter: &DateFilter,
) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<&str, Totals> = BTreeMap::new();
    for record in records {
        if record.agent_id == agent_id && filter.matches(&record.date) {
            by_date.entry(record.date.as_str()).or_default().add(record);
        }
    }
    by_date
        .into_iter()
        .map(|(date, t)| DailyPoint {
            date: date.to_string(),
            total_calls: t.calls,
            total_call_time: t.time,
            total_sales: t.sales,
        })
        .collect()
}

/// Top-N agents by total calls. Descending by calls; ties keep the original
/// order of `summaries` (stable sort, no secondary key).
pub fn top_agents_by_calls(summaries: &[AgentDailySummary], n: usize) -> Vec<AgentDailySummary> {
    let mut ranked = summaries.to_vec();
    ranked.sort_by_key(|s| std::cmp::Reverse(s.total_calls));
    ranked.truncate(n);
    ranked
}
