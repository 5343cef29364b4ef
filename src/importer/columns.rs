//! Header → semantic column resolution.
//!
//! Uploaded spreadsheets name their columns loosely ("Agent Name", "agent",
//! "Total Calls", "Talk Time (seconds)" ...), so each semantic field resolves
//! to the FIRST header, in file order, matching its discriminating substring.
//! There is no scoring — first match wins, ties included.
//!
//! Email attachments from the dialer ignore header text entirely and use
//! fixed positions (column B = name, E = calls, F = seconds).

use crate::error::ImportError;

/// Fixed positions for email-attachment CSVs (0-based: B, E, F).
pub const POS_AGENT_NAME: usize = 1;
pub const POS_CALLS: usize = 4;
pub const POS_SECONDS: usize = 5;

/// Resolved columns for an agent-roster import. All three are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentColumns {
    pub name: usize,
    pub email: usize,
    pub team: usize,
}

impl AgentColumns {
    /// Resolve against a lower-cased header row. Fails with every missing
    /// field named, so the user can fix the file in one pass.
    pub fn resolve(headers: &[String]) -> Result<Self, ImportError> {
        let name = find(headers, |h| h.contains("name"));
        let email = find(headers, |h| h.contains("email"));
        let team = find(headers, |h| h.contains("team"));

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name".to_string());
        }
        if email.is_none() {
            missing.push("email".to_string());
        }
        if team.is_none() {
            missing.push("team".to_string());
        }
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            team: team.unwrap_or_default(),
        })
    }
}

/// Resolved columns for a call-data import. Agent name and calls are
/// required; the rest are optional and independently resolved (a header like
/// "time" can legitimately serve both the seconds and hour lookups — the
/// first-match rule applies to each field on its own).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallColumns {
    pub agent_name: usize,
    pub calls: usize,
    pub seconds: Option<usize>,
    pub sales: Option<usize>,
    pub hour: Option<usize>,
}

impl CallColumns {
    pub fn resolve(headers: &[String]) -> Result<Self, ImportError> {
        let agent_name = find(headers, |h| {
            (h.contains("agent") && h.contains("name")) || h == "name" || h == "agent"
        });
        let calls = find(headers, |h| h.contains("call"));

        let mut missing = Vec::new();
        if agent_name.is_none() {
            missing.push("agent name".to_string());
        }
        if calls.is_none() {
            missing.push("calls".to_string());
        }
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        Ok(Self {
            agent_name: agent_name.unwrap_or_default(),
            calls: calls.unwrap_or_default(),
            seconds: find(headers, |h| h.contains("second") || h.contains("time")),
            sales: find(headers, |h| h.contains("sale") || h.contains("conversion")),
            hour: find(headers, |h| h.contains("hour") || h == "time"),
        })
    }
}

fn find(headers: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers.iter().position(|h| pred(h.as_str()))
}
