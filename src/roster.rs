//! Reference-data snapshot: agents, teams, campaigns, and the lookups the
//! pipeline runs against them.
//!
//! A `Roster` is an immutable input taken at call time. The import pipeline
//! resolves CSV names against it; the aggregation engine walks its
//! agent → team → campaign linkage. It is refetched wholesale by an external
//! collaborator — nothing here caches or mutates.

use std::collections::{HashMap, HashSet};

use crate::types::{Agent, Campaign, Team};

/// Label used when an agent has no team (or a team no campaign) and a rollup
/// still needs a display bucket for it.
pub const NO_TEAM_LABEL: &str = "No Team";

/// Rotating palette for teams auto-created during agent import.
const TEAM_COLORS: &[&str] = &[
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#84cc16", "#f97316",
];

/// Snapshot of reference data for one pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub agents: Vec<Agent>,
    pub teams: Vec<Team>,
    pub campaigns: Vec<Campaign>,
}

impl Roster {
    pub fn new(agents: Vec<Agent>, teams: Vec<Team>, campaigns: Vec<Campaign>) -> Self {
        Self { agents, teams, campaigns }
    }

    /// Resolve an agent by CSV name: case-insensitive, whitespace-trimmed,
    /// exact match. First match wins.
    pub fn find_agent_by_name(&self, name: &str) -> Option<&Agent> {
        let needle = name.trim().to_lowercase();
        self.agents
            .iter()
            .find(|agent| agent.name.trim().to_lowercase() == needle)
    }

    pub fn agent_by_id(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn team_by_id(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// The team an agent belongs to, if any.
    pub fn team_of(&self, agent: &Agent) -> Option<&Team> {
        agent.team_id.as_deref().and_then(|id| self.team_by_id(id))
    }

    /// The campaign an agent transitively belongs to, if any.
    pub fn campaign_of(&self, agent: &Agent) -> Option<&Campaign> {
        let team = self.team_of(agent)?;
        let campaign_id = team.campaign_id.as_deref()?;
        self.campaigns.iter().find(|c| c.id == campaign_id)
    }

    /// Display name for an agent's team ("No Team" for orphans).
    pub fn team_label(&self, agent: &Agent) -> String {
        self.team_of(agent)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| NO_TEAM_LABEL.to_string())
    }

    /// Agent ids grouped by team id. Agents without a team are omitted.
    pub fn agents_by_team(&self) -> HashMap<&str, Vec<&Agent>> {
        let mut map: HashMap<&str, Vec<&Agent>> = HashMap::new();
        for agent in &self.agents {
            if let Some(team_id) = agent.team_id.as_deref() {
                map.entry(team_id).or_default().push(agent);
            }
        }
        map
    }

    /// Team ids belonging to a campaign.
    pub fn team_ids_of_campaign(&self, campaign_id: &str) -> Vec<&str> {
        self.teams
            .iter()
            .filter(|t| t.campaign_id.as_deref() == Some(campaign_id))
            .map(|t| t.id.as_str())
            .collect()
    }
}

/// A validated agent-import row: all three identifier fields non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentImportRow {
    pub name: String,
    pub email: String,
    pub team_name: String,
}

/// What an agent import would create: teams that don't exist yet (colored
/// from the rotating palette) and the agents themselves, linked to either an
/// existing team or one of the new ones. The caller persists both.
#[derive(Debug, Clone, Default)]
pub struct AgentImportPlan {
    pub new_teams: Vec<Team>,
    pub agents: Vec<Agent>,
}

/// Build the import plan for a batch of validated agent rows against the
/// current roster. Team names match exactly (not case-folded — team naming
/// is controlled by the same spreadsheet both sides of the import).
pub fn plan_agent_import(roster: &Roster, rows: &[AgentImportRow]) -> AgentImportPlan {
    let existing: HashMap<&str, &str> = roster
        .teams
        .iter()
        .map(|t| (t.name.as_str(), t.id.as_str()))
        .collect();

    // Teams to create, in first-seen order.
    let mut seen: HashSet<&str> = HashSet::new();
    let mut new_teams: Vec<Team> = Vec::new();
    for row in rows {
        let name = row.team_name.as_str();
        if !existing.contains_key(name) && seen.insert(name) {
            new_teams.push(Team {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                color: TEAM_COLORS[new_teams.len() % TEAM_COLORS.len()].to_string(),
                campaign_id: None,
            });
        }
    }

    let mut team_ids: HashMap<&str, &str> = existing;
    for team in &new_teams {
        team_ids.insert(team.name.as_str(), team.id.as_str());
    }

    let agents = rows
        .iter()
        .map(|row| Agent {
            id: uuid::Uuid::new_v4().to_string(),
            name: row.name.clone(),
            email: row.email.clone(),
            team_id: team_ids.get(row.team_name.as_str()).map(|id| id.to_string()),
            is_active: true,
        })
        .collect();

    AgentImportPlan { new_teams, agents }
}
