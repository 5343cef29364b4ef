//! SQLite-backed persistence for call records and reference data.
//!
//! The database is a local mirror of whatever upstream system owns the
//! roster; the import pipeline only ever touches it through the
//! [`CallRecordStore`] trait so hosts can substitute their own store.

use std::path::Path;

use rusqlite::{params, Connection};
use thiserror::Error;

use crate::roster::Roster;
use crate::store::{CallRecordStore, StoreError};
use crate::types::{Agent, Campaign, CallRecord, Team};

/// Errors specific to database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// SQLite connection wrapper.
///
/// Intentionally NOT `Clone` or `Sync`: hold it behind a mutex if shared.
pub struct CallDb {
    conn: Connection,
}

impl CallDb {
    /// Open (or create) a database file and apply the schema.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// In-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, DbError> {
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        // Idempotent: every statement uses IF NOT EXISTS.
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection for ad-hoc queries.
    pub fn conn_ref(&self) -> &Connection {
        &self.conn
    }

    // =========================================================================
    // Reference data
    // =========================================================================

    /// Replace the stored reference data with a fresh roster snapshot.
    pub fn save_roster(&mut self, roster: &Roster) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM campaigns", [])?;
        tx.execute("DELETE FROM teams", [])?;
        tx.execute("DELETE FROM agents", [])?;

        for campaign in &roster.campaigns {
            tx.execute(
                "INSERT INTO campaigns (id, name, color, is_active) VALUES (?1, ?2, ?3, ?4)",
                params![campaign.id, campaign.name, campaign.color, campaign.is_active],
            )?;
        }
        for team in &roster.teams {
            tx.execute(
                "INSERT INTO teams (id, name, color, campaign_id) VALUES (?1, ?2, ?3, ?4)",
                params![team.id, team.name, team.color, team.campaign_id],
            )?;
        }
        for agent in &roster.agents {
            tx.execute(
                "INSERT INTO agents (id, name, email, team_id, is_active)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![agent.id, agent.name, agent.email, agent.team_id, agent.is_active],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Load the full roster.
    pub fn load_roster(&self) -> Result<Roster, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, team_id, is_active FROM agents ORDER BY name")?;
        let agents = stmt
            .query_map([], |row| {
                Ok(Agent {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    team_id: row.get(3)?,
                    is_active: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, campaign_id FROM teams ORDER BY name")?;
        let teams = stmt
            .query_map([], |row| {
                Ok(Team {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    color: row.get(2)?,
                    campaign_id: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, is_active FROM campaigns ORDER BY name")?;
        let campaigns = stmt
            .query_map([], |row| {
                Ok(Campaign {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    color: row.get(2)?,
                    is_active: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Roster::new(agents, teams, campaigns))
    }

    /// Append newly created teams and agents from an agent import.
    pub fn add_teams_and_agents(
        &mut self,
        teams: &[Team],
        agents: &[Agent],
    ) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        for team in teams {
            tx.execute(
                "INSERT OR REPLACE INTO teams (id, name, color, campaign_id)
                 VALUES (?1, ?2, ?3, ?4)",
                params![team.id, team.name, team.color, team.campaign_id],
            )?;
        }
        for agent in agents {
            tx.execute(
                "INSERT OR REPLACE INTO agents (id, name, email, team_id, is_active)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![agent.id, agent.name, agent.email, agent.team_id, agent.is_active],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl CallRecordStore for CallDb {
    /// One transaction per batch; `INSERT OR REPLACE` on the composite
    /// primary key gives the per-key replace semantics.
    fn upsert(&mut self, records: &[CallRecord]) -> Result<(), StoreError> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| StoreError(e.to_string()))?;
        for record in records {
            tx.execute(
                "INSERT OR REPLACE INTO call_records
                   (agent_id, date, hour, calls_made, total_call_time, sales_made)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.agent_id,
                    record.date,
                    record.hour,
                    record.calls_made,
                    record.total_call_time,
                    record.sales_made,
                ],
            )
            .map_err(|e| StoreError(e.to_string()))?;
        }
        tx.commit().map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<CallRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT agent_id, date, hour, calls_made, total_call_time, sales_made
                 FROM call_records
                 ORDER BY date, hour, agent_id",
            )
            .map_err(|e| StoreError(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CallRecord {
                    agent_id: row.get(0)?,
                    date: row.get(1)?,
                    hour: row.get(2)?,
                    calls_made: row.get(3)?,
                    total_call_time: row.get(4)?,
                    sales_made: row.get(5)?,
                })
            })
            .map_err(|e| StoreError(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| StoreError(e.to_string()))?);
        }
        Ok(records)
    }

    fn clear_all(&mut self) -> Result<(), StoreError> {
        log::info!("Clearing all call records and reference data");
        let tx = self
            .conn
            .transaction()
            .map_err(|e| StoreError(e.to_string()))?;
        for table in ["call_records", "agents", "teams", "campaigns"] {
            tx.execute(&format!("DELETE FROM {}", table), [])
                .map_err(|e| StoreError(e.to_string()))?;
        }
        tx.commit().map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(agent: &str, date: &str, hour: u8, calls: u32) -> CallRecord {
        CallRecord {
            agent_id: agent.to_string(),
            date: date.to_string(),
            hour,
            calls_made: calls,
            total_call_time: 10,
            sales_made: 1,
        }
    }

    #[test]
    fn test_upsert_replaces_by_key() {
        let mut db = CallDb::open_in_memory().unwrap();
        db.upsert(&[record("a1", "2024-01-01", 9, 5)]).unwrap();
        db.upsert(&[record("a1", "2024-01-01", 9, 8)]).unwrap();

        let snap = db.snapshot().unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].calls_made, 8);
    }

    #[test]
    fn test_upsert_idempotent_batch() {
        let batch = vec![
            record("a1", "2024-01-01", 9, 5),
            record("a2", "2024-01-01", 9, 3),
        ];
        let mut db = CallDb::open_in_memory().unwrap();
        db.upsert(&batch).unwrap();
        db.upsert(&batch).unwrap();
        assert_eq!(db.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn test_roster_round_trip() {
        let mut db = CallDb::open_in_memory().unwrap();
        let roster = Roster::new(
            vec![Agent {
                id: "a1".to_string(),
                name: "John Smith".to_string(),
                email: "john@x.com".to_string(),
                team_id: Some("t1".to_string()),
                is_active: true,
            }],
            vec![Team {
                id: "t1".to_string(),
                name: "Alpha".to_string(),
                color: "#3b82f6".to_string(),
                campaign_id: None,
            }],
            Vec::new(),
        );
        db.save_roster(&roster).unwrap();

        let loaded = db.load_roster().unwrap();
        assert_eq!(loaded.agents.len(), 1);
        assert_eq!(loaded.teams.len(), 1);
        assert_eq!(loaded.agents[0].team_id.as_deref(), Some("t1"));
        assert!(loaded.find_agent_by_name("john smith").is_some());
    }

    #[test]
    fn test_clear_all_wipes_everything() {
        let mut db = CallDb::open_in_memory().unwrap();
        db.upsert(&[record("a1", "2024-01-01", 9, 5)]).unwrap();
        db.clear_all().unwrap();
        assert!(db.snapshot().unwrap().is_empty());
        assert!(db.load_roster().unwrap().agents.is_empty());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("callboard.db");
        {
            let mut db = CallDb::open(&path).unwrap();
            db.upsert(&[record("a1", "2024-01-01", 9, 5)]).unwrap();
        }
        let db = CallDb::open(&path).unwrap();
        assert_eq!(db.snapshot().unwrap().len(), 1);
    }
}
