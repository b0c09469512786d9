//! SQLite persistence for workflow run history.
//!
//! Stores a record per workflow run (deployment, migration, scan, export,
//! uplink) together with its console log lines, so history survives
//! restarts.
//! Schema versioning follows the usual pattern: version 1 creates the
//! core tables, version 2 adds the architect transcript table.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use uuid::Uuid;

use swarm_console_sdk::{LogEntry, Role, Severity, WorkflowStage};

pub struct Database {
    conn: Connection,
}

/// Serializable run record for database storage.
#[derive(Debug, Clone)]
pub struct PersistedRun {
    pub id: Uuid,
    pub kind: RunKind,
    pub module_id: String,
    pub target_id: String,
    pub stage: WorkflowStage,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Deployment,
    Migration,
    Scan,
    Export,
    Uplink,
}

/// Per-module run statistics.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

impl Database {
    /// Open (or create) the database at the specified path.
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self { conn })
    }

    /// In-memory database for tests.
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS runs (
                id TEXT PRIMARY KEY,

                kind TEXT NOT NULL,
                module_id TEXT NOT NULL,
                target_id TEXT NOT NULL,

                stage TEXT NOT NULL,
                started_at TEXT NOT NULL,
                finished_at TEXT,

                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_runs_module_id ON runs(module_id);
            CREATE INDEX IF NOT EXISTS idx_runs_stage ON runs(stage);
            CREATE INDEX IF NOT EXISTS idx_runs_started_at ON runs(started_at DESC);

            CREATE TABLE IF NOT EXISTS run_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                run_id TEXT NOT NULL,
                sequence INTEGER NOT NULL,
                timestamp TEXT NOT NULL,
                source TEXT NOT NULL,
                severity TEXT NOT NULL,
                message TEXT NOT NULL,

                FOREIGN KEY(run_id) REFERENCES runs(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_run_logs_run_id ON run_logs(run_id, sequence);

            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (1)",
            [],
        )?;

        self.migrate_to_v2()?;

        Ok(())
    }

    /// Version 2 adds persisted architect transcripts.
    fn migrate_to_v2(&self) -> Result<()> {
        if self.get_schema_version()? < 2 {
            self.conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS architect_transcript (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    role TEXT NOT NULL,
                    text TEXT NOT NULL,
                    timestamp TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                );

                CREATE INDEX IF NOT EXISTS idx_transcript_timestamp
                ON architect_transcript(timestamp DESC);

                UPDATE schema_version SET version = 2;
                "#,
            )?;
        }
        Ok(())
    }

    pub fn get_schema_version(&self) -> Result<i32> {
        let version: i32 =
            self.conn
                .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                    row.get(0)
                })?;
        Ok(version)
    }

    pub fn insert_run(&self, run: &PersistedRun) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO runs (
                id, kind, module_id, target_id, stage, started_at, finished_at,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                run.id.to_string(),
                kind_to_string(run.kind),
                run.module_id,
                run.target_id,
                stage_to_string(run.stage),
                run.started_at.to_rfc3339(),
                run.finished_at.map(|dt| dt.to_rfc3339()),
                run.created_at.to_rfc3339(),
                run.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn update_run(
        &self,
        id: &Uuid,
        stage: WorkflowStage,
        finished_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.conn.execute(
            r#"
            UPDATE runs
            SET stage = ?1, finished_at = ?2, updated_at = ?3
            WHERE id = ?4
            "#,
            params![
                stage_to_string(stage),
                finished_at.map(|dt| dt.to_rfc3339()),
                Utc::now().to_rfc3339(),
                id.to_string()
            ],
        )?;
        Ok(())
    }

    pub fn get_run(&self, id: &Uuid) -> Result<Option<PersistedRun>> {
        let result = self
            .conn
            .query_row(
                r#"
                SELECT id, kind, module_id, target_id, stage, started_at, finished_at,
                       created_at, updated_at
                FROM runs
                WHERE id = ?1
                "#,
                params![id.to_string()],
                map_run_row,
            )
            .optional()?;
        Ok(result)
    }

    /// List runs newest first, optionally filtered by module.
    pub fn list_runs(
        &self,
        limit: usize,
        offset: usize,
        module_id: Option<&str>,
    ) -> Result<Vec<PersistedRun>> {
        let query = if module_id.is_some() {
            r#"
            SELECT id, kind, module_id, target_id, stage, started_at, finished_at,
                   created_at, updated_at
            FROM runs
            WHERE module_id = ?1
            ORDER BY started_at DESC
            LIMIT ?2 OFFSET ?3
            "#
        } else {
            r#"
            SELECT id, kind, module_id, target_id, stage, started_at, finished_at,
                   created_at, updated_at
            FROM runs
            ORDER BY started_at DESC
            LIMIT ?1 OFFSET ?2
            "#
        };

        let mut stmt = self.conn.prepare(query)?;

        let runs = if let Some(module) = module_id {
            stmt.query_map(params![module, limit, offset], map_run_row)?
                .collect::<Result<Vec<_>, _>>()?
        } else {
            stmt.query_map(params![limit, offset], map_run_row)?
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(runs)
    }

    pub fn insert_log(&self, run_id: &Uuid, sequence: usize, entry: &LogEntry) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO run_logs (run_id, sequence, timestamp, source, severity, message)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                run_id.to_string(),
                sequence,
                entry.timestamp.to_rfc3339(),
                entry.source,
                severity_to_string(entry.severity),
                entry.message
            ],
        )?;
        Ok(())
    }

    /// Batch insert, one transaction for the whole slice.
    pub fn batch_insert_logs(&self, run_id: &Uuid, entries: &[LogEntry]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO run_logs (run_id, sequence, timestamp, source, severity, message)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;

            for (sequence, entry) in entries.iter().enumerate() {
                stmt.execute(params![
                    run_id.to_string(),
                    sequence,
                    entry.timestamp.to_rfc3339(),
                    entry.source,
                    severity_to_string(entry.severity),
                    entry.message
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    pub fn get_logs(&self, run_id: &Uuid, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let query = match limit {
            Some(limit) => format!(
                r#"
                SELECT id, timestamp, source, severity, message
                FROM run_logs
                WHERE run_id = ?1
                ORDER BY sequence ASC
                LIMIT {}
                "#,
                limit
            ),
            None => r#"
            SELECT id, timestamp, source, severity, message
            FROM run_logs
            WHERE run_id = ?1
            ORDER BY sequence ASC
            "#
            .to_string(),
        };

        let mut stmt = self.conn.prepare(&query)?;
        let entries = stmt
            .query_map(params![run_id.to_string()], |row| {
                let id: i64 = row.get(0)?;
                let timestamp: String = row.get(1)?;
                let source: String = row.get(2)?;
                let severity: String = row.get(3)?;
                let message: String = row.get(4)?;
                Ok((id, timestamp, source, severity, message))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        entries
            .into_iter()
            .map(|(id, timestamp, source, severity, message)| {
                Ok(LogEntry {
                    id: format!("log-{id}"),
                    timestamp: DateTime::parse_from_rfc3339(&timestamp)
                        .map_err(|e| anyhow!("bad timestamp: {e}"))?
                        .with_timezone(&Utc),
                    source,
                    message,
                    severity: string_to_severity(&severity)?,
                })
            })
            .collect()
    }

    pub fn delete_runs_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM runs WHERE started_at < ?1",
            params![cutoff.to_rfc3339()],
        )?;
        Ok(deleted)
    }

    pub fn get_module_stats(&self, module_id: &str) -> Result<RunStats> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT
                COUNT(*) as total,
                SUM(CASE WHEN stage = 'Result' OR stage = 'FollowOn' OR stage = 'Cooldown'
                    THEN 1 ELSE 0 END) as completed,
                SUM(CASE WHEN stage = 'Failed' THEN 1 ELSE 0 END) as failed
            FROM runs
            WHERE module_id = ?1
            "#,
        )?;

        let stats = stmt.query_row(params![module_id], |row| {
            Ok(RunStats {
                total: row.get(0)?,
                completed: row.get::<_, Option<usize>>(1)?.unwrap_or(0),
                failed: row.get::<_, Option<usize>>(2)?.unwrap_or(0),
            })
        })?;

        Ok(stats)
    }

    /// Append one architect turn to the persisted transcript.
    pub fn insert_transcript_turn(&self, role: Role, text: &str) -> Result<i64> {
        let role_str = match role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        self.conn.execute(
            "INSERT INTO architect_transcript (role, text, timestamp) VALUES (?1, ?2, ?3)",
            params![role_str, text, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent transcript turns, returned oldest first.
    pub fn get_transcript(&self, limit: usize) -> Result<Vec<(Role, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT role, text FROM architect_transcript
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let turns = stmt
            .query_map([limit], |row| {
                let role: String = row.get(0)?;
                let text: String = row.get(1)?;
                Ok((role, text))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        turns
            .into_iter()
            .rev()
            .map(|(role, text)| {
                let role = match role.as_str() {
                    "user" => Role::User,
                    "assistant" => Role::Assistant,
                    other => return Err(anyhow!("unknown transcript role: {other}")),
                };
                Ok((role, text))
            })
            .collect()
    }
}

fn kind_to_string(kind: RunKind) -> &'static str {
    match kind {
        RunKind::Deployment => "Deployment",
        RunKind::Migration => "Migration",
        RunKind::Scan => "Scan",
        RunKind::Export => "Export",
        RunKind::Uplink => "Uplink",
    }
}

fn string_to_kind(s: &str) -> Result<RunKind> {
    match s {
        "Deployment" => Ok(RunKind::Deployment),
        "Migration" => Ok(RunKind::Migration),
        "Scan" => Ok(RunKind::Scan),
        "Export" => Ok(RunKind::Export),
        "Uplink" => Ok(RunKind::Uplink),
        _ => Err(anyhow!("unknown run kind: {}", s)),
    }
}

fn stage_to_string(stage: WorkflowStage) -> &'static str {
    match stage {
        WorkflowStage::Configuring => "Configuring",
        WorkflowStage::Processing => "Processing",
        WorkflowStage::Result => "Result",
        WorkflowStage::FollowOn => "FollowOn",
        WorkflowStage::Cooldown => "Cooldown",
        WorkflowStage::Failed => "Failed",
    }
}

fn string_to_stage(s: &str) -> Result<WorkflowStage> {
    match s {
        "Configuring" => Ok(WorkflowStage::Configuring),
        "Processing" => Ok(WorkflowStage::Processing),
        "Result" => Ok(WorkflowStage::Result),
        "FollowOn" => Ok(WorkflowStage::FollowOn),
        "Cooldown" => Ok(WorkflowStage::Cooldown),
        "Failed" => Ok(WorkflowStage::Failed),
        _ => Err(anyhow!("unknown workflow stage: {}", s)),
    }
}

fn severity_to_string(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Success => "success",
        Severity::Warning => "warning",
        Severity::Error => "error",
        Severity::Critical => "critical",
    }
}

fn string_to_severity(s: &str) -> Result<Severity> {
    match s {
        "info" => Ok(Severity::Info),
        "success" => Ok(Severity::Success),
        "warning" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        "critical" => Ok(Severity::Critical),
        _ => Err(anyhow!("unknown severity: {}", s)),
    }
}

fn map_run_row(row: &Row) -> rusqlite::Result<PersistedRun> {
    let id_str: String = row.get(0)?;
    let kind_str: String = row.get(1)?;
    let module_id: String = row.get(2)?;
    let target_id: String = row.get(3)?;
    let stage_str: String = row.get(4)?;
    let started_at_str: String = row.get(5)?;
    let finished_at_str: Option<String> = row.get(6)?;
    let created_at_str: String = row.get(7)?;
    let updated_at_str: String = row.get(8)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let kind = string_to_kind(&kind_str).map_err(|_| rusqlite::Error::InvalidQuery)?;
    let stage = string_to_stage(&stage_str).map_err(|_| rusqlite::Error::InvalidQuery)?;

    let parse_utc = |idx: usize, s: &str| {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
    };

    let started_at = parse_utc(5, &started_at_str)?;
    let finished_at = match finished_at_str {
        Some(s) => Some(parse_utc(6, &s)?),
        None => None,
    };
    let created_at = parse_utc(7, &created_at_str)?;
    let updated_at = parse_utc(8, &updated_at_str)?;

    Ok(PersistedRun {
        id,
        kind,
        module_id,
        target_id,
        stage,
        started_at,
        finished_at,
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_run(id: Uuid) -> PersistedRun {
        let now = Utc::now();
        PersistedRun {
            id,
            kind: RunKind::Deployment,
            module_id: "HFT_ARBITRAGE_CORE".to_string(),
            target_id: "LOCAL_HOST".to_string(),
            stage: WorkflowStage::Processing,
            started_at: now,
            finished_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn schema_initializes_to_latest_version() {
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();
        assert_eq!(db.get_schema_version().unwrap(), 2);
    }

    #[test]
    fn insert_and_retrieve_run() {
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();

        let run_id = Uuid::new_v4();
        db.insert_run(&create_test_run(run_id)).unwrap();

        let retrieved = db.get_run(&run_id).unwrap().unwrap();
        assert_eq!(retrieved.id, run_id);
        assert_eq!(retrieved.module_id, "HFT_ARBITRAGE_CORE");
        assert_eq!(retrieved.stage, WorkflowStage::Processing);
    }

    #[test]
    fn update_run_stage() {
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();

        let run_id = Uuid::new_v4();
        db.insert_run(&create_test_run(run_id)).unwrap();

        db.update_run(&run_id, WorkflowStage::Result, Some(Utc::now()))
            .unwrap();

        let updated = db.get_run(&run_id).unwrap().unwrap();
        assert_eq!(updated.stage, WorkflowStage::Result);
        assert!(updated.finished_at.is_some());
    }

    #[test]
    fn list_runs_with_pagination_and_filter() {
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();

        for i in 0..5 {
            let mut run = create_test_run(Uuid::new_v4());
            if i % 2 == 0 {
                run.module_id = "AEGIS_FIREWALL_DAEMON".to_string();
            }
            db.insert_run(&run).unwrap();
        }

        assert_eq!(db.list_runs(10, 0, None).unwrap().len(), 5);
        assert_eq!(db.list_runs(2, 0, None).unwrap().len(), 2);
        assert_eq!(db.list_runs(2, 4, None).unwrap().len(), 1);
        assert_eq!(
            db.list_runs(10, 0, Some("AEGIS_FIREWALL_DAEMON"))
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn logs_round_trip_in_sequence_order() {
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();

        let run_id = Uuid::new_v4();
        db.insert_run(&create_test_run(run_id)).unwrap();

        let entries = vec![
            LogEntry::new("DEPLOY", "Analyzing target env", Severity::Info),
            LogEntry::new("DEPLOY", "Bundling artifacts", Severity::Info),
            LogEntry::new("DEPLOY", "Deployment complete", Severity::Success),
        ];
        db.batch_insert_logs(&run_id, &entries).unwrap();

        let retrieved = db.get_logs(&run_id, None).unwrap();
        assert_eq!(retrieved.len(), 3);
        assert_eq!(retrieved[0].message, "Analyzing target env");
        assert_eq!(retrieved[2].severity, Severity::Success);

        let limited = db.get_logs(&run_id, Some(2)).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn cascade_delete_removes_logs() {
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();

        let run_id = Uuid::new_v4();
        db.insert_run(&create_test_run(run_id)).unwrap();
        db.insert_log(
            &run_id,
            0,
            &LogEntry::new("DEPLOY", "starting", Severity::Info),
        )
        .unwrap();

        let cutoff = Utc::now() + Duration::minutes(1);
        assert_eq!(db.delete_runs_before(cutoff).unwrap(), 1);
        assert!(db.get_logs(&run_id, None).unwrap().is_empty());
    }

    #[test]
    fn module_stats_count_outcomes() {
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();

        for stage in [
            WorkflowStage::Result,
            WorkflowStage::Failed,
            WorkflowStage::Processing,
            WorkflowStage::Cooldown,
        ] {
            let mut run = create_test_run(Uuid::new_v4());
            run.stage = stage;
            db.insert_run(&run).unwrap();
        }

        let stats = db.get_module_stats("HFT_ARBITRAGE_CORE").unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn transcript_returns_chronological_order() {
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();

        db.insert_transcript_turn(Role::Assistant, "AUTHENTICATED.")
            .unwrap();
        db.insert_transcript_turn(Role::User, "Build me an export.")
            .unwrap();

        let turns = db.get_transcript(10).unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].0, Role::Assistant);
        assert_eq!(turns[1].0, Role::User);
    }
}
