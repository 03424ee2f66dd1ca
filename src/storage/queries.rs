//! Run persistence queries

use super::{models::*, schema::LineupDatabase};
use crate::cli::types::RunId;
use crate::dfs::request::{LineupOutput, OptimizeResponse};
use crate::dfs::types::SolveStatus;
use anyhow::{bail, Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

impl LineupDatabase {
    /// Store a successful response and its lineups in one transaction
    pub fn save_run(&mut self, response: &OptimizeResponse) -> Result<RunId> {
        if !response.success {
            bail!("only successful runs are stored");
        }
        let lineups = response.lineups.as_deref().unwrap_or_default();
        let salary_cap = response
            .optimizer_info
            .as_ref()
            .map(|info| info.salary_cap)
            .context("response is missing optimizer info")?;
        let best_points = lineups
            .iter()
            .map(|l| l.total_points)
            .fold(None, |best: Option<f64>, p| Some(best.map_or(p, |b| b.max(p))));
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO runs (site, sport, requested, generated, salary_cap, best_points, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                response.site,
                response.sport,
                response.num_requested.unwrap_or(lineups.len()) as i64,
                lineups.len() as i64,
                salary_cap,
                best_points,
                now
            ],
        )?;
        let run_id = tx.last_insert_rowid();

        for lineup in lineups {
            tx.execute(
                "INSERT INTO run_lineups
                 (run_id, lineup_number, total_salary, total_points, status, players)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    run_id,
                    lineup.lineup_number as i64,
                    lineup.total_salary,
                    lineup.total_points,
                    lineup.status.to_string(),
                    serde_json::to_string(&lineup.players)?
                ],
            )?;
        }
        tx.commit()?;

        debug!(run_id, lineups = lineups.len(), "Stored optimization run");
        Ok(RunId::new(run_id))
    }

    /// Most recent runs first
    pub fn list_runs(&self, limit: usize) -> Result<Vec<StoredRun>> {
        let mut stmt = self.conn.prepare(
            "SELECT run_id, site, sport, requested, generated, salary_cap, best_points, created_at
             FROM runs ORDER BY run_id DESC LIMIT ?",
        )?;

        let rows = stmt.query_map(params![limit as i64], row_to_run)?;

        let mut runs = Vec::new();
        for row in rows {
            runs.push(row?);
        }
        Ok(runs)
    }

    pub fn load_run(&self, id: RunId) -> Result<Option<RunDetail>> {
        let run = self
            .conn
            .query_row(
                "SELECT run_id, site, sport, requested, generated, salary_cap, best_points, created_at
                 FROM runs WHERE run_id = ?",
                params![id.as_i64()],
                row_to_run,
            )
            .optional()?;
        let Some(run) = run else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT lineup_number, total_salary, total_points, status, players
             FROM run_lineups WHERE run_id = ? ORDER BY lineup_number",
        )?;
        let rows = stmt.query_map(params![id.as_i64()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut lineups = Vec::new();
        for row in rows {
            let (number, total_salary, total_points, status, players) = row?;
            lineups.push(LineupOutput {
                lineup_number: number as usize,
                total_salary,
                total_points,
                status: parse_status(&status)?,
                players: serde_json::from_str(&players)
                    .with_context(|| format!("corrupt players for run {} lineup {}", id, number))?,
            });
        }

        Ok(Some(RunDetail { run, lineups }))
    }

    /// Delete every stored run; returns how many were removed
    pub fn clear(&mut self) -> Result<usize> {
        self.conn.execute("DELETE FROM run_lineups", [])?;
        let removed = self.conn.execute("DELETE FROM runs", [])?;
        Ok(removed)
    }
}

fn parse_status(raw: &str) -> Result<SolveStatus> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .with_context(|| format!("unknown lineup status '{}'", raw))
}

fn row_to_run(row: &Row) -> rusqlite::Result<StoredRun> {
    Ok(StoredRun {
        id: RunId::new(row.get(0)?),
        site: row.get(1)?,
        sport: row.get(2)?,
        requested: row.get::<_, i64>(3)? as usize,
        generated: row.get::<_, i64>(4)? as usize,
        salary_cap: row.get(5)?,
        best_points: row.get(6)?,
        created_at: row.get::<_, i64>(7)? as u64,
    })
}
