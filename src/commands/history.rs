//! History command implementation

use crate::{
    cli::types::RunId,
    storage::{LineupDatabase, StoredRun},
    Result,
};
use std::path::PathBuf;

use super::{open_database, optimize::format_lineup};

pub struct HistoryParams {
    pub limit: usize,
    pub run_id: Option<RunId>,
    pub clear: bool,
    pub db_path: Option<PathBuf>,
    pub json: bool,
}

/// Handle the history command
pub fn handle_history(params: HistoryParams) -> Result<()> {
    let mut db = open_database(params.db_path)?;
    show_history(&mut db, params.limit, params.run_id, params.clear, params.json)
}

fn show_history(
    db: &mut LineupDatabase,
    limit: usize,
    run_id: Option<RunId>,
    clear: bool,
    json: bool,
) -> Result<()> {
    if clear {
        let removed = db.clear()?;
        println!("✓ Removed {} stored runs", removed);
        return Ok(());
    }

    if let Some(id) = run_id {
        let Some(detail) = db.load_run(id)? else {
            println!("No run with id {}", id);
            return Ok(());
        };
        if json {
            println!("{}", serde_json::to_string_pretty(&detail)?);
        } else {
            println!("{}", format_run(&detail.run));
            for lineup in &detail.lineups {
                println!();
                print!("{}", format_lineup(lineup));
            }
        }
        return Ok(());
    }

    let runs = db.list_runs(limit)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&runs)?);
    } else if runs.is_empty() {
        println!("No stored runs");
    } else {
        for run in &runs {
            println!("{}", format_run(run));
        }
    }
    Ok(())
}

/// One-line run summary
pub fn format_run(run: &StoredRun) -> String {
    let best = run
        .best_points
        .map_or_else(|| "-".to_string(), |p| format!("{:.2}", p));
    format!(
        "#{:<4} {} {:<4} {}/{} lineups  best {}  cap {}  at {}",
        run.id, run.site, run.sport, run.generated, run.requested, best, run.salary_cap, run.created_at
    )
}
