//! Command implementations for the dfs-lineup CLI

pub mod history;
pub mod optimize;
pub mod rosters;


use crate::{
    config::{ConfigOverrides, OptimizerConfig},
    storage::LineupDatabase,
    Result,
};
use std::path::PathBuf;

/// Open the run history database, honouring `--db-path` and `DFS_LINEUP_DB_PATH`.
pub fn open_database(db_path: Option<PathBuf>) -> Result<LineupDatabase> {
    let config = OptimizerConfig::resolve(ConfigOverrides {
        db_path,
        ..Default::default()
    })?;
    Ok(LineupDatabase::open(&config.db_path)?)
}

/// `49800` -> `"49,800"`
pub fn format_salary(salary: u32) -> String {
    let digits = salary.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
