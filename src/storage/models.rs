//! Data models for the storage layer

use crate::cli::types::RunId;
use crate::dfs::request::LineupOutput;
use serde::{Deserialize, Serialize};

/// One stored optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRun {
    pub id: RunId,
    pub site: String,
    pub sport: String,
    pub requested: usize,
    pub generated: usize,
    pub salary_cap: u32,
    pub best_points: Option<f64>,
    pub created_at: u64,
}

/// A run together with its lineups, in lineup order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDetail {
    pub run: StoredRun,
    pub lineups: Vec<LineupOutput>,
}
