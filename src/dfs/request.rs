//! Request/response contract for one optimization run.
//!
//! [`optimize`] never fails: every error is folded into the response with
//! its category, and the raw site/sport strings are echoed back so callers
//! can correlate failures.

use crate::cli::types::{PlayerId, Site, Sport};
use crate::dfs::constraints::ConstraintSet;
use crate::dfs::pool::PlayerPool;
use crate::dfs::roster::RosterSettings;
use crate::dfs::types::{value_per_thousand, Lineup, LineupBatch, PlayerRecord, SolveStatus};
use crate::error::{DfsError, ErrorCategory, Result};
use crate::optimizer::{BatchGenerator, BatchOptions, LineupSolver, SearchLimits, SolveStrategy, SolverOptions};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_NUM_LINEUPS: usize = 5;

fn default_num_lineups() -> usize {
    DEFAULT_NUM_LINEUPS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub site: String,
    pub sport: String,
    pub players: Vec<PlayerRecord>,
    #[serde(default = "default_num_lineups")]
    pub num_lineups: usize,
    #[serde(default)]
    pub max_overlap: Option<usize>,
    #[serde(default)]
    pub max_exposure: Option<f64>,
    #[serde(default)]
    pub max_per_team: Option<usize>,
    #[serde(default)]
    pub min_salary: Option<u32>,
    /// Overrides the site's cap.
    #[serde(default)]
    pub salary_cap: Option<u32>,
    #[serde(default)]
    pub locked: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
    #[serde(default)]
    pub strategy: SolveStrategy,
    /// Search budget for the whole batch; `0` disables the limit.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

impl OptimizeRequest {
    pub fn new(site: impl Into<String>, sport: impl Into<String>, players: Vec<PlayerRecord>) -> Self {
        Self {
            site: site.into(),
            sport: sport.into(),
            players,
            num_lineups: DEFAULT_NUM_LINEUPS,
            max_overlap: None,
            max_exposure: None,
            max_per_team: None,
            min_salary: None,
            salary_cap: None,
            locked: Vec::new(),
            excluded: Vec::new(),
            strategy: SolveStrategy::Auto,
            time_limit_ms: None,
        }
    }

    pub fn with_num_lineups(mut self, num_lineups: usize) -> Self {
        self.num_lineups = num_lineups;
        self
    }

    pub fn with_max_overlap(mut self, max_overlap: Option<usize>) -> Self {
        self.max_overlap = max_overlap;
        self
    }

    /// Constraint set for this request on top of the contest roster.
    pub fn constraints(&self, roster: &RosterSettings) -> Result<ConstraintSet> {
        let locked = parse_ids(&self.locked)?;
        let excluded = parse_ids(&self.excluded)?;
        let mut constraints = ConstraintSet::from_roster(roster)
            .with_max_overlap(self.max_overlap)
            .with_min_salary(self.min_salary)
            .with_max_per_team(self.max_per_team)
            .with_locked(locked)
            .with_excluded(excluded);
        if let Some(cap) = self.salary_cap {
            constraints.salary_cap = cap;
        }
        constraints.validate()?;
        Ok(constraints)
    }

    /// Solver options: `base` with this request's strategy and time limit applied.
    pub fn solver_options(&self, base: SolverOptions) -> SolverOptions {
        let mut options = base;
        if self.strategy != SolveStrategy::Auto {
            options.strategy = self.strategy;
        }
        match self.time_limit_ms {
            Some(0) => options.limits.time_limit = None,
            Some(ms) => options.limits = options.limits.with_time_limit(Duration::from_millis(ms)),
            None => {}
        }
        options
    }
}

fn parse_ids(raw: &[String]) -> Result<Vec<PlayerId>> {
    raw.iter().map(|id| id.parse()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOutput {
    pub id: String,
    pub name: String,
    /// Roster slot the player fills.
    pub position: String,
    /// Every position the player is listed at.
    pub eligible: String,
    pub team: String,
    pub salary: u32,
    pub projected_points: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupOutput {
    pub lineup_number: usize,
    pub total_salary: u32,
    pub total_points: f64,
    pub status: SolveStatus,
    pub players: Vec<PlayerOutput>,
}

impl LineupOutput {
    pub fn from_lineup(lineup_number: usize, lineup: &Lineup) -> Self {
        Self {
            lineup_number,
            total_salary: lineup.total_salary,
            total_points: (lineup.total_projected * 100.0).round() / 100.0,
            status: lineup.status,
            players: lineup
                .entries
                .iter()
                .map(|entry| PlayerOutput {
                    id: entry.player.id.to_string(),
                    name: entry.player.name.clone(),
                    position: entry.slot.clone(),
                    eligible: entry.player.position_label(),
                    team: entry.player.team.clone(),
                    salary: entry.player.salary,
                    projected_points: entry.player.projected,
                    value: value_per_thousand(entry.player.projected, entry.player.salary),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerInfo {
    pub salary_cap: u32,
    pub total_players: usize,
    pub positions: Vec<String>,
}

impl OptimizerInfo {
    pub fn new(constraints: &ConstraintSet) -> Self {
        Self {
            salary_cap: constraints.salary_cap,
            total_players: constraints.roster_size(),
            positions: constraints.slots.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorOutput {
    pub category: ErrorCategory,
    pub message: String,
}

impl From<&DfsError> for ErrorOutput {
    fn from(err: &DfsError) -> Self {
        Self {
            category: err.category(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub success: bool,
    pub site: String,
    pub sport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineups: Option<Vec<LineupOutput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer_info: Option<OptimizerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_requested: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_generated: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

impl OptimizeResponse {
    pub fn success(request: &OptimizeRequest, constraints: &ConstraintSet, batch: &LineupBatch) -> Self {
        Self {
            success: true,
            site: request.site.clone(),
            sport: request.sport.clone(),
            lineups: Some(
                batch
                    .lineups
                    .iter()
                    .enumerate()
                    .map(|(i, lineup)| LineupOutput::from_lineup(i + 1, lineup))
                    .collect(),
            ),
            optimizer_info: Some(OptimizerInfo::new(constraints)),
            num_requested: Some(batch.requested),
            num_generated: Some(batch.len()),
            error: None,
        }
    }

    pub fn failure(request: &OptimizeRequest, err: &DfsError) -> Self {
        Self {
            success: false,
            site: request.site.clone(),
            sport: request.sport.clone(),
            lineups: None,
            optimizer_info: None,
            num_requested: None,
            num_generated: None,
            error: Some(err.into()),
        }
    }

    pub fn error_category(&self) -> Option<ErrorCategory> {
        self.error.as_ref().map(|e| e.category)
    }
}

/// Parsed site, sport and roster for a request; unsupported values fail here
/// before anything touches the players.
pub fn resolve_contest(request: &OptimizeRequest) -> Result<RosterSettings> {
    let site: Site = request.site.parse()?;
    let sport: Sport = request.sport.parse()?;
    RosterSettings::for_contest(site, sport)
}

/// Run the request end to end and return the batch with its constraints.
pub fn run_request(request: &OptimizeRequest, base: SolverOptions) -> Result<(ConstraintSet, LineupBatch)> {
    let roster = resolve_contest(request)?;
    let pool = PlayerPool::from_records(roster.sport, &request.players)?;
    let constraints = request.constraints(&roster)?;
    let options = BatchOptions::new(request.num_lineups).with_max_exposure(request.max_exposure);

    debug!(
        site = %roster.site,
        sport = %roster.sport,
        players = pool.len(),
        requested = request.num_lineups,
        "Optimizing request"
    );
    let generator = BatchGenerator::new(LineupSolver::new(request.solver_options(base)));
    let batch = generator.generate(&pool, &constraints, options)?;
    Ok((constraints, batch))
}

/// Optimize with default solver options.
pub fn optimize(request: &OptimizeRequest) -> OptimizeResponse {
    optimize_with_options(request, SolverOptions::default())
}

pub fn optimize_with_options(request: &OptimizeRequest, base: SolverOptions) -> OptimizeResponse {
    match run_request(request, base) {
        Ok((constraints, batch)) => OptimizeResponse::success(request, &constraints, &batch),
        Err(err) => {
            warn!(site = %request.site, sport = %request.sport, category = %err.category(), "Optimization failed: {}", err);
            OptimizeResponse::failure(request, &err)
        }
    }
}

/// Independent requests solved in parallel; responses keep input order.
pub fn optimize_many(requests: &[OptimizeRequest], base: SolverOptions) -> Vec<OptimizeResponse> {
    requests
        .par_iter()
        .map(|request| optimize_with_options(request, base))
        .collect()
}

/// Limits derived from a millisecond budget, `0` meaning none.
pub fn limits_from_ms(time_limit_ms: u64) -> SearchLimits {
    if time_limit_ms == 0 {
        SearchLimits::unlimited()
    } else {
        SearchLimits::unlimited().with_time_limit(Duration::from_millis(time_limit_ms))
    }
}
