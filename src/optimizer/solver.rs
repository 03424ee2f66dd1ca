//! Lineup solver: exact branch-and-bound with a local-search warm start.
//!
//! The search fills slots in model order, one player per level. A node is cut
//! when its optimistic value cannot beat the incumbent, or when no completion
//! can stay under the cap, reach the minimum salary, respect overlap and team
//! limits, or still place every locked player.
//!
//! Two optimistic values are used. The plain one adds the best unused player
//! for every open slot. The priced one charges each player its salary at a
//! price `p`, takes the best net value per open slot and refunds `p` times the
//! salary still under the cap; any `p >= 0` gives a valid bound and the
//! search keeps the smallest over the model's price grid.

use crate::cli::types::PlayerId;
use crate::dfs::constraints::ConstraintSet;
use crate::dfs::pool::PlayerPool;
use crate::dfs::types::{Lineup, SolveStatus};
use crate::error::{DfsError, Result};
use crate::optimizer::heuristic::LocalSearch;
use crate::optimizer::model::{Incumbent, SearchModel, VALUE_EPSILON};
use crate::optimizer::monitor::{LimitMonitor, SearchCommand, SearchLimits};
use crate::optimizer::result::{SolveOutcome, SolverStatistics};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;


/// Default player count up to which `Auto` runs the exact search.
pub const DEFAULT_EXACT_POOL_LIMIT: usize = 120;

/// Default search budget for one request, in milliseconds.
pub const DEFAULT_TIME_LIMIT_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStrategy {
    Exact,
    Heuristic,
    #[default]
    Auto,
}

impl fmt::Display for SolveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStrategy::Exact => "exact",
            SolveStrategy::Heuristic => "heuristic",
            SolveStrategy::Auto => "auto",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SolveStrategy {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(SolveStrategy::Exact),
            "heuristic" | "greedy" => Ok(SolveStrategy::Heuristic),
            "auto" => Ok(SolveStrategy::Auto),
            other => Err(DfsError::InvalidConfig {
                key: "strategy".to_string(),
                message: format!("unknown strategy '{}' (expected exact, heuristic or auto)", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    pub strategy: SolveStrategy,
    pub limits: SearchLimits,
    pub exact_pool_limit: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            strategy: SolveStrategy::Auto,
            limits: SearchLimits::unlimited()
                .with_time_limit(Duration::from_millis(DEFAULT_TIME_LIMIT_MS)),
            exact_pool_limit: DEFAULT_EXACT_POOL_LIMIT,
        }
    }
}

impl SolverOptions {
    pub fn with_strategy(mut self, strategy: SolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_exact_pool_limit(mut self, exact_pool_limit: usize) -> Self {
        self.exact_pool_limit = exact_pool_limit;
        self
    }
}

/// Stateless entry point; one instance can serve any number of solves.
#[derive(Debug, Clone, Default)]
pub struct LineupSolver {
    options: SolverOptions,
}

impl LineupSolver {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Highest-projected lineup for the pool, or why none exists.
    pub fn solve(&self, pool: &PlayerPool, constraints: &ConstraintSet) -> Result<SolveOutcome> {
        self.solve_with_history(pool, constraints, &[], &HashSet::new())
    }

    /// Solve while sharing at most `max_overlap` players with every lineup in
    /// `prior` and leaving out the `banned` players.
    pub fn solve_with_history(
        &self,
        pool: &PlayerPool,
        constraints: &ConstraintSet,
        prior: &[Lineup],
        banned: &HashSet<PlayerId>,
    ) -> Result<SolveOutcome> {
        constraints.validate_against(pool)?;
        let model = SearchModel::build(pool, constraints, prior, banned)?;

        let exact = match self.options.strategy {
            SolveStrategy::Exact => true,
            SolveStrategy::Heuristic => false,
            SolveStrategy::Auto => model.candidate_count() <= self.options.exact_pool_limit,
        };
        debug!(
            candidates = model.candidate_count(),
            slots = model.roster_size(),
            prior = prior.len(),
            exact,
            "Starting lineup solve"
        );

        let outcome = if exact {
            BranchAndBound::new(&model, self.options.limits).run()?
        } else {
            solve_heuristic(&model, self.options.limits)?
        };

        outcome
            .lineup()
            .validate(&constraints.slots, constraints.salary_cap)?;

        let stats = outcome.statistics();
        debug!(
            status = %outcome.lineup().status,
            projected = outcome.lineup().total_projected,
            salary = outcome.lineup().total_salary,
            nodes = stats.nodes_explored,
            prunings_bound = stats.prunings_bound,
            prunings_infeasible = stats.prunings_infeasible,
            solutions = stats.solutions_found,
            elapsed_ms = stats.time_total.as_millis() as u64,
            "Lineup solve finished: {}",
            outcome.termination_reason()
        );
        Ok(outcome)
    }
}

/// Local search alone; on a dead end the exact search runs under the same
/// limits.
fn solve_heuristic(model: &SearchModel<'_>, limits: SearchLimits) -> Result<SolveOutcome> {
    let start = std::time::Instant::now();
    let mut search = LocalSearch::new(model);
    let Some(incumbent) = search.run() else {
        debug!("Local search reached no lineup, handing over to exact search");
        return BranchAndBound::new(model, limits).run();
    };
    let statistics = SolverStatistics {
        solutions_found: 1 + search.iterations(),
        time_total: start.elapsed(),
        ..SolverStatistics::default()
    };
    Ok(SolveOutcome::heuristic(
        model.to_lineup(&incumbent, SolveStatus::Heuristic),
        statistics,
    ))
}

const OPEN: usize = usize::MAX;

struct BranchAndBound<'m, 'a> {
    model: &'m SearchModel<'a>,
    limits: SearchLimits,
    monitor: LimitMonitor,
    stats: SolverStatistics,
    incumbent: Option<Incumbent>,
    assigned: Vec<usize>,
    used: Vec<bool>,
    teams: Vec<usize>,
    overlaps: Vec<usize>,
    salary: u64,
    value: f64,
    locked_remaining: usize,
    aborted: Option<String>,
}

impl<'m, 'a> BranchAndBound<'m, 'a> {
    fn new(model: &'m SearchModel<'a>, limits: SearchLimits) -> Self {
        Self {
            model,
            limits,
            monitor: LimitMonitor::new(limits),
            stats: SolverStatistics::default(),
            incumbent: None,
            assigned: vec![OPEN; model.roster_size()],
            used: vec![false; model.candidate_count()],
            teams: vec![0; model.team_count],
            overlaps: vec![0; model.prior_count],
            salary: 0,
            value: 0.0,
            locked_remaining: model.locked_count,
            aborted: None,
        }
    }

    fn run(mut self) -> Result<SolveOutcome> {
        if let Some(warm) = LocalSearch::new(self.model).run() {
            self.stats.on_solution_found();
            self.incumbent = Some(warm);
        }

        self.search(0);
        self.stats.time_total = self.monitor.elapsed();

        match (self.incumbent, self.aborted) {
            (Some(best), None) => Ok(SolveOutcome::optimal(
                self.model.to_lineup(&best, SolveStatus::Optimal),
                self.stats,
            )),
            (Some(best), Some(reason)) => Ok(SolveOutcome::aborted(
                self.model.to_lineup(&best, SolveStatus::TimeLimit),
                reason,
                self.stats,
            )),
            (None, None) => Err(DfsError::infeasible(
                "no lineup satisfies the roster, salary and diversity constraints",
            )),
            (None, Some(_)) => Err(DfsError::TimeBudgetExceeded {
                limit_ms: self.limits.time_limit_ms(),
            }),
        }
    }

    /// Depth-first over ordered slots. Returns `false` once a limit fires.
    fn search(&mut self, k: usize) -> bool {
        self.stats.on_node_explored();
        if let SearchCommand::Terminate(reason) = self.monitor.check(self.stats.nodes_explored) {
            self.aborted = Some(reason);
            return false;
        }

        let model = self.model;
        let r = model.roster_size();
        if k == r {
            self.record_leaf();
            return true;
        }

        if self.locked_remaining > r - k {
            self.stats.on_prune_infeasible();
            return true;
        }

        // Per-slot best value and cheapest salary over unused players.
        let mut best_after = 0.0;
        let mut cheapest_after = 0u64;
        let mut priciest_after = 0u64;
        for t in (k + 1)..r {
            match self.slot_extremes(t) {
                Some((best, cheapest, priciest)) => {
                    best_after += best;
                    cheapest_after += cheapest;
                    priciest_after += priciest;
                }
                None => {
                    self.stats.on_prune_infeasible();
                    return true;
                }
            }
        }
        let Some((best_here, cheapest_here, priciest_here)) = self.slot_extremes(k) else {
            self.stats.on_prune_infeasible();
            return true;
        };

        let cap = model.constraints.salary_cap as u64;
        if self.salary + cheapest_here + cheapest_after > cap {
            self.stats.on_prune_infeasible();
            return true;
        }
        if let Some(min) = model.constraints.min_salary {
            if self.salary + priciest_here + priciest_after < min as u64 {
                self.stats.on_prune_infeasible();
                return true;
            }
        }

        let target = self.incumbent.as_ref().map(|inc| (inc.value, inc.salary));
        if let Some((best_value, best_salary)) = target {
            let optimistic = self.value + best_here + best_after;
            if optimistic < best_value - VALUE_EPSILON
                || (optimistic <= best_value + VALUE_EPSILON
                    && self.salary + cheapest_here + cheapest_after > best_salary)
            {
                self.stats.on_prune_bound();
                return true;
            }
            if self.value + self.priced_bound(k) < best_value - VALUE_EPSILON {
                self.stats.on_prune_bound();
                return true;
            }
        }

        let must_lock = self.locked_remaining == r - k;
        for &c in &model.slot_cands[k] {
            if self.used[c] {
                continue;
            }
            let cand = &model.candidates[c];
            if let Some(inc) = &self.incumbent {
                // Candidates are in value order, so nothing later can do better.
                if self.value + cand.value + best_after < inc.value - VALUE_EPSILON {
                    self.stats.on_prune_bound();
                    break;
                }
            }
            if must_lock && !cand.locked {
                continue;
            }
            if self.breaks_symmetry(k, c) {
                continue;
            }
            if self.salary + cand.salary + cheapest_after > cap {
                continue;
            }
            if let Some(limit) = model.constraints.max_per_team {
                if self.teams[cand.team] >= limit {
                    continue;
                }
            }
            if cand.prior.iter().any(|&l| self.overlaps[l] >= model.max_overlap) {
                continue;
            }

            self.push(k, c);
            let keep_going = self.search(k + 1);
            self.pop(k, c);
            if !keep_going {
                return false;
            }
        }
        true
    }

    /// A player eligible for an earlier, narrower slot must sit behind the
    /// player already there; the swapped assignment covers the same set.
    fn breaks_symmetry(&self, k: usize, c: usize) -> bool {
        let cand = &self.model.candidates[c];
        self.model.dominated_by[k]
            .iter()
            .any(|&t| cand.fits(t) && c < self.assigned[t])
    }

    /// Smallest priced optimistic value of slots `k..` over the price grid.
    fn priced_bound(&self, k: usize) -> f64 {
        let model = self.model;
        let budget = (model.constraints.salary_cap as u64).saturating_sub(self.salary) as f64;
        let mut bound = f64::INFINITY;
        for &price in &model.price_grid {
            let mut total = price * budget;
            for t in k..model.roster_size() {
                total += model.slot_cands[t]
                    .iter()
                    .filter(|&&c| !self.used[c])
                    .map(|&c| {
                        let cand = &model.candidates[c];
                        cand.value - price * cand.salary as f64
                    })
                    .fold(f64::NEG_INFINITY, f64::max);
            }
            bound = bound.min(total);
        }
        bound
    }

    fn slot_extremes(&self, t: usize) -> Option<(f64, u64, u64)> {
        let model = self.model;
        let best = model.slot_cands[t].iter().find(|&&c| !self.used[c])?;
        let mut unused = model.slot_cands_by_salary[t].iter().filter(|&&c| !self.used[c]);
        let cheapest = unused.next()?;
        let priciest = unused.last().unwrap_or(cheapest);
        Some((
            model.candidates[*best].value,
            model.candidates[*cheapest].salary,
            model.candidates[*priciest].salary,
        ))
    }

    fn record_leaf(&mut self) {
        let model = self.model;
        if let Some(min) = model.constraints.min_salary {
            if self.salary < min as u64 {
                self.stats.on_prune_infeasible();
                return;
            }
        }
        if self.locked_remaining > 0 {
            self.stats.on_prune_infeasible();
            return;
        }
        let candidate = model.incumbent_from(&self.assigned);
        let better = self
            .incumbent
            .as_ref()
            .map_or(true, |inc| candidate.beats(inc));
        if better {
            self.stats.on_solution_found();
            self.incumbent = Some(candidate);
        }
    }

    fn push(&mut self, k: usize, c: usize) {
        let cand = &self.model.candidates[c];
        self.assigned[k] = c;
        self.used[c] = true;
        self.salary += cand.salary;
        self.value += cand.value;
        self.teams[cand.team] += 1;
        for &l in &cand.prior {
            self.overlaps[l] += 1;
        }
        if cand.locked {
            self.locked_remaining -= 1;
        }
    }

    fn pop(&mut self, k: usize, c: usize) {
        let cand = &self.model.candidates[c];
        self.assigned[k] = OPEN;
        self.used[c] = false;
        self.salary -= cand.salary;
        self.value -= cand.value;
        self.teams[cand.team] -= 1;
        for &l in &cand.prior {
            self.overlaps[l] -= 1;
        }
        if cand.locked {
            self.locked_remaining += 1;
        }
    }
}
