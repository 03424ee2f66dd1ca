//! Batch generation: repeated solves, each constrained against the lineups
//! already produced.

use crate::cli::types::PlayerId;
use crate::dfs::constraints::ConstraintSet;
use crate::dfs::pool::PlayerPool;
use crate::dfs::types::{Lineup, LineupBatch};
use crate::error::{DfsError, Result};
use crate::optimizer::solver::LineupSolver;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchOptions {
    pub count: usize,
    /// Fraction of the batch any one unlocked player may appear in.
    pub max_exposure: Option<f64>,
}

impl BatchOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_exposure: None,
        }
    }

    pub fn with_max_exposure(mut self, max_exposure: Option<f64>) -> Self {
        self.max_exposure = max_exposure;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(DfsError::invalid_constraint(
                "number of lineups must be at least 1",
            ));
        }
        if let Some(exposure) = self.max_exposure {
            if !(exposure > 0.0 && exposure <= 1.0) {
                return Err(DfsError::invalid_constraint(format!(
                    "max exposure must be in (0, 1], got {}",
                    exposure
                )));
            }
        }
        Ok(())
    }

    /// Lineups a single player may appear in, at least one.
    pub fn exposure_limit(&self) -> Option<usize> {
        self.max_exposure
            .map(|f| ((f * self.count as f64).ceil() as usize).max(1))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchGenerator {
    solver: LineupSolver,
}

impl BatchGenerator {
    pub fn new(solver: LineupSolver) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &LineupSolver {
        &self.solver
    }

    /// Produce up to `options.count` lineups.
    ///
    /// The solver's time limit covers the whole batch: each solve gets what
    /// is left of it. A failure on the first lineup is returned as is. Once at
    /// least one lineup exists, an infeasible or out-of-time solve, or a spent
    /// budget, ends the batch early and the shorter batch is returned.
    pub fn generate(
        &self,
        pool: &PlayerPool,
        constraints: &ConstraintSet,
        options: BatchOptions,
    ) -> Result<LineupBatch> {
        options.validate()?;
        let exposure_limit = options.exposure_limit();

        let base = *self.solver.options();
        let deadline = base
            .limits
            .time_limit
            .and_then(|budget| Instant::now().checked_add(budget));

        let mut lineups: Vec<Lineup> = Vec::with_capacity(options.count.min(64));
        let mut banned: HashSet<PlayerId> = HashSet::new();
        let mut appearances: HashMap<PlayerId, usize> = HashMap::new();

        while lineups.len() < options.count {
            let solver = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() && !lineups.is_empty() {
                        info!(
                            generated = lineups.len(),
                            requested = options.count,
                            "Stopping batch early: time budget spent"
                        );
                        break;
                    }
                    LineupSolver::new(base.with_limits(base.limits.with_time_limit(remaining)))
                }
                None => self.solver.clone(),
            };

            let outcome =
                match solver.solve_with_history(pool, constraints, &lineups, &banned) {
                    Ok(outcome) => outcome,
                    Err(err @ (DfsError::Infeasible { .. } | DfsError::TimeBudgetExceeded { .. }))
                        if !lineups.is_empty() =>
                    {
                        info!(
                            generated = lineups.len(),
                            requested = options.count,
                            "Stopping batch early: {}",
                            err
                        );
                        break;
                    }
                    Err(err) => return Err(err),
                };

            let lineup = outcome.into_lineup();
            debug!(
                lineup = lineups.len() + 1,
                projected = lineup.total_projected,
                salary = lineup.total_salary,
                status = %lineup.status,
                "Generated lineup"
            );

            if let Some(limit) = exposure_limit {
                for player in lineup.players() {
                    let seen = appearances.entry(player.id.clone()).or_insert(0);
                    *seen += 1;
                    if *seen >= limit && !constraints.locked.contains(&player.id) {
                        banned.insert(player.id.clone());
                    }
                }
            }
            lineups.push(lineup);
        }

        Ok(LineupBatch {
            lineups,
            requested: options.count,
        })
    }
}
