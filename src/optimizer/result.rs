//! Solver outcome and statistics.

use crate::dfs::types::{Lineup, SolveStatus};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    OptimalityProven,
    Aborted(String),
    LocalOptimum,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "optimality proven"),
            TerminationReason::Aborted(reason) => write!(f, "aborted: {}", reason),
            TerminationReason::LocalOptimum => write!(f, "local optimum"),
        }
    }
}

/// Counters collected during one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SolverStatistics {
    pub nodes_explored: u64,
    /// Cut by the value bound against the incumbent.
    pub prunings_bound: u64,
    /// Cut because no completion can satisfy cap, slots or locks.
    pub prunings_infeasible: u64,
    pub solutions_found: u64,
    pub time_total: Duration,
}

impl SolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_prune_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_prune_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }
}

/// A lineup plus how it was obtained.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    lineup: Lineup,
    termination_reason: TerminationReason,
    statistics: SolverStatistics,
}

impl SolveOutcome {
    pub fn optimal(lineup: Lineup, statistics: SolverStatistics) -> Self {
        debug_assert_eq!(lineup.status, SolveStatus::Optimal);
        Self {
            lineup,
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    pub fn aborted(lineup: Lineup, reason: impl Into<String>, statistics: SolverStatistics) -> Self {
        Self {
            lineup,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    pub fn heuristic(lineup: Lineup, statistics: SolverStatistics) -> Self {
        Self {
            lineup,
            termination_reason: TerminationReason::LocalOptimum,
            statistics,
        }
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn into_lineup(self) -> Lineup {
        self.lineup
    }

    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    pub fn is_optimal(&self) -> bool {
        self.termination_reason == TerminationReason::OptimalityProven
    }
}
