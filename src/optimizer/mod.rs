//! Lineup optimization engine.
//!
//! `LineupSolver` finds the single best lineup for a pool and constraint set;
//! `BatchGenerator` calls it repeatedly to build a diversified batch.

pub mod batch;
pub mod heuristic;
pub(crate) mod model;
pub mod monitor;
pub mod result;
pub mod solver;

pub use batch::{BatchGenerator, BatchOptions};
pub use monitor::SearchLimits;
pub use result::{SolveOutcome, SolverStatistics, TerminationReason};
pub use solver::{LineupSolver, SolveStrategy, SolverOptions};
