//! Search budget enforcement for the exact solver.
//!
//! The clock is read only every `check_interval` nodes so the deadline costs
//! next to nothing on the hot path; the node limit is checked every node.

use std::time::{Duration, Instant};

/// Time and node budget for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    pub time_limit: Option<Duration>,
    pub node_limit: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn time_limit_ms(&self) -> u64 {
        self.time_limit.map(|d| d.as_millis() as u64).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Continue,
    Terminate(String),
}

pub struct LimitMonitor {
    limits: SearchLimits,
    start_time: Instant,
    check_interval: u64,
    ops_since_last_check: u64,
}

impl LimitMonitor {
    pub const DEFAULT_CHECK_INTERVAL: u64 = 1024;

    pub fn new(limits: SearchLimits) -> Self {
        Self::with_check_interval(limits, Self::DEFAULT_CHECK_INTERVAL)
    }

    pub fn with_check_interval(limits: SearchLimits, check_interval: u64) -> Self {
        Self {
            limits,
            start_time: Instant::now(),
            check_interval: check_interval.max(1),
            ops_since_last_check: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn check(&mut self, nodes_explored: u64) -> SearchCommand {
        if let Some(node_limit) = self.limits.node_limit {
            if nodes_explored > node_limit {
                return SearchCommand::Terminate(format!(
                    "Node limit of {} exceeded",
                    node_limit
                ));
            }
        }

        self.ops_since_last_check = self.ops_since_last_check.saturating_add(1);
        if self.ops_since_last_check >= self.check_interval {
            self.ops_since_last_check = 0;

            if let Some(time_limit) = self.limits.time_limit {
                if self.start_time.elapsed() > time_limit {
                    return SearchCommand::Terminate(format!(
                        "Time limit of {} ms exceeded",
                        time_limit.as_millis()
                    ));
                }
            }
        }

        SearchCommand::Continue
    }
}
