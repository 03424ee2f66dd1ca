//! Lineup constraint set: cap, slots, and the optional extras callers can
//! layer on (overlap, team stacking limits, locks, exclusions).

use crate::cli::types::PlayerId;
use crate::dfs::pool::PlayerPool;
use crate::dfs::roster::{RosterSettings, RosterSlot};
use crate::error::{DfsError, Result};
use serde::Serialize;

/// Everything a single solve must respect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintSet {
    pub salary_cap: u32,
    pub slots: Vec<RosterSlot>,
    /// Maximum players shared with any previously generated lineup.
    pub max_overlap: Option<usize>,
    pub min_salary: Option<u32>,
    pub max_per_team: Option<usize>,
    pub locked: Vec<PlayerId>,
    pub excluded: Vec<PlayerId>,
}

impl ConstraintSet {
    pub fn new(salary_cap: u32, slots: Vec<RosterSlot>) -> Self {
        Self {
            salary_cap,
            slots,
            max_overlap: None,
            min_salary: None,
            max_per_team: None,
            locked: Vec::new(),
            excluded: Vec::new(),
        }
    }

    pub fn from_roster(roster: &RosterSettings) -> Self {
        Self::new(roster.salary_cap, roster.slots.clone())
    }

    pub fn with_max_overlap(mut self, max_overlap: Option<usize>) -> Self {
        self.max_overlap = max_overlap;
        self
    }

    pub fn with_min_salary(mut self, min_salary: Option<u32>) -> Self {
        self.min_salary = min_salary;
        self
    }

    pub fn with_max_per_team(mut self, max_per_team: Option<usize>) -> Self {
        self.max_per_team = max_per_team;
        self
    }

    pub fn with_locked(mut self, locked: Vec<PlayerId>) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_excluded(mut self, excluded: Vec<PlayerId>) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn roster_size(&self) -> usize {
        self.slots.len()
    }

    /// Overlap allowed between lineups of a batch, never above `R - 1` so
    /// lineups always differ by at least one player.
    pub fn effective_max_overlap(&self) -> usize {
        let ceiling = self.roster_size().saturating_sub(1);
        self.max_overlap.map_or(ceiling, |o| o.min(ceiling))
    }

    /// Reject constraint sets that are malformed regardless of the pool.
    pub fn validate(&self) -> Result<()> {
        if self.salary_cap == 0 {
            return Err(DfsError::invalid_constraint("salary cap must be positive"));
        }
        if self.slots.is_empty() {
            return Err(DfsError::invalid_constraint(
                "roster must contain at least one slot",
            ));
        }
        if let Some(slot) = self.slots.iter().find(|s| s.eligible.is_empty()) {
            return Err(DfsError::invalid_constraint(format!(
                "slot {} accepts no positions",
                slot.label
            )));
        }
        if let Some(min_salary) = self.min_salary {
            if min_salary > self.salary_cap {
                return Err(DfsError::invalid_constraint(format!(
                    "minimum salary {} exceeds salary cap {}",
                    min_salary, self.salary_cap
                )));
            }
        }
        if self.max_per_team == Some(0) {
            return Err(DfsError::invalid_constraint(
                "max players per team must be at least 1",
            ));
        }
        if self.locked.len() > self.roster_size() {
            return Err(DfsError::invalid_constraint(format!(
                "{} locked players exceed roster size {}",
                self.locked.len(),
                self.roster_size()
            )));
        }
        if let Some(id) = self.locked.iter().find(|id| self.excluded.contains(id)) {
            return Err(DfsError::invalid_constraint(format!(
                "player {} is both locked and excluded",
                id
            )));
        }
        Ok(())
    }

    /// Locked and excluded ids must refer to players in the pool.
    pub fn validate_against(&self, pool: &PlayerPool) -> Result<()> {
        self.validate()?;
        for id in self.locked.iter().chain(&self.excluded) {
            if pool.get(id).is_none() {
                return Err(DfsError::UnknownPlayer { id: id.to_string() });
            }
        }
        Ok(())
    }
}
