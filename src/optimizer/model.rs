//! Search model shared by the exact and heuristic solvers.
//!
//! Players that survive exclusions become candidates indexed by
//! (projection desc, salary asc, id asc); a lower index is always the
//! preferred pick. Slots are reordered so the most restrictive are filled
//! first and flex slots last.

use crate::cli::types::PlayerId;
use crate::dfs::constraints::ConstraintSet;
use crate::dfs::pool::PlayerPool;
use crate::dfs::types::{Lineup, LineupEntry, SolveStatus};
use crate::error::{DfsError, Result};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Projections closer than this are treated as equal.
pub(crate) const VALUE_EPSILON: f64 = 1e-6;

const MAX_SLOTS: usize = 64;

/// Number of salary prices tried by the priced bound.
const PRICE_STEPS: i32 = 16;

#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    /// Index into the pool.
    pub player: usize,
    pub salary: u64,
    pub value: f64,
    pub team: usize,
    pub locked: bool,
    /// Bit `k` set when eligible for ordered slot `k`.
    pub slot_mask: u64,
    /// Prior lineups (batch history) this player appears in.
    pub prior: Vec<usize>,
}

impl Candidate {
    #[inline]
    pub fn fits(&self, k: usize) -> bool {
        self.slot_mask & (1u64 << k) != 0
    }
}

/// A complete assignment with its tie-break key.
#[derive(Debug, Clone)]
pub(crate) struct Incumbent {
    /// Candidate per ordered slot.
    pub assigned: Vec<usize>,
    pub value: f64,
    pub salary: u64,
    pub ids: Vec<PlayerId>,
}

impl Incumbent {
    /// Higher value wins; ties go to lower salary, then the smaller sorted id list.
    pub fn beats(&self, other: &Incumbent) -> bool {
        if self.value > other.value + VALUE_EPSILON {
            return true;
        }
        if self.value < other.value - VALUE_EPSILON {
            return false;
        }
        match self.salary.cmp(&other.salary) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.ids < other.ids,
        }
    }
}

pub(crate) struct SearchModel<'a> {
    pub pool: &'a PlayerPool,
    pub constraints: &'a ConstraintSet,
    pub candidates: Vec<Candidate>,
    /// Ordered slot -> original slot index.
    pub slot_order: Vec<usize>,
    /// Eligible candidates per ordered slot, ascending index.
    pub slot_cands: Vec<Vec<usize>>,
    /// Same lists sorted by salary ascending.
    pub slot_cands_by_salary: Vec<Vec<usize>>,
    /// Earlier ordered slots whose eligibility is a subset of this slot's.
    pub dominated_by: Vec<Vec<usize>>,
    pub team_count: usize,
    pub prior_count: usize,
    pub max_overlap: usize,
    pub locked_count: usize,
    /// Ascending salary prices (value per salary unit) for the priced bound.
    pub price_grid: Vec<f64>,
}

impl<'a> SearchModel<'a> {
    /// Build the model and run the cheap infeasibility checks.
    pub fn build(
        pool: &'a PlayerPool,
        constraints: &'a ConstraintSet,
        prior: &[Lineup],
        banned: &HashSet<PlayerId>,
    ) -> Result<Self> {
        let slots = &constraints.slots;
        if slots.len() > MAX_SLOTS {
            return Err(DfsError::invalid_constraint(format!(
                "roster of {} slots exceeds the supported maximum of {}",
                slots.len(),
                MAX_SLOTS
            )));
        }
        if pool.is_empty() {
            return Err(DfsError::infeasible("player pool is empty"));
        }

        let mut slot_order: Vec<usize> = (0..slots.len()).collect();
        slot_order.sort_by_key(|&s| (slots[s].eligible.len(), pool.eligible_count(&slots[s]), s));

        let mut prior_index: HashMap<&PlayerId, Vec<usize>> = HashMap::new();
        for (l, lineup) in prior.iter().enumerate() {
            for player in lineup.players() {
                prior_index.entry(&player.id).or_default().push(l);
            }
        }

        let mut teams: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<usize> = (0..pool.len())
            .filter(|&i| {
                let id = &pool.players()[i].id;
                !constraints.excluded.contains(id) && !banned.contains(id)
            })
            .collect();
        let players = pool.players();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (&players[a], &players[b]);
            pb.projected
                .total_cmp(&pa.projected)
                .then(pa.salary.cmp(&pb.salary))
                .then_with(|| pa.id.cmp(&pb.id))
        });

        let mut candidates = Vec::with_capacity(order.len());
        for &i in &order {
            let player = &players[i];
            let mut slot_mask = 0u64;
            for (k, &s) in slot_order.iter().enumerate() {
                if player.is_eligible_for(&slots[s]) {
                    slot_mask |= 1u64 << k;
                }
            }
            if slot_mask == 0 {
                continue;
            }
            let next_team = teams.len();
            let team = *teams.entry(player.team.as_str()).or_insert(next_team);
            candidates.push(Candidate {
                player: i,
                salary: player.salary as u64,
                value: player.projected,
                team,
                locked: constraints.locked.contains(&player.id),
                slot_mask,
                prior: prior_index.get(&player.id).cloned().unwrap_or_default(),
            });
        }

        let r = slots.len();
        let mut slot_cands = vec![Vec::new(); r];
        for (c, cand) in candidates.iter().enumerate() {
            for (k, list) in slot_cands.iter_mut().enumerate() {
                if cand.fits(k) {
                    list.push(c);
                }
            }
        }
        let slot_cands_by_salary = slot_cands
            .iter()
            .map(|list| {
                let mut sorted = list.clone();
                sorted.sort_by_key(|&c| (candidates[c].salary, c));
                sorted
            })
            .collect();

        let dominated_by = (0..r)
            .map(|k| {
                (0..k)
                    .filter(|&t| slots[slot_order[t]].is_subset_of(&slots[slot_order[k]]))
                    .collect()
            })
            .collect();

        let locked_count = candidates.iter().filter(|c| c.locked).count();
        if locked_count < constraints.locked.len() {
            let missing = constraints
                .locked
                .iter()
                .find(|id| !candidates.iter().any(|c| &players[c.player].id == *id))
                .map(|id| id.to_string())
                .unwrap_or_default();
            return Err(DfsError::infeasible(format!(
                "locked player {} fits no roster slot or is excluded",
                missing
            )));
        }

        let price_grid = price_grid(&candidates);
        let model = Self {
            pool,
            constraints,
            candidates,
            slot_order,
            slot_cands,
            slot_cands_by_salary,
            dominated_by,
            team_count: teams.len(),
            prior_count: prior.len(),
            max_overlap: constraints.effective_max_overlap(),
            locked_count,
            price_grid,
        };
        model.check_feasibility()?;
        Ok(model)
    }

    pub fn roster_size(&self) -> usize {
        self.slot_order.len()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn slot_label(&self, k: usize) -> &str {
        &self.constraints.slots[self.slot_order[k]].label
    }

    fn check_feasibility(&self) -> Result<()> {
        for k in 0..self.roster_size() {
            if self.slot_cands[k].is_empty() {
                return Err(DfsError::infeasible(format!(
                    "slot {} has no eligible players",
                    self.slot_label(k)
                )));
            }
        }

        let matched = self.matching_size();
        if matched < self.roster_size() {
            return Err(DfsError::infeasible(format!(
                "only {} distinct players can fill the {} roster slots",
                matched,
                self.roster_size()
            )));
        }

        let cheapest: u64 = self
            .slot_cands_by_salary
            .iter()
            .map(|list| self.candidates[list[0]].salary)
            .sum();
        if cheapest > self.constraints.salary_cap as u64 {
            return Err(DfsError::infeasible(format!(
                "salary cap {} is below the cheapest possible lineup ({})",
                self.constraints.salary_cap, cheapest
            )));
        }

        if self.locked_count > 0 && self.locked_assignment().is_none() {
            return Err(DfsError::infeasible(
                "locked players cannot all be placed in distinct roster slots",
            ));
        }
        Ok(())
    }

    /// Maximum number of slots that distinct candidates can fill.
    fn matching_size(&self) -> usize {
        let mut owner: Vec<Option<usize>> = vec![None; self.candidates.len()];
        let mut size = 0;
        for k in 0..self.roster_size() {
            let mut seen = vec![false; self.candidates.len()];
            if self.augment_slot(k, &mut seen, &mut owner) {
                size += 1;
            }
        }
        size
    }

    fn augment_slot(&self, k: usize, seen: &mut [bool], owner: &mut [Option<usize>]) -> bool {
        for &c in &self.slot_cands[k] {
            if seen[c] {
                continue;
            }
            seen[c] = true;
            let free = match owner[c] {
                None => true,
                Some(other) => self.augment_slot(other, seen, owner),
            };
            if free {
                owner[c] = Some(k);
                return true;
            }
        }
        false
    }

    /// Place every locked candidate in its own slot, as (ordered slot, candidate) pairs.
    pub fn locked_assignment(&self) -> Option<Vec<(usize, usize)>> {
        let mut slot_owner: Vec<Option<usize>> = vec![None; self.roster_size()];
        for (c, cand) in self.candidates.iter().enumerate() {
            if !cand.locked {
                continue;
            }
            let mut seen = vec![false; self.roster_size()];
            if !self.augment_locked(c, &mut seen, &mut slot_owner) {
                return None;
            }
        }
        Some(
            slot_owner
                .iter()
                .enumerate()
                .filter_map(|(k, owner)| owner.map(|c| (k, c)))
                .collect(),
        )
    }

    fn augment_locked(&self, c: usize, seen: &mut [bool], slot_owner: &mut [Option<usize>]) -> bool {
        for k in 0..self.roster_size() {
            if !self.candidates[c].fits(k) || seen[k] {
                continue;
            }
            seen[k] = true;
            let free = match slot_owner[k] {
                None => true,
                Some(other) => self.augment_locked(other, seen, slot_owner),
            };
            if free {
                slot_owner[k] = Some(c);
                return true;
            }
        }
        false
    }

    /// Full check of a complete assignment against every constraint.
    pub fn is_feasible(&self, assigned: &[usize]) -> bool {
        if assigned.len() != self.roster_size() {
            return false;
        }
        let mut seen = HashSet::with_capacity(assigned.len());
        let mut salary = 0u64;
        let mut teams = vec![0usize; self.team_count];
        let mut overlaps = vec![0usize; self.prior_count];
        for (k, &c) in assigned.iter().enumerate() {
            let cand = &self.candidates[c];
            if !cand.fits(k) || !seen.insert(c) {
                return false;
            }
            salary += cand.salary;
            teams[cand.team] += 1;
            for &l in &cand.prior {
                overlaps[l] += 1;
            }
        }
        if salary > self.constraints.salary_cap as u64 {
            return false;
        }
        if let Some(min) = self.constraints.min_salary {
            if salary < min as u64 {
                return false;
            }
        }
        if let Some(limit) = self.constraints.max_per_team {
            if teams.iter().any(|&n| n > limit) {
                return false;
            }
        }
        if overlaps.iter().any(|&n| n > self.max_overlap) {
            return false;
        }
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, cand)| cand.locked)
            .all(|(c, _)| seen.contains(&c))
    }

    pub fn incumbent_from(&self, assigned: &[usize]) -> Incumbent {
        let players = self.pool.players();
        let mut ids: Vec<PlayerId> = assigned
            .iter()
            .map(|&c| players[self.candidates[c].player].id.clone())
            .collect();
        ids.sort();
        Incumbent {
            assigned: assigned.to_vec(),
            value: assigned.iter().map(|&c| self.candidates[c].value).sum(),
            salary: assigned.iter().map(|&c| self.candidates[c].salary).sum(),
            ids,
        }
    }

    /// Materialize an assignment in the original slot order.
    pub fn to_lineup(&self, incumbent: &Incumbent, status: SolveStatus) -> Lineup {
        let slots = &self.constraints.slots;
        let players = self.pool.players();
        let mut entries: Vec<Option<LineupEntry>> = vec![None; slots.len()];
        for (k, &c) in incumbent.assigned.iter().enumerate() {
            let s = self.slot_order[k];
            entries[s] = Some(LineupEntry {
                slot: slots[s].label.clone(),
                player: players[self.candidates[c].player].clone(),
            });
        }
        Lineup::new(entries.into_iter().flatten().collect(), status)
    }
}

/// Geometric ladder from a quarter of the lowest to the highest value per
/// salary unit in the pool. Empty when no player has both.
fn price_grid(candidates: &[Candidate]) -> Vec<f64> {
    let (lo, hi) = candidates
        .iter()
        .filter(|c| c.salary > 0 && c.value > 0.0)
        .map(|c| c.value / c.salary as f64)
        .fold((f64::INFINITY, 0.0f64), |(lo, hi), r| (lo.min(r), hi.max(r)));
    if hi <= 0.0 {
        return Vec::new();
    }
    let lo = lo / 4.0;
    let step = (hi / lo).powf(1.0 / (PRICE_STEPS - 1) as f64);
    (0..PRICE_STEPS).map(|i| lo * step.powi(i)).collect()
}
