//! Greedy construction plus first-improvement local search.
//!
//! Used as the warm start for the exact search and on its own for pools above
//! the exact-size limit. The result is a local optimum under single-player
//! replacement: no swap of one rostered player for an unused one improves the
//! projected total, or keeps it and lowers the salary. No gap to the true
//! optimum is certified.

use crate::optimizer::model::{Incumbent, SearchModel, VALUE_EPSILON};

/// Upper bound on accepted improving moves.
pub const DEFAULT_MAX_ITERATIONS: u64 = 10_000;

const OPEN: usize = usize::MAX;

pub(crate) struct LocalSearch<'m, 'a> {
    model: &'m SearchModel<'a>,
    max_iterations: u64,
    iterations: u64,
}

impl<'m, 'a> LocalSearch<'m, 'a> {
    pub fn new(model: &'m SearchModel<'a>) -> Self {
        Self::with_max_iterations(model, DEFAULT_MAX_ITERATIONS)
    }

    pub fn with_max_iterations(model: &'m SearchModel<'a>, max_iterations: u64) -> Self {
        Self {
            model,
            max_iterations,
            iterations: 0,
        }
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Build a feasible lineup and polish it, or `None` when neither greedy
    /// construction nor repair reaches one.
    pub fn run(&mut self) -> Option<Incumbent> {
        let mut assigned = self.construct()?;
        self.repair(&mut assigned)?;
        self.improve(&mut assigned);
        Some(self.model.incumbent_from(&assigned))
    }

    /// Locked players first, then the most valuable affordable player per slot.
    fn construct(&self) -> Option<Vec<usize>> {
        let model = self.model;
        let r = model.roster_size();
        let cap = model.constraints.salary_cap as u64;
        let mut partial = Partial::new(model);

        for (k, c) in model.locked_assignment()? {
            partial.place(model, k, c);
        }

        for k in 0..r {
            if partial.assigned[k] != OPEN {
                continue;
            }
            let reserve = partial.reserve(model, k);
            let pick = model.slot_cands[k]
                .iter()
                .copied()
                .find(|&c| {
                    partial.allows(model, c)
                        && partial.salary + model.candidates[c].salary + reserve <= cap
                })
                .or_else(|| {
                    model.slot_cands_by_salary[k]
                        .iter()
                        .copied()
                        .find(|&c| partial.allows(model, c))
                })?;
            partial.place(model, k, pick);
        }
        Some(partial.assigned)
    }

    /// Swap players until every constraint holds, taking the move that
    /// removes the most violation each round.
    fn repair(&mut self, assigned: &mut [usize]) -> Option<()> {
        let model = self.model;
        let mut current = self.violation(assigned);
        while current != (0, 0) {
            if self.iterations >= self.max_iterations {
                return None;
            }
            let mut best: Option<((u64, u64), usize, usize)> = None;
            for k in 0..assigned.len() {
                let old = assigned[k];
                if model.candidates[old].locked {
                    continue;
                }
                for &c in &model.slot_cands[k] {
                    if assigned.contains(&c) {
                        continue;
                    }
                    assigned[k] = c;
                    let score = self.violation(assigned);
                    assigned[k] = old;
                    if best.map_or(true, |(s, _, _)| score < s) {
                        best = Some((score, k, c));
                    }
                }
            }
            let (score, k, c) = best?;
            if score >= current {
                return None;
            }
            assigned[k] = c;
            current = score;
            self.iterations += 1;
        }
        Some(())
    }

    /// (team and overlap excess, salary outside the cap/minimum window)
    fn violation(&self, assigned: &[usize]) -> (u64, u64) {
        let model = self.model;
        let mut teams = vec![0u64; model.team_count];
        let mut overlaps = vec![0u64; model.prior_count];
        let mut salary = 0u64;
        for &c in assigned {
            let cand = &model.candidates[c];
            salary += cand.salary;
            teams[cand.team] += 1;
            for &l in &cand.prior {
                overlaps[l] += 1;
            }
        }
        let team_limit = model.constraints.max_per_team.map_or(u64::MAX, |l| l as u64);
        let max_overlap = model.max_overlap as u64;
        let structural = teams.iter().map(|&n| n.saturating_sub(team_limit)).sum::<u64>()
            + overlaps.iter().map(|&n| n.saturating_sub(max_overlap)).sum::<u64>();

        let cap = model.constraints.salary_cap as u64;
        let min = model.constraints.min_salary.unwrap_or(0) as u64;
        let money = salary.saturating_sub(cap) + min.saturating_sub(salary);
        (structural, money)
    }

    fn improve(&mut self, assigned: &mut [usize]) {
        let model = self.model;
        'outer: while self.iterations < self.max_iterations {
            let value: f64 = assigned.iter().map(|&c| model.candidates[c].value).sum();
            let salary: u64 = assigned.iter().map(|&c| model.candidates[c].salary).sum();
            for k in 0..assigned.len() {
                let old = assigned[k];
                if model.candidates[old].locked {
                    continue;
                }
                for &c in &model.slot_cands[k] {
                    if c == old || assigned.contains(&c) {
                        continue;
                    }
                    let cand = &model.candidates[c];
                    let new_value = value - model.candidates[old].value + cand.value;
                    let new_salary = salary - model.candidates[old].salary + cand.salary;
                    let better = new_value > value + VALUE_EPSILON
                        || (new_value >= value - VALUE_EPSILON && new_salary < salary);
                    if !better {
                        continue;
                    }
                    assigned[k] = c;
                    if model.is_feasible(assigned) {
                        self.iterations += 1;
                        continue 'outer;
                    }
                    assigned[k] = old;
                }
            }
            break;
        }
    }
}

struct Partial {
    assigned: Vec<usize>,
    used: Vec<bool>,
    teams: Vec<usize>,
    overlaps: Vec<usize>,
    salary: u64,
}

impl Partial {
    fn new(model: &SearchModel<'_>) -> Self {
        Self {
            assigned: vec![OPEN; model.roster_size()],
            used: vec![false; model.candidate_count()],
            teams: vec![0; model.team_count],
            overlaps: vec![0; model.prior_count],
            salary: 0,
        }
    }

    fn allows(&self, model: &SearchModel<'_>, c: usize) -> bool {
        let cand = &model.candidates[c];
        !self.used[c]
            && model
                .constraints
                .max_per_team
                .map_or(true, |limit| self.teams[cand.team] < limit)
            && cand.prior.iter().all(|&l| self.overlaps[l] < model.max_overlap)
    }

    /// Cheapest distinct players for the open slots after `k`.
    fn reserve(&self, model: &SearchModel<'_>, k: usize) -> u64 {
        let mut held = self.used.clone();
        let mut total = 0;
        for t in (k + 1)..model.roster_size() {
            if self.assigned[t] != OPEN {
                continue;
            }
            if let Some(&c) = model.slot_cands_by_salary[t].iter().find(|&&c| !held[c]) {
                held[c] = true;
                total += model.candidates[c].salary;
            }
        }
        total
    }

    fn place(&mut self, model: &SearchModel<'_>, k: usize, c: usize) {
        let cand = &model.candidates[c];
        self.assigned[k] = c;
        self.used[c] = true;
        self.salary += cand.salary;
        self.teams[cand.team] += 1;
        for &l in &cand.prior {
            self.overlaps[l] += 1;
        }
    }
}
