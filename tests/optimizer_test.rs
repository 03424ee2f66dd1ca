//! Integration tests for the lineup solver on full contest rosters

use dfs_lineup::{
    dfs::{ConstraintSet, PlayerPool, PlayerRecord, RosterSettings, SolveStatus},
    optimizer::{BatchGenerator, BatchOptions, LineupSolver, SolveStrategy, SolverOptions},
    PlayerId, Site, Sport,
};

fn record(id: &str, position: &str, team: &str, salary: i64, projected: f64) -> PlayerRecord {
    PlayerRecord {
        id: id.to_string(),
        name: format!("Player {id}"),
        position: position.to_string(),
        team: team.to_string(),
        salary,
        projected_points: projected,
    }
}

/// 26 players spread over four teams.
fn nfl_records() -> Vec<PlayerRecord> {
    let teams = ["KC", "BUF", "PHI", "SF"];
    let mut records = Vec::new();
    let groups: [(&str, usize, i64, f64); 5] = [
        ("QB", 4, 6000, 19.0),
        ("RB", 6, 5200, 13.0),
        ("WR", 8, 5000, 12.5),
        ("TE", 4, 3800, 8.0),
        ("DST", 4, 2800, 7.0),
    ];
    for (position, count, base_salary, base_points) in groups {
        for i in 0..count {
            let i64i = i as i64;
            records.push(record(
                &format!("{}{}", position.to_lowercase(), i + 1),
                position,
                teams[i % teams.len()],
                base_salary + 700 * i64i - 300 * (i64i % 3),
                base_points + 2.5 * (count - i) as f64 - 0.75 * (i % 2) as f64,
            ));
        }
    }
    records
}

fn nfl_setup() -> (PlayerPool, ConstraintSet) {
    let roster = RosterSettings::for_contest(Site::DraftKings, Sport::Nfl).unwrap();
    let pool = PlayerPool::from_records(Sport::Nfl, &nfl_records()).unwrap();
    (pool, ConstraintSet::from_roster(&roster))
}

#[test]
fn test_exact_lineup_is_valid_and_optimal() {
    let (pool, constraints) = nfl_setup();
    let solver = LineupSolver::new(SolverOptions::default().with_strategy(SolveStrategy::Exact));
    let outcome = solver.solve(&pool, &constraints).unwrap();

    assert!(outcome.is_optimal());
    let lineup = outcome.lineup();
    assert_eq!(lineup.status, SolveStatus::Optimal);
    assert_eq!(lineup.len(), 9);
    assert!(lineup.total_salary <= 50_000);
    lineup.validate(&constraints.slots, constraints.salary_cap).unwrap();

    let labels: Vec<&str> = lineup.entries.iter().map(|e| e.slot.as_str()).collect();
    assert_eq!(labels, vec!["QB", "RB", "RB", "WR", "WR", "WR", "TE", "FLEX", "DST"]);
}

#[test]
fn test_heuristic_never_beats_exact() {
    let (pool, constraints) = nfl_setup();
    let exact = LineupSolver::new(SolverOptions::default().with_strategy(SolveStrategy::Exact))
        .solve(&pool, &constraints)
        .unwrap();
    let heuristic =
        LineupSolver::new(SolverOptions::default().with_strategy(SolveStrategy::Heuristic))
            .solve(&pool, &constraints)
            .unwrap();

    assert_eq!(heuristic.lineup().status, SolveStatus::Heuristic);
    heuristic
        .lineup()
        .validate(&constraints.slots, constraints.salary_cap)
        .unwrap();
    assert!(heuristic.lineup().total_projected <= exact.lineup().total_projected + 1e-6);
}

#[test]
fn test_batch_respects_overlap_exposure_and_team_limits() {
    let (pool, constraints) = nfl_setup();
    let constraints = constraints
        .with_max_overlap(Some(6))
        .with_max_per_team(Some(4));
    let options = BatchOptions::new(5).with_max_exposure(Some(0.6));

    let batch = BatchGenerator::default()
        .generate(&pool, &constraints, options)
        .unwrap();

    assert!(!batch.is_empty());
    assert!(batch.len() <= 5);
    assert!(batch.max_pairwise_overlap() <= 6);

    for lineup in &batch.lineups {
        lineup.validate(&constraints.slots, constraints.salary_cap).unwrap();
        let mut per_team = std::collections::HashMap::new();
        for player in lineup.players() {
            *per_team.entry(player.team.as_str()).or_insert(0) += 1;
        }
        assert!(per_team.values().all(|&n| n <= 4));
    }

    for player in pool.players() {
        assert!(batch.exposure(&player.id) <= 3, "{} over-exposed", player.id);
    }

    let projections: Vec<f64> = batch.lineups.iter().map(|l| l.total_projected).collect();
    assert!(projections.windows(2).all(|w| w[0] >= w[1] - 1e-6));
}

#[test]
fn test_locked_and_excluded_players() {
    let (pool, constraints) = nfl_setup();
    let baseline = LineupSolver::default().solve(&pool, &constraints).unwrap();
    let top_qb = baseline
        .lineup()
        .players()
        .find(|p| p.positions.contains(&dfs_lineup::Position::QB))
        .map(|p| p.id.clone())
        .unwrap();

    let locked = PlayerId::new("te4");
    let constrained = constraints
        .with_locked(vec![locked.clone()])
        .with_excluded(vec![top_qb.clone()]);
    let outcome = LineupSolver::default().solve(&pool, &constrained).unwrap();

    assert!(outcome.lineup().contains(&locked));
    assert!(!outcome.lineup().contains(&top_qb));
    assert!(outcome.lineup().total_projected <= baseline.lineup().total_projected + 1e-6);
}
