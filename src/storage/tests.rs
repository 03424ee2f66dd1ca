//! Unit tests for storage functionality

use super::*;
use crate::cli::types::RunId;
use crate::dfs::request::{LineupOutput, OptimizeResponse, OptimizerInfo, PlayerOutput};
use crate::dfs::types::SolveStatus;

fn create_test_db() -> LineupDatabase {
    LineupDatabase::open_in_memory().unwrap()
}

fn player(id: &str, slot: &str, salary: u32, points: f64) -> PlayerOutput {
    PlayerOutput {
        id: id.to_string(),
        name: format!("Player {id}"),
        position: slot.to_string(),
        eligible: slot.to_string(),
        team: "DAL".to_string(),
        salary,
        projected_points: points,
        value: crate::dfs::types::value_per_thousand(points, salary),
    }
}

fn sample_response(points: &[f64]) -> OptimizeResponse {
    let lineups = points
        .iter()
        .enumerate()
        .map(|(i, &p)| LineupOutput {
            lineup_number: i + 1,
            total_salary: 9000,
            total_points: p,
            status: SolveStatus::Optimal,
            players: vec![player(&format!("qb{i}"), "QB", 5000, p - 10.0), player("rb", "RB", 4000, 10.0)],
        })
        .collect::<Vec<_>>();
    OptimizeResponse {
        success: true,
        site: "draftkings".to_string(),
        sport: "nfl".to_string(),
        num_requested: Some(3),
        num_generated: Some(lineups.len()),
        lineups: Some(lineups),
        optimizer_info: Some(OptimizerInfo {
            salary_cap: 50_000,
            total_players: 2,
            positions: vec!["QB".to_string(), "RB".to_string()],
        }),
        error: None,
    }
}

#[test]
fn test_save_and_load_run() {
    let mut db = create_test_db();
    let response = sample_response(&[31.5, 29.25]);

    let id = db.save_run(&response).unwrap();
    let detail = db.load_run(id).unwrap().unwrap();

    assert_eq!(detail.run.id, id);
    assert_eq!(detail.run.site, "draftkings");
    assert_eq!(detail.run.requested, 3);
    assert_eq!(detail.run.generated, 2);
    assert_eq!(detail.run.salary_cap, 50_000);
    assert_eq!(detail.run.best_points, Some(31.5));
    assert_eq!(Some(detail.lineups), response.lineups);
}

#[test]
fn test_failed_response_is_not_stored() {
    let mut db = create_test_db();
    let mut response = sample_response(&[]);
    response.success = false;
    assert!(db.save_run(&response).is_err());
    assert!(db.list_runs(10).unwrap().is_empty());
}

#[test]
fn test_empty_batch_has_no_best_points() {
    let mut db = create_test_db();
    let id = db.save_run(&sample_response(&[])).unwrap();
    let detail = db.load_run(id).unwrap().unwrap();
    assert_eq!(detail.run.best_points, None);
    assert!(detail.lineups.is_empty());
}

#[test]
fn test_list_runs_newest_first_with_limit() {
    let mut db = create_test_db();
    let first = db.save_run(&sample_response(&[20.0])).unwrap();
    let second = db.save_run(&sample_response(&[21.0])).unwrap();
    let third = db.save_run(&sample_response(&[22.0])).unwrap();

    let runs = db.list_runs(2).unwrap();
    let ids: Vec<RunId> = runs.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third, second]);
    assert!(!ids.contains(&first));
}

#[test]
fn test_load_missing_run() {
    let db = create_test_db();
    assert!(db.load_run(RunId::new(404)).unwrap().is_none());
}

#[test]
fn test_clear_removes_runs_and_lineups() {
    let mut db = create_test_db();
    let id = db.save_run(&sample_response(&[20.0, 19.0])).unwrap();

    assert_eq!(db.clear().unwrap(), 1);
    assert!(db.load_run(id).unwrap().is_none());
    let orphaned: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM run_lineups", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orphaned, 0);
}

#[test]
fn test_open_on_disk_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("lineups.db");
    let mut db = LineupDatabase::open(&path).unwrap();
    db.save_run(&sample_response(&[12.0])).unwrap();
    drop(db);

    let reopened = LineupDatabase::open(&path).unwrap();
    assert_eq!(reopened.list_runs(10).unwrap().len(), 1);
}

#[test]
fn test_in_memory_databases_are_not_shared() {
    let mut first = create_test_db();
    first.save_run(&sample_response(&[31.5])).unwrap();

    let second = create_test_db();
    assert_eq!(first.list_runs(10).unwrap().len(), 1);
    assert!(second.list_runs(10).unwrap().is_empty());
}
