//! Integration tests for the request/response surface

use dfs_lineup::{
    dfs::{
        optimize, optimize_many, request::optimize_with_options, OptimizeRequest, OptimizeResponse,
        PlayerRecord,
    },
    optimizer::{SearchLimits, SolveStrategy, SolverOptions},
    ErrorCategory,
};

fn record(id: &str, position: &str, team: &str, salary: i64, projected: f64) -> PlayerRecord {
    PlayerRecord {
        id: id.to_string(),
        name: format!("Skater {id}"),
        position: position.to_string(),
        team: team.to_string(),
        salary,
        projected_points: projected,
    }
}

/// Exactly two disjoint DraftKings hockey lineups: 4 C, 8 W, 4 D, 2 G.
fn hockey_records() -> Vec<PlayerRecord> {
    let mut records = Vec::new();
    for i in 0..4 {
        records.push(record(&format!("c{i}"), "C", "BOS", 5000 - 200 * i, 20.0 - i as f64));
        records.push(record(&format!("d{i}"), "D", "TOR", 4200 - 100 * i, 12.0 - i as f64));
    }
    for i in 0..8 {
        records.push(record(&format!("w{i}"), "W", "NYR", 5200 - 150 * i, 18.0 - i as f64));
    }
    records.push(record("g0", "G", "BOS", 7500, 22.0));
    records.push(record("g1", "G", "TOR", 7000, 19.0));
    records
}

fn error_category(response: &OptimizeResponse) -> Option<ErrorCategory> {
    response.error.as_ref().map(|e| e.category)
}

#[test]
fn test_partial_batch_reports_generated_count() {
    let request = OptimizeRequest::new("draftkings", "nhl", hockey_records())
        .with_num_lineups(5)
        .with_max_overlap(Some(0));
    let response = optimize(&request);

    assert!(response.success, "{:?}", response.error);
    assert_eq!(response.num_requested, Some(5));
    assert_eq!(response.num_generated, Some(2));

    let lineups = response.lineups.unwrap();
    assert_eq!(lineups.len(), 2);
    let first: Vec<&str> = lineups[0].players.iter().map(|p| p.id.as_str()).collect();
    assert!(lineups[1]
        .players
        .iter()
        .all(|p| !first.contains(&p.id.as_str())));
    assert_eq!(lineups[0].lineup_number, 1);
    assert_eq!(lineups[1].lineup_number, 2);
}

#[test]
fn test_cap_below_cheapest_lineup_is_infeasible() {
    let mut request = OptimizeRequest::new("draftkings", "nhl", hockey_records());
    request.salary_cap = Some(20_000);
    let response = optimize(&request);

    assert!(!response.success);
    assert!(response.lineups.is_none());
    assert_eq!(error_category(&response), Some(ErrorCategory::Infeasible));
}

#[test]
fn test_unsupported_site_is_invalid_input() {
    let response = optimize(&OptimizeRequest::new("superdraft", "nfl", vec![]));
    assert!(!response.success);
    assert_eq!(response.site, "superdraft");
    assert_eq!(error_category(&response), Some(ErrorCategory::InvalidInput));
    assert!(response.error.unwrap().message.contains("superdraft"));
}

#[test]
fn test_response_json_shape() {
    let request = OptimizeRequest::new("draftkings", "nhl", hockey_records()).with_num_lineups(1);
    let response = optimize(&request);
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["site"], "draftkings");
    assert_eq!(json["optimizer_info"]["salary_cap"], 50_000);
    assert_eq!(json["lineups"][0]["players"].as_array().unwrap().len(), 9);
    assert!(json.get("error").is_none());
}

#[test]
fn test_request_from_json_uses_defaults() {
    let request: OptimizeRequest = serde_json::from_str(
        r#"{"site": "fanduel", "sport": "nba", "players": []}"#,
    )
    .unwrap();
    assert_eq!(request.num_lineups, 5);
    assert!(request.locked.is_empty());

    let response = optimize(&request);
    assert_eq!(error_category(&response), Some(ErrorCategory::Infeasible));
}

#[test]
fn test_optimize_many_keeps_order() {
    let requests = vec![
        OptimizeRequest::new("draftkings", "nhl", hockey_records()).with_num_lineups(1),
        OptimizeRequest::new("yahoo", "cricket", vec![]),
    ];
    let responses = optimize_many(&requests, SolverOptions::default());

    assert_eq!(responses.len(), 2);
    assert!(responses[0].success);
    assert!(!responses[1].success);
    assert_eq!(responses[1].sport, "cricket");
}

/// DraftKings football slate where one player per team is allowed. The best
/// quarterback shares a team with both defenses, so greedy filling stalls.
fn one_per_team_records() -> Vec<PlayerRecord> {
    vec![
        record("qb1", "QB", "T1", 5000, 30.0),
        record("qb2", "QB", "T9", 5000, 1.0),
        record("dst1", "DST", "T1", 5000, 8.0),
        record("dst2", "DST", "T1", 5000, 6.0),
        record("rb1", "RB", "T2", 5000, 15.0),
        record("rb2", "RB", "T3", 5000, 14.0),
        record("rb3", "RB", "T8", 5000, 13.0),
        record("wr1", "WR", "T4", 5000, 12.0),
        record("wr2", "WR", "T5", 5000, 11.0),
        record("wr3", "WR", "T6", 5000, 10.0),
        record("te1", "TE", "T7", 5000, 9.0),
    ]
}

fn one_per_team_request() -> OptimizeRequest {
    let mut request =
        OptimizeRequest::new("draftkings", "nfl", one_per_team_records()).with_num_lineups(1);
    request.max_per_team = Some(1);
    request
}

#[test]
fn test_heuristic_stall_is_not_reported_infeasible() {
    let mut request = one_per_team_request();
    request.strategy = SolveStrategy::Heuristic;
    let response = optimize(&request);

    assert!(response.success, "{:?}", response.error);
    let lineup = &response.lineups.unwrap()[0];
    assert!(lineup.players.iter().any(|p| p.id == "qb2"));
    assert!(lineup.players.iter().all(|p| p.id != "qb1"));
}

#[test]
fn test_limit_before_first_lineup_is_resource_exhausted() {
    let base = SolverOptions::default()
        .with_strategy(SolveStrategy::Exact)
        .with_limits(SearchLimits::unlimited().with_node_limit(1));
    let response = optimize_with_options(&one_per_team_request(), base);

    assert!(!response.success);
    assert!(response.lineups.is_none());
    assert_eq!(error_category(&response), Some(ErrorCategory::ResourceExhausted));
}

#[test]
fn test_huge_lineup_count_returns_partial_batch() {
    let request = OptimizeRequest::new("draftkings", "nhl", hockey_records())
        .with_num_lineups(usize::MAX / 2)
        .with_max_overlap(Some(0));
    let response = optimize(&request);

    assert!(response.success, "{:?}", response.error);
    assert_eq!(response.num_generated, Some(2));
}
