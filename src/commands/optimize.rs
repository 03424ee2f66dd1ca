//! Optimize command implementation

use crate::{
    cli::OptimizeArgs,
    config::{ConfigOverrides, OptimizerConfig},
    core::{
        cache::{CacheManager, PlayerPoolCacheKey, ResponseCacheKey},
        http::{build_client, fetch_player_records, is_remote},
    },
    dfs::{
        request::{optimize_with_options, LineupOutput, OptimizeRequest, OptimizeResponse},
        types::{parse_player_records, PlayerRecord, SolveStatus},
    },
    storage::LineupDatabase,
    DfsError, Result,
};
use tracing::warn;

use super::format_salary;

/// Load a player pool from a local JSON file or a remote URL.
///
/// Remote pools go through the player pool cache unless `refresh` is set.
pub async fn load_player_records(
    source: &str,
    cache: &CacheManager,
    refresh: bool,
) -> Result<Vec<PlayerRecord>> {
    if !is_remote(source) {
        let body = std::fs::read_to_string(source).map_err(|e| {
            DfsError::Io(std::io::Error::new(
                e.kind(),
                format!("cannot read player file {}: {}", source, e),
            ))
        })?;
        return parse_player_records(&body);
    }

    let key = PlayerPoolCacheKey {
        url: source.to_string(),
    };
    if !refresh {
        if let Some(records) = cache.player_pools.get(&key) {
            return Ok(records);
        }
    }

    let client = build_client()?;
    let records = fetch_player_records(&client, source).await?;
    if let Err(e) = cache.player_pools.put(key, records.clone()) {
        warn!("Could not cache player pool: {}", e);
    }
    Ok(records)
}

/// Build the request the CLI arguments describe.
pub fn build_request(args: &OptimizeArgs, players: Vec<PlayerRecord>) -> OptimizeRequest {
    let mut request = OptimizeRequest::new(args.contest.site.key(), args.contest.sport.key(), players)
        .with_num_lineups(args.num_lineups)
        .with_max_overlap(args.max_overlap);
    request.max_exposure = args.max_exposure;
    request.max_per_team = args.max_per_team;
    request.min_salary = args.min_salary;
    request.salary_cap = args.salary_cap;
    request.locked = args.locked.iter().map(|id| id.to_string()).collect();
    request.excluded = args.excluded.iter().map(|id| id.to_string()).collect();
    request.strategy = args.strategy;
    request
}

/// Handle the optimize command; returns the response so the caller can set
/// the exit status.
pub async fn handle_optimize(args: OptimizeArgs) -> Result<OptimizeResponse> {
    let config = OptimizerConfig::resolve(ConfigOverrides {
        time_limit_ms: args.time_limit_ms,
        exact_pool_limit: args.exact_pool_limit,
        db_path: args.db_path.clone(),
    })?;
    let options = config.solver_options(args.strategy);
    let cache = CacheManager::new();

    if args.verbose {
        println!("Loading players from {}...", args.players);
    }
    let players = load_player_records(&args.players, &cache, args.refresh).await?;
    if !args.json {
        println!(
            "Optimizing {} {} lineups from {} players...",
            args.contest.site,
            args.contest.sport,
            players.len()
        );
    }

    let request = build_request(&args, players);
    let key = ResponseCacheKey::for_request(&request, &options)?;

    let cached = if args.refresh { None } else { cache.responses.get(&key) };
    let response = match cached {
        Some(response) => {
            if args.verbose {
                println!("Using cached result");
            }
            response
        }
        None => {
            let response =
                tokio::task::spawn_blocking(move || optimize_with_options(&request, options))
                    .await
                    .map_err(|e| DfsError::Internal {
                        message: format!("optimizer task failed: {}", e),
                    })?;
            if is_cacheable(&response) {
                if let Err(e) = cache.responses.put(key, response.clone()) {
                    warn!("Could not cache response: {}", e);
                }
            }
            response
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response, args.verbose);
    }

    if response.success && !args.no_save {
        let mut db = LineupDatabase::open(&config.db_path)?;
        let run_id = db.save_run(&response)?;
        if args.verbose {
            println!("Saved as run {} in {}", run_id, config.db_path.display());
        }
    }

    Ok(response)
}

/// Only complete batches whose lineups all finished their search are replayed
/// from the cache; a time limit or a spent budget can end differently next run.
pub(crate) fn is_cacheable(response: &OptimizeResponse) -> bool {
    response.success
        && response.num_generated == response.num_requested
        && response
            .lineups
            .iter()
            .flatten()
            .all(|lineup| lineup.status != SolveStatus::TimeLimit)
}

fn print_response(response: &OptimizeResponse, verbose: bool) {
    if let Some(error) = &response.error {
        eprintln!("Error ({}): {}", error.category, error.message);
        return;
    }

    let lineups = response.lineups.as_deref().unwrap_or_default();
    for lineup in lineups {
        println!();
        print!("{}", format_lineup(lineup));
    }

    let requested = response.num_requested.unwrap_or(lineups.len());
    println!();
    if lineups.len() < requested {
        println!(
            "✓ Generated {} of {} lineups (no further lineup satisfies the constraints)",
            lineups.len(),
            requested
        );
    } else {
        println!("✓ Generated {} lineups", lineups.len());
    }

    if verbose {
        if let Some(info) = &response.optimizer_info {
            println!(
                "Salary cap: {}, players: {}, slots: {}",
                format_salary(info.salary_cap),
                info.total_players,
                info.positions.join(" ")
            );
        }
    }
}

/// Text table for one lineup
pub fn format_lineup(lineup: &LineupOutput) -> String {
    let mut out = format!(
        "Lineup {}  {:.2} pts  ${}  [{}]\n",
        lineup.lineup_number,
        lineup.total_points,
        format_salary(lineup.total_salary),
        lineup.status
    );
    for player in &lineup.players {
        out.push_str(&format!(
            "  {:<5} {:<24} {:<6} {:<4} {:>8} {:>7.2} {:>6.2}\n",
            player.position,
            player.name,
            player.eligible,
            player.team,
            format_salary(player.salary),
            player.projected_points,
            player.value
        ));
    }
    out
}
