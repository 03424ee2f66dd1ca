//! CLI argument definitions and parsing.

pub mod types;

use crate::optimizer::SolveStrategy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{PlayerId, RunId, Site, Sport};

/// Contest selection shared between commands
#[derive(Debug, Args)]
pub struct ContestArgs {
    /// DFS site: draftkings, fanduel, yahoo or fantasydraft.
    #[clap(long)]
    pub site: Site,

    /// Sport: nfl, nba, mlb or nhl.
    #[clap(long)]
    pub sport: Sport,
}

#[derive(Debug, Args)]
pub struct OptimizeArgs {
    #[clap(flatten)]
    pub contest: ContestArgs,

    /// Player pool: a JSON file, or an http(s) URL serving the same JSON.
    #[clap(long)]
    pub players: String,

    /// Number of lineups to generate.
    #[clap(long, short = 'n', default_value_t = crate::dfs::request::DEFAULT_NUM_LINEUPS)]
    pub num_lineups: usize,

    /// Maximum players any two lineups may share (default: roster size - 1).
    #[clap(long)]
    pub max_overlap: Option<usize>,

    /// Maximum fraction of lineups a player may appear in, e.g. 0.6.
    #[clap(long)]
    pub max_exposure: Option<f64>,

    /// Maximum players from one team in a lineup.
    #[clap(long)]
    pub max_per_team: Option<usize>,

    /// Minimum total salary a lineup must spend.
    #[clap(long)]
    pub min_salary: Option<u32>,

    /// Override the site's salary cap.
    #[clap(long)]
    pub salary_cap: Option<u32>,

    /// Player id that must be in every lineup (repeatable).
    #[clap(long = "lock")]
    pub locked: Vec<PlayerId>,

    /// Player id to leave out (repeatable).
    #[clap(long = "exclude")]
    pub excluded: Vec<PlayerId>,

    /// Solver strategy: exact, heuristic or auto.
    #[clap(long, default_value_t = SolveStrategy::Auto)]
    pub strategy: SolveStrategy,

    /// Time budget for the whole run in ms, 0 for none (or set `DFS_LINEUP_TIME_LIMIT_MS`).
    #[clap(long)]
    pub time_limit_ms: Option<u64>,

    /// Largest pool solved exactly under `auto` (or set `DFS_LINEUP_EXACT_POOL_LIMIT`).
    #[clap(long)]
    pub exact_pool_limit: Option<usize>,

    /// Database file for run history (or set `DFS_LINEUP_DB_PATH`).
    #[clap(long)]
    pub db_path: Option<PathBuf>,

    /// Output the response as JSON instead of a table.
    #[clap(long)]
    pub json: bool,

    /// Show solver progress and statistics.
    #[clap(long, short)]
    pub verbose: bool,

    /// Don't record this run in the history database.
    #[clap(long)]
    pub no_save: bool,

    /// Ignore cached responses and player pools.
    #[clap(long)]
    pub refresh: bool,
}

#[derive(Debug, Parser)]
#[clap(name = "dfs-lineup", about = "Daily fantasy sports lineup optimizer")]
pub struct DfsCli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate optimal lineups for a player pool
    Optimize(OptimizeArgs),

    /// Show the roster slots and salary cap for a contest
    Rosters {
        #[clap(flatten)]
        contest: ContestArgs,

        /// Output as JSON.
        #[clap(long)]
        json: bool,
    },

    /// List stored optimization runs, or show one in full
    History {
        /// Number of runs to list.
        #[clap(long, default_value_t = 10)]
        limit: usize,

        /// Show the lineups of a single run.
        #[clap(long)]
        run_id: Option<RunId>,

        /// Delete all stored runs.
        #[clap(long)]
        clear: bool,

        /// Database file (or set `DFS_LINEUP_DB_PATH`).
        #[clap(long)]
        db_path: Option<PathBuf>,

        /// Output as JSON.
        #[clap(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optimize_command() {
        let cli = DfsCli::try_parse_from([
            "dfs-lineup", "optimize", "--site", "dk", "--sport", "nfl", "--players", "pool.json",
            "-n", "3", "--lock", "allen", "--lock", "kelce", "--strategy", "exact",
        ])
        .unwrap();

        match cli.command {
            Commands::Optimize(args) => {
                assert_eq!(args.contest.site, Site::DraftKings);
                assert_eq!(args.contest.sport, Sport::Nfl);
                assert_eq!(args.num_lineups, 3);
                assert_eq!(args.locked, vec![PlayerId::new("allen"), PlayerId::new("kelce")]);
                assert_eq!(args.strategy, SolveStrategy::Exact);
                assert!(!args.no_save);
            }
            other => panic!("Expected Optimize, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_site_is_rejected() {
        let err = DfsCli::try_parse_from([
            "dfs-lineup", "rosters", "--site", "superdraft", "--sport", "nfl",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Unsupported site"));
    }

    #[test]
    fn test_history_defaults() {
        let cli = DfsCli::try_parse_from(["dfs-lineup", "history"]).unwrap();
        match cli.command {
            Commands::History { limit, run_id, clear, .. } => {
                assert_eq!(limit, 10);
                assert!(run_id.is_none());
                assert!(!clear);
            }
            other => panic!("Expected History, got {other:?}"),
        }
    }
}
