//! DFS Lineup Optimizer Library
//!
//! Builds salary-capped daily fantasy sports lineups that maximize projected
//! points, for DraftKings, FanDuel, Yahoo and FantasyDraft classic contests.
//!
//! ## Features
//!
//! - **Roster Formats**: Slot layouts and salary caps per site and sport
//! - **Exact Solver**: Branch-and-bound search with a local-search warm start
//! - **Lineup Batches**: Diverse lineups with overlap and exposure limits
//! - **Player Constraints**: Locks, exclusions, team stacking limits, salary floors
//! - **Run History**: Generated lineups stored in a local SQLite database
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dfs_lineup::dfs::{optimize, OptimizeRequest, PlayerRecord};
//!
//! let players: Vec<PlayerRecord> = serde_json::from_str(
//!     &std::fs::read_to_string("players.json").unwrap(),
//! )
//! .unwrap();
//!
//! let request = OptimizeRequest::new("draftkings", "nfl", players).with_num_lineups(3);
//! let response = optimize(&request);
//! for lineup in response.lineups.unwrap_or_default() {
//!     println!("{:.2} points for ${}", lineup.total_points, lineup.total_salary);
//! }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export DFS_LINEUP_TIME_LIMIT_MS=5000       # solver budget per request, 0 for none
//! export DFS_LINEUP_EXACT_POOL_LIMIT=120     # largest pool solved exactly under `auto`
//! export DFS_LINEUP_DB_PATH=~/lineups.db     # run history database
//! export DFS_LINEUP_POOL_TOKEN=...           # bearer token for remote player pools
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dfs;
pub mod error;
pub mod logging;
pub mod optimizer;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{PlayerId, Position, RunId, Site, Sport};
pub use error::{DfsError, ErrorCategory, Result};
