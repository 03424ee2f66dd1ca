//! Runtime configuration: CLI flag, then environment variable, then default.

use crate::core::cache::cache_root;
use crate::error::{DfsError, Result};
use crate::optimizer::solver::{DEFAULT_EXACT_POOL_LIMIT, DEFAULT_TIME_LIMIT_MS};
use crate::optimizer::{SolveStrategy, SolverOptions};
use std::path::PathBuf;
use std::str::FromStr;

pub const TIME_LIMIT_ENV_VAR: &str = "DFS_LINEUP_TIME_LIMIT_MS";
pub const EXACT_POOL_LIMIT_ENV_VAR: &str = "DFS_LINEUP_EXACT_POOL_LIMIT";
pub const DB_PATH_ENV_VAR: &str = "DFS_LINEUP_DB_PATH";

/// Values supplied on the command line; `None` defers to the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub time_limit_ms: Option<u64>,
    pub exact_pool_limit: Option<usize>,
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Search budget for a whole request, `0` for none.
    pub time_limit_ms: u64,
    pub exact_pool_limit: usize,
    pub db_path: PathBuf,
}

impl OptimizerConfig {
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolve_with<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let time_limit_ms = match overrides.time_limit_ms {
            Some(ms) => ms,
            None => parse_env(&lookup, TIME_LIMIT_ENV_VAR)?.unwrap_or(DEFAULT_TIME_LIMIT_MS),
        };
        let exact_pool_limit = match overrides.exact_pool_limit {
            Some(limit) => limit,
            None => parse_env(&lookup, EXACT_POOL_LIMIT_ENV_VAR)?.unwrap_or(DEFAULT_EXACT_POOL_LIMIT),
        };
        let db_path = overrides
            .db_path
            .or_else(|| lookup(DB_PATH_ENV_VAR).filter(|p| !p.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| cache_root().join("lineups.db"));

        Ok(Self {
            time_limit_ms,
            exact_pool_limit,
            db_path,
        })
    }

    pub fn solver_options(&self, strategy: SolveStrategy) -> SolverOptions {
        SolverOptions::default()
            .with_strategy(strategy)
            .with_limits(crate::dfs::request::limits_from_ms(self.time_limit_ms))
            .with_exact_pool_limit(self.exact_pool_limit)
    }
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| DfsError::InvalidConfig {
                key: key.to_string(),
                message: format!("'{}': {}", raw, e),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = OptimizerConfig::resolve_with(ConfigOverrides::default(), env(&[])).unwrap();
        assert_eq!(config.time_limit_ms, DEFAULT_TIME_LIMIT_MS);
        assert_eq!(config.exact_pool_limit, DEFAULT_EXACT_POOL_LIMIT);
        assert!(config.db_path.ends_with("lineups.db"));
    }

    #[test]
    fn test_env_values_are_used() {
        let config = OptimizerConfig::resolve_with(
            ConfigOverrides::default(),
            env(&[
                (TIME_LIMIT_ENV_VAR, "2500"),
                (EXACT_POOL_LIMIT_ENV_VAR, " 80 "),
                (DB_PATH_ENV_VAR, "/tmp/dfs.db"),
            ]),
        )
        .unwrap();
        assert_eq!(config.time_limit_ms, 2500);
        assert_eq!(config.exact_pool_limit, 80);
        assert_eq!(config.db_path, PathBuf::from("/tmp/dfs.db"));
    }

    #[test]
    fn test_flags_beat_env() {
        let overrides = ConfigOverrides {
            time_limit_ms: Some(0),
            exact_pool_limit: Some(5),
            db_path: Some(PathBuf::from("here.db")),
        };
        let config = OptimizerConfig::resolve_with(
            overrides,
            env(&[(TIME_LIMIT_ENV_VAR, "abc"), (EXACT_POOL_LIMIT_ENV_VAR, "80")]),
        )
        .unwrap();
        assert_eq!(config.time_limit_ms, 0);
        assert_eq!(config.exact_pool_limit, 5);
        assert_eq!(config.db_path, PathBuf::from("here.db"));
    }

    #[test]
    fn test_invalid_env_value() {
        let err = OptimizerConfig::resolve_with(
            ConfigOverrides::default(),
            env(&[(TIME_LIMIT_ENV_VAR, "soon")]),
        )
        .unwrap_err();
        match err {
            DfsError::InvalidConfig { key, message } => {
                assert_eq!(key, TIME_LIMIT_ENV_VAR);
                assert!(message.contains("soon"));
            }
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_solver_options_from_config() {
        let config = OptimizerConfig {
            time_limit_ms: 750,
            exact_pool_limit: 12,
            db_path: PathBuf::from("x.db"),
        };
        let options = config.solver_options(SolveStrategy::Exact);
        assert_eq!(options.strategy, SolveStrategy::Exact);
        assert_eq!(options.limits.time_limit, Some(Duration::from_millis(750)));
        assert_eq!(options.exact_pool_limit, 12);

        let unlimited = OptimizerConfig { time_limit_ms: 0, ..config };
        assert_eq!(unlimited.solver_options(SolveStrategy::Auto).limits.time_limit, None);
    }
}
