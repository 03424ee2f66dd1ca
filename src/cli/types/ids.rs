//! ID types for DFS players and stored optimization runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DfsError;

/// Type-safe wrapper for player identifiers.
///
/// Sites hand out ids in different shapes (numeric on DraftKings, slugs like
/// `"allen"` in hand-built pools), so the id is kept as an opaque string.
/// Ordering is plain string ordering and drives the final tie-break between
/// equally valued lineups.
///
/// # Examples
///
/// ```rust
/// use dfs_lineup::PlayerId;
///
/// let id = PlayerId::new("mccaffrey");
/// assert_eq!(id.as_str(), "mccaffrey");
/// assert_eq!(id.to_string(), "mccaffrey");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DfsError::InvalidPlayer {
                id: s.to_string(),
                reason: "player id must not be empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Type-safe wrapper for stored optimization run IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub i64);

impl RunId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RunId {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| DfsError::InvalidConfig {
                key: "run-id".to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_from_str_trims() {
        let id: PlayerId = "  kelce ".parse().unwrap();
        assert_eq!(id.as_str(), "kelce");
    }

    #[test]
    fn test_player_id_empty_is_rejected() {
        assert!("   ".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_player_id_ordering_is_lexicographic() {
        let mut ids = vec![PlayerId::new("b"), PlayerId::new("a10"), PlayerId::new("a2")];
        ids.sort();
        assert_eq!(
            ids,
            vec![PlayerId::new("a10"), PlayerId::new("a2"), PlayerId::new("b")]
        );
    }

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&PlayerId::new("hill")).unwrap();
        assert_eq!(json, "\"hill\"");
    }

    #[test]
    fn test_run_id_parse() {
        assert_eq!("42".parse::<RunId>().unwrap(), RunId::new(42));
        assert!("forty-two".parse::<RunId>().is_err());
    }
}
