//! Player pool built fresh for each optimization request.

use crate::cli::types::{PlayerId, Sport};
use crate::dfs::roster::RosterSlot;
use crate::dfs::types::{Player, PlayerRecord};
use crate::error::{DfsError, Result};
use std::collections::HashMap;

/// Validated, id-unique set of players.
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
}

impl PlayerPool {
    /// Build a pool, rejecting duplicate ids.
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut index = HashMap::with_capacity(players.len());
        for (i, player) in players.iter().enumerate() {
            if player.salary == 0 {
                return Err(DfsError::InvalidPlayer {
                    id: player.id.to_string(),
                    reason: "salary must be positive".to_string(),
                });
            }
            if !player.projected.is_finite() || player.projected < 0.0 {
                return Err(DfsError::InvalidPlayer {
                    id: player.id.to_string(),
                    reason: "projected points must be a non-negative number".to_string(),
                });
            }
            if player.positions.is_empty() {
                return Err(DfsError::InvalidPlayer {
                    id: player.id.to_string(),
                    reason: "player has no positions".to_string(),
                });
            }
            if index.insert(player.id.clone(), i).is_some() {
                return Err(DfsError::DuplicatePlayer {
                    id: player.id.to_string(),
                });
            }
        }
        Ok(Self { players, index })
    }

    /// Validate raw records for `sport` and build the pool.
    pub fn from_records(sport: Sport, records: &[PlayerRecord]) -> Result<Self> {
        let players = records
            .iter()
            .map(|r| Player::from_record(sport, r))
            .collect::<Result<Vec<_>>>()?;
        Self::new(players)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.index.get(id).map(|&i| &self.players[i])
    }

    pub fn eligible_count(&self, slot: &RosterSlot) -> usize {
        self.players.iter().filter(|p| p.is_eligible_for(slot)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, position: &str, salary: i64, projected: f64) -> PlayerRecord {
        PlayerRecord {
            id: id.to_string(),
            name: format!("Player {id}"),
            position: position.to_string(),
            team: "buf".to_string(),
            salary,
            projected_points: projected,
        }
    }

    #[test]
    fn test_from_records_builds_index() {
        let pool = PlayerPool::from_records(
            Sport::Nfl,
            &[record("allen", "QB", 8000, 24.8), record("cook", "RB", 6000, 14.0)],
        )
        .unwrap();

        assert_eq!(pool.len(), 2);
        let allen = pool.get(&PlayerId::new("allen")).unwrap();
        assert_eq!(allen.salary, 8000);
        assert_eq!(allen.team, "BUF");
        assert!(pool.get(&PlayerId::new("missing")).is_none());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = PlayerPool::from_records(
            Sport::Nfl,
            &[record("allen", "QB", 8000, 24.8), record("allen", "QB", 7000, 20.0)],
        )
        .unwrap_err();
        assert!(matches!(err, DfsError::DuplicatePlayer { id } if id == "allen"));
    }

    #[test]
    fn test_bad_salary_is_rejected() {
        let err = PlayerPool::from_records(Sport::Nfl, &[record("x", "QB", 0, 10.0)]).unwrap_err();
        assert!(err.to_string().contains("salary must be positive"));
    }

    #[test]
    fn test_negative_projection_is_rejected() {
        let err =
            PlayerPool::from_records(Sport::Nfl, &[record("x", "QB", 5000, -1.0)]).unwrap_err();
        assert!(matches!(err, DfsError::InvalidPlayer { .. }));
    }

    #[test]
    fn test_wrong_sport_position_is_rejected() {
        let err =
            PlayerPool::from_records(Sport::Nfl, &[record("x", "PG", 5000, 10.0)]).unwrap_err();
        match err {
            DfsError::InvalidPlayer { id, reason } => {
                assert_eq!(id, "x");
                assert!(reason.contains("Invalid position"));
            }
            other => panic!("Expected InvalidPlayer, got {other:?}"),
        }
    }

    #[test]
    fn test_eligible_count_respects_flex() {
        use crate::cli::types::Position;

        let pool = PlayerPool::from_records(
            Sport::Nfl,
            &[
                record("qb", "QB", 8000, 20.0),
                record("rb", "RB", 6000, 14.0),
                record("te", "TE", 4000, 9.0),
            ],
        )
        .unwrap();
        let flex = RosterSlot::new("FLEX", &[Position::RB, Position::WR, Position::TE]);
        assert_eq!(pool.eligible_count(&flex), 2);
    }
}
