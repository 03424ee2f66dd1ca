use crate::cli::types::{PlayerId, Position, Sport};
use crate::dfs::roster::RosterSlot;
use crate::error::{DfsError, Result};
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;


fn de_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number for player id, got {other}"
        ))),
    }
}

/// Player projection scaled per $1000 of salary, rounded to two decimals.
///
/// Display metric only; the optimizer maximizes total projection.
pub fn value_per_thousand(projected: f64, salary: u32) -> f64 {
    if salary == 0 {
        return 0.0;
    }
    let raw = projected / (salary as f64 / 1000.0);
    (raw * 100.0).round() / 100.0
}

/// Raw player row as supplied by callers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerRecord {
    #[serde(deserialize_with = "de_string_or_number")]
    pub id: String,
    pub name: String,
    /// One label (`"RB"`) or several (`"PG/SG"`).
    pub position: String,
    #[serde(default)]
    pub team: String,
    pub salary: i64,
    #[serde(alias = "projected", alias = "fppg")]
    pub projected_points: f64,
}

/// Parse a player payload: either a bare array of records or an object
/// with a `players` array.
pub fn parse_player_records(json: &str) -> Result<Vec<PlayerRecord>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        List(Vec<PlayerRecord>),
        Wrapped { players: Vec<PlayerRecord> },
    }

    match serde_json::from_str::<Payload>(json)? {
        Payload::List(players) | Payload::Wrapped { players } => Ok(players),
    }
}

/// A validated player ready for optimization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub positions: Vec<Position>,
    pub team: String,
    pub salary: u32,
    pub projected: f64,
}

impl Player {
    /// Validate a raw record against the sport's positions.
    pub fn from_record(sport: Sport, record: &PlayerRecord) -> Result<Self> {
        let id: PlayerId = record.id.parse()?;
        let invalid = |reason: &str| DfsError::InvalidPlayer {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        if record.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if record.salary <= 0 {
            return Err(invalid("salary must be positive"));
        }
        let salary = u32::try_from(record.salary).map_err(|_| invalid("salary is too large"))?;
        if !record.projected_points.is_finite() || record.projected_points < 0.0 {
            return Err(invalid("projected points must be a non-negative number"));
        }

        let positions =
            Position::parse_list_for(sport, &record.position).map_err(|e| DfsError::InvalidPlayer {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            name: record.name.trim().to_string(),
            positions,
            team: record.team.trim().to_uppercase(),
            salary,
            projected: record.projected_points,
        })
    }

    pub fn is_eligible_for(&self, slot: &RosterSlot) -> bool {
        self.positions.iter().any(|p| slot.eligible.contains(p))
    }

    pub fn value(&self) -> f64 {
        value_per_thousand(self.projected, self.salary)
    }

    /// Positions joined the way sites print them, e.g. `PG/SG`.
    pub fn position_label(&self) -> String {
        self.positions
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// How a lineup was certified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Search finished; no better lineup exists.
    Optimal,
    /// Best lineup found before the time or node budget ran out.
    TimeLimit,
    /// Local-search result, no optimality certificate.
    Heuristic,
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::TimeLimit => "time_limit",
            SolveStatus::Heuristic => "heuristic",
        };
        write!(f, "{}", s)
    }
}

/// One filled roster slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupEntry {
    pub slot: String,
    pub player: Player,
}

/// A complete assignment of one player to every roster slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    pub entries: Vec<LineupEntry>,
    pub total_salary: u32,
    pub total_projected: f64,
    pub status: SolveStatus,
}

impl Lineup {
    pub fn new(entries: Vec<LineupEntry>, status: SolveStatus) -> Self {
        let total_salary = entries.iter().map(|e| e.player.salary).sum();
        let total_projected = entries.iter().map(|e| e.player.projected).sum();
        Self {
            entries,
            total_salary,
            total_projected,
            status,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.entries.iter().map(|e| &e.player)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.entries.iter().any(|e| &e.player.id == id)
    }

    /// Player ids in ascending order; the final tie-break key.
    pub fn sorted_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.players().map(|p| p.id.clone()).collect();
        ids.sort();
        ids
    }

    /// Number of players shared with `other`.
    pub fn overlap(&self, other: &Lineup) -> usize {
        self.players().filter(|p| other.contains(&p.id)).count()
    }

    /// Check the structural invariants against the slots and cap it was built for.
    pub fn validate(&self, slots: &[RosterSlot], salary_cap: u32) -> Result<()> {
        if self.entries.len() != slots.len() {
            return Err(DfsError::Internal {
                message: format!(
                    "lineup has {} players for {} slots",
                    self.entries.len(),
                    slots.len()
                ),
            });
        }
        if self.total_salary > salary_cap {
            return Err(DfsError::Internal {
                message: format!(
                    "lineup salary {} exceeds cap {}",
                    self.total_salary, salary_cap
                ),
            });
        }

        let mut seen = HashSet::new();
        for (entry, slot) in self.entries.iter().zip(slots) {
            if !seen.insert(&entry.player.id) {
                return Err(DfsError::Internal {
                    message: format!("player {} appears twice", entry.player.id),
                });
            }
            if entry.slot != slot.label || !entry.player.is_eligible_for(slot) {
                return Err(DfsError::Internal {
                    message: format!(
                        "player {} ({}) is not eligible for slot {}",
                        entry.player.id,
                        entry.player.position_label(),
                        slot.label
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Lineups produced by one batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupBatch {
    pub lineups: Vec<Lineup>,
    pub requested: usize,
}

impl LineupBatch {
    pub fn len(&self) -> usize {
        self.lineups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }

    /// Fewer lineups than requested; still a successful run.
    pub fn is_partial(&self) -> bool {
        self.lineups.len() < self.requested
    }

    pub fn max_pairwise_overlap(&self) -> usize {
        let mut max = 0;
        for (i, a) in self.lineups.iter().enumerate() {
            for b in &self.lineups[i + 1..] {
                max = max.max(a.overlap(b));
            }
        }
        max
    }

    /// Number of lineups each player appears in.
    pub fn exposure(&self, id: &PlayerId) -> usize {
        self.lineups.iter().filter(|l| l.contains(id)).count()
    }
}
