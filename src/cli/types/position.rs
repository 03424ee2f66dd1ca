//! Player position types for the supported sports.

use super::site::Sport;
use crate::error::DfsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player positions across all supported sports.
///
/// Labels overlap between sports (`C` is a center in basketball and hockey
/// and a catcher in baseball), so a position only means something next to a
/// [`Sport`]. Use [`Position::parse_for`] when the sport is known; it also
/// resolves football aliases such as `D/ST` and `DEF`.
///
/// # Examples
///
/// ```rust
/// use dfs_lineup::{Position, Sport};
///
/// assert_eq!(Position::parse_for(Sport::Nfl, "D/ST").unwrap(), Position::DST);
/// assert_eq!(Position::parse_for(Sport::Nhl, "D").unwrap(), Position::D);
/// assert_eq!(Position::FirstBase.to_string(), "1B");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    // Football
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
    // Basketball
    PG,
    SG,
    SF,
    PF,
    C,
    // Baseball
    P,
    SP,
    RP,
    FirstBase,
    SecondBase,
    ThirdBase,
    SS,
    OF,
    // Hockey
    W,
    LW,
    RW,
    D,
    G,
}

const FOOTBALL: &[Position] = &[
    Position::QB,
    Position::RB,
    Position::WR,
    Position::TE,
    Position::K,
    Position::DST,
];

const BASKETBALL: &[Position] = &[
    Position::PG,
    Position::SG,
    Position::SF,
    Position::PF,
    Position::C,
];

const BASEBALL: &[Position] = &[
    Position::P,
    Position::SP,
    Position::RP,
    Position::C,
    Position::FirstBase,
    Position::SecondBase,
    Position::ThirdBase,
    Position::SS,
    Position::OF,
];

const HOCKEY: &[Position] = &[
    Position::C,
    Position::W,
    Position::LW,
    Position::RW,
    Position::D,
    Position::G,
];

impl Position {
    /// All positions a player of `sport` may list.
    pub fn for_sport(sport: Sport) -> &'static [Position] {
        match sport {
            Sport::Nfl => FOOTBALL,
            Sport::Nba => BASKETBALL,
            Sport::Mlb => BASEBALL,
            Sport::Nhl => HOCKEY,
        }
    }

    /// Parse a single position label in the context of a sport.
    pub fn parse_for(sport: Sport, raw: &str) -> Result<Self, DfsError> {
        let upper = raw.trim().to_uppercase();
        let position = match (sport, upper.as_str()) {
            (Sport::Nfl, "D" | "D/ST" | "DEF" | "DST") => Position::DST,
            (Sport::Nfl, "PK") => Position::K,
            _ => upper.parse::<Position>()?,
        };

        if Position::for_sport(sport).contains(&position) {
            Ok(position)
        } else {
            Err(DfsError::InvalidPosition {
                position: format!("{} ({})", raw.trim(), sport),
            })
        }
    }

    /// Parse a multi-eligibility label such as `"PG/SG"` or `"1B,OF"`.
    ///
    /// Duplicates collapse; order of first appearance is kept.
    pub fn parse_list_for(sport: Sport, raw: &str) -> Result<Vec<Self>, DfsError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("D/ST") {
            return Ok(vec![Position::parse_for(sport, trimmed)?]);
        }

        let mut positions = Vec::new();
        for token in trimmed.split(['/', ',']).map(str::trim) {
            if token.is_empty() {
                continue;
            }
            let position = Position::parse_for(sport, token)?;
            if !positions.contains(&position) {
                positions.push(position);
            }
        }

        if positions.is_empty() {
            return Err(DfsError::InvalidPosition {
                position: raw.to_string(),
            });
        }
        Ok(positions)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
            Position::P => "P",
            Position::SP => "SP",
            Position::RP => "RP",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::SS => "SS",
            Position::OF => "OF",
            Position::W => "W",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::D => "D",
            Position::G => "G",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DST" | "D/ST" | "DEF" => Ok(Position::DST),
            "PG" => Ok(Position::PG),
            "SG" => Ok(Position::SG),
            "SF" => Ok(Position::SF),
            "PF" => Ok(Position::PF),
            "C" => Ok(Position::C),
            "P" => Ok(Position::P),
            "SP" => Ok(Position::SP),
            "RP" => Ok(Position::RP),
            "1B" => Ok(Position::FirstBase),
            "2B" => Ok(Position::SecondBase),
            "3B" => Ok(Position::ThirdBase),
            "SS" => Ok(Position::SS),
            "OF" => Ok(Position::OF),
            "W" => Ok(Position::W),
            "LW" => Ok(Position::LW),
            "RW" => Ok(Position::RW),
            "D" => Ok(Position::D),
            "G" => Ok(Position::G),
            _ => Err(DfsError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_football_defense_aliases() {
        for raw in ["D", "d/st", "DEF", "DST"] {
            assert_eq!(Position::parse_for(Sport::Nfl, raw).unwrap(), Position::DST);
        }
    }

    #[test]
    fn test_hockey_d_is_defenseman() {
        assert_eq!(Position::parse_for(Sport::Nhl, "D").unwrap(), Position::D);
    }

    #[test]
    fn test_position_outside_sport_is_rejected() {
        assert!(Position::parse_for(Sport::Nfl, "PG").is_err());
        assert!(Position::parse_for(Sport::Nba, "QB").is_err());
        assert!(Position::parse_for(Sport::Mlb, "G").is_err());
    }

    #[test]
    fn test_shared_center_label() {
        assert_eq!(Position::parse_for(Sport::Nba, "C").unwrap(), Position::C);
        assert_eq!(Position::parse_for(Sport::Mlb, "C").unwrap(), Position::C);
        assert_eq!(Position::parse_for(Sport::Nhl, "C").unwrap(), Position::C);
    }

    #[test]
    fn test_parse_list_multi_eligibility() {
        let positions = Position::parse_list_for(Sport::Nba, "PG/SG").unwrap();
        assert_eq!(positions, vec![Position::PG, Position::SG]);

        let positions = Position::parse_list_for(Sport::Mlb, "1B, OF, 1B").unwrap();
        assert_eq!(positions, vec![Position::FirstBase, Position::OF]);
    }

    #[test]
    fn test_parse_list_keeps_dst_together() {
        let positions = Position::parse_list_for(Sport::Nfl, "D/ST").unwrap();
        assert_eq!(positions, vec![Position::DST]);
    }

    #[test]
    fn test_parse_list_empty_is_rejected() {
        assert!(Position::parse_list_for(Sport::Nfl, " / ").is_err());
        assert!(Position::parse_list_for(Sport::Nfl, "").is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for sport in [Sport::Nfl, Sport::Nba, Sport::Mlb, Sport::Nhl] {
            for position in Position::for_sport(sport) {
                assert_eq!(position.to_string().parse::<Position>().unwrap(), *position);
            }
        }
    }
}
