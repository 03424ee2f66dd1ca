//! Contest site and sport identifiers.

use crate::error::DfsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Daily fantasy contest operators with known roster formats.
///
/// # Examples
///
/// ```rust
/// use dfs_lineup::Site;
///
/// let site: Site = "DraftKings".parse().unwrap();
/// assert_eq!(site, Site::DraftKings);
/// assert_eq!(site.key(), "draftkings");
/// assert!("superdraft".parse::<Site>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    DraftKings,
    FanDuel,
    Yahoo,
    FantasyDraft,
}

impl Site {
    pub const ALL: [Site; 4] = [Site::DraftKings, Site::FanDuel, Site::Yahoo, Site::FantasyDraft];

    /// Lowercase key used in requests and responses.
    pub fn key(&self) -> &'static str {
        match self {
            Site::DraftKings => "draftkings",
            Site::FanDuel => "fanduel",
            Site::Yahoo => "yahoo",
            Site::FantasyDraft => "fantasydraft",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Site::DraftKings => "DraftKings",
            Site::FanDuel => "FanDuel",
            Site::Yahoo => "Yahoo",
            Site::FantasyDraft => "FantasyDraft",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Site {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draftkings" | "dk" => Ok(Site::DraftKings),
            "fanduel" | "fd" => Ok(Site::FanDuel),
            "yahoo" => Ok(Site::Yahoo),
            "fantasydraft" | "fantasy_draft" | "fantasy-draft" => Ok(Site::FantasyDraft),
            _ => Err(DfsError::UnsupportedSite {
                site: s.to_string(),
            }),
        }
    }
}

/// Sports with classic-contest roster tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Nfl,
    Nba,
    Mlb,
    Nhl,
}

impl Sport {
    pub const ALL: [Sport; 4] = [Sport::Nfl, Sport::Nba, Sport::Mlb, Sport::Nhl];

    pub fn key(&self) -> &'static str {
        match self {
            Sport::Nfl => "nfl",
            Sport::Nba => "nba",
            Sport::Mlb => "mlb",
            Sport::Nhl => "nhl",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sport::Nfl => "NFL",
            Sport::Nba => "NBA",
            Sport::Mlb => "MLB",
            Sport::Nhl => "NHL",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Sport {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nfl" | "football" => Ok(Sport::Nfl),
            "nba" | "basketball" => Ok(Sport::Nba),
            "mlb" | "baseball" => Ok(Sport::Mlb),
            "nhl" | "hockey" => Ok(Sport::Nhl),
            _ => Err(DfsError::UnsupportedSport {
                sport: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_aliases() {
        assert_eq!("dk".parse::<Site>().unwrap(), Site::DraftKings);
        assert_eq!("FANDUEL".parse::<Site>().unwrap(), Site::FanDuel);
        assert_eq!(" yahoo ".parse::<Site>().unwrap(), Site::Yahoo);
        assert_eq!("fantasy_draft".parse::<Site>().unwrap(), Site::FantasyDraft);
    }

    #[test]
    fn test_unknown_site_is_unsupported() {
        match "prizepicks".parse::<Site>() {
            Err(DfsError::UnsupportedSite { site }) => assert_eq!(site, "prizepicks"),
            other => panic!("Expected UnsupportedSite, got {other:?}"),
        }
    }

    #[test]
    fn test_sport_aliases() {
        assert_eq!("football".parse::<Sport>().unwrap(), Sport::Nfl);
        assert_eq!("NBA".parse::<Sport>().unwrap(), Sport::Nba);
        assert_eq!("baseball".parse::<Sport>().unwrap(), Sport::Mlb);
        assert_eq!("hockey".parse::<Sport>().unwrap(), Sport::Nhl);
    }

    #[test]
    fn test_unknown_sport_is_rejected_not_defaulted() {
        match "cricket".parse::<Sport>() {
            Err(DfsError::UnsupportedSport { sport }) => assert_eq!(sport, "cricket"),
            other => panic!("Expected UnsupportedSport, got {other:?}"),
        }
    }

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for site in Site::ALL {
            assert_eq!(site.key().parse::<Site>().unwrap(), site);
        }
        for sport in Sport::ALL {
            assert_eq!(sport.key().parse::<Sport>().unwrap(), sport);
        }
    }
}
