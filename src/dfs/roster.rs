//! Classic-contest roster formats per site and sport.

use crate::cli::types::{Position, Site, Sport};
use crate::error::{DfsError, Result};
use serde::Serialize;
use std::fmt;

/// A roster slot: one player whose positions intersect `eligible`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSlot {
    pub label: String,
    pub eligible: Vec<Position>,
}

impl RosterSlot {
    pub fn new(label: impl Into<String>, eligible: &[Position]) -> Self {
        Self {
            label: label.into(),
            eligible: eligible.to_vec(),
        }
    }

    /// Slot for exactly one position, labelled with it.
    pub fn single(position: Position) -> Self {
        Self::new(position.to_string(), &[position])
    }

    /// True when every position accepted here is also accepted by `other`.
    pub fn is_subset_of(&self, other: &RosterSlot) -> bool {
        self.eligible.iter().all(|p| other.eligible.contains(p))
    }

    pub fn is_flex(&self) -> bool {
        self.eligible.len() > 1
    }
}

impl fmt::Display for RosterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_flex() {
            let eligible = self
                .eligible
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join("/");
            write!(f, "{} ({})", self.label, eligible)
        } else {
            write!(f, "{}", self.label)
        }
    }
}

/// Salary cap and slot list for one site/sport contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSettings {
    pub site: Site,
    pub sport: Sport,
    pub salary_cap: u32,
    pub slots: Vec<RosterSlot>,
}

impl RosterSettings {
    /// Look up the classic roster for a contest.
    ///
    /// FantasyDraft only runs football and basketball classic contests here;
    /// other combinations are rejected rather than guessed.
    pub fn for_contest(site: Site, sport: Sport) -> Result<Self> {
        use Position::*;

        let football_flex = RosterSlot::new("FLEX", &[RB, WR, TE]);
        let guard = RosterSlot::new("G", &[PG, SG]);
        let forward = RosterSlot::new("F", &[SF, PF]);
        let hoops_util = RosterSlot::new("UTIL", &[PG, SG, SF, PF, C]);
        let pitcher = RosterSlot::new("P", &[P, SP, RP]);
        let outfield = RosterSlot::single(OF);
        let wing = RosterSlot::new("W", &[W, LW, RW]);
        let goalie = RosterSlot::single(G);
        let defense = RosterSlot::single(D);
        let center = RosterSlot::single(C);

        let nfl_core = |defense_label: &str| {
            vec![
                RosterSlot::single(QB),
                RosterSlot::single(RB),
                RosterSlot::single(RB),
                RosterSlot::single(WR),
                RosterSlot::single(WR),
                RosterSlot::single(WR),
                RosterSlot::single(TE),
                football_flex.clone(),
                RosterSlot::new(defense_label, &[DST]),
            ]
        };

        let nba_positional = || {
            vec![
                RosterSlot::single(PG),
                RosterSlot::single(SG),
                RosterSlot::single(SF),
                RosterSlot::single(PF),
                RosterSlot::single(C),
                guard.clone(),
                forward.clone(),
                hoops_util.clone(),
            ]
        };

        let mlb_standard = || {
            vec![
                pitcher.clone(),
                pitcher.clone(),
                RosterSlot::single(C),
                RosterSlot::single(FirstBase),
                RosterSlot::single(SecondBase),
                RosterSlot::single(ThirdBase),
                RosterSlot::single(SS),
                outfield.clone(),
                outfield.clone(),
                outfield.clone(),
            ]
        };

        let (salary_cap, slots) = match (site, sport) {
            (Site::DraftKings, Sport::Nfl) => (50_000, nfl_core("DST")),
            (Site::FanDuel, Sport::Nfl) => (60_000, nfl_core("D")),
            (Site::Yahoo, Sport::Nfl) => (200, nfl_core("DEF")),
            (Site::FantasyDraft, Sport::Nfl) => {
                let mut slots = nfl_core("DST");
                slots.insert(8, football_flex.clone());
                (100_000, slots)
            }

            (Site::DraftKings, Sport::Nba) => (50_000, nba_positional()),
            (Site::FanDuel, Sport::Nba) => (
                60_000,
                vec![
                    RosterSlot::single(PG),
                    RosterSlot::single(PG),
                    RosterSlot::single(SG),
                    RosterSlot::single(SG),
                    RosterSlot::single(SF),
                    RosterSlot::single(SF),
                    RosterSlot::single(PF),
                    RosterSlot::single(PF),
                    RosterSlot::single(C),
                ],
            ),
            (Site::Yahoo, Sport::Nba) => (
                200,
                vec![
                    RosterSlot::single(PG),
                    RosterSlot::single(SG),
                    guard.clone(),
                    RosterSlot::single(SF),
                    RosterSlot::single(PF),
                    forward.clone(),
                    RosterSlot::single(C),
                    hoops_util.clone(),
                ],
            ),
            (Site::FantasyDraft, Sport::Nba) => (100_000, nba_positional()),

            (Site::DraftKings, Sport::Mlb) => (50_000, mlb_standard()),
            (Site::FanDuel, Sport::Mlb) => (
                35_000,
                vec![
                    pitcher.clone(),
                    RosterSlot::new("C/1B", &[C, FirstBase]),
                    RosterSlot::single(SecondBase),
                    RosterSlot::single(ThirdBase),
                    RosterSlot::single(SS),
                    outfield.clone(),
                    outfield.clone(),
                    outfield.clone(),
                    RosterSlot::new("UTIL", &[C, FirstBase, SecondBase, ThirdBase, SS, OF]),
                ],
            ),
            (Site::Yahoo, Sport::Mlb) => (200, mlb_standard()),

            (Site::DraftKings, Sport::Nhl) => (
                50_000,
                vec![
                    center.clone(),
                    center.clone(),
                    wing.clone(),
                    wing.clone(),
                    wing.clone(),
                    defense.clone(),
                    defense.clone(),
                    goalie.clone(),
                    RosterSlot::new("UTIL", &[C, W, LW, RW, D]),
                ],
            ),
            (Site::FanDuel, Sport::Nhl) => (
                55_000,
                vec![
                    center.clone(),
                    center.clone(),
                    wing.clone(),
                    wing.clone(),
                    defense.clone(),
                    defense.clone(),
                    RosterSlot::new("UTIL", &[C, W, LW, RW, D]),
                    RosterSlot::new("UTIL", &[C, W, LW, RW, D]),
                    goalie.clone(),
                ],
            ),
            (Site::Yahoo, Sport::Nhl) => (
                200,
                vec![
                    center.clone(),
                    center.clone(),
                    wing.clone(),
                    wing.clone(),
                    wing.clone(),
                    defense.clone(),
                    defense.clone(),
                    goalie.clone(),
                    goalie.clone(),
                ],
            ),

            (Site::FantasyDraft, Sport::Mlb | Sport::Nhl) => {
                return Err(DfsError::UnsupportedRoster {
                    site: site.to_string(),
                    sport: sport.to_string(),
                })
            }
        };

        Ok(Self {
            site,
            sport,
            salary_cap,
            slots,
        })
    }

    pub fn roster_size(&self) -> usize {
        self.slots.len()
    }

    pub fn slot_labels(&self) -> Vec<String> {
        self.slots.iter().map(|s| s.label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draftkings_nfl_roster() {
        let roster = RosterSettings::for_contest(Site::DraftKings, Sport::Nfl).unwrap();
        assert_eq!(roster.salary_cap, 50_000);
        assert_eq!(
            roster.slot_labels(),
            vec!["QB", "RB", "RB", "WR", "WR", "WR", "TE", "FLEX", "DST"]
        );

        let flex = &roster.slots[7];
        assert!(flex.is_flex());
        assert!(flex.eligible.contains(&Position::TE));
        assert!(!flex.eligible.contains(&Position::QB));
    }

    #[test]
    fn test_fantasydraft_nfl_has_two_flex_slots() {
        let roster = RosterSettings::for_contest(Site::FantasyDraft, Sport::Nfl).unwrap();
        assert_eq!(roster.roster_size(), 10);
        assert_eq!(roster.slots.iter().filter(|s| s.label == "FLEX").count(), 2);
        assert_eq!(roster.slots.last().unwrap().label, "DST");
    }

    #[test]
    fn test_every_supported_roster_is_well_formed() {
        for site in Site::ALL {
            for sport in Sport::ALL {
                let Ok(roster) = RosterSettings::for_contest(site, sport) else {
                    continue;
                };
                assert!(roster.salary_cap > 0, "{site} {sport}");
                assert!(!roster.slots.is_empty(), "{site} {sport}");
                for slot in &roster.slots {
                    assert!(!slot.eligible.is_empty());
                    for position in &slot.eligible {
                        assert!(
                            Position::for_sport(sport).contains(position),
                            "{site} {sport} slot {} accepts {position}",
                            slot.label
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_fantasydraft_baseball_is_unsupported() {
        match RosterSettings::for_contest(Site::FantasyDraft, Sport::Mlb) {
            Err(DfsError::UnsupportedRoster { site, sport }) => {
                assert_eq!(site, "FantasyDraft");
                assert_eq!(sport, "MLB");
            }
            other => panic!("Expected UnsupportedRoster, got {other:?}"),
        }
    }

    #[test]
    fn test_slot_subset() {
        let rb = RosterSlot::single(Position::RB);
        let flex = RosterSlot::new("FLEX", &[Position::RB, Position::WR, Position::TE]);
        assert!(rb.is_subset_of(&flex));
        assert!(!flex.is_subset_of(&rb));
        assert!(rb.is_subset_of(&rb));
    }

    #[test]
    fn test_slot_display() {
        let flex = RosterSlot::new("G", &[Position::PG, Position::SG]);
        assert_eq!(flex.to_string(), "G (PG/SG)");
        assert_eq!(RosterSlot::single(Position::C).to_string(), "C");
    }
}
