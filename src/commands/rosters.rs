//! Rosters command implementation

use crate::{dfs::roster::RosterSettings, Result, Site, Sport};

use super::format_salary;

/// Handle the rosters command
pub fn handle_rosters(site: Site, sport: Sport, json: bool) -> Result<()> {
    let roster = RosterSettings::for_contest(site, sport)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&roster)?);
        return Ok(());
    }

    print!("{}", format_roster(&roster));
    Ok(())
}

pub fn format_roster(roster: &RosterSettings) -> String {
    let mut out = format!(
        "{} {}: {} slots, salary cap ${}\n",
        roster.site,
        roster.sport,
        roster.roster_size(),
        format_salary(roster.salary_cap)
    );
    for slot in &roster.slots {
        out.push_str(&format!("  {}\n", slot));
    }
    out
}
