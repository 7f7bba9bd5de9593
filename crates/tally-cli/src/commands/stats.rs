use chrono::Utc;
use clap::Subcommand;
use tally_core::progress::DayKey;

use super::open_gateway;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Lifetime totals
    All,
    /// Totals for the last seven days
    Week,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let mut gw = open_gateway()?;
    let state = gw.load(now)?;

    match action {
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(&state.stats)?);
        }
        StatsAction::Week => {
            let today = DayKey::from_instant(now);
            let totals = state.week_totals(today);
            // oldest first, matching the totals array
            let mut days = [today; 7];
            for slot in (0..6).rev() {
                days[slot] = days[slot + 1].pred();
            }
            for (day, total) in days.iter().zip(totals) {
                println!("{day}: {total} ml");
            }
        }
    }
    Ok(())
}
