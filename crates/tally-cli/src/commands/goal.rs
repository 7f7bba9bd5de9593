use chrono::Utc;
use clap::Subcommand;
use tally_core::progress::{GOAL_MAX, GOAL_MIN};

use super::open_gateway;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Show the current daily goal
    Show,
    /// Set the daily goal in milliliters
    Set {
        /// New goal (clamped to 500-5000)
        amount: u32,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let mut gw = open_gateway()?;
    let mut state = gw.load(now)?;

    match action {
        GoalAction::Show => {
            println!("{} ml", state.daily_goal);
        }
        GoalAction::Set { amount } => {
            let applied = state.set_daily_goal(amount);
            gw.save(&state, now)?;
            if applied != amount {
                println!(
                    "{applied} ml (requested {amount} clamped to {GOAL_MIN}-{GOAL_MAX})"
                );
            } else {
                println!("{applied} ml");
            }
        }
    }
    Ok(())
}
