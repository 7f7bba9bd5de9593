use chrono::Utc;
use tally_core::progress::{
    achievement_title, log_intake, title_for_level, xp_to_next, CATALOG,
};

use super::open_gateway;

/// Upper bound on a single log entry. Larger values are almost
/// certainly typos and would distort the day's totals.
const MAX_SINGLE_LOG: u32 = 2000;

pub fn log(amount: u32) -> Result<(), Box<dyn std::error::Error>> {
    if amount == 0 || amount > MAX_SINGLE_LOG {
        return Err(format!("amount must be between 1 and {MAX_SINGLE_LOG} ml").into());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let now = Utc::now();
    let mut gw = open_gateway()?;
    let mut state = gw.load(now)?;

    let change = log_intake(&mut state, amount, now)?;
    gw.save(&state, now)?;
    rt.block_on(gw.flush_now());

    println!(
        "{} / {} ml  (+{} xp)",
        state.current_intake, state.daily_goal, change.xp_gained
    );
    if change.goal_reached {
        println!("daily goal reached! streak: {}", change.streak);
    }
    if let Some(level) = change.new_level {
        println!("level up! now level {level} ({})", title_for_level(level));
    }
    for id in &change.unlocked {
        let title = achievement_title(id).unwrap_or(id);
        println!("achievement unlocked: {title}");
    }
    Ok(())
}

pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let mut gw = open_gateway()?;
    let state = gw.load(now)?;

    println!("intake: {} / {} ml", state.current_intake, state.daily_goal);
    println!(
        "level: {} ({})  xp: {}",
        state.level,
        title_for_level(state.level),
        state.total_xp
    );
    match xp_to_next(state.total_xp) {
        Some(needed) => println!("next level in: {needed} xp"),
        None => println!("max level reached"),
    }
    println!(
        "streak: {} day(s)  best: {}",
        state.streak, state.stats.best_streak
    );
    Ok(())
}

pub fn achievements() -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let mut gw = open_gateway()?;
    let state = gw.load(now)?;

    for def in CATALOG {
        let mark = if state.achievements.contains_key(def.id) {
            "x"
        } else {
            " "
        };
        println!("[{mark}] {}  ({} xp)", def.title, def.xp_reward);
    }
    println!(
        "{} of {} unlocked",
        state.achievements.len(),
        CATALOG.len()
    );
    Ok(())
}

pub fn reset(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("pass --yes to confirm erasing all progress".into());
    }
    let rt = tokio::runtime::Runtime::new()?;
    let mut gw = open_gateway()?;
    rt.block_on(gw.reset())?;
    println!("all progress erased");
    Ok(())
}
