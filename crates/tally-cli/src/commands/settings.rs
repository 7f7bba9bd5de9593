use chrono::{NaiveTime, Utc};
use clap::Subcommand;

use super::open_gateway;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a setting value
    Get {
        /// One of: sound, notifications, reminder_interval,
        /// window_start, window_end
        key: String,
    },
    /// Set a setting value
    Set {
        /// Setting key
        key: String,
        /// New value (bool, minutes, or HH:MM)
        value: String,
    },
    /// List all settings
    List,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let mut gw = open_gateway()?;
    let mut state = gw.load(now)?;

    match action {
        SettingsAction::Get { key } => {
            let s = &state.settings;
            let value = match key.as_str() {
                "sound" => s.sound_enabled.to_string(),
                "notifications" => s.notifications_enabled.to_string(),
                "reminder_interval" => s.reminder_interval_min.to_string(),
                "window_start" => s.active_window_start.format("%H:%M").to_string(),
                "window_end" => s.active_window_end.format("%H:%M").to_string(),
                _ => return Err(format!("unknown setting: {key}").into()),
            };
            println!("{value}");
        }
        SettingsAction::Set { key, value } => {
            let s = &mut state.settings;
            match key.as_str() {
                "sound" => s.sound_enabled = value.parse()?,
                "notifications" => s.notifications_enabled = value.parse()?,
                "reminder_interval" => {
                    let minutes: u32 = value.parse()?;
                    if minutes == 0 {
                        return Err("reminder interval must be positive".into());
                    }
                    s.reminder_interval_min = minutes;
                }
                "window_start" => {
                    s.active_window_start = NaiveTime::parse_from_str(&value, "%H:%M")?
                }
                "window_end" => s.active_window_end = NaiveTime::parse_from_str(&value, "%H:%M")?,
                _ => return Err(format!("unknown setting: {key}").into()),
            }
            gw.save(&state, now)?;
            println!("ok");
        }
        SettingsAction::List => {
            println!("{}", serde_json::to_string_pretty(&state.settings)?);
        }
    }
    Ok(())
}
