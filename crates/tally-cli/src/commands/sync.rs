use chrono::Utc;
use clap::Subcommand;

use super::open_gateway;

#[derive(Subcommand)]
pub enum SyncAction {
    /// Push the current state to the remote mirror immediately
    Now,
    /// Show sync status
    Status,
}

pub fn run(action: SyncAction) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let mut gw = open_gateway()?;

    match action {
        SyncAction::Now => {
            let now = Utc::now();
            let state = gw.load(now)?;
            if !gw.status().signed_in {
                return Err("not signed in; run `tally-cli auth login` first".into());
            }
            gw.save(&state, now)?;
            if rt.block_on(gw.flush_now()) {
                println!("pushed");
            } else {
                println!("push failed, local copy is intact");
            }
        }
        SyncAction::Status => {
            let status = gw.status();
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
