use clap::Subcommand;
use tally_core::storage::Config;
use tally_core::sync::{IdentityClient, MergeDecision};

use super::open_gateway;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in and pull or seed the remote copy
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Remove the stored session token
    Logout,
    /// Check sign-in status
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let client = IdentityClient::new(config.remote.base_url.clone());

    match action {
        AuthAction::Login { email, password } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(client.sign_in(&email, &password))?;

            let mut gw = open_gateway()?;
            let decision = rt.block_on(gw.merge_on_sign_in(chrono::Utc::now()))?;
            match decision {
                MergeDecision::UseRemote => println!("signed in, remote progress restored"),
                MergeDecision::UseLocal => println!("signed in, local progress uploaded"),
            }
        }
        AuthAction::Logout => {
            client.sign_out()?;
            println!("signed out");
        }
        AuthAction::Status => {
            println!(
                "{}",
                if client.is_signed_in() {
                    "signed in"
                } else {
                    "not signed in"
                }
            );
        }
    }
    Ok(())
}
