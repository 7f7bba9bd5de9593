use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tally-cli", version, about = "Tally CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log an intake amount
    Log {
        /// Amount in milliliters (1-2000)
        amount: u32,
    },
    /// Today's progress
    Status,
    /// Lifetime statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Daily goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// User preferences stored with the progress
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Achievement catalog and unlocks
    Achievements,
    /// Account sign-in and sign-out
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Remote mirror control
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
    /// Erase all local progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Log { amount } => commands::progress::log(amount),
        Commands::Status => commands::progress::status(),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Achievements => commands::progress::achievements(),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Sync { action } => commands::sync::run(action),
        Commands::Reset { yes } => commands::progress::reset(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
