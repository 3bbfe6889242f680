//! Based Agent - an AI agent with its own wallet on Base

use clap::{Parser, Subcommand};
use tracing::error;

mod commands;

use commands::{run_mode, status_command, Mode};

/// Based Agent CLI
#[derive(Parser)]
#[command(name = "basedagent")]
#[command(about = "An AI agent that acts onchain with its own wallet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat with the agent
    Chat,
    /// Autonomous action loop
    Auto,
    /// Conversation loop where a guide model steers the agent
    TwoAgent,
    /// Show agent status
    Status,
}

#[tokio::main]
async fn main() {
    // Credentials may come from a local .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let mode = match cli.command {
        Some(Commands::Status) => {
            if let Err(e) = status_command().await {
                error!("Status failed: {}", e);
                std::process::exit(1);
            }
            return;
        }
        Some(Commands::Chat) => Some(Mode::Chat),
        Some(Commands::Auto) => Some(Mode::Auto),
        Some(Commands::TwoAgent) => Some(Mode::TwoAgent),
        None => None,
    };

    if let Err(e) = run_mode(mode).await {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}
