//! # TzTalk Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file is the main entry point for the TzTalk CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each top-level command (`tz`, `chat`, `srv`) is a variant of `Commands`
//! - Commands map to handler functions in their own modules
//! - All errors propagate to this level for consistent reporting
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! tztalk --help
//!
//! # Convert with debug logging
//! tztalk -vv tz convert 15:00 --to Asia/Tokyo
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command groups (tz, chat, srv)
mod common; // Converter, chatbot and record store
mod core; // Errors and configuration

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "tztalk",
    about = "🕒 TzTalk 💬: Time zone converter, FAQ chatbot and language-exchange API",
    long_about = "Convert times between language partners' zones, ask the FAQ bot,\n\
                  or run the in-memory REST data layer for the scheduling client.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "t")]
    Tz(commands::tz::TzArgs),
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Tz(args) => commands::tz::handle_tz(args).await,
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Srv(args) => commands::srv::handle_srv(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
