//! # TzTalk REST Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module turns the `[server]` configuration section and the
//! `tztalk srv` flags into one validated `ServerConfig`:
//! 1. Command-line arguments (highest priority)
//! 2. The `[server]` section from the loaded configuration files
//! 3. Default values (lowest priority)
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//! enable_cors = true
//! seed_data = true
//! current_user_id = 1
//! ```
//!
//! ```rust
//! let config = load_and_merge_config(args).await?;
//! println!("Listening on: {}:{}", config.host, config.port);
//! ```
//!
use crate::core::config::{self, ServerSettings};
use crate::core::error::{Result, TzTalkError};
use clap::Parser;
use std::net::IpAddr;
use tracing::debug;

/// # Server Command Arguments (`SrvArgs`)
///
/// Flags accepted by `tztalk srv`. Every flag is optional; anything left out
/// falls back to the `[server]` configuration section.
#[derive(Parser, Debug, Default)]
pub struct SrvArgs {
    /// Network port to listen on (default 5000). The next free port is used
    /// when it is taken.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// IP address to bind to. `0.0.0.0` accepts connections from any interface.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,

    /// Start with empty repositories instead of the demo data.
    #[arg(long)]
    pub no_seed: bool,

    /// Id of the user that "current user" routes act on.
    #[arg(long, value_name = "ID", value_parser = clap::value_parser!(u32).range(1..))]
    pub user: Option<u32>,

    /// Seed for the chatbot's fallback replies, for reproducible answers.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// The consolidated settings the REST service runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
    pub seed_data: bool,
    pub current_user_id: u32,
    /// Seeds the fallback picker; `None` draws from OS entropy.
    pub chatbot_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: IpAddr::from([127, 0, 0, 1]),
            enable_cors: true,
            seed_data: true,
            current_user_id: 1,
            chatbot_seed: None,
        }
    }
}

/// # Load and Merge Server Configuration (`load_and_merge_config`)
///
/// Loads the configuration files and overlays the command-line flags.
///
/// ## Arguments
///
/// * `args`: The parsed `SrvArgs`.
///
/// ## Returns
///
/// * `Result<ServerConfig>`: The effective configuration, or an error if the
///   configuration files fail to load or validate.
pub async fn load_and_merge_config(args: SrvArgs) -> Result<ServerConfig> {
    let cfg = config::load_config()?;
    let merged = merge(&cfg.server, &args)?;
    debug!("Merged server config: {:?}", merged);
    Ok(merged)
}

/// Overlays `args` on `settings`. Flags always win over file values.
fn merge(settings: &ServerSettings, args: &SrvArgs) -> Result<ServerConfig> {
    let file_host: IpAddr = settings.host.parse().map_err(|_| TzTalkError::Config(format!(
        "server.host: '{}' is not an IP address",
        settings.host
    )))?;

    let current_user_id = args.user.unwrap_or(settings.current_user_id);
    if current_user_id == 0 {
        return Err(TzTalkError::Config("current user id must be a positive id".to_string()).into());
    }

    Ok(ServerConfig {
        port: args.port.unwrap_or(settings.port),
        host: args.host.unwrap_or(file_host),
        enable_cors: settings.enable_cors && !args.no_cors,
        seed_data: settings.seed_data && !args.no_seed,
        current_user_id,
        chatbot_seed: args.seed,
    })
}
