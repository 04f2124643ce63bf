//! # TzTalk Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates TzTalk's configuration. Settings
//! are split into a `[profile]` section (the user's own zone, their usual
//! partner's zone, the clock format) and a `[server]` section for `tztalk srv`.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by each command after loading)
//! 2. An explicit file named by `$TZTALK_CONFIG`; when set, no other file is read
//! 3. Project-specific `.tztalk.toml` in the current directory or an ancestor,
//!    stopping at the first directory that contains `.git`
//! 4. User-specific `config.toml` in the platform config directory
//! 5. Default values defined in the code
//!
//! Zones and the time format are validated after merging, so a bad value in
//! any file surfaces as a `TzTalkError::Config`.
//!
//! ## Examples
//!
//! ```toml
//! [profile]
//! time_zone = "America/Los_Angeles"
//! partner_time_zone = "Europe/Paris"
//! time_format = "%-I:%M %p"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let home = cfg.profile.home_zone(); // configured or detected
//! let port = cfg.server.port;
//! ```
//!
use crate::common::timezone::{catalog, convert};
use crate::core::error::{Result, TzTalkError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "TZTALK_CONFIG";
const PROJECT_CONFIG_FILENAME: &str = ".tztalk.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

/// The user's own time preferences (`tztalk tz ...`, `tztalk chat ...`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Home zone. Detected from the host when absent.
    pub time_zone: Option<String>,
    /// Zone used as the conversion target when none is given.
    #[serde(default = "default_partner_zone")]
    pub partner_time_zone: String,
    /// strftime pattern for displayed clock times.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            time_zone: None,
            partner_time_zone: default_partner_zone(),
            time_format: default_time_format(),
        }
    }
}

impl ProfileConfig {
    /// The configured home zone, or the detected host zone.
    pub fn home_zone(&self) -> String {
        match &self.time_zone {
            Some(zone) => zone.clone(),
            None => catalog::detect_time_zone().to_string(),
        }
    }
}

/// Defaults for the REST service (`tztalk srv`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    /// Load the demo user, languages, sessions and FAQ at startup.
    #[serde(default = "default_true")]
    pub seed_data: bool,
    /// The user that "current user" routes act on.
    #[serde(default = "default_current_user")]
    pub current_user_id: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: true,
            seed_data: true,
            current_user_id: default_current_user(),
        }
    }
}

fn default_partner_zone() -> String {
    "Europe/Paris".to_string()
}
fn default_time_format() -> String {
    convert::DEFAULT_DISPLAY_PATTERN.to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_true() -> bool {
    true
}
fn default_current_user() -> u32 {
    1
}

/// # Load Configuration (`load_config`)
///
/// Resolves every configuration source for the current process and returns
/// the merged, validated result.
///
/// ## Returns
///
/// * `Result<Config>` - The effective configuration, or an error when a file
///   cannot be read or parsed or a value fails validation.
pub fn load_config() -> Result<Config> {
    let explicit = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    load_config_from(explicit.as_deref(), &current_dir)
}

/// Loads configuration as `load_config` would, with the explicit file and the
/// project search start supplied by the caller.
pub fn load_config_from(explicit: Option<&Path>, start_dir: &Path) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            info!("Loading configuration from ${}: {}", CONFIG_ENV_VAR, path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config(start_dir)?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "TzTalk", "tztalk") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.tztalk.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();

    macro_rules! pick {
        ($section:ident . $field:ident) => {
            if project.$section.$field != defaults.$section.$field {
                project.$section.$field.clone()
            } else {
                user.$section.$field.clone()
            }
        };
    }

    Config {
        profile: ProfileConfig {
            time_zone: project.profile.time_zone.clone().or(user.profile.time_zone.clone()),
            partner_time_zone: pick!(profile.partner_time_zone),
            time_format: pick!(profile.time_format),
        },
        server: ServerSettings {
            host: pick!(server.host),
            port: pick!(server.port),
            enable_cors: pick!(server.enable_cors),
            seed_data: pick!(server.seed_data),
            current_user_id: pick!(server.current_user_id),
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if let Some(zone) = &config.profile.time_zone {
        convert::resolve_zone(zone).map_err(|e| {
            anyhow!(TzTalkError::Config(format!("profile.time_zone: {}", e)))
        })?;
        if !catalog::is_supported(zone) {
            warn!("Configured time zone '{}' is not in the selectable catalog.", zone);
        }
    }
    convert::resolve_zone(&config.profile.partner_time_zone).map_err(|e| {
        anyhow!(TzTalkError::Config(format!("profile.partner_time_zone: {}", e)))
    })?;
    convert::validate_pattern(&config.profile.time_format).map_err(|e| {
        anyhow!(TzTalkError::Config(format!("profile.time_format: {}", e)))
    })?;
    if config.server.host.parse::<IpAddr>().is_err() {
        return Err(anyhow!(TzTalkError::Config(format!(
            "server.host: '{}' is not an IP address",
            config.server.host
        ))));
    }
    if config.server.current_user_id == 0 {
        return Err(anyhow!(TzTalkError::Config(
            "server.current_user_id must be a positive id".to_string()
        )));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
