//! # TzTalk CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command
//! built here points `TZTALK_CONFIG` at a file inside a temporary directory,
//! so user and project configuration on the host never leak into a test.
//!

// Each test crate uses a different subset of these helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// A temporary configuration file. The directory lives as long as this value.
pub struct TestConfig {
    dir: TempDir,
}

impl TestConfig {
    /// Writes `contents` as the configuration file.
    pub fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp config dir");
        fs::write(dir.path().join("config.toml"), contents).expect("Failed to write test config");
        Self { dir }
    }

    /// A config that pins the home zone so output does not depend on the host.
    pub fn pinned() -> Self {
        Self::new(
            "[profile]\n\
             time_zone = \"America/Los_Angeles\"\n\
             partner_time_zone = \"Europe/Paris\"\n",
        )
    }

    /// `tztalk` running inside the temp directory with this config.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tztalk").expect("Failed to find tztalk binary for testing");
        cmd.env("TZTALK_CONFIG", self.dir.path().join("config.toml"))
            .env_remove("RUST_LOG")
            .current_dir(self.dir.path());
        cmd
    }
}

/// `tztalk` with an empty configuration file.
pub fn tztalk_cmd() -> (TestConfig, Command) {
    let config = TestConfig::new("");
    let cmd = config.cmd();
    (config, cmd)
}
