//! Shared fixtures for the basedagent integration tests
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// Environment variables the binary reads credentials from
pub const CREDENTIAL_VARS: [&str; 4] = [
    "CDP_API_KEY_NAME",
    "CDP_PRIVATE_KEY",
    "OPENAI_API_KEY",
    "WALLET_PATH",
];

pub fn bin_path() -> PathBuf {
    env!("CARGO_BIN_EXE_basedagent").into()
}

/// An isolated home directory plus command builders scoped to it
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestEnv {
    /// Panics on setup failure, as test fixtures should
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join(".basedagent");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            config_dir,
        }
    }

    pub fn config_file(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }

    /// Command with HOME pointed at the isolated directory and every
    /// credential variable scrubbed
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(bin_path());
        cmd.env("HOME", self.temp_dir.path());
        // cwd inside the temp dir so a stray .env cannot leak credentials
        cmd.current_dir(self.temp_dir.path());
        for var in CREDENTIAL_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Command with a full set of dummy credentials
    pub fn command_with_credentials(&self) -> Command {
        let mut cmd = self.command();
        cmd.env("CDP_API_KEY_NAME", "organizations/test/apiKeys/test");
        cmd.env("CDP_PRIVATE_KEY", "test-private-key");
        cmd.env("OPENAI_API_KEY", "sk-test");
        cmd.env("WALLET_PATH", self.temp_dir.path().join("wallet.json"));
        cmd
    }

    /// Write the standard test config into the isolated home
    pub fn create_config(&self) {
        let config = r#"{
  "agent": { "model": "gpt-4o-mini", "guide_model": "gpt-3.5-turbo" },
  "onchain": { "network": "base-sepolia" }
}"#;
        fs::write(self.config_file("config.json"), config).expect("Failed to write config");
    }
}
