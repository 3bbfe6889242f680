//! Configuration for the Based Agent
//!
//! Credentials are environment-only; tunables come from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub mod paths;

pub use paths::{config_path, data_dir};

/// Environment variable naming the wallet platform API key.
pub const CDP_API_KEY_NAME: &str = "CDP_API_KEY_NAME";
/// Environment variable holding the wallet platform key secret.
pub const CDP_PRIVATE_KEY: &str = "CDP_PRIVATE_KEY";
/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable naming the file the wallet handle is persisted to.
pub const WALLET_PATH: &str = "WALLET_PATH";

/// Errors in configuration handling
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Secrets the agent cannot run without. These never live in the config
/// file; they come from the environment (a `.env` file counts).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub cdp_api_key_name: String,
    pub cdp_private_key: String,
    pub openai_api_key: String,
    pub wallet_path: PathBuf,
}

impl Credentials {
    /// Read all required variables, failing on the first one missing.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            cdp_api_key_name: require_env(CDP_API_KEY_NAME)?,
            cdp_private_key: require_env(CDP_PRIVATE_KEY)?,
            openai_api_key: require_env(OPENAI_API_KEY)?,
            wallet_path: PathBuf::from(require_env(WALLET_PATH)?),
        })
    }
}

fn require_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}

/// Dispatch model parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefaults {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_guide_model")]
    pub guide_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_iterations")]
    pub max_tool_iterations: u32,
    #[serde(default = "default_auto_interval")]
    pub auto_interval_secs: u64,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: default_model(),
            guide_model: default_guide_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_tool_iterations: default_max_iterations(),
            auto_interval_secs: default_auto_interval(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_guide_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_iterations() -> u32 {
    10
}

fn default_auto_interval() -> u64 {
    10
}

/// Artwork generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtConfig {
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_image_size")]
    pub size: String,
    #[serde(default = "default_image_quality")]
    pub quality: String,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            model: default_image_model(),
            size: default_image_size(),
            quality: default_image_quality(),
        }
    }
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_image_quality() -> String {
    "standard".to_string()
}

/// Wallet platform parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnchainConfig {
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl Default for OnchainConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            api_base: None,
        }
    }
}

fn default_network() -> String {
    "base-sepolia".to_string()
}

/// OpenAI endpoint parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpenAiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentDefaults,
    #[serde(default)]
    pub art: ArtConfig,
    #[serde(default)]
    pub onchain: OnchainConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub async fn load() -> Result<Self> {
        let path = config_path();
        Self::load_from(&path).await
    }

    /// Load from a specific location
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("no config at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        debug!("loading config from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to the default location
    pub async fn save(&self) -> Result<()> {
        let path = config_path();
        self.save_to(&path).await
    }

    /// Save to a specific location
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        debug!("writing config to {:?}", path);

        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Model driving the dispatch loop
    pub fn default_model(&self) -> String {
        self.agent.model.clone()
    }

    /// Model playing the user in two-agent mode
    pub fn guide_model(&self) -> String {
        self.agent.guide_model.clone()
    }

    /// Network the wallet is created on
    pub fn network_id(&self) -> String {
        self.onchain.network.clone()
    }

    /// Seconds between autonomous-mode rounds
    pub fn auto_interval_secs(&self) -> u64 {
        self.agent.auto_interval_secs
    }

    /// Cap on tool-dispatch rounds per conversation turn
    pub fn max_tool_iterations(&self) -> u32 {
        self.agent.max_tool_iterations
    }
}
