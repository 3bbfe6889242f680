//! Utility tools: faucet, artwork

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use basedagent_provider::object_schema;

use super::{ToolResult, ToolTrait};
use crate::operations::BasedAgent;

/// Testnet faucet tool
pub struct FaucetTool {
    agent: Arc<BasedAgent>,
}

impl FaucetTool {
    pub fn new(agent: Arc<BasedAgent>) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl ToolTrait for FaucetTool {
    fn name(&self) -> &str {
        "request_eth_from_faucet"
    }
    fn description(&self) -> &str {
        "Request test ETH from the faucet. Only available on Base Sepolia."
    }
    fn parameters(&self) -> serde_json::Value {
        object_schema(&[])
    }
    async fn execute(&self, _args: serde_json::Value) -> ToolResult {
        Ok(self.agent.request_eth_from_faucet().await?)
    }
}

/// DALL-E artwork tool
pub struct GenerateArtTool {
    agent: Arc<BasedAgent>,
}

impl GenerateArtTool {
    pub fn new(agent: Arc<BasedAgent>) -> Self {
        Self { agent }
    }
}

#[derive(Deserialize)]
struct GenerateArtArgs {
    prompt: String,
}

#[async_trait]
impl ToolTrait for GenerateArtTool {
    fn name(&self) -> &str {
        "generate_art"
    }
    fn description(&self) -> &str {
        "Generate an artwork from a text prompt and return its URL."
    }
    fn parameters(&self) -> serde_json::Value {
        object_schema(&[(
            "prompt",
            "Description of the artwork to generate",
            true,
        )])
    }
    async fn execute(&self, args: serde_json::Value) -> ToolResult {
        let args: GenerateArtArgs = serde_json::from_value(args)?;
        Ok(self.agent.generate_art(&args.prompt).await?)
    }
}
