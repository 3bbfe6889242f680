//! NFT tools: deploy, mint

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use basedagent_provider::object_schema;

use super::{ToolResult, ToolTrait};
use crate::operations::BasedAgent;

/// ERC-721 deployment tool
pub struct DeployNftTool {
    agent: Arc<BasedAgent>,
}

impl DeployNftTool {
    pub fn new(agent: Arc<BasedAgent>) -> Self {
        Self { agent }
    }
}

#[derive(Deserialize)]
struct DeployNftArgs {
    name: String,
    symbol: String,
    base_uri: String,
}

#[async_trait]
impl ToolTrait for DeployNftTool {
    fn name(&self) -> &str {
        "deploy_nft"
    }
    fn description(&self) -> &str {
        "Deploy a new ERC-721 NFT collection on the Base blockchain."
    }
    fn parameters(&self) -> serde_json::Value {
        object_schema(&[
            ("name", "Collection name", true),
            ("symbol", "Collection symbol", true),
            ("base_uri", "Base URI for token metadata", true),
        ])
    }
    async fn execute(&self, args: serde_json::Value) -> ToolResult {
        let args: DeployNftArgs = serde_json::from_value(args)?;
        Ok(self
            .agent
            .deploy_nft(&args.name, &args.symbol, &args.base_uri)
            .await?)
    }
}

/// NFT mint tool
pub struct MintNftTool {
    agent: Arc<BasedAgent>,
}

impl MintNftTool {
    pub fn new(agent: Arc<BasedAgent>) -> Self {
        Self { agent }
    }
}

#[derive(Deserialize)]
struct MintNftArgs {
    contract_address: String,
    mint_to: String,
}

#[async_trait]
impl ToolTrait for MintNftTool {
    fn name(&self) -> &str {
        "mint_nft"
    }
    fn description(&self) -> &str {
        "Mint one NFT from a deployed collection to an address."
    }
    fn parameters(&self) -> serde_json::Value {
        object_schema(&[
            ("contract_address", "Address of the deployed NFT contract", true),
            ("mint_to", "Address to mint the NFT to", true),
        ])
    }
    async fn execute(&self, args: serde_json::Value) -> ToolResult {
        let args: MintNftArgs = serde_json::from_value(args)?;
        Ok(self
            .agent
            .mint_nft(&args.contract_address, &args.mint_to)
            .await?)
    }
}
