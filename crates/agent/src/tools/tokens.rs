//! Token tools: create, transfer, balance, swap

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::{de_number, ToolResult, ToolTrait};
use crate::operations::BasedAgent;

/// ERC-20 deployment tool
pub struct CreateTokenTool {
    agent: Arc<BasedAgent>,
}

impl CreateTokenTool {
    pub fn new(agent: Arc<BasedAgent>) -> Self {
        Self { agent }
    }
}

#[derive(Deserialize)]
struct CreateTokenArgs {
    name: String,
    symbol: String,
    #[serde(deserialize_with = "de_number")]
    total_supply: f64,
}

#[async_trait]
impl ToolTrait for CreateTokenTool {
    fn name(&self) -> &str {
        "create_token"
    }
    fn description(&self) -> &str {
        "Create a new ERC-20 token on the Base blockchain."
    }
    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Token name, e.g. 'Based Token'" },
                "symbol": { "type": "string", "description": "Ticker symbol, e.g. 'BASED'" },
                "total_supply": { "type": "number", "description": "Initial supply in whole tokens" }
            },
            "required": ["name", "symbol", "total_supply"]
        })
    }
    async fn execute(&self, args: serde_json::Value) -> ToolResult {
        let args: CreateTokenArgs = serde_json::from_value(args)?;
        Ok(self
            .agent
            .create_token(&args.name, &args.symbol, args.total_supply)
            .await?)
    }
}

/// Asset transfer tool
pub struct TransferAssetTool {
    agent: Arc<BasedAgent>,
}

impl TransferAssetTool {
    pub fn new(agent: Arc<BasedAgent>) -> Self {
        Self { agent }
    }
}

#[derive(Deserialize)]
struct TransferAssetArgs {
    #[serde(deserialize_with = "de_number")]
    amount: f64,
    asset_id: String,
    destination_address: String,
}

#[async_trait]
impl ToolTrait for TransferAssetTool {
    fn name(&self) -> &str {
        "transfer_asset"
    }
    fn description(&self) -> &str {
        "Transfer an asset from the agent's wallet to a destination address."
    }
    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "amount": { "type": "number", "description": "Amount to transfer" },
                "asset_id": { "type": "string", "description": "Asset id, e.g. 'eth' or 'usdc'" },
                "destination_address": { "type": "string", "description": "Recipient onchain address" }
            },
            "required": ["amount", "asset_id", "destination_address"]
        })
    }
    async fn execute(&self, args: serde_json::Value) -> ToolResult {
        let args: TransferAssetArgs = serde_json::from_value(args)?;
        Ok(self
            .agent
            .transfer_asset(args.amount, &args.asset_id, &args.destination_address)
            .await?)
    }
}

/// Balance query tool
pub struct GetBalanceTool {
    agent: Arc<BasedAgent>,
}

impl GetBalanceTool {
    pub fn new(agent: Arc<BasedAgent>) -> Self {
        Self { agent }
    }
}

#[derive(Deserialize)]
struct GetBalanceArgs {
    asset_id: String,
}

#[async_trait]
impl ToolTrait for GetBalanceTool {
    fn name(&self) -> &str {
        "get_balance"
    }
    fn description(&self) -> &str {
        "Get the balance of an asset in the agent's wallet."
    }
    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "asset_id": { "type": "string", "description": "Asset id, e.g. 'eth' or 'usdc'" }
            },
            "required": ["asset_id"]
        })
    }
    async fn execute(&self, args: serde_json::Value) -> ToolResult {
        let args: GetBalanceArgs = serde_json::from_value(args)?;
        let balance = self.agent.get_balance(&args.asset_id).await?;
        Ok(balance.to_string())
    }
}

/// Asset swap tool
pub struct SwapAssetsTool {
    agent: Arc<BasedAgent>,
}

impl SwapAssetsTool {
    pub fn new(agent: Arc<BasedAgent>) -> Self {
        Self { agent }
    }
}

#[derive(Deserialize)]
struct SwapAssetsArgs {
    #[serde(deserialize_with = "de_number")]
    amount_in: f64,
    from_asset_id: String,
    to_asset_id: String,
}

#[async_trait]
impl ToolTrait for SwapAssetsTool {
    fn name(&self) -> &str {
        "swap_assets"
    }
    fn description(&self) -> &str {
        "Swap one asset for another in the agent's wallet."
    }
    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "amount_in": { "type": "number", "description": "Amount of the source asset to swap" },
                "from_asset_id": { "type": "string", "description": "Asset id to swap from" },
                "to_asset_id": { "type": "string", "description": "Asset id to swap to" }
            },
            "required": ["amount_in", "from_asset_id", "to_asset_id"]
        })
    }
    async fn execute(&self, args: serde_json::Value) -> ToolResult {
        let args: SwapAssetsArgs = serde_json::from_value(args)?;
        Ok(self
            .agent
            .swap_assets(args.amount_in, &args.from_asset_id, &args.to_asset_id)
            .await?)
    }
}
