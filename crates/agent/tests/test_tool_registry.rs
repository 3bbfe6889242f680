//! Registry behavior: registration, lookup, dispatch, and wire definitions

mod common;

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use basedagent_agent::tools::{
    register_default_tools, to_provider_tool, CreateTokenTool, GetBalanceTool, MintNftTool,
    ToolRegistry, TransferAssetTool,
};
use basedagent_agent::BasedAgent;
use basedagent_onchain::{Balance, Network, WalletStore};

use common::{completed_transfer, onchain_with_wallet, MockImages, MockOnchain};

fn agent_over(onchain: MockOnchain) -> (Arc<BasedAgent>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = WalletStore::new(dir.path().join("wallet.json"));
    let based = BasedAgent::new(
        Arc::new(onchain),
        Arc::new(MockImages::new()),
        store,
        Network::BaseSepolia,
    );
    (Arc::new(based), dir)
}

/// Registry holding just the balance and transfer tools
fn small_registry(onchain: MockOnchain) -> (ToolRegistry, TempDir) {
    let (agent, dir) = agent_over(onchain);
    let mut registry = ToolRegistry::new();
    registry.register(TransferAssetTool::new(Arc::clone(&agent)));
    registry.register(GetBalanceTool::new(agent));
    (registry, dir)
}

#[test]
fn test_empty_registry_knows_nothing() {
    for registry in [ToolRegistry::new(), ToolRegistry::default()] {
        assert!(registry.names().is_empty());
        assert!(registry.definitions().is_empty());
        assert!(!registry.has("get_balance"));
        assert!(registry.get("get_balance").is_none());
    }
}

#[test]
fn test_registered_tools_are_discoverable() {
    let (registry, _dir) = small_registry(onchain_with_wallet());

    assert!(registry.has("get_balance"));
    assert!(registry.has("transfer_asset"));
    assert!(!registry.has("get_blance"));
    assert!(registry.get("get_blance").is_none());

    let tool = registry.get("transfer_asset").expect("registered tool");
    assert_eq!(tool.name(), "transfer_asset");
    assert_eq!(
        tool.description(),
        "Transfer an asset from the agent's wallet to a destination address."
    );
    assert_eq!(tool.parameters()["type"], "object");
}

#[test]
fn test_names_come_back_sorted() {
    let (agent, _dir) = agent_over(onchain_with_wallet());
    let mut registry = ToolRegistry::new();
    // Registered in reverse of the expected order
    registry.register(TransferAssetTool::new(Arc::clone(&agent)));
    registry.register(MintNftTool::new(Arc::clone(&agent)));
    registry.register(CreateTokenTool::new(agent));

    assert_eq!(
        registry.names(),
        ["create_token", "mint_nft", "transfer_asset"]
    );
}

#[test]
fn test_definitions_follow_name_order() {
    let (registry, _dir) = small_registry(onchain_with_wallet());

    let defs = registry.definitions();
    let names: Vec<&str> = defs.iter().map(|d| d.function.name.as_str()).collect();
    assert_eq!(names, ["get_balance", "transfer_asset"]);

    // Each definition is a complete function schema
    for def in &defs {
        assert_eq!(def.tool_type, "function");
        assert!(!def.function.description.is_empty());
        assert_eq!(def.function.parameters["type"], "object");
    }
}

#[test]
fn test_to_provider_tool_carries_the_schema() {
    let (agent, _dir) = agent_over(onchain_with_wallet());
    let tool = GetBalanceTool::new(agent);
    let provider_tool = to_provider_tool(&tool);

    assert_eq!(provider_tool.function.name, "get_balance");
    assert_eq!(
        provider_tool.function.description,
        "Get the balance of an asset in the agent's wallet."
    );
    assert!(provider_tool.function.parameters["properties"]["asset_id"].is_object());
}

#[tokio::test]
async fn test_execute_routes_by_wire_name() {
    let mut onchain = onchain_with_wallet();
    onchain.expect_balance().returning(|_, _| {
        Ok(Balance {
            amount: 0.5,
            asset_id: "eth".to_string(),
        })
    });
    let (registry, _dir) = small_registry(onchain);

    let result = registry
        .execute("get_balance", json!({"asset_id": "eth"}))
        .await
        .expect("Failed to execute tool");

    assert_eq!(result, "0.5");
}

#[tokio::test]
async fn test_execute_unknown_tool_names_it() {
    let registry = ToolRegistry::new();

    let outcome = registry.execute("close_position", json!({})).await;

    let err = outcome.expect_err("dispatch should fail").to_string();
    assert_eq!(err, "tool not found: close_position");
}

#[tokio::test]
async fn test_execute_accepts_quoted_amounts() {
    let mut onchain = onchain_with_wallet();
    onchain
        .expect_create_transfer()
        .withf(|_, request| request.amount == 0.25)
        .returning(|_, _| Ok(completed_transfer()));
    let (registry, _dir) = small_registry(onchain);

    // Models sometimes quote numeric arguments
    let result = registry
        .execute(
            "transfer_asset",
            json!({"amount": "0.25", "asset_id": "eth", "destination_address": "0xdest"}),
        )
        .await
        .expect("Failed to execute tool");

    assert_eq!(result, "Transferred 0.25 eth to 0xdest");
}

#[tokio::test]
async fn test_execute_rejects_malformed_args() {
    let (agent, _dir) = agent_over(onchain_with_wallet());
    let mut registry = ToolRegistry::new();
    registry.register(CreateTokenTool::new(agent));

    let outcome = registry
        .execute("create_token", json!({"name": "Based Token"}))
        .await;

    assert!(outcome.is_err());
}

#[test]
fn test_default_toolkit_covers_every_operation() {
    let (agent, _dir) = agent_over(onchain_with_wallet());
    let mut registry = ToolRegistry::new();

    register_default_tools(&mut registry, agent);

    assert_eq!(
        registry.names(),
        [
            "create_token",
            "deploy_nft",
            "generate_art",
            "get_balance",
            "mint_nft",
            "request_eth_from_faucet",
            "swap_assets",
            "transfer_asset",
        ]
    );
    assert_eq!(registry.definitions().len(), 8);
}
