//! Onchain and art tools, one file per operation group

pub mod nft;
pub mod tokens;
pub mod utility;

pub use nft::{DeployNftTool, MintNftTool};
pub use tokens::{CreateTokenTool, GetBalanceTool, SwapAssetsTool, TransferAssetTool};
pub use utility::{FaucetTool, GenerateArtTool};

use async_trait::async_trait;
use basedagent_provider::Tool;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::operations::BasedAgent;
use crate::AgentError;

/// Errors cross the tool boundary boxed, so tools can bubble anything
pub type ToolResult = Result<String, Box<dyn std::error::Error + Send + Sync>>;

/// One dispatchable tool: a name and schema for the model, an executor for us
#[async_trait]
pub trait ToolTrait: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters(&self) -> Value;
    async fn execute(&self, args: Value) -> ToolResult;
}

pub fn to_provider_tool(tool: &dyn ToolTrait) -> Tool {
    Tool::new(tool.name(), tool.description(), tool.parameters())
}

/// Tools keyed by wire name
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn ToolTrait>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register<T: ToolTrait + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolTrait> {
        self.tools.get(name).map(|tool| &**tool)
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions in name order, so requests are reproducible
    pub fn definitions(&self) -> Vec<Tool> {
        let mut defs: Vec<Tool> = self
            .tools
            .values()
            .map(|tool| to_provider_tool(&**tool))
            .collect();
        defs.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        defs
    }

    pub async fn execute(&self, name: &str, args: Value) -> ToolResult {
        let tool = self
            .get(name)
            .ok_or_else(|| AgentError::ToolNotFound(name.to_string()))?;
        tool.execute(args).await
    }

    /// Registered wire names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register the full Based Agent toolset against one agent instance
pub fn register_default_tools(registry: &mut ToolRegistry, agent: Arc<BasedAgent>) {
    // Token tools
    registry.register(CreateTokenTool::new(Arc::clone(&agent)));
    registry.register(TransferAssetTool::new(Arc::clone(&agent)));
    registry.register(GetBalanceTool::new(Arc::clone(&agent)));
    registry.register(SwapAssetsTool::new(Arc::clone(&agent)));

    // NFT tools
    registry.register(DeployNftTool::new(Arc::clone(&agent)));
    registry.register(MintNftTool::new(Arc::clone(&agent)));

    // Utility tools
    registry.register(FaucetTool::new(Arc::clone(&agent)));
    registry.register(GenerateArtTool::new(agent));
}

/// Tool schemas say "number" but models sometimes send amounts as strings
pub(crate) fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde::Deserialize;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("number out of range")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("not a number: {}", s))),
        other => Err(D::Error::custom(format!("expected number, got {}", other))),
    }
}
