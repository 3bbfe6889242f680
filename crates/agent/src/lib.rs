//! Based Agent Core
//!
//! Onchain operations, tool registry and the dispatch loop.

use thiserror::Error;

pub mod context;
pub mod operations;
pub mod runner;
pub mod tools;

pub use context::ContextBuilder;
pub use operations::BasedAgent;
pub use runner::AgentRunner;
pub use tools::{ToolRegistry, ToolResult, ToolTrait};

/// Agent errors. The operation variants carry the diagnostics the model
/// (and the user) sees, so their display strings are the contract.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("wallet error: {0}")]
    Onchain(#[from] basedagent_onchain::OnchainError),

    #[error("Insufficient balance. You have {balance} {asset}, but tried to {action} {amount}.")]
    InsufficientBalance {
        balance: f64,
        asset: String,
        amount: f64,
        action: &'static str,
    },

    #[error("The asset {0} is not supported on this network. It may have been recently deployed. Please try again in about 30 minutes.")]
    UnsupportedAsset(String),

    #[error("This operation is only supported on Base Sepolia Testnet.")]
    FaucetUnsupported,

    #[error("Error transferring asset: {0}. If this is a custom token, it may have been recently deployed. Please try again in about 30 minutes, as it needs to be indexed by CDP first.")]
    Transfer(String),

    #[error("Error getting balance for asset: {0}.")]
    Balance(String),

    #[error("Error swapping assets: {0}. Make sure both tokens exist and have sufficient liquidity.")]
    Swap(String),

    #[error("Error generating artwork: {0}")]
    Art(String),

    #[error("max tool iterations exceeded")]
    MaxIterations,
}

pub type Result<T> = std::result::Result<T, AgentError>;
