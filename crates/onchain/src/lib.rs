//! Onchain Wallet Platform Client
//!
//! Typed REST client for CDP-style wallet, transfer, trade and
//! contract operations on Base.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub mod cdp;
pub mod store;

pub use cdp::CdpProvider;
pub use store::{PersistedWallet, WalletStore};

/// Asset id for native ETH (CDP asset ids are lowercase)
pub const ETH: &str = "eth";
/// Asset id for USDC
pub const USDC: &str = "usdc";

/// Wallet platform errors
#[derive(Error, Debug)]
pub enum OnchainError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error ({0}): {1}")]
    Api(u16, String),

    #[error("asset {0} is not supported on this network")]
    UnsupportedAsset(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("transaction failed onchain")]
    TransactionFailed,

    #[error("timed out waiting for settlement")]
    Timeout,

    #[error("malformed response")]
    InvalidResponse,
}

pub type Result<T> = std::result::Result<T, OnchainError>;

/// Networks the wallet platform can operate on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    BaseSepolia,
    BaseMainnet,
    EthereumMainnet,
    PolygonMainnet,
    ArbitrumMainnet,
}

impl Network {
    pub fn id(&self) -> &'static str {
        match self {
            Network::BaseSepolia => "base-sepolia",
            Network::BaseMainnet => "base-mainnet",
            Network::EthereumMainnet => "ethereum-mainnet",
            Network::PolygonMainnet => "polygon-mainnet",
            Network::ArbitrumMainnet => "arbitrum-mainnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Network {
    type Err = OnchainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "base-sepolia" => Ok(Network::BaseSepolia),
            "base-mainnet" => Ok(Network::BaseMainnet),
            "ethereum-mainnet" => Ok(Network::EthereumMainnet),
            "polygon-mainnet" => Ok(Network::PolygonMainnet),
            "arbitrum-mainnet" => Ok(Network::ArbitrumMainnet),
            other => Err(OnchainError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Settlement state of a platform transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    #[default]
    Pending,
    Broadcast,
    Complete,
    Failed,
}

impl TxStatus {
    /// Read a status field leniently; unknown or missing values stay pending
    pub fn from_wire(value: &Value) -> TxStatus {
        serde_json::from_value(value.clone()).unwrap_or(TxStatus::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Complete | TxStatus::Failed)
    }
}

/// Opaque handle to a platform-managed wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletHandle {
    pub id: String,
    pub network: Network,
    pub address: String,
}

/// Balance of one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    #[serde(deserialize_with = "de_lenient_f64")]
    pub amount: f64,
    pub asset_id: String,
}

/// A settled or in-flight transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    #[serde(default)]
    pub status: TxStatus,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// A settled or in-flight trade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    #[serde(default)]
    pub status: TxStatus,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub to_amount: f64,
}

/// A deployed smart contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartContract {
    pub id: String,
    #[serde(default)]
    pub status: TxStatus,
    pub contract_address: String,
}

/// A contract method invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    pub id: String,
    #[serde(default)]
    pub status: TxStatus,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// A faucet claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetTransaction {
    pub id: String,
    #[serde(default)]
    pub status: TxStatus,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// Transfer parameters
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub amount: f64,
    pub asset_id: String,
    pub destination: String,
    pub gasless: bool,
}

/// Trade parameters
#[derive(Debug, Clone)]
pub struct TradeRequest {
    pub amount: f64,
    pub from_asset_id: String,
    pub to_asset_id: String,
}

/// ERC-20 deployment parameters
#[derive(Debug, Clone)]
pub struct TokenDeployment {
    pub name: String,
    pub symbol: String,
    pub total_supply: f64,
}

/// ERC-721 deployment parameters
#[derive(Debug, Clone)]
pub struct NftDeployment {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
}

/// Contract invocation parameters
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub contract_address: String,
    pub method: String,
    pub args: Value,
}

/// Wallet platform backend
#[async_trait]
pub trait OnchainProvider: Send + Sync {
    async fn create_wallet(&self, network: Network) -> Result<WalletHandle>;
    async fn fetch_wallet(&self, wallet_id: &str) -> Result<WalletHandle>;
    async fn balance(&self, wallet: &WalletHandle, asset_id: &str) -> Result<Balance>;
    async fn create_transfer(
        &self,
        wallet: &WalletHandle,
        request: TransferRequest,
    ) -> Result<Transfer>;
    async fn create_trade(&self, wallet: &WalletHandle, request: TradeRequest) -> Result<Trade>;
    async fn deploy_token(
        &self,
        wallet: &WalletHandle,
        deployment: TokenDeployment,
    ) -> Result<SmartContract>;
    async fn deploy_nft(
        &self,
        wallet: &WalletHandle,
        deployment: NftDeployment,
    ) -> Result<SmartContract>;
    async fn invoke_contract(
        &self,
        wallet: &WalletHandle,
        request: InvocationRequest,
    ) -> Result<Invocation>;
    async fn request_faucet_funds(&self, wallet: &WalletHandle) -> Result<FaucetTransaction>;
}

/// Amounts arrive as decimal strings, but some endpoints send raw numbers
fn de_lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("amount out of range")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid decimal string: {}", s))),
        other => Err(D::Error::custom(format!(
            "expected number or string, got {}",
            other
        ))),
    }
}
