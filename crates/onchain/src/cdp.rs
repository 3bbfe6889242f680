//! CDP Wallet API
//!
//! Coinbase Developer Platform REST client with settlement polling.

use crate::*;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};
use uuid::Uuid;

const DEFAULT_API_BASE: &str = "https://api.cdp.coinbase.com/platform";
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const POLL_TIMEOUT: Duration = Duration::from_secs(30);

/// CDP wallet platform client
pub struct CdpProvider {
    client: Client,
    api_key_name: String,
    private_key: String,
    api_base: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl CdpProvider {
    pub fn new(
        api_key_name: impl Into<String>,
        private_key: impl Into<String>,
        api_base: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key_name: api_key_name.into(),
            private_key: private_key.into(),
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            poll_interval: POLL_INTERVAL,
            poll_timeout: POLL_TIMEOUT,
        }
    }

    /// Override settlement polling cadence, mainly for tests
    pub fn with_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.poll_timeout = timeout;
        self
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        trace!("GET {}", path);

        let url = format!("{}{}", self.api_base, path);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key-Name", &self.api_key_name)
            .header("Authorization", format!("Bearer {}", self.private_key))
            .send()
            .await?;

        let status = response.status();
        let json: Value = response.json().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &json));
        }

        Ok(json)
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        trace!("POST {}", path);

        let url = format!("{}{}", self.api_base, path);
        let response = self
            .client
            .post(&url)
            .header("X-Api-Key-Name", &self.api_key_name)
            .header("Authorization", format!("Bearer {}", self.private_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let json: Value = response.json().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &json));
        }

        Ok(json)
    }

    /// Poll a resource until it reaches a terminal state
    async fn settle(&self, mut json: Value, poll_path: String) -> Result<Value> {
        let deadline = Instant::now() + self.poll_timeout;

        loop {
            match TxStatus::from_wire(&json["status"]) {
                TxStatus::Complete => return Ok(json),
                TxStatus::Failed => return Err(OnchainError::TransactionFailed),
                _ => {}
            }

            if Instant::now() >= deadline {
                return Err(OnchainError::Timeout);
            }

            sleep(self.poll_interval).await;
            json = self.get_json(&poll_path).await?;
        }
    }

    fn parse_wallet(json: &Value) -> Result<WalletHandle> {
        let id = json["id"]
            .as_str()
            .ok_or(OnchainError::InvalidResponse)?
            .to_string();
        let network = json["network_id"]
            .as_str()
            .ok_or(OnchainError::InvalidResponse)?
            .parse()?;
        let address = json["default_address"]["address_id"]
            .as_str()
            .ok_or(OnchainError::InvalidResponse)?
            .to_string();

        Ok(WalletHandle {
            id,
            network,
            address,
        })
    }
}

/// Map an API error body to a typed error
fn api_error(status: u16, json: &Value) -> OnchainError {
    if json["code"].as_str() == Some("unsupported_asset") {
        let asset = json["asset_id"].as_str().unwrap_or("unknown").to_string();
        return OnchainError::UnsupportedAsset(asset);
    }

    let message = json["message"]
        .as_str()
        .unwrap_or("unknown error")
        .to_string();
    OnchainError::Api(status, message)
}

#[async_trait::async_trait]
impl OnchainProvider for CdpProvider {
    async fn create_wallet(&self, network: Network) -> Result<WalletHandle> {
        let body = json!({
            "network_id": network.id(),
            "idempotency_key": Uuid::new_v4().to_string(),
        });

        let json = self.post_json("/v1/wallets", body).await?;
        let wallet = Self::parse_wallet(&json)?;

        debug!("created wallet {} on {}", wallet.id, wallet.network);
        Ok(wallet)
    }

    async fn fetch_wallet(&self, wallet_id: &str) -> Result<WalletHandle> {
        let json = self
            .get_json(&format!("/v1/wallets/{}", wallet_id))
            .await?;
        Self::parse_wallet(&json)
    }

    async fn balance(&self, wallet: &WalletHandle, asset_id: &str) -> Result<Balance> {
        let path = format!(
            "/v1/wallets/{}/balances/{}",
            wallet.id,
            asset_id.to_lowercase()
        );
        let json = self.get_json(&path).await?;
        Ok(serde_json::from_value(json)?)
    }

    async fn create_transfer(
        &self,
        wallet: &WalletHandle,
        request: TransferRequest,
    ) -> Result<Transfer> {
        let body = json!({
            "amount": request.amount,
            "asset_id": request.asset_id.to_lowercase(),
            "destination": request.destination,
            "gasless": request.gasless,
            "idempotency_key": Uuid::new_v4().to_string(),
        });

        let path = format!("/v1/wallets/{}/transfers", wallet.id);
        let first = self.post_json(&path, body).await?;
        let id = first["id"].as_str().ok_or(OnchainError::InvalidResponse)?;
        let poll_path = format!("{}/{}", path, id);

        let settled = self.settle(first, poll_path).await?;
        let transfer: Transfer = serde_json::from_value(settled)?;

        debug!("transfer {} settled", transfer.id);
        Ok(transfer)
    }

    async fn create_trade(&self, wallet: &WalletHandle, request: TradeRequest) -> Result<Trade> {
        let body = json!({
            "amount": request.amount,
            "from_asset_id": request.from_asset_id.to_lowercase(),
            "to_asset_id": request.to_asset_id.to_lowercase(),
            "idempotency_key": Uuid::new_v4().to_string(),
        });

        let path = format!("/v1/wallets/{}/trades", wallet.id);
        let first = self.post_json(&path, body).await?;
        let id = first["id"].as_str().ok_or(OnchainError::InvalidResponse)?;
        let poll_path = format!("{}/{}", path, id);

        let settled = self.settle(first, poll_path).await?;
        let trade: Trade = serde_json::from_value(settled)?;

        debug!("trade {} settled", trade.id);
        Ok(trade)
    }

    async fn deploy_token(
        &self,
        wallet: &WalletHandle,
        deployment: TokenDeployment,
    ) -> Result<SmartContract> {
        let body = json!({
            "type": "erc20",
            "name": deployment.name,
            "symbol": deployment.symbol,
            "total_supply": deployment.total_supply,
            "idempotency_key": Uuid::new_v4().to_string(),
        });

        let path = format!("/v1/wallets/{}/smart-contracts", wallet.id);
        let first = self.post_json(&path, body).await?;
        let id = first["id"].as_str().ok_or(OnchainError::InvalidResponse)?;
        let poll_path = format!("{}/{}", path, id);

        let settled = self.settle(first, poll_path).await?;
        let contract: SmartContract = serde_json::from_value(settled)?;

        debug!("token contract deployed at {}", contract.contract_address);
        Ok(contract)
    }

    async fn deploy_nft(
        &self,
        wallet: &WalletHandle,
        deployment: NftDeployment,
    ) -> Result<SmartContract> {
        let body = json!({
            "type": "erc721",
            "name": deployment.name,
            "symbol": deployment.symbol,
            "base_uri": deployment.base_uri,
            "idempotency_key": Uuid::new_v4().to_string(),
        });

        let path = format!("/v1/wallets/{}/smart-contracts", wallet.id);
        let first = self.post_json(&path, body).await?;
        let id = first["id"].as_str().ok_or(OnchainError::InvalidResponse)?;
        let poll_path = format!("{}/{}", path, id);

        let settled = self.settle(first, poll_path).await?;
        let contract: SmartContract = serde_json::from_value(settled)?;

        debug!("nft contract deployed at {}", contract.contract_address);
        Ok(contract)
    }

    async fn invoke_contract(
        &self,
        wallet: &WalletHandle,
        request: InvocationRequest,
    ) -> Result<Invocation> {
        let body = json!({
            "contract_address": request.contract_address,
            "method": request.method,
            "args": request.args,
            "idempotency_key": Uuid::new_v4().to_string(),
        });

        let path = format!("/v1/wallets/{}/invocations", wallet.id);
        let first = self.post_json(&path, body).await?;
        let id = first["id"].as_str().ok_or(OnchainError::InvalidResponse)?;
        let poll_path = format!("{}/{}", path, id);

        let settled = self.settle(first, poll_path).await?;
        let invocation: Invocation = serde_json::from_value(settled)?;

        debug!("invocation {} settled", invocation.id);
        Ok(invocation)
    }

    async fn request_faucet_funds(&self, wallet: &WalletHandle) -> Result<FaucetTransaction> {
        let body = json!({
            "idempotency_key": Uuid::new_v4().to_string(),
        });

        let path = format!("/v1/wallets/{}/faucet", wallet.id);
        let first = self.post_json(&path, body).await?;
        let id = first["id"].as_str().ok_or(OnchainError::InvalidResponse)?;
        let poll_path = format!("{}/{}", path, id);

        let settled = self.settle(first, poll_path).await?;
        let faucet: FaucetTransaction = serde_json::from_value(settled)?;

        debug!("faucet claim {} settled", faucet.id);
        Ok(faucet)
    }
}
