//! Based Agent operations
//!
//! The wallet and art operations the model dispatches to. Each returns a
//! human-readable status string; failures carry the diagnostics defined on
//! `AgentError`.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use basedagent_onchain::{
    InvocationRequest, Network, NftDeployment, OnchainError, OnchainProvider, TokenDeployment,
    TradeRequest, TransferRequest, WalletHandle, WalletStore, ETH, USDC,
};
use basedagent_provider::{ImageParams, ImageProvider};

use crate::{AgentError, Result};

/// Onchain agent over a platform wallet and an image API
pub struct BasedAgent {
    onchain: Arc<dyn OnchainProvider>,
    images: Arc<dyn ImageProvider>,
    store: WalletStore,
    network: Network,
    art: ImageParams,
    wallet: OnceCell<WalletHandle>,
}

impl BasedAgent {
    pub fn new(
        onchain: Arc<dyn OnchainProvider>,
        images: Arc<dyn ImageProvider>,
        store: WalletStore,
        network: Network,
    ) -> Self {
        Self {
            onchain,
            images,
            store,
            network,
            art: ImageParams::default(),
            wallet: OnceCell::new(),
        }
    }

    /// Override the artwork model/size/quality (prompt is ignored)
    pub fn with_art(mut self, art: ImageParams) -> Self {
        self.art = art;
        self
    }

    /// Network id the agent operates on
    pub fn network_id(&self) -> &'static str {
        self.network.id()
    }

    /// The agent's wallet, initialized on first use. A handle persisted by
    /// an earlier run is re-fetched; otherwise a wallet is created on the
    /// configured network and persisted.
    pub async fn wallet(&self) -> Result<&WalletHandle> {
        self.wallet.get_or_try_init(|| self.init_wallet()).await
    }

    async fn init_wallet(&self) -> Result<WalletHandle> {
        if let Some(saved) = self.store.load().await {
            match self.onchain.fetch_wallet(&saved.wallet_id).await {
                Ok(wallet) => {
                    info!("restored wallet {} on {}", wallet.id, wallet.network);
                    return Ok(wallet);
                }
                Err(e) => warn!("could not restore wallet {}: {}", saved.wallet_id, e),
            }
        }

        let wallet = self.onchain.create_wallet(self.network).await?;
        self.store.save(&wallet).await?;
        info!(
            "created wallet {} ({}) on {}",
            wallet.id, wallet.address, wallet.network
        );
        Ok(wallet)
    }

    /// Deploy an ERC-20 token and wait for settlement
    pub async fn create_token(&self, name: &str, symbol: &str, total_supply: f64) -> Result<String> {
        let wallet = self.wallet().await?;
        let contract = self
            .onchain
            .deploy_token(
                wallet,
                TokenDeployment {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    total_supply,
                },
            )
            .await?;

        Ok(format!(
            "Token {} ({}) has been created with a total supply of {} and is deployed at {}",
            name, symbol, total_supply, contract.contract_address
        ))
    }

    /// Transfer an asset to a destination address. ETH and USDC go out
    /// directly; any other asset is balance-checked first. USDC on Base
    /// mainnet rides a sponsored (gasless) transfer.
    pub async fn transfer_asset(
        &self,
        amount: f64,
        asset_id: &str,
        destination: &str,
    ) -> Result<String> {
        match self.transfer_inner(amount, asset_id, destination).await {
            Ok(msg) => Ok(msg),
            Err(e @ AgentError::InsufficientBalance { .. }) => Err(e),
            Err(e @ AgentError::UnsupportedAsset(_)) => Err(e),
            Err(e) => Err(AgentError::Transfer(root_message(&e))),
        }
    }

    async fn transfer_inner(
        &self,
        amount: f64,
        asset_id: &str,
        destination: &str,
    ) -> Result<String> {
        let wallet = self.wallet().await?;
        let gasless = gasless_transfer(wallet.network, asset_id);

        // ETH and USDC transfer directly, no balance check
        if asset_id.eq_ignore_ascii_case(ETH) || asset_id.eq_ignore_ascii_case(USDC) {
            self.onchain
                .create_transfer(
                    wallet,
                    TransferRequest {
                        amount,
                        asset_id: asset_id.to_string(),
                        destination: destination.to_string(),
                        gasless,
                    },
                )
                .await?;

            let gasless_msg = if gasless { " (gasless)" } else { "" };
            return Ok(format!(
                "Transferred {} {}{} to {}",
                amount, asset_id, gasless_msg, destination
            ));
        }

        // Other assets may not be tracked yet; check the balance before
        // moving anything
        let balance = self
            .onchain
            .balance(wallet, asset_id)
            .await
            .map_err(|e| map_unsupported(e, asset_id))?;
        if balance.amount < amount {
            return Err(AgentError::InsufficientBalance {
                balance: balance.amount,
                asset: asset_id.to_string(),
                amount,
                action: "transfer",
            });
        }

        self.onchain
            .create_transfer(
                wallet,
                TransferRequest {
                    amount,
                    asset_id: asset_id.to_string(),
                    destination: destination.to_string(),
                    gasless: false,
                },
            )
            .await
            .map_err(|e| map_unsupported(e, asset_id))?;

        Ok(format!(
            "Transferred {} {} to {}",
            amount, asset_id, destination
        ))
    }

    /// Balance of one asset in the agent's wallet
    pub async fn get_balance(&self, asset_id: &str) -> Result<f64> {
        match self.balance_inner(asset_id).await {
            Ok(amount) => Ok(amount),
            Err(e) => Err(AgentError::Balance(root_message(&e))),
        }
    }

    async fn balance_inner(&self, asset_id: &str) -> Result<f64> {
        let wallet = self.wallet().await?;
        let balance = self.onchain.balance(wallet, asset_id).await?;
        debug!("balance of {}: {}", asset_id, balance.amount);
        Ok(balance.amount)
    }

    /// Swap one asset for another, reporting the amount received
    pub async fn swap_assets(
        &self,
        amount_in: f64,
        from_asset_id: &str,
        to_asset_id: &str,
    ) -> Result<String> {
        match self.swap_inner(amount_in, from_asset_id, to_asset_id).await {
            Ok(msg) => Ok(msg),
            Err(e @ AgentError::InsufficientBalance { .. }) => Err(e),
            Err(e) => Err(AgentError::Swap(root_message(&e))),
        }
    }

    async fn swap_inner(
        &self,
        amount_in: f64,
        from_asset_id: &str,
        to_asset_id: &str,
    ) -> Result<String> {
        let wallet = self.wallet().await?;

        let balance = self.onchain.balance(wallet, from_asset_id).await?;
        if balance.amount < amount_in {
            return Err(AgentError::InsufficientBalance {
                balance: balance.amount,
                asset: from_asset_id.to_string(),
                amount: amount_in,
                action: "swap",
            });
        }

        let trade = self
            .onchain
            .create_trade(
                wallet,
                TradeRequest {
                    amount: amount_in,
                    from_asset_id: from_asset_id.to_string(),
                    to_asset_id: to_asset_id.to_string(),
                },
            )
            .await?;

        Ok(format!(
            "Successfully swapped {} {} for {} {}",
            amount_in, from_asset_id, trade.to_amount, to_asset_id
        ))
    }

    /// Deploy an ERC-721 collection
    pub async fn deploy_nft(&self, name: &str, symbol: &str, base_uri: &str) -> Result<String> {
        let wallet = self.wallet().await?;
        let contract = self
            .onchain
            .deploy_nft(
                wallet,
                NftDeployment {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    base_uri: base_uri.to_string(),
                },
            )
            .await?;

        Ok(format!(
            "NFT {} ({}) has been created and is deployed at {}",
            name, symbol, contract.contract_address
        ))
    }

    /// Mint one NFT from a deployed collection to an address
    pub async fn mint_nft(&self, contract_address: &str, mint_to: &str) -> Result<String> {
        let wallet = self.wallet().await?;
        self.onchain
            .invoke_contract(
                wallet,
                InvocationRequest {
                    contract_address: contract_address.to_string(),
                    method: "mint".to_string(),
                    args: serde_json::json!({ "to": mint_to, "quantity": "1" }),
                },
            )
            .await?;

        Ok(format!("Successfully minted NFT at {}", mint_to))
    }

    /// Claim test ETH. Only meaningful on the Base Sepolia testnet.
    pub async fn request_eth_from_faucet(&self) -> Result<String> {
        let wallet = self.wallet().await?;
        if wallet.network != Network::BaseSepolia {
            return Err(AgentError::FaucetUnsupported);
        }

        self.onchain.request_faucet_funds(wallet).await?;
        Ok("Successfully requested ETH from faucet".to_string())
    }

    /// Generate an artwork from a prompt and return its URL
    pub async fn generate_art(&self, prompt: &str) -> Result<String> {
        let params = ImageParams {
            prompt: prompt.to_string(),
            ..self.art.clone()
        };

        match self.images.generate(params).await {
            Ok(image) => Ok(format!("Generated artwork available at: {}", image.url)),
            Err(e) => Err(AgentError::Art(e.to_string())),
        }
    }
}

/// Surface the unsupported-asset case under the asset the caller named;
/// everything else keeps its type
fn map_unsupported(err: OnchainError, asset_id: &str) -> AgentError {
    match err {
        OnchainError::UnsupportedAsset(_) => AgentError::UnsupportedAsset(asset_id.to_string()),
        other => AgentError::Onchain(other),
    }
}

/// Sponsored transfers exist only for USDC on Base mainnet
fn gasless_transfer(network: Network, asset_id: &str) -> bool {
    network == Network::BaseMainnet && asset_id.eq_ignore_ascii_case(USDC)
}

/// Strip the enum wrapper so operation diagnostics read like the
/// underlying failure
fn root_message(err: &AgentError) -> String {
    match err {
        AgentError::Onchain(inner) => inner.to_string(),
        AgentError::Provider(inner) => inner.clone(),
        other => other.to_string(),
    }
}
