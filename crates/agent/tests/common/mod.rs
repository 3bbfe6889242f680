//! Shared test doubles for agent tests
#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;

use basedagent_onchain::{
    Balance, FaucetTransaction, Invocation, InvocationRequest, Network, NftDeployment,
    OnchainError, OnchainProvider, SmartContract, TokenDeployment, Trade, TradeRequest, Transfer,
    TransferRequest, TxStatus, WalletHandle,
};
use basedagent_provider::{
    ChatParams, ChatProvider, ChatResponse, GeneratedImage, ImageParams, ImageProvider,
    ProviderError,
};

mock! {
    pub Onchain {}

    #[async_trait]
    impl OnchainProvider for Onchain {
        async fn create_wallet(&self, network: Network) -> Result<WalletHandle, OnchainError>;
        async fn fetch_wallet(&self, wallet_id: &str) -> Result<WalletHandle, OnchainError>;
        async fn balance(
            &self,
            wallet: &WalletHandle,
            asset_id: &str,
        ) -> Result<Balance, OnchainError>;
        async fn create_transfer(
            &self,
            wallet: &WalletHandle,
            request: TransferRequest,
        ) -> Result<Transfer, OnchainError>;
        async fn create_trade(
            &self,
            wallet: &WalletHandle,
            request: TradeRequest,
        ) -> Result<Trade, OnchainError>;
        async fn deploy_token(
            &self,
            wallet: &WalletHandle,
            deployment: TokenDeployment,
        ) -> Result<SmartContract, OnchainError>;
        async fn deploy_nft(
            &self,
            wallet: &WalletHandle,
            deployment: NftDeployment,
        ) -> Result<SmartContract, OnchainError>;
        async fn invoke_contract(
            &self,
            wallet: &WalletHandle,
            request: InvocationRequest,
        ) -> Result<Invocation, OnchainError>;
        async fn request_faucet_funds(
            &self,
            wallet: &WalletHandle,
        ) -> Result<FaucetTransaction, OnchainError>;
    }
}

mock! {
    pub Images {}

    #[async_trait]
    impl ImageProvider for Images {
        async fn generate(&self, params: ImageParams) -> Result<GeneratedImage, ProviderError>;
        fn is_configured(&self) -> bool;
    }
}

mock! {
    pub Chat {}

    #[async_trait]
    impl ChatProvider for Chat {
        async fn chat(&self, params: ChatParams) -> Result<ChatResponse, ProviderError>;
        fn default_model(&self) -> String;
        fn is_configured(&self) -> bool;
    }
}

/// Wallet handle as create_wallet would return it
pub fn wallet_on(network: Network) -> WalletHandle {
    WalletHandle {
        id: "wallet-123".to_string(),
        network,
        address: "0xabc".to_string(),
    }
}

/// Mock that creates a wallet on whatever network it is asked for
pub fn onchain_with_wallet() -> MockOnchain {
    let mut onchain = MockOnchain::new();
    onchain
        .expect_create_wallet()
        .returning(|network| Ok(wallet_on(network)));
    onchain
}

/// Completed transfer stub
pub fn completed_transfer() -> Transfer {
    Transfer {
        id: "tr-1".to_string(),
        status: TxStatus::Complete,
        transaction_hash: Some("0xdeadbeef".to_string()),
    }
}
