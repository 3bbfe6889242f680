//! Wallet Persistence
//!
//! Saves the wallet handle to disk so the agent reuses one wallet
//! across runs instead of creating a fresh one every start.

use crate::{Result, WalletHandle};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Wallet handle as written to the wallet file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedWallet {
    pub wallet_id: String,
    pub network_id: String,
    pub saved_at: DateTime<Local>,
}

/// Reads and writes the wallet file
pub struct WalletStore {
    path: PathBuf,
}

impl WalletStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted wallet; a missing or corrupt file means none
    pub async fn load(&self) -> Option<PersistedWallet> {
        if !self.path.exists() {
            return None;
        }

        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<PersistedWallet>(&content) {
                Ok(persisted) => {
                    debug!("loaded wallet {} from {:?}", persisted.wallet_id, self.path);
                    Some(persisted)
                }
                Err(e) => {
                    warn!("failed to parse wallet file {:?}: {}", self.path, e);
                    None
                }
            },
            Err(e) => {
                warn!("failed to read wallet file {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub async fn save(&self, wallet: &WalletHandle) -> Result<()> {
        let persisted = PersistedWallet {
            wallet_id: wallet.id.clone(),
            network_id: wallet.network.to_string(),
            saved_at: Local::now(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(&persisted)?;
        tokio::fs::write(&self.path, content).await?;

        debug!("saved wallet {} to {:?}", wallet.id, self.path);
        Ok(())
    }
}
