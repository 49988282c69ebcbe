use anyhow::Result;
use async_trait::async_trait;

use crate::models::{SendTransactionRequest, WalletInfo};

/// Read-only HTTP access to the indexer API
#[async_trait]
pub trait TonApiConnection: Send + Sync {
    /// Performs GET request relative to the indexer base url.
    /// Returns `None` if the resource was not found
    async fn send_get(&self, path: &str) -> Result<Option<String>>;
}

/// Wallet-connection provider which owns the session and the signing wallet
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Currently connected wallet, if any
    fn wallet(&self) -> Option<WalletInfo>;

    /// Show the wallet selection dialog
    async fn open_modal(&self) -> Result<()>;

    /// Drop the current session
    async fn disconnect(&self) -> Result<()>;

    /// Ask the connected wallet to sign and broadcast the messages
    async fn send_transaction(&self, request: SendTransactionRequest) -> Result<()>;
}
