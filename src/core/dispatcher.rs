use std::sync::Arc;

use anyhow::Result;
use ton_block::MsgAddressInt;
use tonpay_utils::Clock;

use super::TransferBuilder;
use crate::external::WalletConnector;
use crate::models::{BatchPolicy, SendTransactionRequest, TransactionMessage};

/// Hands built messages to the wallet-connection provider
pub struct Dispatcher {
    clock: Arc<dyn Clock>,
    connector: Arc<dyn WalletConnector>,
    builder: TransferBuilder,
}

impl Dispatcher {
    pub fn new(
        clock: Arc<dyn Clock>,
        connector: Arc<dyn WalletConnector>,
        builder: TransferBuilder,
    ) -> Self {
        Self {
            clock,
            connector,
            builder,
        }
    }

    pub fn builder(&self) -> &TransferBuilder {
        &self.builder
    }

    /// Opens the wallet selection dialog, or drops the session if a wallet
    /// is already connected
    pub async fn toggle_connection(&self) -> Result<()> {
        match self.connector.wallet() {
            None => self.connector.open_modal().await,
            Some(_) => self.connector.disconnect().await,
        }
    }

    pub async fn send_ton(&self) -> Result<SendTransactionRequest> {
        let message = self.builder.build_ton_transfer()?;
        self.send(vec![message]).await
    }

    pub async fn send_jetton(&self) -> Result<SendTransactionRequest> {
        let message = self
            .build_jetton_transfer(self.owner()?.as_ref())
            .await?
            .ok_or(DispatchError::JettonWalletNotResolved)?;
        self.send(vec![message]).await
    }

    pub async fn send_nft(&self) -> Result<SendTransactionRequest> {
        let message = self.builder.build_nft_transfer(self.owner()?.as_ref())?;
        self.send(vec![message]).await
    }

    /// Sends coin, jetton and NFT transfers in one request.
    ///
    /// A jetton transfer which could not be built is handled according to
    /// the configured [`BatchPolicy`]
    pub async fn send_all(&self) -> Result<SendTransactionRequest> {
        let owner = self.owner()?;

        let ton_message = self.builder.build_ton_transfer()?;
        let jetton_message = self.build_jetton_transfer(owner.as_ref()).await?;
        let nft_message = self.builder.build_nft_transfer(owner.as_ref())?;

        let mut messages = Vec::with_capacity(3);
        messages.push(ton_message);
        match (jetton_message, self.builder.settings().batch_policy) {
            (Some(message), _) => messages.push(message),
            (None, BatchPolicy::Abort) => {
                return Err(DispatchError::JettonWalletNotResolved.into())
            }
            (None, BatchPolicy::SkipMissing) => {
                log::warn!("Jetton transfer skipped from the batch");
            }
        }
        messages.push(nft_message);

        self.send(messages).await
    }

    async fn build_jetton_transfer(
        &self,
        owner: Option<&MsgAddressInt>,
    ) -> Result<Option<TransactionMessage>> {
        let root = self.builder.jetton_root();
        self.builder.build_jetton_transfer(root, owner).await
    }

    fn owner(&self) -> Result<Option<MsgAddressInt>> {
        self.connector
            .wallet()
            .map(|wallet| wallet.account.address())
            .transpose()
    }

    async fn send(&self, messages: Vec<TransactionMessage>) -> Result<SendTransactionRequest> {
        let valid_until = self.clock.now_sec_u64() + self.builder.settings().valid_for.as_secs();
        let request = SendTransactionRequest {
            valid_until,
            messages,
        };

        log::debug!(
            "Sending {} message(s), valid until {valid_until}",
            request.messages.len()
        );
        self.connector.send_transaction(request.clone()).await?;
        Ok(request)
    }
}

#[derive(thiserror::Error, Debug, Copy, Clone)]
pub enum DispatchError {
    #[error("Jetton wallet not resolved")]
    JettonWalletNotResolved,
}
