use std::sync::Arc;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use ton_block::MsgAddressInt;
use tonpay_utils::repack_address;

use self::comment::Comment;
use crate::models::{TransactionMessage, TransferSettings};
use crate::transport::JettonWalletResolver;

pub mod comment;
pub mod dispatcher;
pub mod jetton_wallet;
pub mod models;
pub mod nft_wallet;
pub mod parsing;
pub mod ton_wallet;

/// Transfers are never correlated with their responses
const QUERY_ID: u64 = 0;

/// Builds transfer messages from the configured parameters
pub struct TransferBuilder {
    settings: TransferSettings,
    resolver: Arc<dyn JettonWalletResolver>,
    comment: OnceCell<Comment>,
}

impl TransferBuilder {
    pub fn new(settings: TransferSettings, resolver: Arc<dyn JettonWalletResolver>) -> Self {
        Self {
            settings,
            resolver,
            comment: OnceCell::new(),
        }
    }

    pub fn settings(&self) -> &TransferSettings {
        &self.settings
    }

    /// Comment attached to every transfer. Built on first access
    pub fn comment(&self) -> Result<&Comment> {
        self.comment
            .get_or_try_init(|| Comment::new(&self.settings.comment))
    }

    pub fn jetton_root(&self) -> &MsgAddressInt {
        &self.settings.jetton_root
    }

    pub fn build_ton_transfer(&self) -> Result<TransactionMessage> {
        parse_setting(&self.settings.recipient, "recipient")?;
        let comment = self.comment()?;

        Ok(ton_wallet::prepare_transfer(
            &self.settings.recipient,
            self.settings.ton_amount,
            Some(comment.cell().clone()),
        ))
    }

    /// Builds a transfer of jettons from `owner` to the configured recipient.
    ///
    /// Returns `None` if the owner's jetton wallet could not be resolved
    pub async fn build_jetton_transfer(
        &self,
        root_token_contract: &MsgAddressInt,
        owner: Option<&MsgAddressInt>,
    ) -> Result<Option<TransactionMessage>> {
        let owner = owner.ok_or(TransferError::WalletNotConnected)?;
        let recipient = parse_setting(&self.settings.recipient, "recipient")?;

        let jetton_wallet = match self
            .resolver
            .get_jetton_wallet_address(root_token_contract, owner)
            .await
        {
            Ok(Some(address)) => address,
            Ok(None) => {
                log::warn!("Jetton wallet of {owner} for {root_token_contract} not found");
                return Ok(None);
            }
            Err(e) => {
                log::warn!("Failed to resolve jetton wallet of {owner}: {e:?}");
                return Ok(None);
            }
        };

        let payload = jetton_wallet::build_transfer_payload(
            QUERY_ID,
            &self.settings.jetton_amount,
            &recipient,
            owner,
            None,
            self.settings.jetton_forward_amount,
            Some(self.comment()?.cell().clone()),
        )?;

        Ok(Some(TransactionMessage {
            address: jetton_wallet.to_string(),
            amount: self.settings.jetton_attached_amount,
            payload: Some(payload),
        }))
    }

    /// Builds a transfer of the configured NFT item from `owner` to the recipient
    pub fn build_nft_transfer(&self, owner: Option<&MsgAddressInt>) -> Result<TransactionMessage> {
        let owner = owner.ok_or(TransferError::WalletNotConnected)?;
        let recipient = parse_setting(&self.settings.recipient, "recipient")?;
        parse_setting(&self.settings.nft_address, "nft address")?;

        let payload = nft_wallet::build_transfer_payload(
            QUERY_ID,
            &recipient,
            owner,
            None,
            self.settings.nft_forward_amount,
            Some(self.comment()?.cell().clone()),
        )?;

        Ok(TransactionMessage {
            address: self.settings.nft_address.clone(),
            amount: self.settings.nft_attached_amount,
            payload: Some(payload),
        })
    }
}

fn parse_setting(address: &str, name: &str) -> Result<MsgAddressInt> {
    repack_address(address).with_context(|| format!("invalid {name}: {address}"))
}

#[derive(thiserror::Error, Debug, Copy, Clone)]
pub enum TransferError {
    #[error("Wallet not connected")]
    WalletNotConnected,
    #[error("Failed to convert amount to grams")]
    TryFromGrams,
}
