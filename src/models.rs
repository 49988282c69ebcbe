use std::time::Duration;

use anyhow::Result;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use ton_block::MsgAddressInt;
use ton_types::Cell;

use tonpay_utils::*;

const DEFAULT_JETTON_ROOT: &str =
    "0:2f956143c461769579baef2e32cc2d7bc18283f40d20bb03e432cd603ac33ffc";

/// Default plain text attached to every transfer
pub const DEFAULT_COMMENT: &str = "Мой кастомный текст к переводу";

/// Message as accepted by the wallet-connection provider
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMessage {
    /// Destination in any textual encoding (raw, bounceable or non-bounceable)
    pub address: String,
    /// Attached amount in nano
    #[serde(with = "serde_string")]
    pub amount: u64,
    /// Message body, base64 encoded BOC on the wire
    #[serde(
        default,
        with = "serde_optional_cell",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<Cell>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest {
    /// Unix time in seconds after which the wallet must reject the request
    pub valid_until: u64,
    pub messages: Vec<TransactionMessage>,
}

/// Connected wallet, as exposed by the provider
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub account: WalletAccount,
}

impl WalletInfo {
    /// Bounceable url-safe form of the account address
    pub fn display_address(&self) -> Result<String> {
        let address = self.account.address()?;
        pack_std_smc_addr(true, &address, AddressFlags::MAINNET_BOUNCEABLE)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    pub address: String,
    /// Network id, e.g. `-239` for the mainnet and `-3` for the testnet
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl WalletAccount {
    pub fn address(&self) -> Result<MsgAddressInt> {
        repack_address(&self.address)
    }
}

/// What to do with a batch when one of its messages cannot be built
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Send nothing
    #[default]
    Abort,
    /// Send the messages which were built
    SkipMissing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferSettings {
    /// Recipient of all three transfers. Default: `UQAX-3By_iyTfv-5bmV9GI3juvWlFVCYaHS2LG2ozjZIYp_b`
    #[serde(with = "serde_checked_address")]
    pub recipient: String,
    /// Native coin transfer amount. Default: `10000000` (0.01)
    #[serde(with = "serde_string")]
    pub ton_amount: u64,

    /// Jetton master used by [`send_jetton`](crate::core::dispatcher::Dispatcher::send_jetton)
    #[serde(with = "serde_address")]
    pub jetton_root: MsgAddressInt,
    /// Jetton amount in the token's smallest units. Default: `1000000000`
    #[serde(with = "serde_string")]
    pub jetton_amount: BigUint,
    /// Amount attached to the jetton wallet message. Default: `50000000` (0.05)
    #[serde(with = "serde_string")]
    pub jetton_attached_amount: u64,
    /// Amount forwarded with the transfer notification. Default: `20000000` (0.02)
    #[serde(with = "serde_string")]
    pub jetton_forward_amount: u64,

    /// NFT item to transfer
    #[serde(with = "serde_checked_address")]
    pub nft_address: String,
    /// Amount attached to the NFT item message. Default: `50000000` (0.05)
    #[serde(with = "serde_string")]
    pub nft_attached_amount: u64,
    /// Amount forwarded to the new owner. Default: `0`
    #[serde(with = "serde_string")]
    pub nft_forward_amount: u64,

    pub comment: String,

    /// Request lifetime. Default: `100`
    #[serde(with = "serde_duration_sec")]
    pub valid_for: Duration,

    pub batch_policy: BatchPolicy,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            recipient: "UQAX-3By_iyTfv-5bmV9GI3juvWlFVCYaHS2LG2ozjZIYp_b".to_owned(),
            ton_amount: 10_000_000,
            jetton_root: repack_address(DEFAULT_JETTON_ROOT).trust_me(),
            jetton_amount: BigUint::from(1_000_000_000u64),
            jetton_attached_amount: 50_000_000,
            jetton_forward_amount: 20_000_000,
            nft_address: "EQBG6Rt5Yl4roa8_wWCz7n_7CCR5zAPz338W7_-x76q9Mrlr".to_owned(),
            nft_attached_amount: 50_000_000,
            nft_forward_amount: 0,
            comment: DEFAULT_COMMENT.to_owned(),
            valid_for: Duration::from_secs(100),
            batch_policy: BatchPolicy::Abort,
        }
    }
}
