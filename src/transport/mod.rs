use anyhow::Result;
use async_trait::async_trait;
use ton_block::MsgAddressInt;

pub mod tonapi;

#[async_trait]
pub trait JettonWalletResolver: Send + Sync {
    /// Computes the jetton wallet of `owner` by calling `get_wallet_address`
    /// on the jetton master.
    ///
    /// Returns `Ok(None)` when the response has no address
    async fn get_jetton_wallet_address(
        &self,
        root_token_contract: &MsgAddressInt,
        owner: &MsgAddressInt,
    ) -> Result<Option<MsgAddressInt>>;
}
