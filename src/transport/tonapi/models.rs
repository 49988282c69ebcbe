use serde::Deserialize;

/// Result of `GET /v2/blockchain/accounts/{account}/methods/{method}`
#[derive(Deserialize, Debug)]
pub struct MethodExecutionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default)]
    pub decoded: Option<DecodedWalletAddress>,
}

#[derive(Deserialize, Debug)]
pub struct DecodedWalletAddress {
    #[serde(default)]
    pub jetton_wallet_address: Option<String>,
}
