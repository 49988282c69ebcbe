use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use ton_block::MsgAddressInt;
use tonpay_utils::repack_address;

use self::models::*;
use super::JettonWalletResolver;
use crate::external::TonApiConnection;

mod models;

const GET_WALLET_ADDRESS: &str = "get_wallet_address";

/// Resolves derived addresses through the tonapi `methods` endpoint
pub struct TonApiTransport {
    connection: Arc<dyn TonApiConnection>,
}

impl TonApiTransport {
    pub fn new(connection: Arc<dyn TonApiConnection>) -> Self {
        Self { connection }
    }

    async fn run_get_method(
        &self,
        account: &MsgAddressInt,
        method: &str,
        args: &str,
    ) -> Result<Option<MethodExecutionResult>> {
        let path = format!("{account}/methods/{method}?args={args}");
        let response = match self.connection.send_get(&path).await? {
            Some(response) => response,
            None => return Ok(None),
        };

        let result = serde_json::from_str(&response).map_err(TonApiError::InvalidResponse)?;
        Ok(Some(result))
    }
}

#[async_trait]
impl JettonWalletResolver for TonApiTransport {
    async fn get_jetton_wallet_address(
        &self,
        root_token_contract: &MsgAddressInt,
        owner: &MsgAddressInt,
    ) -> Result<Option<MsgAddressInt>> {
        let result = match self
            .run_get_method(root_token_contract, GET_WALLET_ADDRESS, &owner.to_string())
            .await?
        {
            Some(result) => result,
            None => return Ok(None),
        };

        if !result.success {
            log::debug!(
                "{GET_WALLET_ADDRESS} on {root_token_contract} exited with code {}",
                result.exit_code
            );
        }

        match result.decoded.and_then(|decoded| decoded.jetton_wallet_address) {
            Some(address) => repack_address(&address)
                .map(Some)
                .map_err(|_| TonApiError::InvalidAddress(address).into()),
            None => Ok(None),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TonApiError {
    #[error("Invalid response")]
    InvalidResponse(#[source] serde_json::Error),
    #[error("Invalid address in response: {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
pub mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;

    use parking_lot::Mutex;

    use super::*;

    pub const ROOT: &str = "0:2f956143c461769579baef2e32cc2d7bc18283f40d20bb03e432cd603ac33ffc";
    pub const OWNER: &str = "0:02e3f2284e68a8106b823ab9f2404f33cc43fccad8e1de835bdd96789254686c";
    pub const JETTON_WALLET: &str =
        "0:c871b04dabe95756ef8483d9a68e4c2ff0b9558d4aafaf585cc22f28a9c15287";

    /// Serves canned responses and records requested paths
    #[derive(Default)]
    pub struct StaticConnection {
        responses: HashMap<String, String>,
        pub requests: Mutex<Vec<String>>,
    }

    impl StaticConnection {
        pub fn with_response(mut self, path: String, body: &str) -> Self {
            self.responses.insert(path, body.to_owned());
            self
        }

        pub fn wallet_address_path(root: &str, owner: &str) -> String {
            format!("{root}/methods/get_wallet_address?args={owner}")
        }
    }

    #[async_trait]
    impl TonApiConnection for StaticConnection {
        async fn send_get(&self, path: &str) -> Result<Option<String>> {
            self.requests.lock().push(path.to_owned());
            Ok(self.responses.get(path).cloned())
        }
    }

    pub struct FailingConnection;

    #[async_trait]
    impl TonApiConnection for FailingConnection {
        async fn send_get(&self, _: &str) -> Result<Option<String>> {
            anyhow::bail!("connection refused")
        }
    }

    pub fn resolved_response(address: &str) -> String {
        format!(
            r#"{{"success":true,"exit_code":0,"stack":[{{"type":"cell","cell":"b5ee9c72"}}],"decoded":{{"jetton_wallet_address":"{address}"}}}}"#
        )
    }

    fn addr(address: &str) -> MsgAddressInt {
        MsgAddressInt::from_str(address).unwrap()
    }

    #[tokio::test]
    async fn resolves_wallet_address() -> Result<()> {
        let connection = Arc::new(StaticConnection::default().with_response(
            StaticConnection::wallet_address_path(ROOT, OWNER),
            &resolved_response(JETTON_WALLET),
        ));
        let transport = TonApiTransport::new(connection.clone());

        let address = transport
            .get_jetton_wallet_address(&addr(ROOT), &addr(OWNER))
            .await?;
        assert_eq!(address, Some(addr(JETTON_WALLET)));

        assert_eq!(
            *connection.requests.lock(),
            vec![StaticConnection::wallet_address_path(ROOT, OWNER)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn accepts_user_friendly_address() -> Result<()> {
        let connection = Arc::new(StaticConnection::default().with_response(
            StaticConnection::wallet_address_path(ROOT, OWNER),
            &resolved_response("kQDIcbBNq-lXVu-Eg9mmjkwv8LlVjUqvr1hcwi8oqcFSh0dy"),
        ));
        let transport = TonApiTransport::new(connection);

        let address = transport
            .get_jetton_wallet_address(&addr(ROOT), &addr(OWNER))
            .await?;
        assert_eq!(address, Some(addr(JETTON_WALLET)));
        Ok(())
    }

    #[tokio::test]
    async fn same_arguments_same_result() -> Result<()> {
        let connection = Arc::new(StaticConnection::default().with_response(
            StaticConnection::wallet_address_path(ROOT, OWNER),
            &resolved_response(JETTON_WALLET),
        ));
        let transport = TonApiTransport::new(connection.clone());

        let first = transport
            .get_jetton_wallet_address(&addr(ROOT), &addr(OWNER))
            .await?;
        let second = transport
            .get_jetton_wallet_address(&addr(ROOT), &addr(OWNER))
            .await?;
        assert_eq!(first, second);

        // No caching
        assert_eq!(connection.requests.lock().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn missing_field_is_none() -> Result<()> {
        let connection = Arc::new(StaticConnection::default().with_response(
            StaticConnection::wallet_address_path(ROOT, OWNER),
            r#"{"success":false,"exit_code":11,"stack":[]}"#,
        ));
        let transport = TonApiTransport::new(connection);

        let address = transport
            .get_jetton_wallet_address(&addr(ROOT), &addr(OWNER))
            .await?;
        assert!(address.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn not_found_is_none() -> Result<()> {
        let transport = TonApiTransport::new(Arc::new(StaticConnection::default()));

        let address = transport
            .get_jetton_wallet_address(&addr(ROOT), &addr(OWNER))
            .await?;
        assert!(address.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn garbage_is_error() {
        let connection = Arc::new(StaticConnection::default().with_response(
            StaticConnection::wallet_address_path(ROOT, OWNER),
            &resolved_response("garbage"),
        ));
        let transport = TonApiTransport::new(connection);

        let err = transport
            .get_jetton_wallet_address(&addr(ROOT), &addr(OWNER))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TonApiError>(),
            Some(TonApiError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn transport_error_is_error() {
        let transport = TonApiTransport::new(Arc::new(FailingConnection));
        assert!(transport
            .get_jetton_wallet_address(&addr(ROOT), &addr(OWNER))
            .await
            .is_err());
    }
}
