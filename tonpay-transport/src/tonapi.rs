use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TonApiSettings {
    /// Base url of the accounts api. Default: `https://tonapi.io/v2/blockchain/accounts/`
    pub endpoint: String,
}

impl Default for TonApiSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://tonapi.io/v2/blockchain/accounts/".to_owned(),
        }
    }
}

pub struct TonApiClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl TonApiClient {
    pub fn new(settings: TonApiSettings) -> Result<Self> {
        let mut endpoint = Url::parse(&settings.endpoint)
            .with_context(|| format!("failed to parse endpoint: {}", settings.endpoint))?;

        // Relative paths replace the last segment otherwise
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.endpoint
            .join(path)
            .with_context(|| format!("invalid request path: {path}"))
    }

    pub async fn send_get(&self, path: &str) -> Result<Option<String>> {
        let url = self.url(path)?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        if matches!(response.status(), reqwest::StatusCode::NOT_FOUND) {
            return Ok(None);
        }

        let response = response.error_for_status()?.text().await?;
        Ok(Some(response))
    }
}

#[async_trait::async_trait]
impl tonpay::external::TonApiConnection for TonApiClient {
    async fn send_get(&self, path: &str) -> Result<Option<String>> {
        self.send_get(path).await
    }
}
