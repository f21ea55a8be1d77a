use crate::error::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;

/// Single-attempt byte fetch. Retries, if any, belong to the implementor.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, endpoint: &str, url: &str) -> Result<Vec<u8>, UpstreamError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &str, url: &str) -> Result<Vec<u8>, UpstreamError> {
        let request_failed = |reason: String| UpstreamError::RequestFailed {
            endpoint: endpoint.to_string(),
            reason,
        };

        // `url` carries the API key; errors are stripped of it before logging.
        let response = self
            .client
            .get(url)
            .header("User-Agent", "dart-ingest/0.1")
            .send()
            .await
            .map_err(|e| request_failed(format!("network error: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(request_failed(format!(
                "HTTP error {}",
                response.status().as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| request_failed(format!("error reading body: {}", e.without_url())))?;
        Ok(body.to_vec())
    }
}
