use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;

use super::{AnalyzeRequest, AnalyzeResponse, Provider};

/// HTTP client for the remote gesture analysis service
#[derive(Debug, Clone)]
pub struct AnalyzeClient {
    /// Base URL of the service
    base_url: Url,
    /// HTTP client for making requests
    client: Client,
}

impl AnalyzeClient {
    /// Create a new client for the service at `endpoint`
    ///
    /// Requests are never retried; a failed call ends its translation cycle.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let normalized = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{}/", endpoint)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            // Keep connections alive between consecutive transcripts
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// URL of the analyze endpoint
    pub fn analyze_url(&self) -> Result<Url, ProviderError> {
        self.base_url
            .join("analyze")
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))
    }

    fn map_send_error(e: reqwest::Error) -> ProviderError {
        if e.is_connect() || e.is_timeout() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl Provider for AnalyzeClient {
    async fn complete(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, ProviderError> {
        let url = self.analyze_url()?;
        debug!("POST {} ({} chars)", url, request.transcript.chars().count());

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!("Analyze service returned {}: {}", status, truncate(&body, 200));
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        serde_json::from_str::<AnalyzeResponse>(&body).map_err(|e| {
            error!("Failed to parse analyze response: {}. Raw response: {}", e, truncate(&body, 500));
            ProviderError::ParseError(e.to_string())
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        // Any HTTP answer proves the service is reachable
        self.client
            .get(self.base_url.clone())
            .send()
            .await
            .map(|_| ())
            .map_err(Self::map_send_error)
    }

    fn name(&self) -> &str {
        "analyze"
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
