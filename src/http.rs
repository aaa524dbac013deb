use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::service::SentimentService;
use crate::types::{AnalysisRequest, AnalysisResult, ErrorBody, Health, HistoryItem};

pub struct HttpService {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for HttpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpService")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(failure_from_body(status, &text));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}

/// Prefer the server's own `{"error": ...}` message; fall back to the status line.
fn failure_from_body(status: StatusCode, body: &str) -> AppError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.trim().is_empty() => AppError::Server(message),
        _ => AppError::Http(format!("server returned {}", status)),
    }
}

#[async_trait]
impl SentimentService for HttpService {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let response = self
            .client
            .post(self.api_url("/analyze"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_history(&self, offset: usize) -> Result<Vec<HistoryItem>> {
        let response = self
            .client
            .get(self.api_url("/history"))
            .query(&[("offset", offset)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn health(&self) -> Result<Health> {
        let response = self.client.get(self.api_url("/")).send().await?;
        Self::decode(response).await
    }
}
