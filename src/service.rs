use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AnalysisRequest, AnalysisResult, Health, HistoryItem};

/// The remote classification service.
#[async_trait]
pub trait SentimentService: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;

    /// Up to `PAGE_SIZE` items starting at `offset`, newest first.
    async fn list_history(&self, offset: usize) -> Result<Vec<HistoryItem>>;

    async fn health(&self) -> Result<Health>;
}
