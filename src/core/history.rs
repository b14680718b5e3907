//! Historical rate retrieval abstraction

use crate::core::series::RateSeries;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait HistoryFetcher: Send + Sync {
    /// Fetches `base -> target` rates for every published date in `[start, end]`.
    async fn fetch(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        base: &str,
        target: &str,
    ) -> Result<RateSeries>;
}
