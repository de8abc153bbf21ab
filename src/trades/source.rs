use async_trait::async_trait;
use std::time::Duration;

use super::domain::{DealWindow, TradeRecord};

#[derive(Debug, thiserror::Error)]
pub enum TradeLookupError {
    #[error("trade lookup not configured: {0}")]
    NotConfigured(&'static str),
    #[error("trade lookup transport failed: {0}")]
    Transport(String),
    #[error("trade lookup returned an unusable payload: {0}")]
    Malformed(String),
    #[error("trade lookup timed out after {0:?}")]
    TimedOut(Duration),
}

/// Read-only port onto the transaction-record collaborator. One call
/// returns every record for the district and window.
#[async_trait]
pub trait TradeRecordSource: Send + Sync {
    async fn records_in(
        &self,
        district_code: &str,
        window: &DealWindow,
    ) -> Result<Vec<TradeRecord>, TradeLookupError>;

    fn source_name(&self) -> &'static str;
}

/// Caller-side guard for the lookup. The collaborator is slow on bad days;
/// the caller decides how long a lookup may hold up an admin screen.
pub async fn records_with_timeout(
    source: &dyn TradeRecordSource,
    district_code: &str,
    window: &DealWindow,
    limit: Duration,
) -> Result<Vec<TradeRecord>, TradeLookupError> {
    match tokio::time::timeout(limit, source.records_in(district_code, window)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                source = source.source_name(),
                district = district_code,
                ?limit,
                "trade lookup timed out"
            );
            Err(TradeLookupError::TimedOut(limit))
        }
    }
}
