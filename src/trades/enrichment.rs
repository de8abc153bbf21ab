use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::{MatcherConfig, TradeLookupConfig};
use crate::listings::domain::{ExtendedData, ListingId};
use crate::listings::repository::{ListingRepository, RepositoryError, StoredListing};

use super::district::district_code_for;
use super::domain::{DealWindow, MatchCandidate, MatchOutcome};
use super::margin::margin_against;
use super::matcher::TradeMatcher;
use super::normalizer::clean_apartment_name;
use super::source::TradeRecordSource;

/// Result of one bulk enrichment sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Admin-side pipeline tying the matcher and margin math to stored
/// listings. Rendering never calls this; it runs on demand or as a sweep.
pub struct TradeInsightService<R, S> {
    repository: Arc<R>,
    source: Arc<S>,
    matcher: TradeMatcher,
    lookup: TradeLookupConfig,
}

impl<R, S> TradeInsightService<R, S>
where
    R: ListingRepository + 'static,
    S: TradeRecordSource + 'static,
{
    pub fn new(
        repository: Arc<R>,
        source: Arc<S>,
        lookup: TradeLookupConfig,
        matcher_config: MatcherConfig,
    ) -> Self {
        Self {
            repository,
            source,
            matcher: TradeMatcher::new(matcher_config),
            lookup,
        }
    }

    /// On-demand comparables for the admin "find nearby deals" screen.
    pub async fn comparables(
        &self,
        apartment_name: &str,
        district_code: &str,
        today: NaiveDate,
    ) -> MatchOutcome {
        let window = DealWindow::looking_back(today, self.lookup.lookback_months);
        self.matcher
            .find_candidates(
                self.source.as_ref(),
                apartment_name,
                district_code,
                &window,
                self.lookup.timeout,
            )
            .await
    }

    /// Walks every active listing and applies the best confident candidate.
    /// Per-listing problems are counted, logged, and skipped; one bad
    /// listing must not end the sweep.
    pub async fn enrich_all(&self, today: NaiveDate) -> Result<EnrichmentReport, RepositoryError> {
        let stored = self.repository.active()?;
        let mut report = EnrichmentReport {
            total: stored.len(),
            ..EnrichmentReport::default()
        };

        for record in stored {
            let listing = record.materialize();

            let district = listing
                .district_code
                .clone()
                .or_else(|| district_code_for(&listing.region).map(str::to_string));
            let Some(district) = district else {
                tracing::debug!(id = %listing.id, region = %listing.region, "no district code, skipping");
                report.skipped += 1;
                continue;
            };

            let name = listing
                .extended
                .trade_price
                .as_ref()
                .and_then(|info| info.apartment_name.clone())
                .unwrap_or_else(|| clean_apartment_name(&listing.title));
            if name.is_empty() {
                report.skipped += 1;
                continue;
            }

            let outcome = self.comparables(&name, &district, today).await;
            let candidate = match outcome {
                MatchOutcome::Found { candidates } => {
                    candidates.into_iter().find(|candidate| candidate.confident)
                }
                MatchOutcome::NotFound { reason } => {
                    tracing::debug!(id = %listing.id, %reason, "no comparable found");
                    None
                }
            };
            let Some(candidate) = candidate else {
                report.skipped += 1;
                continue;
            };

            match self.apply_to_stored(record, &candidate, today) {
                Ok(_) => report.updated += 1,
                Err(err) => {
                    tracing::warn!(id = %listing.id, error = %err, "enrichment update failed");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            total = report.total,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "trade enrichment sweep finished"
        );
        Ok(report)
    }

    /// Applies an operator-selected candidate, bypassing the confidence
    /// gate: a human has confirmed the pairing.
    pub fn apply_candidate(
        &self,
        id: ListingId,
        candidate: &MatchCandidate,
        today: NaiveDate,
    ) -> Result<StoredListing, RepositoryError> {
        let stored = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        self.apply_to_stored(stored, candidate, today)
    }

    fn apply_to_stored(
        &self,
        stored: StoredListing,
        candidate: &MatchCandidate,
        today: NaiveDate,
    ) -> Result<StoredListing, RepositoryError> {
        let mut extended = ExtendedData::from_document(&stored.extended_data);
        let trade = extended.trade_price.get_or_insert_with(Default::default);

        if trade.apartment_name.is_none() {
            trade.apartment_name = Some(candidate.apartment.clone());
        }
        trade.recent_price = Some(candidate.recent_price);
        trade.recent_trade_date = Some(candidate.recent_date);

        // The recent deal is worth keeping even when the margin is not
        // computable; the margin fields stay empty rather than guessing.
        match margin_against(trade.original_price, candidate.recent_price) {
            Ok(result) => {
                trade.margin = Some(result.amount);
                trade.margin_rate = Some(result.rate_percent);
            }
            Err(_) => {
                trade.margin = None;
                trade.margin_rate = None;
            }
        }

        let mut record = stored;
        record.extended_data = extended.to_document();
        record.updated_on = today;
        self.repository.update(record.clone())?;
        Ok(record)
    }
}
