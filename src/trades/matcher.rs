use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;

use strsim::jaro_winkler;

use crate::config::MatcherConfig;

use super::domain::{DealWindow, MatchCandidate, MatchOutcome, MatchTier, NoMatchReason, TradeRecord};
use super::normalizer::normalize_name;
use super::source::{records_with_timeout, TradeLookupError, TradeRecordSource};

/// Tier scores. The distance tier is scaled under the containment tier so a
/// near-perfect edit-distance score can never outrank a name that actually
/// contains the query.
const EXACT_SCORE: f64 = 1.0;
const CONTAINMENT_SCORE: f64 = 0.85;
const DISTANCE_CEILING: f64 = 0.8;

/// Scores a district's deal records against a listing's apartment name.
pub struct TradeMatcher {
    config: MatcherConfig,
}

impl TradeMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Full lookup-and-rank pass. Lookup failures, timeouts, and empty
    /// windows all land in `NotFound` with the reason kept for the admin
    /// screen; nothing here ever reaches the rendering path as an error.
    pub async fn find_candidates(
        &self,
        source: &dyn TradeRecordSource,
        apartment_name: &str,
        district_code: &str,
        window: &DealWindow,
        limit: Duration,
    ) -> MatchOutcome {
        let records = match records_with_timeout(source, district_code, window, limit).await {
            Ok(records) => records,
            Err(TradeLookupError::TimedOut(_)) => {
                return MatchOutcome::NotFound {
                    reason: NoMatchReason::TimedOut,
                }
            }
            Err(err) => {
                tracing::warn!(
                    district = district_code,
                    error = %err,
                    "trade lookup failed"
                );
                return MatchOutcome::NotFound {
                    reason: NoMatchReason::LookupFailed(err.to_string()),
                };
            }
        };

        let candidates = self.rank(apartment_name, &records);
        if candidates.is_empty() {
            MatchOutcome::NotFound {
                reason: NoMatchReason::NoRecords,
            }
        } else {
            MatchOutcome::Found { candidates }
        }
    }

    /// Groups records by distinct apartment name, scores each name, and
    /// annotates it with its latest deal. Pure; exercised directly in tests.
    pub fn rank(&self, apartment_name: &str, records: &[TradeRecord]) -> Vec<MatchCandidate> {
        let query = normalize_name(apartment_name);
        if query.is_empty() {
            return Vec::new();
        }

        let mut grouped: HashMap<&str, Vec<&TradeRecord>> = HashMap::new();
        for record in records {
            grouped.entry(record.apartment.as_str()).or_default().push(record);
        }

        let mut candidates: Vec<MatchCandidate> = grouped
            .into_iter()
            .filter_map(|(name, deals)| {
                let latest = deals
                    .iter()
                    .max_by_key(|record| record.dealt_on)
                    .copied()?;
                let (tier, score) = score_name(&query, name);

                Some(MatchCandidate {
                    apartment: name.to_string(),
                    score,
                    tier,
                    recent_price: latest.amount,
                    recent_date: latest.dealt_on,
                    deal_count: deals.len(),
                    confident: score >= self.config.min_confidence,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.deal_count.cmp(&a.deal_count))
                .then_with(|| a.apartment.cmp(&b.apartment))
        });

        candidates
    }
}

fn score_name(normalized_query: &str, candidate: &str) -> (MatchTier, f64) {
    let normalized = normalize_name(candidate);

    if normalized == normalized_query {
        (MatchTier::Exact, EXACT_SCORE)
    } else if normalized.contains(normalized_query) || normalized_query.contains(&normalized) {
        (MatchTier::Containment, CONTAINMENT_SCORE)
    } else {
        (
            MatchTier::Distance,
            jaro_winkler(normalized_query, &normalized) * DISTANCE_CEILING,
        )
    }
}
