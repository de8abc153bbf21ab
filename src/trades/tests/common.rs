use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::{MatcherConfig, TradeLookupConfig};
use crate::listings::domain::{ExtendedData, ListingId, ListingKind, TradePriceInfo};
use crate::listings::repository::{ListingRepository, RepositoryError, StoredListing};
use crate::trades::domain::{DealWindow, TradeRecord};
use crate::trades::source::{TradeLookupError, TradeRecordSource};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn record(apartment: &str, amount: f64, dealt_on: NaiveDate) -> TradeRecord {
    TradeRecord {
        apartment: apartment.to_string(),
        amount,
        dealt_on,
        exclusive_area: Some(84.97),
        floor: Some(15),
        neighborhood: Some("논현동".to_string()),
        district_code: "11680".to_string(),
    }
}

pub(super) fn lookup_config() -> TradeLookupConfig {
    TradeLookupConfig {
        timeout: Duration::from_secs(5),
        lookback_months: 36,
        ..TradeLookupConfig::default()
    }
}

pub(super) fn matcher_config() -> MatcherConfig {
    MatcherConfig::default()
}

/// Fixed record set standing in for the government source.
pub(super) struct StaticTradeSource {
    pub(super) records: Vec<TradeRecord>,
}

#[async_trait]
impl TradeRecordSource for StaticTradeSource {
    async fn records_in(
        &self,
        district_code: &str,
        window: &DealWindow,
    ) -> Result<Vec<TradeRecord>, TradeLookupError> {
        Ok(self
            .records
            .iter()
            .filter(|record| {
                record.district_code == district_code && window.contains(record.dealt_on)
            })
            .cloned()
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

pub(super) struct FailingTradeSource;

#[async_trait]
impl TradeRecordSource for FailingTradeSource {
    async fn records_in(
        &self,
        _district_code: &str,
        _window: &DealWindow,
    ) -> Result<Vec<TradeRecord>, TradeLookupError> {
        Err(TradeLookupError::Transport("connection refused".to_string()))
    }

    fn source_name(&self) -> &'static str {
        "failing"
    }
}

/// Never answers inside any reasonable timeout.
pub(super) struct StalledTradeSource;

#[async_trait]
impl TradeRecordSource for StalledTradeSource {
    async fn records_in(
        &self,
        _district_code: &str,
        _window: &DealWindow,
    ) -> Result<Vec<TradeRecord>, TradeLookupError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }

    fn source_name(&self) -> &'static str {
        "stalled"
    }
}

/// Listing rows for the enrichment pipeline to walk.
#[derive(Default)]
pub(super) struct ListingStore {
    pub(super) records: Mutex<HashMap<ListingId, StoredListing>>,
}

impl ListingStore {
    pub(super) fn with_rows(rows: Vec<StoredListing>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("listing mutex poisoned");
            for row in rows {
                guard.insert(row.id, row);
            }
        }
        Arc::new(store)
    }
}

impl ListingRepository for ListingStore {
    fn insert(&self, record: StoredListing) -> Result<StoredListing, RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: StoredListing) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        if !guard.contains_key(&record.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.id, record);
        Ok(())
    }

    fn fetch(&self, id: ListingId) -> Result<Option<StoredListing>, RepositoryError> {
        let guard = self.records.lock().expect("listing mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn active(&self) -> Result<Vec<StoredListing>, RepositoryError> {
        let guard = self.records.lock().expect("listing mutex poisoned");
        let mut rows: Vec<StoredListing> = guard
            .values()
            .filter(|row| !row.is_deleted())
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    fn mark_deleted(&self, id: ListingId, on: NaiveDate) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        let row = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        row.deleted_on = Some(on);
        Ok(())
    }

    fn restore(&self, id: ListingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        let row = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        row.deleted_on = None;
        Ok(())
    }

    fn purge(&self, id: ListingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        guard.remove(&id).ok_or(RepositoryError::NotFound)?;
        Ok(())
    }
}

/// An investment listing ready for enrichment: named apartment, original
/// sale price, explicit district code.
pub(super) fn unsold_listing(id: u64, original_price: Option<f64>) -> StoredListing {
    let extended = ExtendedData {
        trade_price: Some(TradePriceInfo {
            apartment_name: Some("아크로힐스논현".to_string()),
            original_price,
            original_price_date: Some(date(2023, 5, 1)),
            ..TradePriceInfo::default()
        }),
        ..ExtendedData::default()
    };

    StoredListing {
        id: ListingId(id),
        title: "아크로힐스논현 줍줍".to_string(),
        kind: ListingKind::ResaleUnsold,
        region: "서울 강남구".to_string(),
        full_address: None,
        builder: None,
        household_count: Some(368),
        exclusive_area: Some(84.97),
        area_range: None,
        contact_number: None,
        district_code: Some("11680".to_string()),
        price_label: "분양가".to_string(),
        price_text: "20억원".to_string(),
        price_min: Some(20.0),
        price_max: Some(20.0),
        deadline: Some(date(2025, 12, 31)),
        announced_on: Some(date(2025, 6, 1)),
        tags: vec!["줍줍".to_string()],
        extended_data: extended.to_document(),
        created_on: date(2025, 6, 1),
        updated_on: date(2025, 6, 1),
        deleted_on: None,
    }
}
