use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::listings::domain::{ExtendedData, ListingId, ListingKind, TimelineStep};
use crate::listings::repository::{ListingRepository, RepositoryError, StoredListing};
use crate::listings::service::{ListingDraft, ListingService};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn step(title: &str, date_text: &str) -> TimelineStep {
    TimelineStep {
        title: title.to_string(),
        date_text: date_text.to_string(),
        details: String::new(),
    }
}

/// A general-sale listing mid-application, the shape most admin saves take.
pub(super) fn sale_draft() -> ListingDraft {
    ListingDraft {
        title: "화성 비봉지구 B-2블록 호반써밋".to_string(),
        kind: ListingKind::GeneralSale,
        region: "경기 화성시".to_string(),
        full_address: Some("경기도 화성시 비봉면".to_string()),
        builder: Some("호반건설".to_string()),
        household_count: Some(988),
        exclusive_area: Some(84.0),
        area_range: Some("59㎡~84㎡".to_string()),
        contact_number: Some("1800-0000".to_string()),
        district_code: Some("41590".to_string()),
        price_label: "분양가".to_string(),
        price_text: "2억 6,127만원 ~ 2억 7,795만원".to_string(),
        deadline: None,
        announced_on: Some(date(2025, 1, 2)),
        tags: vec!["신규분양".to_string()],
        extended: ExtendedData {
            audience: vec!["무주택 세대주".to_string()],
            steps: vec![
                step("모집공고", "2025-01-10"),
                step("청약접수", "2025-01-20~2025-01-22"),
                step("당첨자 발표", "2025-02-01"),
            ],
            ..ExtendedData::default()
        },
    }
}

pub(super) fn draft_named(title: &str, kind: ListingKind, region: &str) -> ListingDraft {
    ListingDraft {
        title: title.to_string(),
        kind,
        region: region.to_string(),
        ..sale_draft()
    }
}

pub(super) fn build_service() -> (ListingService<MemoryListings>, Arc<MemoryListings>) {
    let repository = Arc::new(MemoryListings::default());
    let service = ListingService::new(repository.clone());
    (service, repository)
}

#[derive(Default)]
pub(super) struct MemoryListings {
    pub(super) records: Mutex<HashMap<ListingId, StoredListing>>,
}

impl ListingRepository for MemoryListings {
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
        let mut records: Vec<StoredListing> = guard
            .values()
            .filter(|record| !record.is_deleted())
            .cloned()
            .collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    fn mark_deleted(&self, id: ListingId, on: NaiveDate) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        let record = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        record.deleted_on = Some(on);
        Ok(())
    }

    fn restore(&self, id: ListingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        let record = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        record.deleted_on = None;
        Ok(())
    }

    fn purge(&self, id: ListingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        guard.remove(&id).ok_or(RepositoryError::NotFound)?;
        Ok(())
    }
}

pub(super) struct UnavailableListings;

impl ListingRepository for UnavailableListings {
    fn insert(&self, _record: StoredListing) -> Result<StoredListing, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: StoredListing) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: ListingId) -> Result<Option<StoredListing>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active(&self) -> Result<Vec<StoredListing>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn mark_deleted(&self, _id: ListingId, _on: NaiveDate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn restore(&self, _id: ListingId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn purge(&self, _id: ListingId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
