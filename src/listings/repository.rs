use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{ExtendedData, Listing, ListingId, ListingKind, PriceBounds};

/// Row shape handed to the persistence collaborator. The extended-data
/// document travels opaque; `materialize` is the single place it becomes
/// typed and defaults get filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredListing {
    pub id: ListingId,
    pub title: String,
    pub kind: ListingKind,
    pub region: String,
    pub full_address: Option<String>,
    pub builder: Option<String>,
    pub household_count: Option<u32>,
    pub exclusive_area: Option<f64>,
    pub area_range: Option<String>,
    pub contact_number: Option<String>,
    pub district_code: Option<String>,
    pub price_label: String,
    pub price_text: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub announced_on: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub extended_data: String,
    pub created_on: NaiveDate,
    pub updated_on: NaiveDate,
    pub deleted_on: Option<NaiveDate>,
}

impl StoredListing {
    pub fn is_deleted(&self) -> bool {
        self.deleted_on.is_some()
    }

    pub fn materialize(&self) -> Listing {
        let price_bounds = match (self.price_min, self.price_max) {
            (Some(min), Some(max)) => Some(PriceBounds { min, max }),
            _ => None,
        };

        Listing {
            id: self.id,
            title: self.title.clone(),
            kind: self.kind,
            region: self.region.clone(),
            full_address: self.full_address.clone(),
            builder: self.builder.clone(),
            household_count: self.household_count,
            exclusive_area: self.exclusive_area,
            area_range: self.area_range.clone(),
            contact_number: self.contact_number.clone(),
            district_code: self.district_code.clone(),
            price_label: self.price_label.clone(),
            price_text: self.price_text.clone(),
            price_bounds,
            deadline: self.deadline,
            announced_on: self.announced_on,
            tags: self.tags.clone(),
            extended: ExtendedData::from_document(&self.extended_data),
            deleted_on: self.deleted_on,
        }
    }
}

/// Storage abstraction so the service layer can be exercised in isolation.
/// `active` excludes tombstoned rows; `purge` is the only hard delete.
pub trait ListingRepository: Send + Sync {
    fn insert(&self, record: StoredListing) -> Result<StoredListing, RepositoryError>;
    fn update(&self, record: StoredListing) -> Result<(), RepositoryError>;
    fn fetch(&self, id: ListingId) -> Result<Option<StoredListing>, RepositoryError>;
    fn active(&self) -> Result<Vec<StoredListing>, RepositoryError>;
    fn mark_deleted(&self, id: ListingId, on: NaiveDate) -> Result<(), RepositoryError>;
    fn restore(&self, id: ListingId) -> Result<(), RepositoryError>;
    fn purge(&self, id: ListingId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
