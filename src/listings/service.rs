use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::deadline::deadline_for_save;
use super::domain::{ExtendedData, Listing, ListingId, ListingKind};
use super::price::parse_price_text;
use super::repository::{ListingRepository, RepositoryError, StoredListing};
use super::schedule::parse_steps;
use super::sort::{sort_by_deadline, DeadlineOrder};
use super::views::ListingOverview;

/// Admin-authored fields for a create or update. Price bounds and the
/// persisted deadline are always derived here, never accepted from the form.
#[derive(Debug, Clone)]
pub struct ListingDraft {
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
    pub deadline: Option<NaiveDate>,
    pub announced_on: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub extended: ExtendedData,
}

/// Public-browse filters, matching what the listing tabs expose.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub kind: Option<ListingKind>,
    pub region: Option<String>,
    pub households: Option<HouseholdBand>,
    pub area: Option<AreaBand>,
    pub due_today: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct HouseholdBand {
    pub min: u32,
    /// Exclusive upper bound; open-ended when absent.
    pub max: Option<u32>,
}

impl HouseholdBand {
    fn contains(&self, count: u32) -> bool {
        count >= self.min && self.max.map_or(true, |max| count < max)
    }
}

/// Exclusive-area bands as surfaced in the area filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaBand {
    Small,
    Medium,
    Large,
}

impl AreaBand {
    fn contains(&self, area: f64) -> bool {
        match self {
            AreaBand::Small => area <= 59.0,
            AreaBand::Medium => (60.0..=84.0).contains(&area),
            AreaBand::Large => area >= 85.0,
        }
    }
}

/// Visible-listing counts for the tab header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingStats {
    pub lease_subsidized: usize,
    pub general_sale: usize,
    pub resale_unsold: usize,
    pub due_today: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error("listing draft rejected: {0}")]
    DraftRejected(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ListingId {
    ListingId(LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Service composing the derivation rules with the persistence port.
pub struct ListingService<R> {
    repository: Arc<R>,
}

impl<R> ListingService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Persist a new listing, deriving price bounds and the stored deadline
    /// from the draft text.
    pub fn create(
        &self,
        draft: ListingDraft,
        today: NaiveDate,
    ) -> Result<StoredListing, ListingServiceError> {
        validate_draft(&draft)?;

        let record = derive_record(next_listing_id(), draft, today, today, None);
        let stored = self.repository.insert(record)?;
        tracing::debug!(id = %stored.id, deadline = ?stored.deadline, "listing created");
        Ok(stored)
    }

    /// Re-derive and persist an existing listing. Creation date and any
    /// tombstone survive the update.
    pub fn update(
        &self,
        id: ListingId,
        draft: ListingDraft,
        today: NaiveDate,
    ) -> Result<StoredListing, ListingServiceError> {
        validate_draft(&draft)?;

        let existing = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let record = derive_record(id, draft, today, existing.created_on, existing.deleted_on);
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn get(&self, id: ListingId) -> Result<Listing, ListingServiceError> {
        let stored = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(stored.materialize())
    }

    pub fn overview(
        &self,
        id: ListingId,
        today: NaiveDate,
    ) -> Result<ListingOverview, ListingServiceError> {
        Ok(ListingOverview::build(&self.get(id)?, today))
    }

    /// Public browse: visible listings passing the filters, sorted by the
    /// effective deadline.
    pub fn browse(
        &self,
        query: &ListingQuery,
        order: DeadlineOrder,
        today: NaiveDate,
    ) -> Result<Vec<ListingOverview>, ListingServiceError> {
        let mut overviews: Vec<ListingOverview> = self
            .repository
            .active()?
            .iter()
            .filter(|stored| matches_stored(query, stored))
            .map(|stored| ListingOverview::build(&stored.materialize(), today))
            .filter(|overview| overview.visible)
            .filter(|overview| !query.due_today || overview.badge.days_left == 0)
            .collect();

        sort_by_deadline(&mut overviews, order);
        Ok(overviews)
    }

    pub fn stats(&self, today: NaiveDate) -> Result<ListingStats, ListingServiceError> {
        let mut stats = ListingStats::default();

        for stored in self.repository.active()? {
            let overview = ListingOverview::build(&stored.materialize(), today);
            if !overview.visible {
                continue;
            }

            match overview.kind {
                ListingKind::LeaseSubsidized => stats.lease_subsidized += 1,
                ListingKind::GeneralSale => stats.general_sale += 1,
                ListingKind::ResaleUnsold => stats.resale_unsold += 1,
            }
            if overview.badge.days_left == 0 {
                stats.due_today += 1;
            }
        }

        Ok(stats)
    }

    /// Tombstone a listing; it disappears from public reads but stays
    /// recoverable.
    pub fn remove(&self, id: ListingId, today: NaiveDate) -> Result<(), ListingServiceError> {
        self.repository.mark_deleted(id, today)?;
        tracing::debug!(id = %id, "listing soft-deleted");
        Ok(())
    }

    pub fn restore(&self, id: ListingId) -> Result<(), ListingServiceError> {
        Ok(self.repository.restore(id)?)
    }

    /// Hard delete; only reachable from the explicit purge surface.
    pub fn purge(&self, id: ListingId) -> Result<(), ListingServiceError> {
        Ok(self.repository.purge(id)?)
    }
}

fn validate_draft(draft: &ListingDraft) -> Result<(), ListingServiceError> {
    if draft.title.trim().is_empty() {
        return Err(ListingServiceError::DraftRejected("title must not be empty"));
    }
    if draft.region.trim().is_empty() {
        return Err(ListingServiceError::DraftRejected(
            "region must not be empty",
        ));
    }
    Ok(())
}

fn derive_record(
    id: ListingId,
    draft: ListingDraft,
    today: NaiveDate,
    created_on: NaiveDate,
    deleted_on: Option<NaiveDate>,
) -> StoredListing {
    let bounds = parse_price_text(&draft.price_text);
    let steps = parse_steps(&draft.extended.steps);
    let deadline = deadline_for_save(&steps).or(draft.deadline);

    StoredListing {
        id,
        title: draft.title,
        kind: draft.kind,
        region: draft.region,
        full_address: draft.full_address,
        builder: draft.builder,
        household_count: draft.household_count,
        exclusive_area: draft.exclusive_area,
        area_range: draft.area_range,
        contact_number: draft.contact_number,
        district_code: draft.district_code,
        price_label: draft.price_label,
        price_text: draft.price_text,
        price_min: bounds.map(|b| b.min),
        price_max: bounds.map(|b| b.max),
        deadline,
        announced_on: draft.announced_on,
        tags: draft.tags,
        extended_data: draft.extended.to_document(),
        created_on,
        updated_on: today,
        deleted_on,
    }
}

fn matches_stored(query: &ListingQuery, stored: &StoredListing) -> bool {
    if let Some(kind) = query.kind {
        if stored.kind != kind {
            return false;
        }
    }

    if let Some(region) = &query.region {
        if &stored.region != region {
            return false;
        }
    }

    if let Some(band) = query.households {
        match stored.household_count {
            Some(count) if band.contains(count) => {}
            _ => return false,
        }
    }

    if let Some(band) = query.area {
        match stored.exclusive_area {
            Some(area) if band.contains(area) => {}
            _ => return false,
        }
    }

    true
}
