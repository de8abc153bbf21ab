pub mod deadline;
pub mod domain;
pub mod price;
pub mod repository;
pub mod schedule;
pub mod service;
pub mod sort;
pub mod stage;
pub mod views;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use domain::{
    DetailSection, ExtendedData, Listing, ListingId, ListingKind, PriceBounds, SupplyRow,
    TimelineStep, TradePriceInfo,
};
pub use repository::{ListingRepository, RepositoryError, StoredListing};
pub use schedule::{ParsedStep, StepPeriod};
pub use service::{
    AreaBand, HouseholdBand, ListingDraft, ListingQuery, ListingService, ListingServiceError,
    ListingStats,
};
pub use sort::DeadlineOrder;
pub use views::{ListingOverview, StageView};
pub use visibility::DdayBadge;
