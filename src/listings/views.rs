use chrono::NaiveDate;
use serde::Serialize;

use super::deadline::effective_deadline;
use super::domain::{Listing, ListingId, ListingKind, PriceBounds};
use super::price::format_bounds;
use super::schedule::parse_steps;
use super::stage::current_stage;
use super::visibility::{dday_badge, is_visible, DdayBadge};

/// The stage highlighted on cards and detail pages. The date display is the
/// authored text so undated steps render exactly as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageView {
    pub title: String,
    pub date_display: String,
    pub details: String,
}

/// Everything a listing card needs, computed once per listing for "today"
/// and handed to every consumer so card, badge, and sort order can never
/// disagree about the deadline.
#[derive(Debug, Clone, Serialize)]
pub struct ListingOverview {
    pub id: ListingId,
    pub title: String,
    pub kind: ListingKind,
    pub kind_label: &'static str,
    pub region: String,
    pub current_stage: Option<StageView>,
    pub effective_deadline: NaiveDate,
    pub badge: DdayBadge,
    pub visible: bool,
    pub price_label: String,
    pub price_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bounds: Option<PriceBounds>,
    pub tags: Vec<String>,
}

impl ListingOverview {
    pub fn build(listing: &Listing, today: NaiveDate) -> Self {
        let steps = parse_steps(&listing.extended.steps);
        let stage = current_stage(&steps, today);
        let deadline = effective_deadline(&steps, listing.deadline, listing.announced_on, today);

        let price_display = match &listing.price_bounds {
            Some(bounds) => format_bounds(bounds),
            None => listing.price_text.clone(),
        };

        Self {
            id: listing.id,
            title: listing.title.clone(),
            kind: listing.kind,
            kind_label: listing.kind.label(),
            region: listing.region.clone(),
            current_stage: stage.map(|step| StageView {
                title: step.title.clone(),
                date_display: step.date_text.clone(),
                details: step.details.clone(),
            }),
            effective_deadline: deadline,
            badge: dday_badge(deadline, today),
            visible: is_visible(deadline, today),
            price_label: listing.price_label.clone(),
            price_display,
            price_bounds: listing.price_bounds,
            tags: listing.tags.clone(),
        }
    }
}
