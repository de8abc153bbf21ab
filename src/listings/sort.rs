use serde::Deserialize;

use super::views::ListingOverview;

/// Both orders read the derived effective deadline, never the stored
/// column, so sorting can never disagree with the badges on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineOrder {
    SoonestFirst,
    LatestFirst,
}

/// Stable: listings with equal deadlines keep their incoming order.
pub fn sort_by_deadline(overviews: &mut [ListingOverview], order: DeadlineOrder) {
    match order {
        DeadlineOrder::SoonestFirst => {
            overviews.sort_by(|a, b| a.effective_deadline.cmp(&b.effective_deadline));
        }
        DeadlineOrder::LatestFirst => {
            overviews.sort_by(|a, b| b.effective_deadline.cmp(&a.effective_deadline));
        }
    }
}
