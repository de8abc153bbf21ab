use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// A listing stays publicly visible through the day after its effective
/// deadline, then ages out. Evaluated on every read; there is no stored
/// expiry flag and no background sweep.
pub fn is_visible(effective_deadline: NaiveDate, today: NaiveDate) -> bool {
    today <= effective_deadline + Duration::days(1)
}

/// Urgency badge rendered next to the deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DdayBadge {
    pub days_left: i64,
    pub label: String,
    pub urgent: bool,
}

pub fn dday_badge(effective_deadline: NaiveDate, today: NaiveDate) -> DdayBadge {
    let days_left = (effective_deadline - today).num_days();

    let (label, urgent) = if days_left < 0 {
        ("마감".to_string(), false)
    } else if days_left == 0 {
        ("오늘 마감".to_string(), true)
    } else {
        (format!("D-{days_left}"), days_left <= 3)
    };

    DdayBadge {
        days_left,
        label,
        urgent,
    }
}
