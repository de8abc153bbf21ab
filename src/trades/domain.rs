use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::fmt;

/// One real transaction from the government record set, read-only. Amounts
/// are carried in 억 (the wire format reports 만원).
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub apartment: String,
    pub amount: f64,
    pub dealt_on: NaiveDate,
    pub exclusive_area: Option<f64>,
    pub floor: Option<i32>,
    pub neighborhood: Option<String>,
    pub district_code: String,
}

/// Closed deal-date window queried against the record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DealWindow {
    /// Rolling window ending today.
    pub fn looking_back(today: NaiveDate, months: u32) -> Self {
        let from = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(today);
        Self { from, to: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Calendar months touched by the window, oldest first. The record
    /// source is queried one deal-month at a time.
    pub fn year_months(&self) -> Vec<(i32, u32)> {
        let mut months = Vec::new();
        let (mut year, mut month) = (self.from.year(), self.from.month());

        loop {
            months.push((year, month));
            if (year, month) >= (self.to.year(), self.to.month()) {
                break;
            }
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        months
    }
}

/// How a candidate name relates to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Containment,
    Distance,
}

/// One distinct apartment name from the window, scored against the query
/// and annotated with its latest deal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub apartment: String,
    pub score: f64,
    pub tier: MatchTier,
    pub recent_price: f64,
    pub recent_date: NaiveDate,
    pub deal_count: usize,
    /// Clears the configured confidence threshold; anything else needs
    /// operator confirmation before it may touch a listing.
    pub confident: bool,
}

/// Why a lookup produced nothing usable. Kept for the admin screen; the
/// rendering path only ever sees "no match".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMatchReason {
    NoRecords,
    TimedOut,
    LookupFailed(String),
}

impl fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoMatchReason::NoRecords => write!(f, "no transactions recorded in the window"),
            NoMatchReason::TimedOut => write!(f, "transaction lookup timed out"),
            NoMatchReason::LookupFailed(detail) => {
                write!(f, "transaction lookup failed: {detail}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Found { candidates: Vec<MatchCandidate> },
    NotFound { reason: NoMatchReason },
}

impl MatchOutcome {
    pub fn best(&self) -> Option<&MatchCandidate> {
        match self {
            MatchOutcome::Found { candidates } => candidates.first(),
            MatchOutcome::NotFound { .. } => None,
        }
    }
}
