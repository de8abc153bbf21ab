use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned when a listing is first persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingId(pub u64);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listing-{:06}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    LeaseSubsidized,
    GeneralSale,
    ResaleUnsold,
}

impl ListingKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::LeaseSubsidized, Self::GeneralSale, Self::ResaleUnsold]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LeaseSubsidized => "임대",
            Self::GeneralSale => "일반분양",
            Self::ResaleUnsold => "줍줍분양",
        }
    }
}

/// Numeric price bounds in 억 (1억 = 10,000만), derived from the raw price
/// text and never written directly by an operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl PriceBounds {
    pub fn single(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn is_range(&self) -> bool {
        (self.max - self.min).abs() > f64::EPSILON
    }
}

/// One stage of the application process as authored by an admin. The date
/// text holds either a single date or a `start~end` range and may well be
/// neither; undated steps still render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineStep {
    pub title: String,
    pub date_text: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyRow {
    pub house_type: String,
    pub exclusive_area: String,
    pub households: Option<u32>,
    pub price_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSection {
    pub heading: String,
    pub lines: Vec<String>,
}

/// Trade-price block carried by investment-grade listings. The recent price
/// and margin fields are filled by the enrichment pipeline; the original sale
/// price and apartment name come from the admin form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradePriceInfo {
    pub apartment_name: Option<String>,
    pub original_price: Option<f64>,
    pub original_price_date: Option<NaiveDate>,
    pub recent_price: Option<f64>,
    pub recent_trade_date: Option<NaiveDate>,
    pub margin: Option<f64>,
    pub margin_rate: Option<f64>,
}

/// The semi-structured document persisted alongside a listing's columns.
///
/// Every field defaults, so documents written by older admin builds (or by
/// hand) materialize without per-consumer fixups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedData {
    pub audience: Vec<String>,
    pub steps: Vec<TimelineStep>,
    pub supply_rows: Vec<SupplyRow>,
    pub sections: Vec<DetailSection>,
    pub trade_price: Option<TradePriceInfo>,
}

impl ExtendedData {
    /// Materializes the stored document. Malformed or missing content
    /// degrades to the empty document rather than failing the read.
    pub fn from_document(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }

        match serde_json::from_str(raw) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(error = %err, "unreadable extended-data document, using defaults");
                Self::default()
            }
        }
    }

    pub fn to_document(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A listing materialized for consumers: stored columns plus the typed
/// extended-data document.
#[derive(Debug, Clone)]
pub struct Listing {
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
    pub price_bounds: Option<PriceBounds>,
    pub deadline: Option<NaiveDate>,
    pub announced_on: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub extended: ExtendedData,
    pub deleted_on: Option<NaiveDate>,
}
