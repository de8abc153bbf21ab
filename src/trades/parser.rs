use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::domain::{DealWindow, TradeRecord};
use super::source::{TradeLookupError, TradeRecordSource};

/// Reads the nightly CSV export of collected deal records. Rows with broken
/// dates or amounts are dropped; the export mixes hand-fixed rows into the
/// scraped ones and a bad row must not sink the batch.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<TradeRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<TradeRow>() {
        if let Some(record) = row?.into_record() {
            records.push(record);
        }
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct TradeRow {
    sigungu_code: String,
    apt_name: String,
    /// 만원, as the collector stores it.
    deal_amount: String,
    deal_year: i32,
    deal_month: u32,
    deal_day: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    area: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    floor: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dong: Option<String>,
}

impl TradeRow {
    fn into_record(self) -> Option<TradeRecord> {
        let dealt_on = NaiveDate::from_ymd_opt(self.deal_year, self.deal_month, self.deal_day)?;

        let digits: String = self
            .deal_amount
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();
        let amount = digits.parse::<f64>().ok().filter(|v| v.is_finite())? / 10_000.0;

        if self.apt_name.is_empty() {
            return None;
        }

        Some(TradeRecord {
            apartment: self.apt_name,
            amount,
            dealt_on,
            exclusive_area: self.area.and_then(|v| v.parse().ok()),
            floor: self.floor.and_then(|v| v.parse().ok()),
            neighborhood: self.dong,
            district_code: self.sigungu_code,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// A record source backed by a loaded CSV export, for environments without
/// API access and for exercising the match pipeline offline.
pub struct CsvTradeSource {
    records: Vec<TradeRecord>,
}

impl CsvTradeSource {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        Ok(Self {
            records: parse_records(reader)?,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file).map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TradeRecordSource for CsvTradeSource {
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
        "csv-export"
    }
}
