use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

use crate::config::TradeLookupConfig;

use super::domain::{DealWindow, TradeRecord};
use super::source::{TradeLookupError, TradeRecordSource};

/// Client for the national apartment-trade open API. Responses are flat XML
/// with one `<item>` per deal; amounts arrive as comma-grouped 만원.
pub struct RtmsClient {
    http: Client,
    endpoint: String,
    service_key: String,
}

impl RtmsClient {
    pub fn from_config(config: &TradeLookupConfig) -> Result<Self, TradeLookupError> {
        let service_key = config
            .service_key
            .clone()
            .ok_or(TradeLookupError::NotConfigured("MOLIT_API_KEY is not set"))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| TradeLookupError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            service_key,
        })
    }

    async fn fetch_month(
        &self,
        district_code: &str,
        year: i32,
        month: u32,
    ) -> Result<String, TradeLookupError> {
        let url = format!(
            "{}?serviceKey={}&LAWD_CD={}&DEAL_YMD={year}{month:02}&numOfRows=1000",
            self.endpoint, self.service_key, district_code
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| TradeLookupError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TradeLookupError::Transport(format!(
                "status {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|err| TradeLookupError::Transport(err.to_string()))
    }
}

#[async_trait]
impl TradeRecordSource for RtmsClient {
    async fn records_in(
        &self,
        district_code: &str,
        window: &DealWindow,
    ) -> Result<Vec<TradeRecord>, TradeLookupError> {
        let mut records = Vec::new();

        for (year, month) in window.year_months() {
            let payload = self.fetch_month(district_code, year, month).await?;
            let month_records = parse_month_payload(&payload, district_code)?;
            tracing::debug!(
                district = district_code,
                year,
                month,
                count = month_records.len(),
                "deal month fetched"
            );
            records.extend(
                month_records
                    .into_iter()
                    .filter(|record| window.contains(record.dealt_on)),
            );
        }

        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "rtms-open-api"
    }
}

/// Extracts the deal records from one month's payload. Individual items
/// with broken fields are dropped; a service-level error body fails the
/// whole month.
pub(crate) fn parse_month_payload(
    payload: &str,
    district_code: &str,
) -> Result<Vec<TradeRecord>, TradeLookupError> {
    if payload.contains("<errMsg>") || payload.contains("SERVICE_KEY") {
        let detail = tag_value(payload, "returnAuthMsg")
            .or_else(|| tag_value(payload, "errMsg"))
            .unwrap_or_else(|| "service error".to_string());
        return Err(TradeLookupError::Malformed(detail));
    }

    let mut records = Vec::new();
    let mut rest = payload;

    while let Some(start) = rest.find("<item>") {
        let after = &rest[start + "<item>".len()..];
        let Some(end) = after.find("</item>") else {
            break;
        };
        let item = &after[..end];
        rest = &after[end + "</item>".len()..];

        if let Some(record) = parse_item(item, district_code) {
            records.push(record);
        }
    }

    Ok(records)
}

fn parse_item(item: &str, district_code: &str) -> Option<TradeRecord> {
    let apartment = tag_value(item, "아파트")?;
    let amount = parse_amount(&tag_value(item, "거래금액")?)?;

    let year = tag_value(item, "년")?.parse::<i32>().ok()?;
    let month = tag_value(item, "월")?.parse::<u32>().ok()?;
    let day = tag_value(item, "일")?.parse::<u32>().ok()?;
    let dealt_on = NaiveDate::from_ymd_opt(year, month, day)?;

    Some(TradeRecord {
        apartment,
        amount,
        dealt_on,
        exclusive_area: tag_value(item, "전용면적").and_then(|v| v.parse().ok()),
        floor: tag_value(item, "층").and_then(|v| v.parse().ok()),
        neighborhood: tag_value(item, "법정동"),
        district_code: district_code.to_string(),
    })
}

/// Comma-grouped 만원 → 억.
fn parse_amount(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    let value = digits.parse::<f64>().ok()?;
    if value.is_finite() {
        Some(value / 10_000.0)
    } else {
        None
    }
}

/// Reads `<tag>value</tag>`, tolerating the CDATA wrapper some deployments
/// emit.
fn tag_value(source: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let start = source.find(&open)? + open.len();
    let end = source[start..].find(&close)? + start;

    let raw = source[start..end].trim();
    let unwrapped = raw
        .strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .unwrap_or(raw);

    let value = unwrapped.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
