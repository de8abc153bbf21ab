use serde::Serialize;

/// Signed premium of a recent trade over the original sale price, in the
/// same 억 unit. A discount is a perfectly displayable outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TradeMargin {
    pub amount: f64,
    pub rate_percent: f64,
}

impl TradeMargin {
    /// Card label, e.g. `+4.8억 (+24.0%)` or `-0.6억 (-3.2%)`.
    pub fn label(&self) -> String {
        let sign = if self.amount >= 0.0 { "+" } else { "" };
        format!(
            "{sign}{:.1}억 ({sign}{:.1}%)",
            self.amount, self.rate_percent
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarginError {
    #[error("original sale price missing")]
    MissingOriginalPrice,
    #[error("original sale price must be a positive amount, got {0}")]
    NonPositiveOriginalPrice(f64),
    #[error("recent trade price is not a usable amount")]
    InvalidRecentPrice,
}

/// Total over its inputs: a zero, negative, or non-finite original price is
/// rejected up front so no caller ever sees NaN or an infinite rate.
pub fn margin(original_price: f64, recent_price: f64) -> Result<TradeMargin, MarginError> {
    if !original_price.is_finite() || original_price <= 0.0 {
        return Err(MarginError::NonPositiveOriginalPrice(original_price));
    }
    if !recent_price.is_finite() {
        return Err(MarginError::InvalidRecentPrice);
    }

    let amount = recent_price - original_price;
    Ok(TradeMargin {
        amount,
        rate_percent: amount / original_price * 100.0,
    })
}

/// Variant for the enrichment path, where the original price is an optional
/// admin-entered field.
pub fn margin_against(
    original_price: Option<f64>,
    recent_price: f64,
) -> Result<TradeMargin, MarginError> {
    match original_price {
        Some(original) => margin(original, recent_price),
        None => Err(MarginError::MissingOriginalPrice),
    }
}
