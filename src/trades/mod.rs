pub mod client;
pub mod district;
pub mod domain;
pub mod enrichment;
pub mod margin;
pub mod matcher;
mod normalizer;
pub mod parser;
pub mod source;

#[cfg(test)]
mod tests;

pub use client::RtmsClient;
pub use district::district_code_for;
pub use domain::{
    DealWindow, MatchCandidate, MatchOutcome, MatchTier, NoMatchReason, TradeRecord,
};
pub use enrichment::{EnrichmentReport, TradeInsightService};
pub use margin::{margin, margin_against, MarginError, TradeMargin};
pub use matcher::TradeMatcher;
pub use normalizer::clean_apartment_name;
pub use parser::CsvTradeSource;
pub use source::{records_with_timeout, TradeLookupError, TradeRecordSource};
