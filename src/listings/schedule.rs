use chrono::NaiveDate;

use super::domain::TimelineStep;

const RANGE_DELIMITER: char = '~';

/// Closed date range covered by a step. Single-date steps collapse to
/// `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A timeline step with its date text resolved. Steps whose date text does
/// not parse keep `period: None` and are skipped by stage and deadline
/// derivation, but the raw text survives for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStep {
    pub title: String,
    pub date_text: String,
    pub details: String,
    pub period: Option<StepPeriod>,
}

impl ParsedStep {
    pub fn is_dated(&self) -> bool {
        self.period.is_some()
    }
}

/// Resolves every authored step, in authored order. Parsing is total: a
/// malformed date never drops the step or fails the listing.
pub fn parse_steps(steps: &[TimelineStep]) -> Vec<ParsedStep> {
    steps
        .iter()
        .map(|step| ParsedStep {
            title: step.title.clone(),
            date_text: step.date_text.clone(),
            details: step.details.clone(),
            period: parse_period(&step.date_text),
        })
        .collect()
}

fn parse_period(raw: &str) -> Option<StepPeriod> {
    let mut parts = raw.splitn(2, RANGE_DELIMITER);
    let start = parts.next().and_then(parse_date);
    let end = parts.next().and_then(parse_date);

    match (start, end) {
        (Some(start), Some(end)) => Some(StepPeriod { start, end }),
        (Some(start), None) => Some(StepPeriod { start, end: start }),
        (None, Some(end)) => Some(StepPeriod { start: end, end }),
        (None, None) => None,
    }
}

/// Admin entries arrive dashed, dotted, or slashed depending on where the
/// announcement text was pasted from.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
