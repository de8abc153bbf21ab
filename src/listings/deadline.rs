use chrono::NaiveDate;

use super::schedule::ParsedStep;
use super::stage::current_stage;

/// Step titles signalling the application window. Titles are free text, so a
/// keyword scan is the only signal for which step carries the actionable
/// deadline; English spellings cover admin builds that used Latin labels.
const APPLICATION_KEYWORDS: [&str; 6] = [
    "청약",
    "접수",
    "신청",
    "application",
    "apply",
    "receipt",
];

/// The one date used for sorting, D-day badges, and expiry.
///
/// Priority: the current stage's end date, then the stored deadline, then
/// the announcement date, then today itself.
pub fn effective_deadline(
    steps: &[ParsedStep],
    stored_deadline: Option<NaiveDate>,
    announced_on: Option<NaiveDate>,
    today: NaiveDate,
) -> NaiveDate {
    current_stage(steps, today)
        .and_then(|step| step.period.map(|period| period.end))
        .or(stored_deadline)
        .or(announced_on)
        .unwrap_or(today)
}

/// The deadline persisted on admin save.
///
/// The true actionable deadline is the close of the application window, not
/// a later ceremonial milestone such as the winner announcement, so the
/// first keyword-titled step in authored order wins. Listings whose steps
/// never mention an application fall back to the chronologically last step;
/// with no dated steps at all there is nothing to persist.
pub fn deadline_for_save(steps: &[ParsedStep]) -> Option<NaiveDate> {
    for step in steps {
        if let Some(period) = step.period {
            if title_names_application(&step.title) {
                return Some(period.end);
            }
        }
    }

    steps
        .iter()
        .filter_map(|step| step.period.map(|period| period.end))
        .max()
}

fn title_names_application(title: &str) -> bool {
    let lowered = title.to_lowercase();
    APPLICATION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
