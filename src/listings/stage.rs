use chrono::NaiveDate;

use super::schedule::ParsedStep;

/// Picks the step a reader should be looking at today: the first authored
/// step that has not started yet (or starts today), falling back to the last
/// dated step once everything is in the past.
///
/// Steps are scanned in authored order; admins do not reliably enter them
/// date-sorted, and the authored order is the order the announcement lists.
pub fn current_stage<'a>(steps: &'a [ParsedStep], today: NaiveDate) -> Option<&'a ParsedStep> {
    let mut last_dated = None;

    for step in steps {
        if let Some(period) = step.period {
            if period.start >= today {
                return Some(step);
            }
            last_dated = Some(step);
        }
    }

    last_dated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::TimelineStep;
    use crate::listings::schedule::parse_steps;

    fn steps(entries: &[(&str, &str)]) -> Vec<ParsedStep> {
        let raw: Vec<TimelineStep> = entries
            .iter()
            .map(|(title, date_text)| TimelineStep {
                title: title.to_string(),
                date_text: date_text.to_string(),
                details: String::new(),
            })
            .collect();
        parse_steps(&raw)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn picks_first_step_starting_today_or_later() {
        let parsed = steps(&[
            ("모집공고", "2025-01-10"),
            ("청약접수", "2025-01-20~2025-01-22"),
            ("당첨자 발표", "2025-02-01"),
        ]);

        let stage = current_stage(&parsed, date(2025, 1, 15)).expect("stage resolved");
        assert_eq!(stage.title, "청약접수");
    }

    #[test]
    fn falls_back_to_last_dated_step_when_all_past() {
        let parsed = steps(&[
            ("모집공고", "2025-01-10"),
            ("청약접수", "2025-01-20~2025-01-22"),
            ("당첨자 발표", "2025-02-01"),
        ]);

        let stage = current_stage(&parsed, date(2025, 2, 10)).expect("stage resolved");
        assert_eq!(stage.title, "당첨자 발표");
    }

    #[test]
    fn ignores_undated_steps_but_keeps_scanning() {
        let parsed = steps(&[
            ("사전안내", "미정"),
            ("청약접수", "2025-01-20"),
            ("입주", "추후 공지"),
        ]);

        let stage = current_stage(&parsed, date(2025, 1, 1)).expect("stage resolved");
        assert_eq!(stage.title, "청약접수");
    }

    #[test]
    fn returns_none_without_any_dated_step() {
        let parsed = steps(&[("사전안내", "미정"), ("입주", "")]);
        assert!(current_stage(&parsed, date(2025, 1, 1)).is_none());
    }

    #[test]
    fn does_not_assume_steps_are_date_sorted() {
        // Announcement listed after the application window it precedes.
        let parsed = steps(&[
            ("청약접수", "2025-01-20~2025-01-22"),
            ("모집공고", "2025-01-10"),
        ]);

        let stage = current_stage(&parsed, date(2025, 1, 5)).expect("stage resolved");
        assert_eq!(stage.title, "청약접수");
    }

    #[test]
    fn step_starting_today_still_counts_as_current() {
        let parsed = steps(&[("청약접수", "2025-01-20~2025-01-22")]);
        let stage = current_stage(&parsed, date(2025, 1, 20)).expect("stage resolved");
        assert_eq!(stage.title, "청약접수");
    }
}
