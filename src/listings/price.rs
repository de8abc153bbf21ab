use super::domain::PriceBounds;

/// 1억 = 10,000만원; bounds are carried in 억 at 만원 precision.
const SUB_UNITS_PER_LARGE: f64 = 10_000.0;

/// Parses free-form price text into numeric bounds.
///
/// Amounts come as compound `N억 M만원` values, bare `N억` values, or bare
/// `M만원` values; one amount fixes both bounds, two amounts separated by
/// anything form a range. Text with no recognizable amount yields no bounds
/// and the raw string stays display-only. Never panics, whatever the input.
pub fn parse_price_text(raw: &str) -> Option<PriceBounds> {
    let amounts = scan_amounts(raw);
    let first = *amounts.first()?;
    let second = amounts.get(1).copied().unwrap_or(first);

    Some(PriceBounds {
        min: first.min(second),
        max: first.max(second),
    })
}

fn scan_amounts(raw: &str) -> Vec<f64> {
    let chars: Vec<char> = raw.chars().collect();
    let mut amounts = Vec::new();
    // A large-unit amount stays open until we know whether a sub-unit
    // amount follows it ("2억 6,127만원") or not ("3.5억원 ~ ...").
    let mut open_large: Option<f64> = None;
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        let mut seen_dot = false;
        while i < chars.len() {
            let c = chars[i];
            if c.is_ascii_digit() || c == ',' {
                i += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                i += 1;
            } else {
                break;
            }
        }

        // A trailing separator belongs to the surrounding prose.
        let mut end = i;
        while end > start && matches!(chars[end - 1], '.' | ',') {
            end -= 1;
        }

        let digits: String = chars[start..end].iter().filter(|c| **c != ',').collect();
        let value = match digits.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => continue,
        };

        let mut unit_at = i;
        while unit_at < chars.len() && chars[unit_at].is_whitespace() {
            unit_at += 1;
        }

        match chars.get(unit_at) {
            Some('억') => {
                if let Some(large) = open_large.take() {
                    amounts.push(large);
                }
                open_large = Some(value);
                i = unit_at + 1;
            }
            Some('만') => {
                let large = open_large.take().unwrap_or(0.0);
                amounts.push(large + value / SUB_UNITS_PER_LARGE);
                i = unit_at + 1;
            }
            // A unit-less number is area, household count, or prose.
            _ => {}
        }
    }

    if let Some(large) = open_large {
        amounts.push(large);
    }

    amounts
}

/// Renders a single amount back into the admin's notation, rounded to the
/// nearest 만원.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0원".to_string();
    }

    let total_sub = (value * SUB_UNITS_PER_LARGE).round() as i64;
    let large = total_sub / 10_000;
    let sub = total_sub % 10_000;

    match (large, sub) {
        (0, 0) => "0원".to_string(),
        (0, sub) => format!("{}만원", group_thousands(sub as u64)),
        (large, 0) => format!("{large}억원"),
        (large, sub) => format!("{large}억 {}만원", group_thousands(sub as u64)),
    }
}

pub fn format_bounds(bounds: &PriceBounds) -> String {
    if bounds.is_range() {
        format!(
            "{} ~ {}",
            format_amount(bounds.min),
            format_amount(bounds.max)
        )
    } else {
        format_amount(bounds.min)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}
