/// Canonical form used for name comparison: invisible characters dropped,
/// whitespace collapsed away, Latin letters lowercased. Record names and
/// listing names disagree freely on spacing.
pub(crate) fn normalize_name(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\u{feff}' | '\u{200b}'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Extracts the matchable apartment name from a listing title: drop
/// parenthesized and bracketed qualifiers, then keep the leading token.
/// Titles append block numbers and marketing copy the record set never
/// carries.
pub fn clean_apartment_name(title: &str) -> String {
    let mut cleaned = String::with_capacity(title.len());
    let mut depth_paren = 0u32;
    let mut depth_bracket = 0u32;

    for c in title.chars() {
        match c {
            '(' => depth_paren += 1,
            ')' => depth_paren = depth_paren.saturating_sub(1),
            '[' => depth_bracket += 1,
            ']' => depth_bracket = depth_bracket.saturating_sub(1),
            _ if depth_paren == 0 && depth_bracket == 0 => cleaned.push(c),
            _ => {}
        }
    }

    cleaned
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
