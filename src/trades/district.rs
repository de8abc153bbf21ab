/// Region-name fragments mapped to the official district codes the record
/// source is keyed by. Specific fragments come before their umbrella
/// region; scan order decides.
const DISTRICT_CODES: [(&str, &str); 14] = [
    ("강남구", "11680"),
    ("서초구", "11650"),
    ("송파구", "11710"),
    ("광산구", "29200"),
    ("김제", "45210"),
    ("평택", "41220"),
    ("화성", "41590"),
    ("시흥", "41390"),
    ("수원", "41110"),
    ("성남", "41130"),
    ("용인", "41460"),
    ("세종", "36110"),
    ("광주광역시", "29200"),
    ("광주", "41610"),
];

/// Best-effort code for a free-text region like "경기 화성시". Listings in
/// districts outside the table need an explicit admin-entered code.
pub fn district_code_for(region: &str) -> Option<&'static str> {
    DISTRICT_CODES
        .iter()
        .find(|(fragment, _)| region.contains(fragment))
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_regions_in_any_phrasing() {
        assert_eq!(district_code_for("경기 화성시"), Some("41590"));
        assert_eq!(district_code_for("경기도 화성시 비봉면"), Some("41590"));
        assert_eq!(district_code_for("서울특별시 강남구"), Some("11680"));
        assert_eq!(district_code_for("세종특별자치시"), Some("36110"));
    }

    #[test]
    fn metropolitan_gwangju_wins_over_gyeonggi_gwangju_only_when_spelled_out() {
        assert_eq!(district_code_for("광주광역시 광산구"), Some("29200"));
        assert_eq!(district_code_for("경기도 광주시"), Some("41610"));
    }

    #[test]
    fn unknown_regions_resolve_to_nothing() {
        assert_eq!(district_code_for("제주 서귀포시"), None);
        assert_eq!(district_code_for(""), None);
    }
}
