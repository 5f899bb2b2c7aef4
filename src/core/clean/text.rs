/// Strip decorative characters from a raw page text: surrounding
/// whitespace, embedded newlines, commas, parentheses, then any
/// leading hyphens. Used on vote-count texts like "(12,345 votes)".
pub fn clean_text(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\n' | ',' | '(' | ')'))
        .collect();
    cleaned.trim_start_matches('-').to_string()
}

/// Drop a "14. " style rank prefix: everything up to and including the
/// first ". " goes, otherwise the text is returned unchanged.
pub fn extract_title(raw: &str) -> &str {
    match raw.split_once(". ") {
        Some((_, rest)) => rest,
        None => raw,
    }
}

/// Vote counts: keep decimal digits only, then parse. An empty
/// remainder is unparsable.
pub fn parse_votes(raw: Option<&str>) -> Option<u64> {
    let digits: String = raw?.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Ratings: plain decimal parse, rounded to one fractional digit.
pub fn parse_rating(raw: Option<&str>) -> Option<f64> {
    let v: f64 = raw?.trim().parse().ok()?;
    Some(round1(v))
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_decoration() {
        assert_eq!(clean_text("(12,345 votes)"), "12345 votes");
        assert_eq!(clean_text("  -1,234\n  "), "1234");
    }

    #[test]
    fn title_rank_prefix() {
        assert_eq!(extract_title("14. Oppenheimer"), "Oppenheimer");
        assert_eq!(extract_title("Dune"), "Dune");
        // only the first ". " delimits the rank
        assert_eq!(extract_title("1. Dr. Strangelove"), "Dr. Strangelove");
    }

    #[test]
    fn votes_digit_reduction() {
        assert_eq!(parse_votes(Some("(12,345 votes)")), Some(12345));
        assert_eq!(parse_votes(Some("12345")), Some(12345));
        assert_eq!(parse_votes(Some("votes")), None);
        assert_eq!(parse_votes(None), None);
    }

    #[test]
    fn rating_coercion() {
        assert_eq!(parse_rating(Some("7.26")), Some(7.3));
        assert_eq!(parse_rating(Some("8")), Some(8.0));
        assert_eq!(parse_rating(Some("N/A")), None);
        assert_eq!(parse_rating(None), None);
    }
}
