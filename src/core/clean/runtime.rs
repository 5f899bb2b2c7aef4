use once_cell::sync::Lazy;
use regex::Regex;

static HOURS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)h").unwrap());
static MINUTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)m").unwrap());

/// Parse a free-text runtime into minutes. Accepted shapes, in this
/// precedence order: "2h 15m" (either part optional), "1:45", "95 min"
/// or bare digits. `None`/"Unknown" and anything else is unparsable.
///
/// A bare "45m" with no hour part is unparsable: the hours/minutes
/// branch is only entered when the text contains an 'h'. Kept as-is,
/// absent values get imputed downstream anyway.
pub fn parse_runtime(raw: Option<&str>) -> Option<u64> {
    let raw = raw?;
    if raw == "Unknown" {
        return None;
    }

    let s = raw.to_lowercase().trim().to_string();

    if s.contains('h') {
        let hours = HOURS_RE
            .captures(&s)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0);
        let minutes = MINUTES_RE
            .captures(&s)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0);
        return Some(hours * 60 + minutes);
    }

    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 2 && is_all_digits(parts[0]) && is_all_digits(parts[1]) {
            let h: u64 = parts[0].parse().ok()?;
            let m: u64 = parts[1].parse().ok()?;
            return Some(h * 60 + m);
        }
        return None;
    }

    let bare = s.replace("min", "");
    let bare = bare.trim();
    if is_all_digits(bare) {
        return bare.parse().ok();
    }

    None
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
