#![forbid(unsafe_code)]

//! Pure helpers for the page scanner.
//!
//! Everything that interprets attribute strings lives here, off the wasm
//! boundary, so the parsing contract is natively testable. Malformed markup
//! always degrades to a defined default; the scanner never fails.

/// Parse a question counter (`data-current-question`,
/// `data-total-questions`). Malformed or absent values default to zero,
/// which downstream never treats as a final question.
#[must_use]
pub fn parse_counter(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Parse `data-total-time` in seconds. Defaults to 60, matching the page
/// contract for timers that do not declare a total.
#[must_use]
pub fn parse_total_time(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|t| *t > 0)
        .unwrap_or(60)
}

/// Parse the displayed remaining time from the timer element's text.
///
/// Leading integer digits are accepted even with trailing units ("42s"),
/// mirroring how the page's integer readback behaves. `None` means the
/// display is unreadable and the tick should be skipped.
#[must_use]
pub fn parse_time_left(text: Option<&str>) -> Option<i64> {
    let trimmed = text?.trim_start();
    let digits: &str = {
        let end = trimmed
            .char_indices()
            .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
            .map(|(i, c)| i + c.len_utf8())
            .last()?;
        &trimmed[..end]
    };
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counters_default_to_zero() {
        assert_eq!(parse_counter(None), 0);
        assert_eq!(parse_counter(Some("")), 0);
        assert_eq!(parse_counter(Some("abc")), 0);
        assert_eq!(parse_counter(Some("5")), 5);
        assert_eq!(parse_counter(Some(" 12 ")), 12);
    }

    #[test]
    fn total_time_defaults_to_sixty() {
        assert_eq!(parse_total_time(None), 60);
        assert_eq!(parse_total_time(Some("0")), 60);
        assert_eq!(parse_total_time(Some("nope")), 60);
        assert_eq!(parse_total_time(Some("90")), 90);
    }

    #[test]
    fn time_left_accepts_leading_digits() {
        assert_eq!(parse_time_left(Some("42")), Some(42));
        assert_eq!(parse_time_left(Some("  42s")), Some(42));
        assert_eq!(parse_time_left(Some("-1")), Some(-1));
        assert_eq!(parse_time_left(Some("0")), Some(0));
        assert_eq!(parse_time_left(Some("soon")), None);
        assert_eq!(parse_time_left(Some("")), None);
        assert_eq!(parse_time_left(None), None);
    }
}
