//! String formats shared by the validator and the interactive prompts.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

// Accepts scheme-relative (`//host`) and bare-host (`example.com/x`) forms.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(http://www\.|https://www\.|http://|https://|/|//)?[A-z0-9_-]*?[:]?[A-z0-9_-]*?[@]?[A-z0-9]+([\-\.][a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?$",
    )
    .unwrap()
});

static DATE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})(\.\d+)?(Z|[+-](\d{2}):(\d{2}))$",
    )
    .unwrap()
});

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

pub fn is_url(s: &str) -> bool {
    URL_RE.is_match(s)
}

/// An RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// Calendar ranges are checked: `2019-02-30` is rejected, and so are hour 24
/// and second 60.
pub fn is_date(s: &str) -> bool {
    if let Some(c) = DATE_RE.captures(s) {
        return valid_day(&c[1], &c[2], &c[3]);
    }
    let Some(c) = DATE_TIME_RE.captures(s) else {
        return false;
    };
    if !valid_day(&c[1], &c[2], &c[3]) {
        return false;
    }
    if !(in_range(&c[4], 23) && in_range(&c[5], 59) && in_range(&c[6], 59)) {
        return false;
    }
    match (c.get(9), c.get(10)) {
        (Some(hours), Some(minutes)) => in_range(hours.as_str(), 23) && in_range(minutes.as_str(), 59),
        _ => true,
    }
}

fn valid_day(year: &str, month: &str, day: &str) -> bool {
    match (year.parse(), month.parse(), day.parse()) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d).is_some(),
        _ => false,
    }
}

fn in_range(digits: &str, max: u32) -> bool {
    digits.parse::<u32>().map(|n| n <= max).unwrap_or(false)
}
