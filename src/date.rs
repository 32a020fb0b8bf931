//! Date string recognition.
//!
//! Accepts the ISO-8601 calendar forms a gateway payload carries:
//!
//! ```text
//! YYYY-MM-DD
//! YYYY-MM-DD(T|whitespace)hh:mm[:ss[.f+]][Z|±hh[[:]mm]]
//! ```
//!
//! Date-only strings denote midnight UTC. Date-times without a zone
//! designator are read as UTC. `24:00` is midnight of the next day.
//! Results keep millisecond precision.

use chrono::{
    DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, SubsecRound, TimeZone, Timelike, Utc,
};

/// Byte length of the `YYYY-MM-DD` prefix.
const DATE_LEN: usize = 10;

/// Date-time forms with a zone designator, tried in order.
const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Date-time forms without a zone designator, tried in order.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses a date string into a UTC instant, or `None` if it is not one.
///
/// # Examples
///
/// ```
/// use gateway_core::parse_date_string;
///
/// let dt = parse_date_string("2024-01-05T10:30:00+02:00").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2024-01-05T08:30:00+00:00");
///
/// assert!(parse_date_string("2024-02-30").is_none());
/// assert!(parse_date_string("not a date").is_none());
/// ```
pub fn parse_date_string(value: &str) -> Option<DateTime<Utc>> {
    if !has_fixed_width_prefix(value) {
        return None;
    }

    if value.len() == DATE_LEN {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    let sep = value.as_bytes()[DATE_LEN];
    if sep != b'T' && !sep.is_ascii_whitespace() {
        return None;
    }

    let time = &value[DATE_LEN + 1..];
    let (time, end_of_day) = match time.strip_prefix("24:") {
        Some(rest) => (format!("00:{}", rest), true),
        None => (time.to_string(), false),
    };
    let canonical = format!("{}T{}", &value[..DATE_LEN], time);

    let mut parsed = parse_zoned(&canonical).or_else(|| parse_local(&canonical))?;
    // chrono reads `:60` as a leap second
    if parsed.nanosecond() >= 1_000_000_000 {
        return None;
    }
    if end_of_day {
        // only 24:00[:00[.0]] is allowed
        if parsed.num_seconds_from_midnight() != 0 || parsed.nanosecond() != 0 {
            return None;
        }
        parsed = parsed.checked_add_days(Days::new(1))?;
    }

    Some(parsed.with_timezone(&Utc).trunc_subsecs(3))
}

/// Returns `true` if `value` parses as a date string.
pub fn is_date_string(value: &str) -> bool {
    parse_date_string(value).is_some()
}

fn parse_zoned(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok().or_else(|| {
        ZONED_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    })
}

fn parse_local(s: &str) -> Option<DateTime<FixedOffset>> {
    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())?;
    Some(FixedOffset::east_opt(0)?.from_utc_datetime(&naive))
}

/// chrono accepts signed years and single-digit fields; the gateway grammar
/// requires `YYYY-MM-DD` and, when a time follows, `hh:mm`.
fn has_fixed_width_prefix(value: &str) -> bool {
    let b = value.as_bytes();
    let digits = |range: std::ops::Range<usize>| {
        b.get(range)
            .is_some_and(|s| s.iter().all(u8::is_ascii_digit))
    };

    let date_ok = digits(0..4)
        && b.get(4) == Some(&b'-')
        && digits(5..7)
        && b.get(7) == Some(&b'-')
        && digits(8..10);
    if !date_ok {
        return false;
    }
    if b.len() == DATE_LEN {
        return true;
    }
    digits(11..13) && b.get(13) == Some(&b':') && digits(14..16)
}
