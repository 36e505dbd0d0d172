//! Strict handling for calendar-date strings formatted `YYYY-MM-DD`.
//!
//! A calendar date is a Gregorian year-month-day triple with no
//! time-of-day component, anchored at midnight UTC so that host-location
//! defaulting can never shift it by a day. Parsing is strict: four-digit
//! zero-padded year, two-digit month and day, dash separators, and a day
//! that actually exists in that month (leap years included). Anything
//! looser — `"2019-1-1"`, trailing garbage, the empty string — is
//! rejected.
//!
//! # Functions
//!
//! - [`parse_date`] — Validate a `YYYY-MM-DD` string into a [`CalendarDate`]
//! - [`format_date`] — Render an absolute instant as a UTC `YYYY-MM-DD` string
//! - [`extract_year`] — Read the year from the 4-character prefix of a date string
//! - [`day_count`] — Inclusive count of calendar days between two date strings
//! - [`first_instant_of_day`] — First representable local instant of a day in a timezone

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, TimeExtError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A Gregorian calendar day, held as 00:00:00 UTC of that day.
///
/// Round-tripping through [`parse_date`] and [`format_date`] is lossless
/// for every value this library produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarDate(DateTime<Utc>);

impl CalendarDate {
    /// The absolute instant: midnight UTC on this day.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// The year-month-day triple without its time-of-day component.
    pub fn date_naive(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Validate a `YYYY-MM-DD` string and return it as a [`CalendarDate`].
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] for anything that is not
/// exactly a zero-padded, dash-separated, calendar-valid date: wrong
/// length, non-numeric fields, one-digit months, out-of-range days
/// (`"2019-01-32"`, `"2019-02-29"`), or the empty string.
///
/// # Examples
///
/// ```
/// use timeext::date::parse_date;
///
/// let date = parse_date("2019-01-04").unwrap();
/// assert_eq!(date.to_string(), "2019-01-04");
///
/// assert!(parse_date("2019-1-4").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<CalendarDate> {
    let date = parse_strict_date(s)?;
    Ok(CalendarDate(date.and_time(NaiveTime::MIN).and_utc()))
}

/// Render an absolute instant as a `YYYY-MM-DD` string in UTC.
pub fn format_date<T: TimeZone>(point: &DateTime<T>) -> String {
    point.with_timezone(&Utc).format(DATE_FORMAT).to_string()
}

/// Read the year from the leading 4 characters of a date string.
///
/// Validation is deliberately weaker than [`parse_date`]: only the
/// 4-character numeric prefix is checked, so `"2019-99-99"` still
/// yields 2019. Callers rely on the lenient form.
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] if the string is shorter
/// than 4 characters or the prefix is not an integer.
pub fn extract_year(s: &str) -> Result<i32> {
    let prefix = s
        .get(..4)
        .ok_or_else(|| TimeExtError::invalid(format!("invalid date value: '{s}'")))?;
    prefix
        .parse::<i32>()
        .map_err(|e| TimeExtError::invalid_from(format!("invalid date value: '{s}'"), e))
}

/// Inclusive count of calendar days bounded by `start` and `end`.
///
/// Both endpoints must be valid `YYYY-MM-DD` strings. Equal dates count
/// as 1.
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] if either endpoint fails to
/// parse or `start` is strictly after `end`.
///
/// # Examples
///
/// ```
/// use timeext::date::day_count;
///
/// assert_eq!(day_count("2019-01-01", "2019-01-03").unwrap(), 3);
/// assert_eq!(day_count("2019-01-01", "2019-01-01").unwrap(), 1);
/// ```
pub fn day_count(start: &str, end: &str) -> Result<i64> {
    let t_start = parse_date(start)?;
    let t_end = parse_date(end)?;

    if t_end < t_start {
        return Err(TimeExtError::invalid(format!(
            "start date '{start}' must not be after end date '{end}'"
        )));
    }

    Ok((t_end.instant() - t_start.instant()).num_days() + 1)
}

/// First representable local instant of the given calendar day in `tz`.
///
/// The date string is interpreted in the given zone, not UTC. In zones
/// that spring forward across midnight (America/Havana, for one) the
/// nominal midnight of some dates does not exist; the returned instant
/// is then one hour after it, which is the first wall-clock moment that
/// actually falls inside the requested day. Ambiguous midnights resolve
/// to the earlier of the two candidate instants.
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] if the string is not a
/// strictly valid `YYYY-MM-DD` date.
pub fn first_instant_of_day(s: &str, tz: Tz) -> Result<DateTime<Tz>> {
    let date = parse_strict_date(s)?;
    let midnight = date.and_time(NaiveTime::MIN);

    let nominal = match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt,
        // Fall-back transitions repeat the midnight hour; the day starts
        // at the earlier instant.
        LocalResult::Ambiguous(earlier, _) => earlier,
        // Spring-forward across midnight: nominal midnight does not
        // exist in this zone. Anchor one hour before it; the date check
        // below then advances into the intended day.
        LocalResult::None => tz
            .from_local_datetime(&(midnight - TimeDelta::hours(1)))
            .earliest()
            .ok_or_else(|| {
                TimeExtError::invalid(format!(
                    "no representable first instant for '{s}' in {tz}"
                ))
            })?,
    };

    // An instant that renders to a different calendar day means midnight
    // was shifted out of the day; advance one hour to land inside it.
    if nominal.date_naive() != date {
        Ok(nominal + TimeDelta::hours(1))
    } else {
        Ok(nominal)
    }
}

/// Scan the fixed-width `YYYY-MM-DD` grammar, then let chrono check
/// calendar validity (month range, day-of-month, leap years).
fn parse_strict_date(s: &str) -> Result<NaiveDate> {
    if !has_strict_date_shape(s) {
        return Err(TimeExtError::invalid(format!(
            "date must be formatted YYYY-MM-DD: '{s}'"
        )));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        TimeExtError::invalid_from(format!("date must be formatted YYYY-MM-DD: '{s}'"), e)
    })
}

/// Exactly ten bytes: four digits, dash, two digits, dash, two digits.
fn has_strict_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use proptest::prelude::*;

    // ── parse_date tests ────────────────────────────────────────────────

    #[test]
    fn test_parse_date_accepts_valid() {
        let cases = [
            "1950-01-01",
            "1969-12-31",
            "1970-01-01",
            "2019-01-01",
            "2020-02-29", // leap day
        ];
        for d in cases {
            assert!(parse_date(d).is_ok(), "expected ok: {d}");
        }
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        let cases = [
            "20190-01",
            "2019-1-1",
            "2019-01-0",
            "2019-01-32",
            "2019-01-32A",
            "2019-13-01",
            "2019-02-29", // not a leap year
            "2019/01/04",
            "",
        ];
        for d in cases {
            assert!(parse_date(d).is_err(), "expected error: {d}");
        }
    }

    #[test]
    fn test_parse_date_anchors_at_utc_midnight() {
        let date = parse_date("2019-01-04").unwrap();
        assert_eq!(
            date.instant(),
            Utc.with_ymd_and_hms(2019, 1, 4, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_date_error_embeds_input_and_chains_source() {
        // Shape-valid but calendar-invalid: the chrono failure is chained.
        let err = parse_date("2019-01-32").unwrap_err();
        assert!(err.to_string().contains("2019-01-32"), "got: {err}");
        assert!(std::error::Error::source(&err).is_some());

        // Shape-invalid: rejected before chrono ever runs.
        let err = parse_date("2019-1-1").unwrap_err();
        assert!(std::error::Error::source(&err).is_none());
    }

    // ── format_date tests ───────────────────────────────────────────────

    #[test]
    fn test_format_date_from_unix_instant() {
        let point = Utc.timestamp_opt(1_546_560_000, 0).unwrap();
        assert_eq!(format_date(&point), "2019-01-04");
    }

    #[test]
    fn test_format_date_converts_to_utc() {
        // Midnight in Los Angeles is 08:00 UTC the same day.
        let point = Tz::America__Los_Angeles
            .with_ymd_and_hms(2010, 12, 31, 0, 0, 0)
            .unwrap();
        assert_eq!(format_date(&point), "2010-12-31");
    }

    // ── extract_year tests ──────────────────────────────────────────────

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2019-01-04").unwrap(), 2019);
        // Prefix-only: the rest of the string is not validated.
        assert_eq!(extract_year("2019-99-99").unwrap(), 2019);
        assert_eq!(extract_year("2019").unwrap(), 2019);
    }

    #[test]
    fn test_extract_year_rejects_short_or_non_numeric() {
        assert!(extract_year("201").is_err());
        assert!(extract_year("").is_err());
        // 4-char prefix "201-" is not numeric.
        assert!(extract_year("201-01-04").is_err());
        assert!(extract_year("YYYY-01-04").is_err());
    }

    // ── day_count tests ─────────────────────────────────────────────────

    #[test]
    fn test_day_count_inclusive() {
        let cases = [
            ("2019-01-01", "2019-01-01", 1),
            ("2019-01-01", "2019-01-03", 3),
            ("2020-02-28", "2020-03-01", 3), // across a leap day
            ("2019-01-01", "2019-12-31", 365),
        ];
        for (start, end, expected) in cases {
            assert_eq!(day_count(start, end).unwrap(), expected, "{start}..{end}");
        }
    }

    #[test]
    fn test_day_count_errors() {
        let cases = [
            ("2019-01-01A", "2019-01-03"),
            ("2019-01-01", "2019-01-03A"),
            ("2019-01-03", "2019-01-01"), // inverted range
        ];
        for (start, end) in cases {
            assert!(day_count(start, end).is_err(), "{start}..{end}");
        }
    }

    // ── first_instant_of_day tests ──────────────────────────────────────

    #[test]
    fn test_first_instant_utc_is_exact_midnight() {
        let dt = first_instant_of_day("2019-03-10", Tz::UTC).unwrap();
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2019, 3, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_first_instant_ordinary_zone() {
        // New York springs forward at 02:00, so midnight itself exists.
        let dt = first_instant_of_day("2019-03-10", Tz::America__New_York).unwrap();
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2019, 3, 10, 5, 0, 0).unwrap()
        );
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_first_instant_skipped_midnight() {
        // Cuba sprang forward at 00:00 on 2019-03-10: the day begins at
        // 01:00 -04:00, one hour after nominal midnight.
        let dt = first_instant_of_day("2019-03-10", Tz::America__Havana).unwrap();
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2019, 3, 10, 5, 0, 0).unwrap()
        );
        assert_eq!(dt.hour(), 1);
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2019, 3, 10).unwrap());
    }

    #[test]
    fn test_first_instant_ambiguous_midnight() {
        // Cuba fell back at 01:00 on 2019-11-03, so midnight occurs twice
        // that day; the day begins at the earlier one (00:00 -04:00).
        let dt = first_instant_of_day("2019-11-03", Tz::America__Havana).unwrap();
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2019, 11, 3, 4, 0, 0).unwrap()
        );
        assert_eq!(dt.hour(), 0);
        assert_eq!(format_date(&dt), "2019-11-03");
    }

    #[test]
    fn test_first_instant_rejects_malformed_date() {
        assert!(first_instant_of_day("2019-1-1", Tz::UTC).is_err());
        assert!(first_instant_of_day("", Tz::America__Havana).is_err());
    }

    // ── Properties ──────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_date_round_trips(y in 1900i32..=2100, m in 1u32..=12, d in 1u32..=31) {
            prop_assume!(NaiveDate::from_ymd_opt(y, m, d).is_some());
            let s = format!("{y:04}-{m:02}-{d:02}");
            let parsed = parse_date(&s).unwrap();
            prop_assert_eq!(format_date(&parsed.instant()), s.clone());
            prop_assert_eq!(parsed.to_string(), s);
        }

        #[test]
        fn prop_day_count_same_date_is_one(y in 1900i32..=2100, m in 1u32..=12, d in 1u32..=28) {
            let s = format!("{y:04}-{m:02}-{d:02}");
            prop_assert_eq!(day_count(&s, &s).unwrap(), 1);
        }
    }
}
