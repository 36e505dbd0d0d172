//! Strict handling for timestamp strings formatted RFC 3339.
//!
//! A timestamp is an absolute instant. Input may carry fractional
//! seconds and any numeric or `Z` zone designator; output is always
//! UTC at second precision with a `Z` suffix, fraction truncated.
//! Strings missing their seconds field or zone designator, or carrying
//! a colonless numeric offset, are rejected.
//!
//! # Functions
//!
//! - [`parse_timestamp`] — Validate an RFC 3339 string into a UTC [`Timestamp`]
//! - [`format_timestamp`] — Render an absolute instant as RFC 3339 in UTC
//! - [`round_to_hour`] / [`round_to_hour_string`] — Truncate to the top of the UTC hour
//! - [`round_to_quarter_hour`] / [`round_to_quarter_hour_string`] — Floor to the 15-minute bucket
//! - [`hour_count`] — Inclusive count of hours between two timestamp strings
//! - [`quarter_hour_count`] — Inclusive count of quarter-hour buckets between two timestamp strings

use chrono::{DateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use serde::Serialize;

use crate::error::{Result, TimeExtError};

const HOUR_SECS: i64 = 60 * 60;

/// Seconds per quarter-hour bucket.
const QUARTER_HOUR_SECS: i64 = 15 * 60;

/// An absolute instant, normalized to UTC.
///
/// Canonical text form is RFC 3339 at second precision with a `Z`
/// suffix; sub-second precision survives parsing but is dropped on
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The underlying UTC instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Seconds since the Unix epoch.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_timestamp(&self.0))
    }
}

/// Validate an RFC 3339 string and return it as a UTC [`Timestamp`].
///
/// Fractional seconds and numeric or `Z` zone designators are accepted;
/// the result is normalized to UTC.
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] for any non-conforming
/// string: missing seconds, missing zone designator, a bare `.` with no
/// fraction digits, a colonless offset like `+0100`, or the empty
/// string.
///
/// # Examples
///
/// ```
/// use timeext::timestamp::parse_timestamp;
///
/// let ts = parse_timestamp("1970-01-01T00:00:00+01:00").unwrap();
/// assert_eq!(ts.to_string(), "1969-12-31T23:00:00Z");
///
/// assert!(parse_timestamp("2019-01-01T00:00Z").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<Timestamp> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| Timestamp(dt.with_timezone(&Utc)))
        .map_err(|e| {
            TimeExtError::invalid_from(format!("timestamp must be formatted RFC 3339: '{s}'"), e)
        })
}

/// Render an absolute instant as RFC 3339 in UTC at second precision.
///
/// Fractional seconds are truncated, not rounded.
pub fn format_timestamp<T: TimeZone>(point: &DateTime<T>) -> String {
    point
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC 3339 string and truncate it to the top of the UTC hour.
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] if the string fails
/// [`parse_timestamp`].
pub fn round_to_hour(s: &str) -> Result<Timestamp> {
    Ok(floor_to_bucket(parse_timestamp(s)?, HOUR_SECS))
}

/// [`round_to_hour`], rendered back to an RFC 3339 string.
pub fn round_to_hour_string(s: &str) -> Result<String> {
    round_to_hour(s).map(|ts| ts.to_string())
}

/// Parse an RFC 3339 string and floor it to its quarter-hour bucket.
///
/// Minutes are truncated down to the nearest multiple of 15 (minute 58
/// lands on 45); seconds and sub-seconds are zeroed.
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] if the string fails
/// [`parse_timestamp`].
pub fn round_to_quarter_hour(s: &str) -> Result<Timestamp> {
    Ok(floor_to_bucket(parse_timestamp(s)?, QUARTER_HOUR_SECS))
}

/// [`round_to_quarter_hour`], rendered back to an RFC 3339 string.
///
/// # Examples
///
/// ```
/// use timeext::timestamp::round_to_quarter_hour_string;
///
/// let rounded = round_to_quarter_hour_string("2019-01-01T00:58:13Z").unwrap();
/// assert_eq!(rounded, "2019-01-01T00:45:00Z");
/// ```
pub fn round_to_quarter_hour_string(s: &str) -> Result<String> {
    round_to_quarter_hour(s).map(|ts| ts.to_string())
}

/// Inclusive count of hours bounded by `start` and `end`.
///
/// Computed from the raw elapsed duration, not from rounded endpoints:
/// a partial trailing hour is already covered by the inclusive `+1` and
/// never adds an extra unit.
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] if either endpoint fails to
/// parse or `start` is strictly after `end`.
pub fn hour_count(start: &str, end: &str) -> Result<i64> {
    let t_start = parse_timestamp(start)?;
    let t_end = parse_timestamp(end)?;

    if t_end < t_start {
        return Err(TimeExtError::invalid(format!(
            "start timestamp '{start}' must not be after end timestamp '{end}'"
        )));
    }

    Ok((t_end.0 - t_start.0).num_hours() + 1)
}

/// Inclusive count of quarter-hour buckets bounded by `start` and `end`.
///
/// Both endpoints are floored to their buckets before differencing, so
/// two instants inside the same bucket always count 1 regardless of
/// their offsets within it.
///
/// # Errors
///
/// Returns [`TimeExtError::InvalidArgument`] if either endpoint fails to
/// parse or the start bucket is strictly after the end bucket.
pub fn quarter_hour_count(start: &str, end: &str) -> Result<i64> {
    let b_start = round_to_quarter_hour(start)?;
    let b_end = round_to_quarter_hour(end)?;

    if b_end < b_start {
        return Err(TimeExtError::invalid(format!(
            "start timestamp '{start}' must not be after end timestamp '{end}'"
        )));
    }

    Ok((b_end.unix_seconds() - b_start.unix_seconds()) / QUARTER_HOUR_SECS + 1)
}

/// Floor to the previous multiple of `bucket_secs`, zeroing sub-second
/// noise.
///
/// Works on whole seconds since the epoch, so every instant an RFC 3339
/// string can express (years 0000 through 9999) floors cleanly;
/// nanosecond-based truncation would cap out in 2262.
fn floor_to_bucket(ts: Timestamp, bucket_secs: i64) -> Timestamp {
    let t = ts.0;
    let rem = t.timestamp().rem_euclid(bucket_secs);
    let subsec = i64::from(t.timestamp_subsec_nanos());
    Timestamp(t - TimeDelta::seconds(rem) - TimeDelta::nanoseconds(subsec))
}

// ── Tests ───────────────────────────────────────────────────────────────────
