//! # timeext
//!
//! Strict parsing, formatting, and inclusive span counting for two
//! fixed textual time formats: calendar dates (`YYYY-MM-DD`) and
//! RFC 3339 timestamps.
//!
//! Every function is pure and synchronous: strings in, values out, no
//! shared state and no system-clock access, so everything is safe to
//! call concurrently and trivial to test. Inputs that do not match the
//! grammar exactly — one-digit months, missing zone designators,
//! colonless offsets — are rejected with [`TimeExtError::InvalidArgument`]
//! rather than coerced.
//!
//! Dates are anchored at midnight UTC; timestamps are normalized to UTC
//! on parse and rendered at second precision with a `Z` suffix. Span
//! counts are inclusive: both endpoints count as whole units, so a span
//! from a value to itself is 1.
//!
//! ## Modules
//!
//! - [`date`] — `YYYY-MM-DD` strings: parse/format, year extraction, inclusive day counts, DST-aware first instant of a day
//! - [`timestamp`] — RFC 3339 strings: parse/format, hour and quarter-hour truncation, inclusive hour and quarter-hour counts
//! - [`error`] — Error types

pub mod date;
pub mod error;
pub mod timestamp;

pub use date::{
    day_count, extract_year, first_instant_of_day, format_date, parse_date, CalendarDate,
};
pub use error::TimeExtError;
pub use timestamp::{
    format_timestamp, hour_count, parse_timestamp, quarter_hour_count, round_to_hour,
    round_to_hour_string, round_to_quarter_hour, round_to_quarter_hour_string, Timestamp,
};
