//! Timestamp recognition and the local-time conventions used for dates.
//!
//! YAML loaders read a timestamp literal such as `2020-01-01 00:00:00` as a
//! UTC instant. Front matter authors mean their own clock time, so parsed
//! instants are shifted by the local offset before they reach the caller,
//! and stringified dates are written back as local `YYYY-MM-DD HH:MM:SS`.

use std::sync::LazyLock;

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone,
    Utc,
};
use regex::Regex;
use thiserror::Error;

/// Date-only timestamp: `2001-12-14`.
static DATE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap());

/// Full timestamp: `2001-12-14t21:59:43.10-05:00`, `2001-12-14 21:59:43.10 -5`.
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})(?:[Tt]|[ \t]+)([0-9]{1,2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]*))?(?:[ \t]*(Z|([-+])([0-9]{1,2})(?::([0-9]{2}))?))?$",
    )
    .unwrap()
});

/// UTC offset strings: `+08:00`, `-0530`, `+8`.
static OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-+])([0-9]{1,2})(?::?([0-9]{2}))?$").unwrap());

/// Errors that can occur when reading a timezone setting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimezoneError {
    #[error("invalid timezone offset: {0} (expected \"local\", \"utc\" or e.g. \"+08:00\")")]
    Invalid(String),

    #[error("timezone offset out of range: {0}")]
    OutOfRange(String),
}

/// The offset of the process-local timezone right now.
pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Parse a timezone setting.
///
/// Accepts `local`, `utc` (or `Z`) and numeric offsets like `+08:00`.
pub fn parse_offset(input: &str) -> Result<FixedOffset, TimezoneError> {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "local" => return Ok(local_offset()),
        "utc" | "z" => return Ok(Utc.fix()),
        _ => {}
    }

    let caps =
        OFFSET.captures(trimmed).ok_or_else(|| TimezoneError::Invalid(input.to_string()))?;
    let hours: i32 = caps[2].parse().map_err(|_| TimezoneError::Invalid(input.to_string()))?;
    let minutes: i32 = match caps.get(3) {
        Some(m) => m.as_str().parse().map_err(|_| TimezoneError::Invalid(input.to_string()))?,
        None => 0,
    };
    if minutes >= 60 {
        return Err(TimezoneError::OutOfRange(input.to_string()));
    }

    let mut seconds = (hours * 60 + minutes) * 60;
    if &caps[1] == "-" {
        seconds = -seconds;
    }
    FixedOffset::east_opt(seconds).ok_or_else(|| TimezoneError::OutOfRange(input.to_string()))
}

/// Read a YAML timestamp literal as the UTC instant a YAML loader would produce.
///
/// Literals without a zone designator are UTC. Returns `None` for anything
/// that is not a timestamp or names an impossible calendar date.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    if let Some(caps) = DATE_ONLY.captures(input) {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    let caps = DATE_TIME.captures(input)?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;

    // Millisecond precision: the first three fraction digits, right-padded.
    let millis = match caps.get(7) {
        Some(frac) => {
            let digits: String = frac.as_str().chars().chain("000".chars()).take(3).collect();
            digits.parse().ok()?
        }
        None => 0,
    };
    let naive: NaiveDateTime = date.and_hms_milli_opt(
        caps[4].parse().ok()?,
        caps[5].parse().ok()?,
        caps[6].parse().ok()?,
        millis,
    )?;
    let instant = Utc.from_utc_datetime(&naive);

    let Some(sign) = caps.get(9) else {
        return Some(instant);
    };
    let tz_hours: i64 = caps[10].parse().ok()?;
    let tz_minutes: i64 = caps.get(11).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let mut delta = TimeDelta::minutes(tz_hours * 60 + tz_minutes);
    if sign.as_str() == "-" {
        delta = -delta;
    }
    instant.checked_sub_signed(delta)
}

/// Shift a loader instant so its local reading matches the literal clock time.
///
/// `2020-01-01 00:00:00` read as UTC becomes `2020-01-01 00:00:00` at `offset`.
pub fn normalize(instant: DateTime<Utc>, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    instant
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .map(|shifted| shifted.with_timezone(&offset))
}

/// Recognise a timestamp literal and return it as a local date.
pub fn rehydrate(input: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    parse_timestamp(input).and_then(|instant| normalize(instant, offset))
}

/// Read a `YYYY-MM-DD HH:MM:SS` string, the form [`format_local`] writes,
/// as clock time at `offset`.
pub fn parse_local(input: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S").ok()?;
    offset.from_local_datetime(&naive).single()
}

/// Format a date as `YYYY-MM-DD HH:MM:SS` in the given offset.
pub fn format_local(date: &DateTime<FixedOffset>, offset: FixedOffset) -> String {
    date.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a date the way a JSON encoder renders one: UTC, millisecond precision.
pub fn to_iso_utc(date: &DateTime<FixedOffset>) -> String {
    date.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
