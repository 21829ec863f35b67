//! Converts provider durations into minutes.
//!
//! Providers send either a minute count or an ISO-8601 duration such as
//! `PT7H25M`. The form is decided once, when the raw JSON is read, into
//! a [`DurationValue`].

use super::diagnostics::{ScoringEvent, ScoringObserver};
use iso8601_duration::Duration as Iso8601Duration;
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 24.0 * MINUTES_PER_HOUR;

/// A duration as sent by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationValue {
    /// Already a number of minutes.
    Minutes(i64),

    /// ISO-8601 text, e.g. `PT2H30M` or `PT45M`.
    IsoText(String),
}

/// Errors that may occur while reading a duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// The raw value was neither an integer nor a string
    TypeMismatch(String),

    /// The text is not a duration made of days, hours and minutes
    InvalidFormat(String),
}

impl Display for DurationError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            DurationError::TypeMismatch(found) => {
                write!(f, "Expected a string or an integer, found {found}.")
            }
            DurationError::InvalidFormat(text) => write!(f, "Invalid duration: {text}."),
        }
    }
}

impl std::error::Error for DurationError {}

/// Name of a JSON value's type, for diagnostics.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<&Value> for DurationValue {
    type Error = DurationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(DurationValue::IsoText(text.clone())),
            Value::Number(number) => number
                .as_i64()
                .map(DurationValue::Minutes)
                .ok_or_else(|| DurationError::TypeMismatch(json_type_name(value).to_string())),
            other => Err(DurationError::TypeMismatch(
                json_type_name(other).to_string(),
            )),
        }
    }
}

/// Strictly convert a duration into minutes.
///
/// Seconds are ignored. Years and months have no fixed length and are
/// rejected.
pub fn try_parse_duration(value: &DurationValue) -> Result<i64, DurationError> {
    let text = match value {
        DurationValue::Minutes(minutes) => return Ok(*minutes),
        DurationValue::IsoText(text) => text,
    };

    let Ok(duration) = text.trim().parse::<Iso8601Duration>() else {
        return Err(DurationError::InvalidFormat(text.clone()));
    };

    if duration.year != 0.0 || duration.month != 0.0 {
        return Err(DurationError::InvalidFormat(text.clone()));
    }

    let minutes = duration.day as f64 * MINUTES_PER_DAY
        + duration.hour as f64 * MINUTES_PER_HOUR
        + duration.minute as f64;

    Ok(minutes.trunc() as i64)
}

/// Convert a duration into minutes.
///
/// Never fails: unreadable text is reported to the observer and counts
/// as 0 minutes, which callers must read as "duration unknown".
pub fn parse_duration(value: &DurationValue, observer: &mut dyn ScoringObserver) -> i64 {
    match try_parse_duration(value) {
        Ok(minutes) => minutes,
        Err(e) => {
            observer.on_event(match e {
                DurationError::TypeMismatch(found) => ScoringEvent::DurationTypeMismatch { found },
                DurationError::InvalidFormat(text) => ScoringEvent::InvalidDurationText { text },
            });
            0
        }
    }
}

/// Convert a raw JSON duration into minutes.
///
/// Values that are neither integers nor strings are a type mismatch:
/// reported to the observer and counted as 0 minutes.
pub fn parse_raw_duration(value: &Value, observer: &mut dyn ScoringObserver) -> i64 {
    match DurationValue::try_from(value) {
        Ok(duration) => parse_duration(&duration, observer),
        Err(DurationError::TypeMismatch(found)) => {
            observer.on_event(ScoringEvent::DurationTypeMismatch { found });
            0
        }
        Err(DurationError::InvalidFormat(text)) => {
            observer.on_event(ScoringEvent::InvalidDurationText { text });
            0
        }
    }
}
