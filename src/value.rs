//! Node values and their coercions
//!
//! Every node may carry one [`Value`]. Accessors never inspect runtime types ad hoc;
//! they go through the coercion functions here, each of which returns an explicit
//! `Result`.

use crate::error::ConversionError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::time::Duration;

/// `<days>d<hours>h<minutes>m<seconds>s`, every part optional, long unit names allowed
static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:\s*(\d+)\s*d(?:ays?)?)?(?:\s*(\d+)\s*h(?:ours?)?)?(?:\s*(\d+)\s*m(?:in(?:ute)?s?)?)?(?:\s*(\d+)\s*s(?:econds?)?)?$",
    )
    .expect("Invalid regex pattern for durations")
});

/// `HH:MM` or `HH:MM:SS`
static DURATION_HMS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2,10}):([0-9]{2})(?::([0-9]{2}))?$")
        .expect("Invalid regex pattern for HH:MM durations")
});

/// An all-caps time zone abbreviation such as `UTC` or `MST`
static ZONE_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,5}\b").expect("Invalid regex pattern for zone names"));

/// How a time layout is parsed
#[derive(Debug, Clone, Copy)]
enum Layout {
    Rfc3339,
    /// Carries a numeric offset (`%z`)
    Zoned(&'static str),
    /// Carries a zone abbreviation, read as UTC
    Abbreviated(&'static str),
    /// No zone information, read as UTC
    Naive(&'static str),
    Date(&'static str),
}

/// Known time layouts, tried in order.
static TIME_LAYOUTS: &[Layout] = &[
    Layout::Rfc3339,
    // ANSI C
    Layout::Naive("%a %b %e %H:%M:%S %Y"),
    // Unix date
    Layout::Abbreviated("%a %b %e %H:%M:%S %z %Y"),
    // Ruby date
    Layout::Zoned("%a %b %d %H:%M:%S %z %Y"),
    // RFC 822
    Layout::Abbreviated("%d %b %y %H:%M %z"),
    Layout::Zoned("%d %b %y %H:%M %z"),
    // RFC 850
    Layout::Abbreviated("%A, %d-%b-%y %H:%M:%S %z"),
    // RFC 1123
    Layout::Abbreviated("%a, %d %b %Y %H:%M:%S %z"),
    Layout::Zoned("%a, %d %b %Y %H:%M:%S %z"),
    Layout::Naive("%Y-%m-%d %H:%M:%S"),
    Layout::Date("%Y-%m-%d"),
];

/// A node value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Time(DateTime<Utc>),
    List(Vec<Value>),
}

impl Value {
    /// Render the value as text; lists are comma separated.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn to_int(&self) -> Result<i64, ConversionError> {
        match self {
            Value::Int(i) => Ok(*i),
            other => parse_int(&other.to_string()),
        }
    }

    pub fn to_float(&self) -> Result<f64, ConversionError> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            other => parse_float(&other.to_string()),
        }
    }

    pub fn to_bool(&self) -> Result<bool, ConversionError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => parse_bool(&other.to_string()),
        }
    }

    pub fn to_duration(&self) -> Result<Duration, ConversionError> {
        match self {
            Value::Duration(d) => Ok(*d),
            other => parse_duration(&other.to_string()),
        }
    }

    pub fn to_time(&self) -> Result<DateTime<Utc>, ConversionError> {
        match self {
            Value::Time(t) => Ok(*t),
            other => parse_time(&other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Parse a boolean, accepting `1 t true on` and `0 f false off` in any case.
pub fn parse_bool(s: &str) -> Result<bool, ConversionError> {
    match s.to_lowercase().as_str() {
        "1" | "t" | "true" | "on" => Ok(true),
        "0" | "f" | "false" | "off" => Ok(false),
        _ => Err(ConversionError::BadValue(s.to_string())),
    }
}

pub fn parse_int(s: &str) -> Result<i64, ConversionError> {
    s.parse::<i64>().map_err(|source| ConversionError::Int {
        value: s.to_string(),
        source,
    })
}

pub fn parse_float(s: &str) -> Result<f64, ConversionError> {
    s.parse::<f64>().map_err(|source| ConversionError::Float {
        value: s.to_string(),
        source,
    })
}

/// Parse a duration written as `<days>d<hours>h<minutes>m<seconds>s` or `HH:MM[:SS]`.
///
/// Days are plain 24 hour days. Each part may be omitted, but at least one
/// must be present.
pub fn parse_duration(s: &str) -> Result<Duration, ConversionError> {
    let bad = || ConversionError::BadDuration(s.to_string());
    if s.trim().is_empty() {
        return Err(bad());
    }

    let number = |m: Option<regex::Match<'_>>| -> Result<u64, ConversionError> {
        match m {
            Some(m) => m.as_str().parse::<u64>().map_err(|_| bad()),
            None => Ok(0),
        }
    };

    let (hours, minutes, seconds) = if let Some(caps) = DURATION_HMS_PATTERN.captures(s) {
        (number(caps.get(1))?, number(caps.get(2))?, number(caps.get(3))?)
    } else if let Some(caps) = DURATION_PATTERN.captures(s) {
        let hours = number(caps.get(1))?
            .checked_mul(24)
            .and_then(|h| h.checked_add(number(caps.get(2)).ok()?))
            .ok_or_else(bad)?;
        (hours, number(caps.get(3))?, number(caps.get(4))?)
    } else {
        return Err(bad());
    };

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(seconds))
        .map(Duration::from_secs)
        .ok_or_else(bad)
}

/// Render a duration in the `XhYmZs` form understood by [`parse_duration`].
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    let nanos = d.subsec_nanos();
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        out.push_str(&format!("{seconds}.{}s", fraction.trim_end_matches('0')));
    } else {
        out.push_str(&format!("{seconds}s"));
    }
    out
}

/// Parse a timestamp in any of the known layouts, as UTC truncated to seconds.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, ConversionError> {
    let input = s.trim();
    for layout in TIME_LAYOUTS {
        if let Some(t) = parse_with_layout(input, *layout) {
            return Ok(t.trunc_subsecs(0));
        }
    }
    Err(ConversionError::BadTime(s.to_string()))
}

fn parse_with_layout(s: &str, layout: Layout) -> Option<DateTime<Utc>> {
    match layout {
        Layout::Rfc3339 => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Layout::Zoned(format) => DateTime::parse_from_str(s, format)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Layout::Abbreviated(format) => {
            if !ZONE_ABBREVIATION.is_match(s) {
                return None;
            }
            let numeric = ZONE_ABBREVIATION.replace(s, "+0000");
            DateTime::parse_from_str(&numeric, format)
                .ok()
                .map(|t| t.with_timezone(&Utc))
        }
        Layout::Naive(format) => NaiveDateTime::parse_from_str(s, format)
            .ok()
            .map(|t| t.and_utc()),
        Layout::Date(format) => NaiveDate::parse_from_str(s, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc()),
    }
}
