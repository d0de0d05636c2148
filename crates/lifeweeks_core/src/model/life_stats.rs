//! Birth date and derived life statistics.
//!
//! # Invariants
//! - `BirthDate` always formats back to the exact `yyyy-MM-dd` text it parsed.
//! - `LifeStats::default()` is the "birth date not configured" state.
//! - `weeks_lived + weeks_remaining == TOTAL_LIFE_WEEKS` while
//!   `weeks_lived <= TOTAL_LIFE_WEEKS`, otherwise `weeks_remaining == 0`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Assumed life expectancy: 80 years of 52 weeks.
pub const TOTAL_LIFE_WEEKS: u32 = 80 * 52;

/// Storage and wire format for birth dates.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

static BIRTH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid birth date regex"));

/// Rejection reasons for birth date text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthDateError {
    /// Text is not shaped like `yyyy-MM-dd`.
    Format(String),
    /// Text is well-shaped but names no calendar day (e.g. `2023-02-30`).
    Calendar(String),
}

impl Display for BirthDateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(value) => write!(f, "birth date `{value}` must match yyyy-MM-dd"),
            Self::Calendar(value) => write!(f, "birth date `{value}` is not a calendar date"),
        }
    }
}

impl Error for BirthDateError {}

/// Calendar birth date without time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Builds a birth date from calendar parts.
    ///
    /// Returns `None` for impossible dates and for years outside `1..=9999`,
    /// which could not round-trip through the four digit storage format.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the persisted `yyyy-MM-dd` form.
    pub fn parse(value: &str) -> Result<Self, BirthDateError> {
        let trimmed = value.trim();
        if !BIRTH_DATE_RE.is_match(trimmed) {
            return Err(BirthDateError::Format(trimmed.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, BIRTH_DATE_FORMAT)
            .ok()
            .and_then(|date| Self::from_ymd(date.year(), date.month(), date.day()))
            .ok_or_else(|| BirthDateError::Calendar(trimmed.to_string()))
    }

    /// Lenient variant used at storage boundaries: anything unparseable is unset.
    pub fn parse_lenient(value: Option<&str>) -> Option<Self> {
        value.and_then(|raw| Self::parse(raw).ok())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Whether `now` is on or after this birth date (UTC calendar day).
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now.date_naive() >= self.0
    }
}

impl Display for BirthDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(BIRTH_DATE_FORMAT))
    }
}

impl Serialize for BirthDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Derived statistics shown on the main screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeStats {
    /// Full years elapsed since birth.
    pub age: u32,
    /// Whole weeks elapsed since birth.
    pub weeks_lived: u32,
    /// `TOTAL_LIFE_WEEKS - weeks_lived`, floored at zero.
    pub weeks_remaining: u32,
    /// Share of `TOTAL_LIFE_WEEKS` lived, one fractional digit. Can exceed `100.0`.
    pub percentage: String,
}

impl Default for LifeStats {
    fn default() -> Self {
        Self {
            age: 0,
            weeks_lived: 0,
            weeks_remaining: TOTAL_LIFE_WEEKS,
            percentage: "0.0".to_string(),
        }
    }
}

impl LifeStats {
    /// Whether this is the "no birth date configured" state.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

/// Last computed stats plus the instant they were computed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedStats {
    #[serde(flatten)]
    pub stats: LifeStats,
    pub last_computed_at: DateTime<Utc>,
}
