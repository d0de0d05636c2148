//! Birth date to week-count arithmetic.
//!
//! All functions are total: an absent birth date, or a `now` before the birth
//! date, yields the unset values instead of an error. Days are whole UTC
//! calendar days; no time-of-day or timezone correction is applied.

use crate::model::life_stats::{BirthDate, LifeStats, TOTAL_LIFE_WEEKS};
use chrono::{DateTime, Datelike, Utc};

/// Whole calendar days from `birth_date` to `now`'s UTC date. Negative when
/// `now` is before the birth date.
pub fn days_between(birth_date: BirthDate, now: DateTime<Utc>) -> i64 {
    (now.date_naive() - birth_date.date()).num_days()
}

/// Full years elapsed, not counting the current year until the birthday passed.
pub fn age(birth_date: Option<BirthDate>, now: DateTime<Utc>) -> u32 {
    let Some(birth_date) = birth_date else {
        return 0;
    };
    if !birth_date.has_started(now) {
        return 0;
    }

    let today = now.date_naive();
    let born = birth_date.date();
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// `floor(days / 7)`, never negative.
pub fn weeks_lived(birth_date: Option<BirthDate>, now: DateTime<Utc>) -> u32 {
    let Some(birth_date) = birth_date else {
        return 0;
    };
    let days = days_between(birth_date, now);
    if days < 0 {
        return 0;
    }
    u32::try_from(days / 7).unwrap_or(u32::MAX)
}

pub fn weeks_remaining(weeks_lived: u32) -> u32 {
    TOTAL_LIFE_WEEKS.saturating_sub(weeks_lived)
}

/// Share of life expectancy lived, as text with one fractional digit.
///
/// Not clamped: past `TOTAL_LIFE_WEEKS` this reports more than `100.0`.
pub fn percentage(weeks_lived: u32) -> String {
    let share = f64::from(weeks_lived) / f64::from(TOTAL_LIFE_WEEKS) * 100.0;
    format!("{share:.1}")
}

/// Computes all stats for one instant.
pub fn life_stats(birth_date: Option<BirthDate>, now: DateTime<Utc>) -> LifeStats {
    let lived = weeks_lived(birth_date, now);
    LifeStats {
        age: age(birth_date, now),
        weeks_lived: lived,
        weeks_remaining: weeks_remaining(lived),
        percentage: percentage(lived),
    }
}
