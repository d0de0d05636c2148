//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `lifeweeks_core` linkage without the Flutter/FFI runtime.
//! - Given a `yyyy-MM-dd` birth date, print the stats for today.

use chrono::Utc;
use lifeweeks_core::stats::date_math::life_stats;
use lifeweeks_core::BirthDate;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lifeweeks_core ping={}", lifeweeks_core::ping());
    println!("lifeweeks_core version={}", lifeweeks_core::core_version());

    let Some(raw) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let birth_date = match BirthDate::parse(&raw) {
        Ok(birth_date) => birth_date,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let stats = life_stats(Some(birth_date), Utc::now());
    println!("age={}", stats.age);
    println!("weeks_lived={}", stats.weeks_lived);
    println!("weeks_remaining={}", stats.weeks_remaining);
    println!("percentage={}", stats.percentage);
    ExitCode::SUCCESS
}
