//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use ind_profile::calendar::HolidayCalendar;
use ind_profile::profile::IndustrialLoadProfile;
use ind_profile::time_index::TimeIndex;

/// Midnight on Monday 2024-01-01.
pub fn monday() -> NaiveDateTime {
    at(2024, 1, 1, 0, 0)
}

pub fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test timestamp")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// `days` days at 15 minute resolution starting Monday 2024-01-01.
pub fn quarter_hour_index(days: usize) -> TimeIndex {
    TimeIndex::regular(monday(), TimeDelta::minutes(15), days * 96).expect("index should build")
}

/// Generator over `days` quarter-hour days with optional holidays.
pub fn generator(
    days: usize,
    holidays: &[NaiveDate],
    holiday_is_sunday: bool,
) -> IndustrialLoadProfile {
    let calendar: HolidayCalendar = holidays.iter().copied().collect();
    IndustrialLoadProfile::new(quarter_hour_index(days), Some(&calendar), holiday_is_sunday)
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ind-profile-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}
