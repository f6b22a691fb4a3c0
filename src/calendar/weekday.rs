//! Per-timestamp weekday labels.
//!
//! Labels follow ISO numbering (1 = Monday … 7 = Sunday) with 0 reserved
//! for holidays.

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use super::holidays::HolidayCalendar;
use crate::time_index::TimeIndex;

/// Label assigned to holidays.
pub const HOLIDAY_LABEL: u8 = 0;
/// ISO label of Sunday.
pub const SUNDAY_LABEL: u8 = 7;
/// Largest valid label.
pub const MAX_LABEL: u8 = 7;

/// ISO weekday number of a timestamp (1 = Monday … 7 = Sunday).
pub fn iso_weekday(timestamp: &NaiveDateTime) -> u8 {
    timestamp.weekday().number_from_monday() as u8
}

/// Weekday labels for every timestamp of an index, computed once.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use ind_profile::calendar::{HolidayCalendar, WeekdayClassification};
/// use ind_profile::time_index::TimeIndex;
///
/// // Wednesday 2024-01-03, one sample per day for three days
/// let start = NaiveDate::from_ymd_opt(2024, 1, 3)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .unwrap();
/// let index = TimeIndex::regular(start, TimeDelta::days(1), 3).unwrap();
/// let holidays: HolidayCalendar = [NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()]
///     .into_iter()
///     .collect();
///
/// let classes = WeekdayClassification::new(&index, Some(&holidays), false);
/// assert_eq!(classes.labels(), &[3, 0, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayClassification {
    labels: Vec<u8>,
}

impl WeekdayClassification {
    /// Labels each timestamp with its ISO weekday, then overrides dates in
    /// `holidays` with [`HOLIDAY_LABEL`]. With `holiday_is_sunday`, Sundays
    /// are labeled as holidays too.
    pub fn new(
        index: &TimeIndex,
        holidays: Option<&HolidayCalendar>,
        holiday_is_sunday: bool,
    ) -> Self {
        let labels: Vec<u8> = index
            .iter()
            .map(|ts| {
                let weekday = iso_weekday(ts);
                let is_holiday = holidays.is_some_and(|h| h.contains(ts.date()));
                if is_holiday || (holiday_is_sunday && weekday == SUNDAY_LABEL) {
                    HOLIDAY_LABEL
                } else {
                    weekday
                }
            })
            .collect();

        let classes = Self { labels };
        debug!(
            steps = classes.len(),
            holiday_steps = classes.count(HOLIDAY_LABEL),
            holiday_is_sunday,
            "weekday classification built"
        );
        classes
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn get(&self, position: usize) -> Option<u8> {
        self.labels.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of timestamps carrying `label`.
    pub fn count(&self, label: u8) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}
