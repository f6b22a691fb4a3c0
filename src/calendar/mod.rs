//! Day-type calendars: holiday sets and per-timestamp weekday labels.

/// Holiday dates supplied by an external calendar source.
pub mod holidays;
pub mod weekday;

pub use holidays::{HolidayCalendar, HolidayError};
pub use weekday::{HOLIDAY_LABEL, MAX_LABEL, SUNDAY_LABEL, WeekdayClassification};
