//! Industrial electricity and heat load profiles from day-type scaling factors.

/// Holiday calendars and weekday classification.
pub mod calendar;
pub mod config;
pub mod io;
/// Profile options, generation and reporting.
pub mod profile;
pub mod runner;
pub mod time_index;
