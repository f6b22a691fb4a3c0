//! Industrial load profile generation: options, validation, the generator
//! and its output.

pub mod error;
/// Buckets, day-type groups and scaling factors.
pub mod factors;
pub mod industrial;
/// Day window, weekday groupings and their validation.
pub mod options;
pub mod output;
/// Per-bucket energy report of a generated profile.
pub mod summary;

pub use error::ProfileError;
pub use factors::{Bucket, BucketFactors, DayGroup, DayNightFactors, DayPeriod, ProfileFactors};
pub use industrial::IndustrialLoadProfile;
pub use options::{DayNightWindow, ResolvedOptions, SimpleProfileOptions};
pub use output::LoadProfile;
pub use summary::{BucketStats, ProfileSummary};
