//! Bucket definitions and the scaling factors attached to them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ProfileError;

/// Day-type group a weekday label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayGroup {
    Week,
    Weekend,
    Holiday,
}

impl DayGroup {
    pub const ALL: [DayGroup; 3] = [DayGroup::Week, DayGroup::Weekend, DayGroup::Holiday];

    /// Key used for this group in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            DayGroup::Week => "week",
            DayGroup::Weekend => "weekend",
            DayGroup::Holiday => "holiday",
        }
    }
}

/// Time-of-day sub-window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayPeriod {
    Day,
    Night,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 2] = [DayPeriod::Day, DayPeriod::Night];

    pub fn key(self) -> &'static str {
        match self {
            DayPeriod::Day => "day",
            DayPeriod::Night => "night",
        }
    }
}

/// One of the six day-type × time-of-day classification slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bucket {
    pub group: DayGroup,
    pub period: DayPeriod,
}

impl Bucket {
    pub const fn new(group: DayGroup, period: DayPeriod) -> Self {
        Self { group, period }
    }

    /// All buckets, grouped by day type.
    pub const ALL: [Bucket; 6] = [
        Bucket::new(DayGroup::Week, DayPeriod::Day),
        Bucket::new(DayGroup::Week, DayPeriod::Night),
        Bucket::new(DayGroup::Weekend, DayPeriod::Day),
        Bucket::new(DayGroup::Weekend, DayPeriod::Night),
        Bucket::new(DayGroup::Holiday, DayPeriod::Day),
        Bucket::new(DayGroup::Holiday, DayPeriod::Night),
    ];
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group.key(), self.period.key())
    }
}

/// Day and night factor of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayNightFactors {
    pub day: f64,
    pub night: f64,
}

impl DayNightFactors {
    pub fn get(&self, period: DayPeriod) -> f64 {
        match period {
            DayPeriod::Day => self.day,
            DayPeriod::Night => self.night,
        }
    }
}

/// Complete, validated set of six factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketFactors {
    pub week: DayNightFactors,
    pub weekend: DayNightFactors,
    pub holiday: DayNightFactors,
}

impl BucketFactors {
    pub fn group(&self, group: DayGroup) -> DayNightFactors {
        match group {
            DayGroup::Week => self.week,
            DayGroup::Weekend => self.weekend,
            DayGroup::Holiday => self.holiday,
        }
    }

    pub fn factor(&self, bucket: Bucket) -> f64 {
        self.group(bucket.group).get(bucket.period)
    }
}

/// Scaling factors keyed by group (`week`, `weekend`, `holiday`) and
/// sub-window (`day`, `night`), as written in configuration.
///
/// The map form lets configuration omit entries; [`ProfileFactors::validate`]
/// checks that all six are present before any of them is used.
///
/// ```toml
/// week = { day = 0.8, night = 0.6 }
/// weekend = { day = 0.9, night = 0.7 }
/// holiday = { day = 0.9, night = 0.7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileFactors(BTreeMap<String, BTreeMap<String, f64>>);

impl Default for ProfileFactors {
    fn default() -> Self {
        Self::empty()
            .with(DayGroup::Week, 0.8, 0.6)
            .with(DayGroup::Weekend, 0.9, 0.7)
            .with(DayGroup::Holiday, 0.9, 0.7)
    }
}

impl ProfileFactors {
    /// A mapping with no entries at all.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// All six factors set to `value`.
    pub fn uniform(value: f64) -> Self {
        DayGroup::ALL
            .into_iter()
            .fold(Self::empty(), |f, group| f.with(group, value, value))
    }

    /// Sets the day and night factor of `group`.
    pub fn with(mut self, group: DayGroup, day: f64, night: f64) -> Self {
        self.set(group.key(), DayPeriod::Day.key(), day);
        self.set(group.key(), DayPeriod::Night.key(), night);
        self
    }

    pub fn set(&mut self, group: &str, period: &str, value: f64) {
        self.0
            .entry(group.to_string())
            .or_default()
            .insert(period.to_string(), value);
    }

    pub fn get(&self, group: &str, period: &str) -> Option<f64> {
        self.0.get(group).and_then(|g| g.get(period)).copied()
    }

    /// Removes a single sub-window entry, returning its value.
    pub fn remove(&mut self, group: &str, period: &str) -> Option<f64> {
        self.0.get_mut(group).and_then(|g| g.remove(period))
    }

    /// Removes a whole group.
    pub fn remove_group(&mut self, group: &str) -> bool {
        self.0.remove(group).is_some()
    }

    /// Checks that every group has both sub-windows and that each factor is
    /// a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Configuration`] naming the first missing or
    /// invalid entry, checked in `week`, `weekend`, `holiday` order.
    pub fn validate(&self) -> Result<BucketFactors, ProfileError> {
        let resolve = |group: DayGroup| -> Result<DayNightFactors, ProfileError> {
            let entries = self.0.get(group.key()).ok_or_else(|| {
                ProfileError::configuration(
                    format!("profile_factors.{}", group.key()),
                    format!("missing entry for '{}'", group.key()),
                )
            })?;

            let value = |period: DayPeriod| -> Result<f64, ProfileError> {
                let field = format!("profile_factors.{}.{}", group.key(), period.key());
                let v = *entries.get(period.key()).ok_or_else(|| {
                    ProfileError::configuration(
                        field.as_str(),
                        format!(
                            "missing entry for '{}' in '{}'",
                            period.key(),
                            group.key()
                        ),
                    )
                })?;
                if !v.is_finite() || v < 0.0 {
                    return Err(ProfileError::configuration(
                        field,
                        format!("must be a finite value >= 0, got {v}"),
                    ));
                }
                Ok(v)
            };

            Ok(DayNightFactors {
                day: value(DayPeriod::Day)?,
                night: value(DayPeriod::Night)?,
            })
        };

        Ok(BucketFactors {
            week: resolve(DayGroup::Week)?,
            weekend: resolve(DayGroup::Weekend)?,
            holiday: resolve(DayGroup::Holiday)?,
        })
    }
}
