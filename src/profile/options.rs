//! Options accepted by [`IndustrialLoadProfile::simple_profile`].
//!
//! [`IndustrialLoadProfile::simple_profile`]: super::IndustrialLoadProfile::simple_profile

use chrono::NaiveTime;
use serde::Deserialize;

use super::error::ProfileError;
use super::factors::{Bucket, BucketFactors, DayGroup, DayPeriod, ProfileFactors};
use crate::calendar::MAX_LABEL;

const LABEL_SLOTS: usize = MAX_LABEL as usize + 1;

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// The "day" part of each calendar day, `[am, pm)`; everything else is night.
///
/// With `am > pm` the day part wraps past midnight. With `am == pm` it is
/// empty and every timestamp counts as night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayNightWindow {
    pub am: NaiveTime,
    pub pm: NaiveTime,
}

impl Default for DayNightWindow {
    fn default() -> Self {
        Self {
            am: hm(7, 0),
            pm: hm(23, 30),
        }
    }
}

impl DayNightWindow {
    pub fn new(am: NaiveTime, pm: NaiveTime) -> Self {
        Self { am, pm }
    }

    pub fn is_day(&self, time: NaiveTime) -> bool {
        if self.am <= self.pm {
            self.am <= time && time < self.pm
        } else {
            time >= self.am || time < self.pm
        }
    }

    pub fn period(&self, time: NaiveTime) -> DayPeriod {
        if self.is_day(time) {
            DayPeriod::Day
        } else {
            DayPeriod::Night
        }
    }
}

/// Day window, weekday groupings and scaling factors for a simple profile.
///
/// Deserializes from a TOML table where every key is optional:
///
/// ```toml
/// am = "07:00:00"
/// pm = "23:30:00"
/// week = [1, 2, 3, 4, 5]
/// weekend = [6, 7]
/// holiday = [0]
///
/// [profile_factors]
/// week = { day = 0.8, night = 0.6 }
/// weekend = { day = 0.9, night = 0.7 }
/// holiday = { day = 0.9, night = 0.7 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimpleProfileOptions {
    /// Start of the day window.
    pub am: NaiveTime,
    /// End of the day window (exclusive).
    pub pm: NaiveTime,
    /// Weekday labels treated as regular working days.
    pub week: Vec<u8>,
    /// Weekday labels treated as weekend days.
    pub weekend: Vec<u8>,
    /// Weekday labels treated as holidays.
    pub holiday: Vec<u8>,
    pub profile_factors: ProfileFactors,
}

impl Default for SimpleProfileOptions {
    fn default() -> Self {
        let window = DayNightWindow::default();
        Self {
            am: window.am,
            pm: window.pm,
            week: vec![1, 2, 3, 4, 5],
            weekend: vec![6, 7],
            holiday: vec![0],
            profile_factors: ProfileFactors::default(),
        }
    }
}

impl SimpleProfileOptions {
    pub fn with_window(mut self, am: NaiveTime, pm: NaiveTime) -> Self {
        self.am = am;
        self.pm = pm;
        self
    }

    pub fn with_groups(mut self, week: Vec<u8>, weekend: Vec<u8>, holiday: Vec<u8>) -> Self {
        self.week = week;
        self.weekend = weekend;
        self.holiday = holiday;
        self
    }

    pub fn with_factors(mut self, profile_factors: ProfileFactors) -> Self {
        self.profile_factors = profile_factors;
        self
    }

    pub fn window(&self) -> DayNightWindow {
        DayNightWindow::new(self.am, self.pm)
    }

    fn labels(&self, group: DayGroup) -> &[u8] {
        match group {
            DayGroup::Week => &self.week,
            DayGroup::Weekend => &self.weekend,
            DayGroup::Holiday => &self.holiday,
        }
    }

    /// Validates the options and resolves them into lookup tables.
    ///
    /// Factors are checked first, then the group sets: every label must be
    /// in `0..=7` and may belong to at most one group. Labels in no group
    /// are allowed; timestamps carrying them stay unclassified.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Configuration`] for the first problem found.
    pub fn resolve(&self) -> Result<ResolvedOptions, ProfileError> {
        let factors = self.profile_factors.validate()?;

        let mut groups: [Option<DayGroup>; LABEL_SLOTS] = [None; LABEL_SLOTS];
        for group in DayGroup::ALL {
            for &label in self.labels(group) {
                let slot = groups.get_mut(usize::from(label)).ok_or_else(|| {
                    ProfileError::configuration(
                        group.key(),
                        format!("weekday label {label} is outside 0..={MAX_LABEL}"),
                    )
                })?;
                if let Some(existing) = *slot {
                    if existing != group {
                        return Err(ProfileError::configuration(
                            group.key(),
                            format!(
                                "weekday label {label} is already assigned to '{}'",
                                existing.key()
                            ),
                        ));
                    }
                }
                *slot = Some(group);
            }
        }

        Ok(ResolvedOptions {
            window: self.window(),
            groups,
            factors,
        })
    }
}

/// Validated options ready for per-timestamp lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOptions {
    window: DayNightWindow,
    groups: [Option<DayGroup>; LABEL_SLOTS],
    factors: BucketFactors,
}

impl ResolvedOptions {
    pub fn window(&self) -> DayNightWindow {
        self.window
    }

    pub fn factors(&self) -> &BucketFactors {
        &self.factors
    }

    /// Group of a weekday label, `None` if no group claims it.
    pub fn group_of(&self, label: u8) -> Option<DayGroup> {
        self.groups.get(usize::from(label)).copied().flatten()
    }

    /// Bucket of a timestamp with weekday `label` at time of day `time`.
    pub fn bucket(&self, label: u8, time: NaiveTime) -> Option<Bucket> {
        self.group_of(label)
            .map(|group| Bucket::new(group, self.window.period(time)))
    }
}
