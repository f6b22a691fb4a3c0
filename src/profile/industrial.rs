use tracing::{debug, warn};

use super::error::ProfileError;
use super::factors::Bucket;
use super::options::{ResolvedOptions, SimpleProfileOptions};
use super::output::LoadProfile;
use crate::calendar::{HolidayCalendar, WeekdayClassification};
use crate::time_index::TimeIndex;

/// Generator for industrial heat or electricity load profiles.
///
/// Classifies every timestamp of an index once, at construction, into a
/// weekday label; each call to [`simple_profile`](Self::simple_profile) then
/// maps those labels and the time of day onto six scaling factors and
/// normalizes the result to an annual demand. Calls only read the
/// classification, so one generator can serve any number of profiles.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use ind_profile::profile::{IndustrialLoadProfile, SimpleProfileOptions};
/// use ind_profile::time_index::TimeIndex;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let index = TimeIndex::regular(start, TimeDelta::minutes(15), 96).unwrap();
/// let generator = IndustrialLoadProfile::new(index, None, false);
///
/// let profile = generator
///     .simple_profile(960.0, &SimpleProfileOptions::default())
///     .unwrap();
/// assert!((profile.total_energy() - 960.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct IndustrialLoadProfile {
    index: TimeIndex,
    classes: WeekdayClassification,
}

impl IndustrialLoadProfile {
    /// Builds the generator and its weekday classification.
    ///
    /// # Arguments
    ///
    /// * `index` - Uniformly sampled timestamps the profile is generated for
    /// * `holidays` - Dates labeled as holidays, if any
    /// * `holiday_is_sunday` - Also label every Sunday as a holiday
    pub fn new(
        index: TimeIndex,
        holidays: Option<&HolidayCalendar>,
        holiday_is_sunday: bool,
    ) -> Self {
        let classes = WeekdayClassification::new(&index, holidays, holiday_is_sunday);
        Self { index, classes }
    }

    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn classification(&self) -> &WeekdayClassification {
        &self.classes
    }

    /// Bucket of every timestamp under `options`; `None` where the weekday
    /// label belongs to no group.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Configuration`] if the options are invalid.
    pub fn classify(
        &self,
        options: &SimpleProfileOptions,
    ) -> Result<Vec<Option<Bucket>>, ProfileError> {
        let resolved = options.resolve()?;
        Ok(self.buckets(&resolved))
    }

    fn buckets(&self, resolved: &ResolvedOptions) -> Vec<Option<Bucket>> {
        self.index
            .iter()
            .zip(self.classes.labels())
            .map(|(ts, &label)| resolved.bucket(label, ts.time()))
            .collect()
    }

    /// Creates a load profile normalized to `annual_demand`.
    ///
    /// Each timestamp takes the factor of its bucket; the raw series is then
    /// scaled so that `sum(values) * interval_hours == annual_demand`, which
    /// puts the values in power units (kW for an annual demand in kWh).
    /// Timestamps in no bucket get zero and are logged as a warning.
    ///
    /// # Errors
    ///
    /// * [`ProfileError::Configuration`] for invalid options or a negative or
    ///   non-finite `annual_demand`. Nothing is computed in that case. Also
    ///   returned (field `index`) when the step is too short for the demand
    ///   to produce finite power values.
    /// * [`ProfileError::Degenerate`] if the raw factors sum to zero (all
    ///   factors zero, nothing classified, or an empty index).
    pub fn simple_profile(
        &self,
        annual_demand: f64,
        options: &SimpleProfileOptions,
    ) -> Result<LoadProfile, ProfileError> {
        if !annual_demand.is_finite() || annual_demand < 0.0 {
            return Err(ProfileError::configuration(
                "annual_demand",
                format!("must be a finite value >= 0, got {annual_demand}"),
            ));
        }

        let resolved = options.resolve()?;
        let factors = resolved.factors();

        let buckets = self.buckets(&resolved);
        let raw: Vec<f64> = buckets
            .iter()
            .map(|b| b.map_or(0.0, |bucket| factors.factor(bucket)))
            .collect();

        let unclassified = buckets.iter().filter(|b| b.is_none()).count();
        if unclassified > 0 {
            warn!(
                unclassified,
                steps = buckets.len(),
                "timestamps with weekday labels outside week/weekend/holiday set to zero"
            );
        }

        let raw_sum: f64 = raw.iter().sum();
        if raw_sum <= 0.0 {
            return Err(ProfileError::Degenerate { steps: raw.len() });
        }

        let interval_hours = self.index.interval_hours();
        let scale = annual_demand / (raw_sum * interval_hours);
        let values: Vec<f64> = raw.into_iter().map(|r| r * scale).collect();
        if !scale.is_finite() || values.iter().any(|v| !v.is_finite()) {
            return Err(ProfileError::configuration(
                "index",
                format!(
                    "cannot normalize {annual_demand} over {} steps of {interval_hours} h",
                    values.len()
                ),
            ));
        }

        debug!(
            steps = buckets.len(),
            interval_hours,
            annual_demand,
            "industrial load profile generated"
        );

        Ok(LoadProfile::new(
            self.index.timestamps().to_vec(),
            values,
            buckets,
            interval_hours,
            annual_demand,
        ))
    }
}
