//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Deserialize;

use crate::calendar::HolidayCalendar;
use crate::profile::{DayGroup, ProfileError, ProfileFactors, SimpleProfileOptions};
use crate::time_index::TimeIndex;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the standard scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::standard`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Time index the profile is generated for.
    #[serde(default)]
    pub index: IndexConfig,
    /// Annual demand and holiday handling.
    #[serde(default)]
    pub demand: DemandConfig,
    /// Day window, weekday groups and scaling factors.
    #[serde(default)]
    pub profile: SimpleProfileOptions,
}

/// Time index parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// First timestamp (`YYYY-MM-DDTHH:MM:SS`).
    pub start: NaiveDateTime,
    /// Number of timestamps (must be > 0).
    pub periods: usize,
    /// Sampling step in minutes (must be > 0).
    pub step_minutes: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            // leap year at 15 minute resolution
            periods: 366 * 96,
            step_minutes: 15,
        }
    }
}

/// Annual demand and holiday parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandConfig {
    /// Total energy over the index (e.g. kWh; output is then kW).
    pub annual_demand: f64,
    /// Label every Sunday as a holiday.
    pub holiday_is_sunday: bool,
    /// Holiday dates given inline.
    pub holidays: Vec<NaiveDate>,
    /// Optional CSV file with a `date` column (and optional `name`).
    pub holidays_file: Option<PathBuf>,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            annual_demand: 1_000_000.0,
            holiday_is_sunday: false,
            holidays: Vec::new(),
            holidays_file: None,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"index.step_minutes"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl From<ProfileError> for ConfigError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Configuration { field, message } => Self {
                field: format!("profile.{field}"),
                message,
            },
            other => Self {
                field: "profile".to_string(),
                message: other.to_string(),
            },
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

impl ScenarioConfig {
    /// Returns the standard scenario: default window, groups and factors
    /// over 2024 at 15 minute resolution.
    pub fn standard() -> Self {
        Self {
            index: IndexConfig::default(),
            demand: DemandConfig::default(),
            profile: SimpleProfileOptions::default(),
        }
    }

    /// Returns the continuous-operation preset: every bucket weighted
    /// equally, which yields a flat profile.
    pub fn continuous() -> Self {
        Self {
            profile: SimpleProfileOptions::default().with_factors(ProfileFactors::uniform(1.0)),
            ..Self::standard()
        }
    }

    /// Returns the single-shift preset: a 06:00–14:00 working window with
    /// low off-shift and weekend demand, Sundays counted as holidays.
    pub fn single_shift() -> Self {
        Self {
            demand: DemandConfig {
                holiday_is_sunday: true,
                ..DemandConfig::default()
            },
            profile: SimpleProfileOptions::default()
                .with_window(hm(6, 0), hm(14, 0))
                .with_factors(
                    ProfileFactors::empty()
                        .with(DayGroup::Week, 1.0, 0.2)
                        .with(DayGroup::Weekend, 0.3, 0.15)
                        .with(DayGroup::Holiday, 0.15, 0.15),
                ),
            ..Self::standard()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["standard", "continuous", "single_shift"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "standard" => Ok(Self::standard()),
            "continuous" => Ok(Self::continuous()),
            "single_shift" => Ok(Self::single_shift()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// A relative `demand.holidays_file` is resolved against the directory
    /// of the scenario file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if let (Some(file), Some(dir)) = (cfg.demand.holidays_file.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = dir.join(&*file);
            }
        }
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let idx = &self.index;

        if idx.periods == 0 {
            errors.push(ConfigError {
                field: "index.periods".into(),
                message: "must be > 0".into(),
            });
        }
        if idx.step_minutes == 0 {
            errors.push(ConfigError {
                field: "index.step_minutes".into(),
                message: "must be > 0".into(),
            });
        }

        let d = &self.demand;
        if !d.annual_demand.is_finite() || d.annual_demand < 0.0 {
            errors.push(ConfigError {
                field: "demand.annual_demand".into(),
                message: format!("must be a finite value >= 0, got {}", d.annual_demand),
            });
        }

        if let Err(e) = self.profile.resolve() {
            errors.push(e.into());
        }

        errors
    }

    /// Builds the time index described by `[index]`.
    ///
    /// # Errors
    ///
    /// Returns a `ProfileError::TimeIndex` if the step is zero or the range
    /// overflows.
    pub fn time_index(&self) -> Result<TimeIndex, ProfileError> {
        let step = TimeDelta::minutes(i64::from(self.index.step_minutes));
        Ok(TimeIndex::regular(self.index.start, step, self.index.periods)?)
    }

    /// Collects inline holidays and, if configured, those of the holiday file.
    ///
    /// # Errors
    ///
    /// Returns a `ProfileError::Holidays` if the holiday file cannot be loaded.
    pub fn holiday_calendar(&self) -> Result<HolidayCalendar, ProfileError> {
        let mut calendar: HolidayCalendar = self.demand.holidays.iter().copied().collect();
        if let Some(path) = &self.demand.holidays_file {
            calendar.extend(HolidayCalendar::from_csv_path(path)?);
        }
        Ok(calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_preset_valid() {
        let cfg = ScenarioConfig::standard();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "standard should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_standard() {
        let cfg = ScenarioConfig::from_preset("standard");
        assert!(cfg.is_ok());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[index]
start = "2023-01-01T00:00:00"
periods = 8760
step_minutes = 60

[demand]
annual_demand = 250000.0
holiday_is_sunday = true
holidays = ["2023-01-01", "2023-12-25"]

[profile]
am = "06:00:00"
pm = "22:00:00"
week = [1, 2, 3, 4, 5]
weekend = [6, 7]
holiday = [0]

[profile.profile_factors]
week = { day = 1.0, night = 0.4 }
weekend = { day = 0.6, night = 0.3 }
holiday = { day = 0.3, night = 0.3 }
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.index.periods), Some(8760));
        assert_eq!(cfg.as_ref().map(|c| c.demand.holidays.len()), Some(2));
        assert_eq!(
            cfg.as_ref()
                .and_then(|c| c.profile.profile_factors.get("week", "night")),
            Some(0.4)
        );
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[index]
periods = 96
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_profile_option_rejected() {
        let toml = r#"
[profile]
lunch_break = "12:00:00"
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_zero_step() {
        let mut cfg = ScenarioConfig::standard();
        cfg.index.step_minutes = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "index.step_minutes"));
    }

    #[test]
    fn validation_catches_negative_demand() {
        let mut cfg = ScenarioConfig::standard();
        cfg.demand.annual_demand = -5.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "demand.annual_demand"));
    }

    #[test]
    fn validation_reports_missing_factor_with_profile_prefix() {
        let toml = r#"
[profile.profile_factors]
week = { day = 0.8, night = 0.6 }
weekend = { day = 0.9 }
holiday = { day = 0.9, night = 0.7 }
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("structure is valid TOML");
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "profile.profile_factors.weekend.night"),
            "expected missing weekend night: {errors:?}"
        );
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn single_shift_counts_sundays_as_holidays() {
        let cfg = ScenarioConfig::single_shift();
        assert!(cfg.demand.holiday_is_sunday);
        assert_eq!(cfg.profile.am, hm(6, 0));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[demand]
annual_demand = 42.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // demand overridden
        assert_eq!(cfg.as_ref().map(|c| c.demand.annual_demand), Some(42.0));
        // index kept default
        assert_eq!(cfg.as_ref().map(|c| c.index.step_minutes), Some(15));
        // profile kept default
        assert_eq!(
            cfg.as_ref().map(|c| c.profile.week.clone()),
            Some(vec![1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn time_index_follows_index_section() {
        let cfg = ScenarioConfig::standard();
        let index = cfg.time_index().expect("index should build");
        assert_eq!(index.len(), 366 * 96);
        assert_eq!(index.interval_hours(), 0.25);
    }

    #[test]
    fn holiday_calendar_merges_inline_dates() {
        let mut cfg = ScenarioConfig::standard();
        let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        cfg.demand.holidays = vec![new_year, new_year];
        let calendar = cfg.holiday_calendar().expect("no file to load");
        assert_eq!(calendar.len(), 1);
        assert!(calendar.contains(new_year));
    }
}
