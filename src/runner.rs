use tracing::info;

use crate::config::ScenarioConfig;
use crate::profile::{IndustrialLoadProfile, LoadProfile, ProfileError, ProfileSummary};

/// A generated profile together with its summary.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub profile: LoadProfile,
    pub summary: ProfileSummary,
}

/// Builds the index and holiday calendar of a scenario, then generates and
/// summarizes its profile.
///
/// # Errors
///
/// Propagates time index, holiday file, configuration and degenerate-profile
/// errors.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioRun, ProfileError> {
    let index = config.time_index()?;
    let holidays = config.holiday_calendar()?;
    info!(
        steps = index.len(),
        step_minutes = config.index.step_minutes,
        holidays = holidays.len(),
        holiday_is_sunday = config.demand.holiday_is_sunday,
        "generating industrial load profile"
    );

    let generator =
        IndustrialLoadProfile::new(index, Some(&holidays), config.demand.holiday_is_sunday);
    let profile = generator.simple_profile(config.demand.annual_demand, &config.profile)?;
    let summary = ProfileSummary::from_profile(&profile);

    Ok(ScenarioRun { profile, summary })
}
