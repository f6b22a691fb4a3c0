//! Post-hoc summary statistics of a generated profile.

use std::fmt;

use super::factors::Bucket;
use super::output::LoadProfile;

/// Step count and energy of one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketStats {
    pub bucket: Bucket,
    /// Number of timestamps in the bucket.
    pub steps: usize,
    /// Energy delivered in the bucket (demand units, e.g. kWh).
    pub energy: f64,
    /// Fraction of the total energy, 0.0–1.0.
    pub share: f64,
}

/// Aggregate figures derived from a complete [`LoadProfile`].
///
/// Computed from the profile itself so the report always agrees with the
/// exported series.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    /// Per-bucket statistics in [`Bucket::ALL`] order.
    pub buckets: Vec<BucketStats>,
    pub steps: usize,
    pub interval_hours: f64,
    /// `sum(values) * interval_hours`.
    pub total_energy: f64,
    pub peak: f64,
    pub min: f64,
    /// Annual demand divided by peak power.
    pub full_load_hours: f64,
    /// Timestamps that matched no group.
    pub unclassified: usize,
}

impl ProfileSummary {
    pub fn from_profile(profile: &LoadProfile) -> Self {
        let dt = profile.interval_hours();
        let total_energy = profile.total_energy();

        let buckets = Bucket::ALL
            .into_iter()
            .map(|bucket| {
                let mut steps = 0_usize;
                let mut energy = 0.0_f64;
                for (b, v) in profile.buckets().iter().zip(profile.values()) {
                    if *b == Some(bucket) {
                        steps += 1;
                        energy += v * dt;
                    }
                }
                let share = if total_energy > 0.0 {
                    energy / total_energy
                } else {
                    0.0
                };
                BucketStats {
                    bucket,
                    steps,
                    energy,
                    share,
                }
            })
            .collect();

        Self {
            buckets,
            steps: profile.len(),
            interval_hours: dt,
            total_energy,
            peak: profile.peak(),
            min: profile.min(),
            full_load_hours: profile.full_load_hours(),
            unclassified: profile.unclassified(),
        }
    }
}

impl fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Profile Summary ---")?;
        writeln!(
            f,
            "Steps:                 {} ({:.4} h each)",
            self.steps, self.interval_hours
        )?;
        writeln!(f, "Total energy:          {:.3}", self.total_energy)?;
        writeln!(f, "Peak power:            {:.6}", self.peak)?;
        writeln!(f, "Minimum power:         {:.6}", self.min)?;
        writeln!(f, "Full-load hours:       {:.2} h", self.full_load_hours)?;
        writeln!(f, "Unclassified steps:    {}", self.unclassified)?;
        for stats in &self.buckets {
            writeln!(
                f,
                "{:<23}{:>7} steps  {:>6.2}%",
                format!("{}:", stats.bucket),
                stats.steps,
                100.0 * stats.share
            )?;
        }
        Ok(())
    }
}
