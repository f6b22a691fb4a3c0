use chrono::NaiveDateTime;

use super::factors::Bucket;

/// A normalized load profile in power units (demand per hour).
///
/// Values line up one-to-one with the timestamps of the index they were
/// generated for, together with the bucket each timestamp fell into.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProfile {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
    buckets: Vec<Option<Bucket>>,
    interval_hours: f64,
    annual_demand: f64,
}

impl LoadProfile {
    pub(crate) fn new(
        timestamps: Vec<NaiveDateTime>,
        values: Vec<f64>,
        buckets: Vec<Option<Bucket>>,
        interval_hours: f64,
        annual_demand: f64,
    ) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        debug_assert_eq!(timestamps.len(), buckets.len());
        Self {
            timestamps,
            values,
            buckets,
            interval_hours,
            annual_demand,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn buckets(&self) -> &[Option<Bucket>] {
        &self.buckets
    }

    /// `(timestamp, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    pub fn interval_hours(&self) -> f64 {
        self.interval_hours
    }

    /// Demand the profile was normalized to.
    pub fn annual_demand(&self) -> f64 {
        self.annual_demand
    }

    /// Number of timestamps whose weekday label matched no group.
    pub fn unclassified(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_none()).count()
    }

    /// Energy over the whole index: `sum(values) * interval_hours`.
    pub fn total_energy(&self) -> f64 {
        self.values.iter().sum::<f64>() * self.interval_hours
    }

    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    /// Hours at peak power needed to deliver the annual demand.
    pub fn full_load_hours(&self) -> f64 {
        let peak = self.peak();
        if peak > 0.0 {
            self.annual_demand / peak
        } else {
            0.0
        }
    }
}
