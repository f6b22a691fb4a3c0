//! Uniformly sampled timestamp sequences.

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;

const NANOS_PER_HOUR: f64 = 3.6e12;
const MICROS_PER_HOUR: f64 = 3.6e9;

/// Reasons a timestamp sequence cannot serve as a profile index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeIndexError {
    #[error("sampling step must be positive, got {0}")]
    NonPositiveStep(TimeDelta),

    #[error("at least two timestamps are needed to infer the sampling step, got {0}")]
    TooShort(usize),

    #[error("timestamps must be strictly increasing (position {position})")]
    NotIncreasing { position: usize },

    #[error("non-uniform sampling at position {position}: expected step {expected}, found {found}")]
    NonUniform {
        position: usize,
        expected: TimeDelta,
        found: TimeDelta,
    },

    #[error("index runs past the supported date range")]
    Overflow,
}

/// An ordered, strictly increasing sequence of timestamps with a fixed step.
///
/// The step is what turns an energy-normalized series into power values, so
/// every constructor guarantees it is uniform across the whole index.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use ind_profile::time_index::TimeIndex;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let index = TimeIndex::regular(start, TimeDelta::minutes(15), 96).unwrap();
///
/// assert_eq!(index.len(), 96);
/// assert_eq!(index.interval_hours(), 0.25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeIndex {
    timestamps: Vec<NaiveDateTime>,
    step: TimeDelta,
}

impl TimeIndex {
    /// Builds `periods` timestamps starting at `start`, `step` apart.
    ///
    /// `periods == 0` yields an empty index that still carries its step.
    ///
    /// # Errors
    ///
    /// Returns [`TimeIndexError::NonPositiveStep`] for a zero or negative
    /// step and [`TimeIndexError::Overflow`] if the range leaves chrono's
    /// representable dates.
    pub fn regular(
        start: NaiveDateTime,
        step: TimeDelta,
        periods: usize,
    ) -> Result<Self, TimeIndexError> {
        if step <= TimeDelta::zero() {
            return Err(TimeIndexError::NonPositiveStep(step));
        }

        // Range check up front so a huge count fails before allocating
        if let Some(last) = periods.checked_sub(1) {
            i32::try_from(last)
                .ok()
                .and_then(|n| step.checked_mul(n))
                .and_then(|span| start.checked_add_signed(span))
                .ok_or(TimeIndexError::Overflow)?;
        }

        let mut timestamps = Vec::with_capacity(periods);
        let mut current = start;
        for i in 0..periods {
            if i > 0 {
                current = current
                    .checked_add_signed(step)
                    .ok_or(TimeIndexError::Overflow)?;
            }
            timestamps.push(current);
        }

        Ok(Self { timestamps, step })
    }

    /// Wraps explicit timestamps, inferring the step from the first pair.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two timestamps are given, if the sequence is not
    /// strictly increasing, or if any gap differs from the first one.
    pub fn from_timestamps(timestamps: Vec<NaiveDateTime>) -> Result<Self, TimeIndexError> {
        if timestamps.len() < 2 {
            return Err(TimeIndexError::TooShort(timestamps.len()));
        }

        let step = timestamps[1] - timestamps[0];
        if step <= TimeDelta::zero() {
            return Err(TimeIndexError::NotIncreasing { position: 1 });
        }

        for (offset, pair) in timestamps.windows(2).enumerate() {
            let position = offset + 1;
            let found = pair[1] - pair[0];
            if found <= TimeDelta::zero() {
                return Err(TimeIndexError::NotIncreasing { position });
            }
            if found != step {
                return Err(TimeIndexError::NonUniform {
                    position,
                    expected: step,
                    found,
                });
            }
        }

        Ok(Self { timestamps, step })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Sampling step between consecutive timestamps.
    pub fn step(&self) -> TimeDelta {
        self.step
    }

    /// Sampling step expressed in hours (0.25 for a 15 minute index).
    ///
    /// Exact to the nanosecond; steps too long for a nanosecond count fall
    /// back to microseconds.
    pub fn interval_hours(&self) -> f64 {
        match self.step.num_nanoseconds() {
            Some(nanos) => nanos as f64 / NANOS_PER_HOUR,
            None => self.step.num_microseconds().unwrap_or(i64::MAX) as f64 / MICROS_PER_HOUR,
        }
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDateTime> + '_ {
        self.timestamps.iter()
    }

    pub fn first(&self) -> Option<NaiveDateTime> {
        self.timestamps.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDateTime> {
        self.timestamps.last().copied()
    }
}
