use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Failure to load a holiday calendar from disk.
#[derive(Debug, Error)]
pub enum HolidayError {
    #[error("cannot read holiday file \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid holiday record: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of a holiday CSV file (`date,name`).
#[derive(Debug, Deserialize)]
struct HolidayRecord {
    date: NaiveDate,
    #[serde(default)]
    name: String,
}

/// A set of holiday dates, each with an optional human-readable name.
///
/// Only the dates matter for classification; names are carried so a
/// calendar loaded from a file can be reported back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    days: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday, replacing the name if the date is already present.
    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.days.insert(date, name.into());
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Name of the holiday on `date`, if it is one.
    pub fn name(&self, date: NaiveDate) -> Option<&str> {
        self.days.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Holiday dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Merges another calendar into this one.
    pub fn extend(&mut self, other: HolidayCalendar) {
        self.days.extend(other.days);
    }

    /// Parses a headed CSV with a `date` column (ISO `YYYY-MM-DD`) and an
    /// optional `name` column.
    ///
    /// # Errors
    ///
    /// Returns [`HolidayError::Csv`] for malformed rows or dates.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, HolidayError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut calendar = Self::new();
        for record in rdr.deserialize::<HolidayRecord>() {
            let record = record?;
            calendar.insert(record.date, record.name);
        }
        Ok(calendar)
    }

    /// Loads a holiday CSV file from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HolidayError::Io`] if the file cannot be opened and
    /// [`HolidayError::Csv`] if its contents are invalid.
    pub fn from_csv_path(path: &Path) -> Result<Self, HolidayError> {
        let file = File::open(path).map_err(|source| HolidayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_reader(file)
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().map(|d| (d, String::new())).collect(),
        }
    }
}

impl FromIterator<(NaiveDate, String)> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, String)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
