//! CSV export for generated load profiles.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::profile::LoadProfile;

/// Column header for CSV profile export.
const HEADER: &str = "timestamp,power,bucket";

/// Timestamp layout used in exported rows.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Exports a profile to a CSV file at the given path.
///
/// Writes a header row followed by one data row per timestamp. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `profile` - Generated load profile
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(profile: &LoadProfile, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(profile, buf)
}

/// Writes a profile as CSV to any writer.
///
/// Unclassified timestamps have an empty `bucket` column.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(profile: &LoadProfile, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for ((ts, value), bucket) in profile.iter().zip(profile.buckets()) {
        wtr.write_record(&[
            ts.format(TIMESTAMP_FORMAT).to_string(),
            format!("{value:.6}"),
            bucket.map(|b| b.to_string()).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    use crate::profile::{IndustrialLoadProfile, SimpleProfileOptions};
    use crate::time_index::TimeIndex;

    fn one_day_hourly() -> LoadProfile {
        let start = NaiveDate::from_ymd_opt(2024, 1, 6)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid start");
        let index = TimeIndex::regular(start, TimeDelta::hours(1), 24).expect("index");
        IndustrialLoadProfile::new(index, None, false)
            .simple_profile(24.0, &SimpleProfileOptions::default())
            .expect("profile")
    }

    fn render(profile: &LoadProfile) -> String {
        let mut buf = Vec::new();
        write_csv(profile, &mut buf).expect("csv export should succeed");
        String::from_utf8(buf).expect("csv output should be valid UTF-8")
    }

    #[test]
    fn header_and_row_count() {
        let csv = render(&one_day_hourly());
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(HEADER));
        // 24 data rows
        assert_eq!(lines.count(), 24);
    }

    #[test]
    fn rows_carry_timestamp_and_bucket() {
        let csv = render(&one_day_hourly());
        let first_row = csv.lines().nth(1).unwrap_or("");
        assert!(first_row.starts_with("2024-01-06T00:00:00,"));
        assert!(first_row.ends_with(",weekend/night"));
    }

    #[test]
    fn values_parse_back_to_demand() {
        let csv = render(&one_day_hourly());
        let mut rdr = csv::ReaderBuilder::new().from_reader(csv.as_bytes());
        let mut energy = 0.0_f64;
        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            let power: f64 = rec[1].parse().expect("power column should parse as f64");
            energy += power;
        }
        // six decimals per row
        assert!((energy - 24.0).abs() < 1e-4);
    }

    #[test]
    fn deterministic_output() {
        let profile = one_day_hourly();
        assert_eq!(render(&profile), render(&profile));
    }
}
