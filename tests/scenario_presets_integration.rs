mod common;

use std::fs;
use std::process::{Command, Output};

#[derive(Debug)]
struct Report {
    total_energy: f64,
    peak: f64,
    min: f64,
    unclassified: f64,
    full_load_hours: f64,
}

#[test]
fn presets_run_via_cli_and_produce_distinct_shapes() {
    let standard = run_and_parse(&["--preset", "standard", "--demand", "1000"]);
    let continuous = run_and_parse(&["--preset", "continuous", "--demand", "1000"]);
    let single_shift = run_and_parse(&["--preset", "single_shift", "--demand", "1000"]);

    for report in [&standard, &continuous, &single_shift] {
        assert!(
            (report.total_energy - 1000.0).abs() < 1e-3,
            "total energy should match demand: {report:?}"
        );
        assert_eq!(report.unclassified, 0.0);
        assert!(
            (report.full_load_hours - report.total_energy / report.peak).abs()
                < 1e-3 * report.full_load_hours,
            "full-load hours should be energy over peak: {report:?}"
        );
    }

    assert!(
        (continuous.peak - continuous.min).abs() < 1e-9,
        "continuous preset should be flat: {continuous:?}"
    );
    assert!(
        standard.peak > standard.min,
        "standard preset should not be flat: {standard:?}"
    );
    assert!(
        single_shift.peak / single_shift.min > standard.peak / standard.min,
        "single shift should be peakier than standard: {single_shift:?} vs {standard:?}"
    );
}

#[test]
fn scenario_file_with_holiday_csv_exports_profile() {
    let dir = common::scratch_dir("scenario");
    fs::write(dir.join("holidays.csv"), "date,name\n2024-01-03,Plant shutdown\n")
        .expect("holiday file should be writable");
    let scenario = dir.join("scenario.toml");
    fs::write(
        &scenario,
        r#"
[index]
start = "2024-01-01T00:00:00"
periods = 168
step_minutes = 60

[demand]
annual_demand = 840.0
holidays_file = "holidays.csv"
"#,
    )
    .expect("scenario file should be writable");
    let out = dir.join("profile.csv");

    let output = run(&[
        "--scenario",
        scenario.to_str().expect("utf-8 path"),
        "--out",
        out.to_str().expect("utf-8 path"),
    ]);
    assert_success(&output, "scenario run");

    let csv = fs::read_to_string(&out).expect("profile CSV should exist");
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 168);
    // Wednesday noon is the configured holiday
    assert!(
        rows[2 * 24 + 12].starts_with("2024-01-03T12:00:00,")
            && rows[2 * 24 + 12].ends_with(",holiday/day"),
        "unexpected row: {}",
        rows[2 * 24 + 12]
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_scenario_exits_with_error() {
    let dir = common::scratch_dir("invalid");
    let scenario = dir.join("broken.toml");
    fs::write(
        &scenario,
        r#"
[profile.profile_factors]
week = { day = 0.8, night = 0.6 }
weekend = { day = 0.9 }
holiday = { day = 0.9, night = 0.7 }
"#,
    )
    .expect("scenario file should be writable");

    let output = run(&["--scenario", scenario.to_str().expect("utf-8 path")]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("profile.profile_factors.weekend.night"),
        "stderr should name the missing factor: {stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_preset_exits_with_error() {
    let output = run(&["--preset", "three_shift"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ind-profile"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("ind-profile process should run")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn run_and_parse(args: &[&str]) -> Report {
    let output = run(args);
    assert_success(&output, &args.join(" "));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");

    Report {
        total_energy: parse_metric(&stdout, "Total energy:", ""),
        peak: parse_metric(&stdout, "Peak power:", ""),
        min: parse_metric(&stdout, "Minimum power:", ""),
        unclassified: parse_metric(&stdout, "Unclassified steps:", ""),
        full_load_hours: parse_metric(&stdout, "Full-load hours:", "h"),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from line `{line}`"))
}
