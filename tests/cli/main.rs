use std::{path::PathBuf, process::Command};

fn workdir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jet_emissions_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Generates flights with unknown tail numbers, so that diagnostics are logged
fn generate(dir: &PathBuf) -> PathBuf {
    let flights = dir.join("flights.json");
    let output = Command::new(env!("CARGO_BIN_EXE_generate_flights"))
        .args(["--seed", "1", "--flights", "200", "--unknown-ratio", "0.2", "--output"])
        .arg(&flights)
        .output()
        .unwrap();
    assert!(output.status.success());
    flights
}

fn aggregate(flights: &PathBuf, format: &str) -> std::process::Output {
    let output = Command::new(env!("CARGO_BIN_EXE_aggregate"))
        .args(["--format", format, "--input"])
        .arg(flights)
        .output()
        .unwrap();
    assert!(output.status.success());
    output
}

/// Logs and diagnostics go to stderr; stdout only carries the report.
#[test]
fn json_report_is_valid() {
    let dir = workdir("json");
    let flights = generate(&dir);

    let output = aggregate(&flights, "json");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["totals"].as_array().unwrap().len(), 8);
    assert!(!report["diagnostics"].as_array().unwrap().is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no aircraft type found"));

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn csv_report_has_no_logs() {
    let dir = workdir("csv");
    let flights = generate(&dir);

    let output = aggregate(&flights, "csv");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("entity,aircraft_type,flights,distance_km,emissions_kg")
    );
    assert_eq!(lines.count(), 8);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_table_fails() {
    let dir = workdir("missing");
    let flights = generate(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_aggregate"))
        .args(["--rates", "does/not/exist.csv", "--input"])
        .arg(&flights)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("does/not/exist.csv"));

    std::fs::remove_dir_all(dir).unwrap();
}
