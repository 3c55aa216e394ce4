use std::path::PathBuf;
use std::process::Command;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("crates/tceq-monitoring/tests/fixtures")
}

fn report_command(workdir: &std::path::Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tceq-report"));
    command
        .current_dir(workdir)
        .env_remove("REPORT_DATA_DIR")
        .env_remove("REPORT_OUTPUT_DIR")
        .env_remove("REPORT_AS_OF")
        .env("APP_LOG_LEVEL", "warn");
    command
}

#[test]
fn render_writes_charts_and_prints_summary() {
    let workdir = tempfile::tempdir().expect("tempdir");
    let out_dir = workdir.path().join("charts");

    let output = report_command(workdir.path())
        .arg("render")
        .arg("--data-dir")
        .arg(fixtures_dir())
        .arg("--out-dir")
        .arg(&out_dir)
        .args(["--as-of", "2024-03-15"])
        .output()
        .expect("binary runs");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Monitoring projects by year"));
    assert!(stdout.contains("FY2023"));
    assert!(stdout.contains("November 30, 2021"));

    for name in [
        "projects_per_year.svg",
        "monitoring_days_per_year.svg",
        "onsite_investigations.svg",
    ] {
        assert!(out_dir.join(name).exists(), "{name} missing");
    }
}

#[test]
fn json_format_prints_machine_readable_summary() {
    let workdir = tempfile::tempdir().expect("tempdir");

    let output = report_command(workdir.path())
        .arg("render")
        .arg("--data-dir")
        .arg(fixtures_dir())
        .args(["--as-of", "2024-03-15", "--format", "json"])
        .output()
        .expect("binary runs");

    assert!(output.status.success());
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(summary["regional_van"]["distinct_investigations"], 4);
    assert_eq!(summary["onsite_investigations"].as_array().map(Vec::len), Some(6));
    assert!(workdir.path().join("output/onsite_investigations.svg").exists());
}

#[test]
fn missing_data_dir_exits_with_error() {
    let workdir = tempfile::tempdir().expect("tempdir");

    let output = report_command(workdir.path())
        .args(["render", "--data-dir", "no-such-dir", "--as-of", "2024-03-15"])
        .output()
        .expect("binary runs");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("application error: dataset error"));
    assert!(stderr.contains("monitoring_projects.csv"));
}

#[test]
fn as_of_defaults_to_latest_record_date() {
    let workdir = tempfile::tempdir().expect("tempdir");

    let output = report_command(workdir.path())
        .arg("render")
        .arg("--data-dir")
        .arg(fixtures_dir())
        .args(["--format", "json"])
        .output()
        .expect("binary runs");

    assert!(output.status.success());
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(summary["as_of"], "2024-01-20");
    let years: Vec<i64> = summary["project_years"]
        .as_array()
        .expect("project years")
        .iter()
        .filter_map(|entry| entry["year"].as_i64())
        .collect();
    assert!(years.iter().all(|year| *year < 2024));
    assert_eq!(summary["onsite_investigations"].as_array().map(Vec::len), Some(6));
}
