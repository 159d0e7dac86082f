use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "1,2.1\n2,3.9\n3,6.2\n4,7.8\n2,0\n";

fn fitplot() -> Command {
    let mut cmd = Command::cargo_bin("fitplot").unwrap();
    cmd.env_remove("FITPLOT_INPUT").env_remove("FITPLOT_LOG");
    cmd
}

fn write_input(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn ascii_plot_of_valid_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "data.txt", SAMPLE);

    fitplot()
        .arg("ascii")
        .arg(&input)
        .args(["--width", "40", "--height", "12"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Plot of Data with Linear Equation"))
        .stdout(predicate::str::contains("o Data  - y = 2x + 0"));
}

#[test]
fn default_command_reads_data_txt_and_falls_back_to_ascii_without_terminal() {
    let dir = TempDir::new().unwrap();
    write_input(dir.path(), "data.txt", SAMPLE);

    fitplot()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("y = 2x + 0"));
}

#[test]
fn empty_input_exits_with_input_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "empty.txt", "");

    fitplot()
        .arg("ascii")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Input is empty"));
}

#[test]
fn missing_input_exits_with_input_error() {
    let dir = TempDir::new().unwrap();

    fitplot()
        .arg("ascii")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to open input"));
}

#[test]
fn non_numeric_parameter_line_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "bad.txt", "1,2\nabc,1.0\n");

    fitplot()
        .arg("ascii")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Line 2: invalid number 'abc'"));
}

#[test]
fn malformed_lines_skip_by_default_and_fail_in_strict_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "mixed.txt", "1,2,3\n3,4\n1,0\n");

    fitplot()
        .arg("ascii")
        .arg(&input)
        .arg("--summary")
        .assert()
        .success()
        .stderr(predicate::str::contains("Lines: 3 read, 1 observations, 1 skipped"));

    fitplot()
        .arg("ascii")
        .arg(&input)
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Line 1: expected `x,y`"));
}

#[test]
fn render_writes_svg_with_legend() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "data.txt", SAMPLE);
    let output = dir.path().join("figure.svg");

    fitplot()
        .arg("render")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("y = 2x + 0"));
    assert!(svg.contains("X Values"));
}

#[test]
fn render_rejects_non_svg_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "data.txt", SAMPLE);

    fitplot()
        .arg("render")
        .arg(&input)
        .args(["-o", "figure.png"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("only .svg"));
}

#[test]
fn export_writes_fitted_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "data.txt", "1,2\n2,4\n2,0\n");
    let output = dir.path().join("fitted.csv");

    fitplot()
        .arg("export")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv, "x,y,y_fit,residual\n1.0,2.0,2.0,0.0\n2.0,4.0,4.0,0.0\n");
}

#[test]
fn log_file_records_skipped_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "mixed.txt", "1,2,3\n3,4\n1,0\n");
    let log = dir.path().join("run.log");

    fitplot()
        .arg("ascii")
        .arg(&input)
        .arg("--log")
        .arg(&log)
        .assert()
        .success();

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("skipping data line"));
    assert!(text.contains("loaded input"));
}
