//! CLI integration tests driving the hospital binary end to end.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hospital_flow_cli_{name}_{}", std::process::id()))
}

fn home_lines(log: &str) -> usize {
    log.lines()
        .filter(|line| line.ends_with("is already at home"))
        .count()
}

#[test]
fn direct_form_sends_every_patient_home() {
    let bin = env!("CARGO_BIN_EXE_hospital_flow");
    let out = temp_path("direct.log");
    let output = Command::new(bin)
        .args(["3", out.to_str().expect("utf-8 temp path")])
        .output()
        .expect("failed to run hospital binary");
    assert!(
        output.status.success(),
        "run exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("HOSPITAL SUMMARY"),
        "summary missing from output"
    );
    assert!(stdout.contains("patients=3 departed=3"));
    // Event lines are echoed to the console as well as the file.
    assert_eq!(home_lines(&stdout), 3);

    let log = fs::read_to_string(&out).expect("read event log");
    assert_eq!(home_lines(&log), 3);
    fs::remove_file(&out).ok();
}

#[test]
fn indirect_form_reads_parameters_from_file() {
    let bin = env!("CARGO_BIN_EXE_hospital_flow");
    let out = temp_path("indirect.log");
    let input = temp_path("indirect_input.txt");
    fs::write(
        &input,
        format!("2 {}\n", out.to_str().expect("utf-8 temp path")),
    )
    .expect("write input file");

    let output = Command::new(bin)
        .args(["-i", input.to_str().expect("utf-8 temp path")])
        .output()
        .expect("failed to run hospital binary");
    assert!(
        output.status.success(),
        "run exited with non-zero status: {:?}",
        output.status
    );

    let log = fs::read_to_string(&out).expect("read event log");
    assert_eq!(home_lines(&log), 2);
    fs::remove_file(&out).ok();
    fs::remove_file(&input).ok();
}

#[test]
fn malformed_invocation_reports_and_exits_cleanly() {
    let bin = env!("CARGO_BIN_EXE_hospital_flow");
    let output = Command::new(bin)
        .arg("3")
        .output()
        .expect("failed to run hospital binary");

    // Startup errors never fail the process.
    assert!(
        output.status.success(),
        "malformed run exited with non-zero status: {:?}",
        output.status
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Incorrect input format");
}
