use std::fs;
use std::path::Path;

use mouselink_core::{ReplayReport, replay_file};

fn load_expected_report(dir: &str) -> ReplayReport {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join("input.bin");
    let expected = load_expected_report(dir);

    let mut actual = replay_file(&input).expect("replay capture");
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_basic() {
    run_golden("tests/golden/basic");
}

#[test]
fn golden_noise_resync() {
    run_golden("tests/golden/noise_resync");
}

#[test]
fn golden_truncated_tail() {
    run_golden("tests/golden/truncated_tail");
}

#[test]
fn golden_reserved_bits() {
    run_golden("tests/golden/reserved_bits");
}

#[test]
fn golden_marker_in_body() {
    run_golden("tests/golden/marker_in_body");
}

#[test]
fn golden_truncated_tail_counts_incomplete() {
    let report = load_expected_report("tests/golden/truncated_tail");
    assert_eq!(report.summary.packets_decoded, 1);
    assert_eq!(report.summary.incomplete_packets, 1);
}

#[test]
fn golden_basic_covers_delta_extremes() {
    let report = load_expected_report("tests/golden/basic");
    let event = &report.events[2];
    assert_eq!((event.dx, event.dy), (255, -256));
    assert!(event.button_left && event.button_right && event.button_middle);
}
