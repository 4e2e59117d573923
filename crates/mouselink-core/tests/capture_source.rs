use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use mouselink_core::{ReplayError, replay_file};

fn temp_capture(name: &str, bytes: &[u8]) -> PathBuf {
    let mut path = std::env::temp_dir();
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("mouselink_{name}_{unique}.bin"));
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn replay_reads_capture_file() {
    let path = temp_capture(
        "two_packets",
        &[
            0xAA, 0x01, 0x00, 0x01, 0x00, 0x00, 0xAA, 0xFF, 0x01, 0xFF, 0x01, 0x07,
        ],
    );
    let report = replay_file(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(report.input.bytes, 12);
    assert_eq!(report.summary.packets_decoded, 2);
    assert_eq!((report.events[1].dx, report.events[1].dy), (-1, -1));
}

#[test]
fn replay_of_noise_only_yields_no_events() {
    let path = temp_capture("noise", &[0x00, 0x11, 0x22, 0x33]);
    let report = replay_file(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert!(report.events.is_empty());
    assert_eq!(report.summary.incomplete_packets, 0);
}

#[test]
fn replay_rejects_missing_file() {
    let mut path = std::env::temp_dir();
    path.push("mouselink_missing_capture_does_not_exist.bin");
    let err = replay_file(&path).unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
}
