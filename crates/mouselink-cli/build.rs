use std::env;
use std::path::Path;
use std::process::Command;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MOUSELINK_DESCRIBE");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    watch_git_head();

    println!("cargo:rustc-env=MOUSELINK_BUILD_DESCRIBE={}", describe());
    println!("cargo:rustc-env=MOUSELINK_BUILD_DATE={}", build_date());
}

/// Packagers may pin the description; otherwise ask git.
fn describe() -> String {
    non_empty(env::var("MOUSELINK_DESCRIBE").ok())
        .or_else(|| git(&["describe", "--tags", "--always", "--dirty"]))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// `SOURCE_DATE_EPOCH` wins for reproducible builds, then the build clock.
fn build_date() -> String {
    let stamp = non_empty(env::var("SOURCE_DATE_EPOCH").ok())
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .unwrap_or_else(OffsetDateTime::now_utc);
    stamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

fn watch_git_head() {
    let Some(git_dir) = git(&["rev-parse", "--git-dir"]) else {
        return;
    };
    let head = Path::new(&git_dir).join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    non_empty(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
