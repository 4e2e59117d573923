//! Rebuild (or, with `--check`, verify) the expected replay reports under
//! `tests/golden/`.
//!
//! ```text
//! regenerate_golden [--check] [CASE...]
//! ```
//!
//! Without case names every directory holding an `input.bin` is processed.
//! `--check` writes nothing and exits with status 1 when any report drifted.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mouselink_core::{ReplayReport, replay_file};

const GOLDEN_ROOT: &str = "tests/golden";
const INPUT_FILE: &str = "input.bin";
const REPORT_FILE: &str = "expected_report.json";

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Write,
    Check,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Written,
    Unchanged,
    Drifted,
}

fn main() -> ExitCode {
    match run(env::args().skip(1)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

/// Returns `false` when `--check` found drift.
fn run(args: impl Iterator<Item = String>) -> Result<bool, String> {
    let (mode, mut cases) = parse_args(args)?;
    let root = Path::new(GOLDEN_ROOT);
    if cases.is_empty() {
        cases = discover_cases(root)?;
    }

    let mut clean = true;
    for case in &cases {
        let outcome = process_case(root, case, &mode)?;
        let label = match outcome {
            Outcome::Written => "written",
            Outcome::Unchanged => "ok",
            Outcome::Drifted => {
                clean = false;
                "DRIFT"
            }
        };
        println!("{label:>7}  {case}");
    }
    Ok(clean)
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<(Mode, Vec<String>), String> {
    let mut mode = Mode::Write;
    let mut cases = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--check" => mode = Mode::Check,
            flag if flag.starts_with('-') => return Err(format!("unknown flag {flag}")),
            _ => cases.push(arg),
        }
    }
    Ok((mode, cases))
}

fn discover_cases(root: &Path) -> Result<Vec<String>, String> {
    let entries =
        fs::read_dir(root).map_err(|err| format!("failed to read {}: {err}", root.display()))?;

    let mut cases = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| format!("failed to read entry: {err}"))?.path();
        if !path.join(INPUT_FILE).is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            cases.push(name.to_string());
        }
    }
    cases.sort();
    Ok(cases)
}

fn process_case(root: &Path, case: &str, mode: &Mode) -> Result<Outcome, String> {
    let dir = root.join(case);
    let input = dir.join(INPUT_FILE);
    if !input.is_file() {
        return Err(format!("no {INPUT_FILE} for case {case}"));
    }
    let fresh = render(&input, case)?;

    let report_path = dir.join(REPORT_FILE);
    let unchanged = fs::read_to_string(&report_path).is_ok_and(|current| current == fresh);
    match (mode, unchanged) {
        (_, true) => Ok(Outcome::Unchanged),
        (Mode::Check, false) => Ok(Outcome::Drifted),
        (Mode::Write, false) => {
            fs::write(&report_path, fresh)
                .map_err(|err| format!("failed to write {}: {err}", report_path.display()))?;
            Ok(Outcome::Written)
        }
    }
}

/// Replay the capture and pin the input path so reports do not depend on
/// the working directory or platform separator.
fn render(input: &Path, case: &str) -> Result<String, String> {
    let mut report: ReplayReport = replay_file(input)
        .map_err(|err| format!("replay failed for {}: {err}", input.display()))?;
    report.input.path = portable_input_path(case);
    serde_json::to_string_pretty(&report).map_err(|err| format!("JSON serialization failed: {err}"))
}

fn portable_input_path(case: &str) -> String {
    let path: PathBuf = [GOLDEN_ROOT, case, INPUT_FILE].iter().collect();
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::{Mode, parse_args, portable_input_path};

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn check_flag_and_cases_parse_in_any_order() {
        let (mode, cases) = parse_args(args(&["basic", "--check", "noise_resync"])).unwrap();
        assert_eq!(mode, Mode::Check);
        assert_eq!(cases, vec!["basic", "noise_resync"]);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parse_args(args(&["--force"])).unwrap_err();
        assert!(err.contains("--force"));
    }

    #[test]
    fn input_path_uses_forward_slashes() {
        assert_eq!(portable_input_path("basic"), "tests/golden/basic/input.bin");
    }
}
