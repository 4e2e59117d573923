use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use mouselink_core::{Decoder, MotionEvent, ReaderSource, ReplayReport};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nbuild: ",
    env!("MOUSELINK_BUILD_DESCRIBE"),
    "\nbuilt at: ",
    env!("MOUSELINK_BUILD_DATE"),
);

const EXAMPLES: &str = "Examples:\n  mouselink watch /dev/ttyUSB0\n  mouselink watch - --format json < capture.bin\n  mouselink replay capture.bin -o report.json";

#[derive(Parser, Debug)]
#[command(name = "mouselink")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for PS/2 mouse packets bridged over a UART link.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a live byte stream and print each event as it arrives.
    #[command(after_help = EXAMPLES)]
    Watch {
        /// Serial device node (already configured, e.g. 115200 8N1), capture file, or `-` for stdin
        device: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Stop after this many decoded events
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,

        /// Suppress banners and incomplete-packet notices
        #[arg(long)]
        quiet: bool,

        /// Treat end of input as an idle interval (implied for character devices)
        #[arg(long)]
        live: bool,
    },
    /// Decode a capture file of raw UART bytes into a JSON report.
    #[command(alias = "replay-capture")]
    #[command(after_help = EXAMPLES)]
    Replay {
        /// Path to a capture file (raw bytes as received from the bridge)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if incomplete packets are present
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Boxed panel per packet
    Text,
    /// One JSON object per line
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Watch {
            device,
            format,
            limit,
            quiet,
            live,
        } => cmd_watch(device, format, limit, quiet, live),
        Commands::Replay {
            input,
            report,
            stdout,
            pretty,
            compact: _,
            quiet,
            strict,
        } => cmd_replay(input, report, stdout, pretty, quiet, strict),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_watch(
    device: PathBuf,
    format: OutputFormat,
    limit: Option<u64>,
    quiet: bool,
    live: bool,
) -> Result<(), CliError> {
    let mut source = open_device(&device, live)?;
    let mut decoder = Decoder::new();

    if !quiet {
        print_banner(&device);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut incomplete = 0u64;

    for result in decoder.events(&mut source) {
        match result {
            Ok(event) => {
                write_event(&mut out, &event, format)?;
                if limit.is_some_and(|limit| event.sequence_number >= limit) {
                    break;
                }
            }
            Err(err) if err.is_recoverable() => {
                incomplete += 1;
                if !quiet {
                    eprintln!("✗ {}", err);
                }
            }
            Err(err) => {
                return Err(CliError::new(
                    format!("byte source failed: {}", err),
                    Some("check that the device is still connected, then run again".to_string()),
                ));
            }
        }
    }

    if !quiet {
        eprintln!(
            "OK: {} packets decoded, {} incomplete",
            decoder.decoded(),
            incomplete
        );
    }
    Ok(())
}

/// Open the byte stream behind `device`.
///
/// Character devices (serial ttys) report an empty read after each quiet
/// timeout, so they always get a live source; files and stdin close at end
/// of input unless `live` is set.
fn open_device(device: &Path, live: bool) -> Result<ReaderSource<Box<dyn Read>>, CliError> {
    let (reader, live): (Box<dyn Read>, bool) = if device.as_os_str() == "-" {
        (Box::new(io::stdin().lock()), live)
    } else {
        let meta = fs::metadata(device).map_err(|_| {
            CliError::new(
                format!("device not found: {}", device.display()),
                Some(
                    "pass a serial device such as /dev/ttyUSB0, a capture file, or - for stdin"
                        .to_string(),
                ),
            )
        })?;
        let file = File::open(device)
            .with_context(|| format!("Failed to open device: {}", device.display()))?;
        (Box::new(file), live || is_char_device(&meta))
    };

    if live {
        Ok(ReaderSource::live(reader))
    } else {
        Ok(ReaderSource::new(reader))
    }
}

#[cfg(unix)]
fn is_char_device(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;

    meta.file_type().is_char_device()
}

#[cfg(not(unix))]
fn is_char_device(_meta: &fs::Metadata) -> bool {
    false
}

fn print_banner(device: &Path) {
    eprintln!("╔═══════════════════════════════════════════════════════╗");
    eprintln!("{}", panel_line("UART RECEIVER - PS/2 MOUSE"));
    eprintln!("╠═══════════════════════════════════════════════════════╣");
    eprintln!("{}", panel_line(&format!("Listening on {}", device.display())));
    eprintln!("{}", panel_line("Press Ctrl+C to stop"));
    eprintln!("╚═══════════════════════════════════════════════════════╝");
}

#[derive(Serialize)]
struct WatchLine<'a> {
    received_at: String,
    #[serde(flatten)]
    event: &'a MotionEvent,
}

fn write_event(out: &mut impl Write, event: &MotionEvent, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", render_panel(event)).context("Failed to write event")?;
        }
        OutputFormat::Json => {
            let line = WatchLine {
                received_at: OffsetDateTime::now_utc()
                    .format(&Rfc3339)
                    .context("Failed to format timestamp")?,
                event,
            };
            serde_json::to_writer(&mut *out, &line).context("JSON serialization failed")?;
            writeln!(out).context("Failed to write event")?;
        }
    }
    out.flush().context("Failed to flush output")
}

const PANEL_WIDTH: usize = 53;

fn panel_line(content: &str) -> String {
    format!("║  {:<width$}║", content, width = PANEL_WIDTH)
}

fn render_panel(event: &MotionEvent) -> String {
    let x_dir = direction(event.dx, '←', '→');
    let y_dir = direction(event.dy, '↓', '↑');
    let raw = event
        .raw
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ");

    [
        "╔═══════════════════════════════════════════════════════╗".to_string(),
        panel_line(&format!("Packet #{}", event.sequence_number)),
        "╠═══════════════════════════════════════════════════════╣".to_string(),
        panel_line(&format!("X: {:4} {}", event.dx, x_dir)),
        panel_line(&format!("Y: {:4} {}", event.dy, y_dir)),
        "╠═══════════════════════════════════════════════════════╣".to_string(),
        panel_line("Buttons:"),
        panel_line(&format!("  Left:    {}", button_box(event.button_left))),
        panel_line(&format!("  Right:   {}", button_box(event.button_right))),
        panel_line(&format!("  Middle:  {}", button_box(event.button_middle))),
        "╠═══════════════════════════════════════════════════════╣".to_string(),
        panel_line(&format!("Raw: {}", raw)),
        "╚═══════════════════════════════════════════════════════╝".to_string(),
    ]
    .join("\n")
}

fn direction(value: i16, negative: char, positive: char) -> char {
    match value.signum() {
        -1 => negative,
        1 => positive,
        _ => '·',
    }
}

fn button_box(pressed: bool) -> char {
    if pressed { '■' } else { '□' }
}

fn cmd_replay(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    quiet: bool,
    strict: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let rep = mouselink_core::replay_file(&resolved_input).context("Capture replay failed")?;
    let json = serialize_report(&rep, pretty)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !quiet {
                eprintln!(
                    "OK: {} packets decoded -> {}",
                    rep.summary.packets_decoded,
                    report.display()
                );
            }
        }
    }

    if strict && rep.summary.incomplete_packets > 0 {
        return Err(CliError::new(
            format!(
                "incomplete packets detected ({})",
                rep.summary.incomplete_packets
            ),
            Some("check the link for dropped bytes or a truncated capture".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let report_dir = match report_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => fs::canonicalize("."),
        Some(parent) => fs::canonicalize(parent),
        // Missing parents are created later and cannot alias the input.
        None => return Ok(()),
    };
    let Ok(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

// `--pretty` and `--compact` are mutually exclusive at the clap level.
fn serialize_report(rep: &ReplayReport, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    let meta = fs::metadata(input).map_err(|_| {
        CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a capture file of raw bytes recorded from the bridge".to_string()),
        )
    })?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use `mouselink watch` for live devices".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
