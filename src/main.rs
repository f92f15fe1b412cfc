//! CLI entry point for the studperf grade report tool.
//!
//! Collects grade CSVs from files and folders, ranks entities by average
//! grade, writes the ranking to a CSV report and prints it as a table.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsStr;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use studperf::collect::expand_paths;
use studperf::output::print_table;
use studperf::{ReportError, ReportMode, ReportRequest, generate_report};
use tracing::{debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "studperf")]
#[command(about = "Student Performance Report Tool", long_about = None)]
struct Cli {
    /// File(s) containing grade data, or folder(s) containing such files (non-recursive).
    ///
    /// Examples: studperf -f file1.csv -f /folder/file2.csv file3.csv
    #[arg(short, long, value_name = "FILE_OR_DIR", num_args = 1.., required = true)]
    files: Vec<PathBuf>,

    /// Full path to the report file
    #[arg(short, long, default_value = "./report.csv", env = "STUDPERF_REPORT")]
    report: PathBuf,

    /// Type of report to generate
    #[arg(
        short,
        long,
        default_value = "student-performance",
        env = "STUDPERF_MODE",
        value_parser = parse_mode
    )]
    mode: ReportMode,
}

fn parse_mode(token: &str) -> Result<ReportMode, ReportError> {
    token.parse()
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logging setup: stderr for diagnostics, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set. The returned guard must live until exit.
fn init_tracing() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_path = Path::new(&log_file_path);
            let log_dir = log_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = log_path
                .file_name()
                .unwrap_or(OsStr::new("studperf.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(env_filter("RUST_LOG_JSON", "debug"));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}

/// Rejects a report path whose directory doesn't exist, as a usage error.
fn check_report_dir(report: &Path) {
    let report_dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !report_dir.is_dir() {
        Cli::command()
            .error(
                ErrorKind::ValueValidation,
                format!(
                    "Directory for report file {} does not exist",
                    report.display()
                ),
            )
            .exit();
    }
}

fn run(request: &ReportRequest) -> Result<()> {
    let outcome = generate_report(request)?;

    let mut stdout = io::stdout().lock();
    print_table(&outcome.report, &mut stdout).context("failed to print report table")?;

    debug!(skipped = outcome.skipped.len(), "Run finished");
    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_tracing();

    let cli = Cli::parse();
    check_report_dir(&cli.report);

    let request = ReportRequest {
        files: expand_paths(&cli.files),
        mode: cli.mode,
        destination: cli.report,
    };

    match run(&request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let code = e
                .downcast_ref::<ReportError>()
                .map_or(1, ReportError::exit_code);
            ExitCode::from(code)
        }
    }
}
