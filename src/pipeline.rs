//! End-to-end report generation: validate, ingest, rank, persist.

use std::path::PathBuf;

use tracing::info;

use crate::analyzers::aggregate::rank;
use crate::analyzers::types::RankedReport;
use crate::collect::collect_files;
use crate::error::{Result, Skipped};
use crate::mode::ReportMode;
use crate::output::write_report;
use crate::reader::read_grades;

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub files: Vec<PathBuf>,
    pub mode: ReportMode,
    pub destination: PathBuf,
}

/// The persisted report and every diagnostic raised while building it.
#[derive(Debug)]
pub struct Outcome {
    pub report: RankedReport,
    pub skipped: Vec<Skipped>,
}

/// Runs the pipeline and writes the CSV report to `request.destination`.
///
/// Nothing is written when no input file survives validation.
#[tracing::instrument(skip_all, fields(mode = %request.mode, destination = %request.destination.display()))]
pub fn generate_report(request: &ReportRequest) -> Result<Outcome> {
    let schema = request.mode.schema();

    let collected = collect_files(&request.files);
    let ingested = read_grades(&collected.files, &schema)?;
    let report = rank(&ingested.aggregate, &schema);

    write_report(&report, &request.destination)?;

    let mut skipped = collected.skipped;
    skipped.extend(ingested.skipped);

    info!(
        entities = report.rows.len(),
        skipped = skipped.len(),
        "Report generated"
    );

    Ok(Outcome { report, skipped })
}
