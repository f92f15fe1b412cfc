//! Report persistence and console rendering.
//!
//! The ranked report is written as a two-column CSV and rendered as a grid
//! table. Both use the same rows in the same order with the same
//! one-decimal grade text.

use std::io::{self, Write};
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::analyzers::types::RankedReport;
use crate::error::{ReportError, Result};

/// Writes `report` to `path` as CSV: a `<entity>,<grade>` header, then one
/// row per entity in ranked order.
///
/// The file is staged next to `path` and renamed into place, so `path`
/// either receives the whole report or is left untouched.
///
/// # Errors
///
/// Returns [`ReportError::DestinationUnwritable`] if the file can't be
/// created, written or moved into place.
pub fn write_report(report: &RankedReport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let unwritable = |source: io::Error| ReportError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    debug!(path = %path.display(), rows = report.rows.len(), "Writing CSV report");

    let staged = NamedTempFile::new_in(dir).map_err(unwritable)?;

    let mut writer = WriterBuilder::new()
        .has_headers(false) // header names come from the report mode
        .terminator(Terminator::Any(b'\n'))
        .from_writer(staged);

    writer
        .write_record([&report.entity_label, &report.grade_label])
        .map_err(|e| unwritable(e.into()))?;
    for row in &report.rows {
        writer.serialize(row).map_err(|e| unwritable(e.into()))?;
    }

    let staged = writer
        .into_inner()
        .map_err(|e| unwritable(e.into_error()))?;
    staged.persist(path).map_err(|e| unwritable(e.error))?;

    info!(path = %path.display(), rows = report.rows.len(), "Report written");
    Ok(())
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: String,
    cells: Vec<String>,
    align: Align,
}

impl Column {
    fn width(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.chars().count())
            .chain(std::iter::once(self.header.chars().count()))
            .max()
            .unwrap_or(0)
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

fn rule(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.extend(std::iter::repeat_n(fill, w + 2));
        line.push('+');
    }
    line
}

fn row_line(cells: &[&str], widths: &[usize], aligns: &[Align]) -> String {
    let mut line = String::from("|");
    for ((cell, w), align) in cells.iter().zip(widths).zip(aligns) {
        line.push(' ');
        line.push_str(&pad(cell, *w, *align));
        line.push_str(" |");
    }
    line
}

/// Renders `report` as a grid table with a 1-based rank column.
///
/// ```text
/// +---+--------------+-------+
/// |   | student_name | grade |
/// +===+==============+=======+
/// | 1 | Alice        |   4.5 |
/// +---+--------------+-------+
/// ```
///
/// An empty report renders the header block only.
pub fn render_table(report: &RankedReport) -> String {
    let columns = [
        Column {
            header: String::new(),
            cells: (1..=report.rows.len()).map(|i| i.to_string()).collect(),
            align: Align::Right,
        },
        Column {
            header: report.entity_label.clone(),
            cells: report.rows.iter().map(|r| r.entity.clone()).collect(),
            align: Align::Left,
        },
        Column {
            header: report.grade_label.clone(),
            cells: report.rows.iter().map(|r| r.grade_display()).collect(),
            align: Align::Right,
        },
    ];

    let widths: Vec<usize> = columns.iter().map(Column::width).collect();
    let aligns: Vec<Align> = columns.iter().map(|c| c.align).collect();
    let headers: Vec<&str> = columns.iter().map(|c| c.header.as_str()).collect();

    let mut lines = vec![
        rule(&widths, '-'),
        row_line(&headers, &widths, &[Align::Left; 3]),
        rule(&widths, '='),
    ];

    for i in 0..report.rows.len() {
        let cells: Vec<&str> = columns.iter().map(|c| c.cells[i].as_str()).collect();
        lines.push(row_line(&cells, &widths, &aligns));
        lines.push(rule(&widths, '-'));
    }

    lines.join("\n")
}

/// Writes the rendered table followed by a newline.
pub fn print_table(report: &RankedReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", render_table(report))
}
