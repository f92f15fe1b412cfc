//! CSV ingestion of grade records.
//!
//! Each file is read with its first row as the header. Files that don't
//! declare the required columns are skipped whole; rows whose grade isn't a
//! real number are skipped one at a time.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::analyzers::types::EntityAggregate;
use crate::error::{ReportError, Result, Skipped};
use crate::mode::Schema;

/// Observations gathered from all files, plus everything that was skipped.
#[derive(Debug, Default)]
pub struct Ingested {
    pub aggregate: EntityAggregate,
    pub skipped: Vec<Skipped>,
}

impl Ingested {
    fn skip(&mut self, skip: Skipped) {
        warn!("{}", skip);
        self.skipped.push(skip);
    }
}

/// Coerces a raw grade field to a finite number. Surrounding whitespace is ignored.
pub fn parse_grade(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|g| g.is_finite())
}

/// Reads every file in order into one [`EntityAggregate`].
///
/// An entity that appears in several files accumulates all its grades under
/// one key.
///
/// # Errors
///
/// Returns [`ReportError::NoFiles`] if `files` is empty. Every other problem
/// is reported in [`Ingested::skipped`].
pub fn read_grades<P: AsRef<Path>>(files: &[P], schema: &Schema) -> Result<Ingested> {
    if files.is_empty() {
        return Err(ReportError::NoFiles);
    }

    let mut ingested = Ingested::default();

    for file in files {
        read_file(file.as_ref(), schema, &mut ingested);
    }

    info!(
        files = files.len(),
        entities = ingested.aggregate.len(),
        skipped = ingested.skipped.len(),
        "Grade data loaded"
    );

    Ok(ingested)
}

/// Column positions of the entity key and grade within one file's header.
struct Columns {
    entity: usize,
    grade: usize,
}

fn resolve_columns(
    path: &Path,
    headers: &StringRecord,
    schema: &Schema,
) -> std::result::Result<Columns, Skipped> {
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(Skipped::UnreadableHeader(path.to_path_buf()));
    }

    let position = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<String> = schema
        .required_fields()
        .into_iter()
        .filter(|field| position(*field).is_none())
        .map(str::to_string)
        .collect();

    match (position(&schema.entity_column), position(&schema.grade_column)) {
        (Some(entity), Some(grade)) if missing.is_empty() => Ok(Columns { entity, grade }),
        _ => Err(Skipped::MissingColumns {
            path: path.to_path_buf(),
            missing,
        }),
    }
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
fn read_file(path: &Path, schema: &Schema, ingested: &mut Ingested) {
    let mut rdr = match ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(rdr) => rdr,
        Err(e) => {
            ingested.skip(Skipped::UnreadableFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            return;
        }
    };

    let columns = match rdr.headers() {
        Ok(headers) => resolve_columns(path, headers, schema),
        Err(_) => Err(Skipped::UnreadableHeader(path.to_path_buf())),
    };
    let columns = match columns {
        Ok(columns) => columns,
        Err(skip) => {
            ingested.skip(skip);
            return;
        }
    };

    let mut accepted = 0usize;
    let mut record = StringRecord::new();

    loop {
        match rdr.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                let fatal = matches!(e.kind(), csv::ErrorKind::Io(_));
                ingested.skip(Skipped::MalformedRow {
                    path: path.to_path_buf(),
                    line,
                    reason: e.to_string(),
                });
                if fatal {
                    break;
                }
                continue;
            }
        }

        let line = record.position().map_or(0, |p| p.line());
        let entity = record.get(columns.entity).unwrap_or("");
        let raw_grade = record.get(columns.grade).unwrap_or("");

        if entity.is_empty() {
            ingested.skip(Skipped::EmptyEntity {
                path: path.to_path_buf(),
                line,
            });
            continue;
        }

        match parse_grade(raw_grade) {
            Some(grade) => {
                ingested.aggregate.record(entity, grade);
                accepted += 1;
            }
            None => ingested.skip(Skipped::InvalidGrade {
                path: path.to_path_buf(),
                entity: entity.to_string(),
                value: raw_grade.to_string(),
            }),
        }
    }

    debug!(accepted, "File read");
}
