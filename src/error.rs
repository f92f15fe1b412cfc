//! Error types for the report pipeline.
//!
//! [`ReportError`] covers the conditions that stop a run. [`Skipped`] covers
//! everything that is absorbed locally: a candidate path, a file or a single
//! row is dropped, a warning is logged and processing continues.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline-fatal conditions.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("no CSV files found in provided paths")]
    NoFiles,

    #[error("cannot write report to {}: {source}", .path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown report type: {0} (expected one of: student-performance, teacher-performance, subject-performance)")]
    UnknownMode(String),
}

impl ReportError {
    /// Process exit status for the binary. Usage errors (2) belong to clap.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::NoFiles => 3,
            ReportError::DestinationUnwritable { .. } => 4,
            ReportError::UnknownMode(_) => 2,
        }
    }
}

/// A candidate, file or row that was dropped without aborting the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Skipped {
    #[error("invalid path provided - \"{}\", skipping", .0.display())]
    InvalidPath(PathBuf),

    #[error("report file \"{}\" must have a .csv extension, skipping", .0.display())]
    WrongExtension(PathBuf),

    #[error("skipping {} - cannot open file: {reason}", .path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("skipping {} - no columns found", .0.display())]
    UnreadableHeader(PathBuf),

    #[error("skipping {} - missing required columns: {missing:?}", .path.display())]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("skipping malformed row {line} in {}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("skipping row {line} in {} with empty entity name", .path.display())]
    EmptyEntity { path: PathBuf, line: u64 },

    #[error("skipping invalid grade {value:?} in {} for {entity}", .path.display())]
    InvalidGrade {
        path: PathBuf,
        entity: String,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_fatal_errors() {
        let no_files = ReportError::NoFiles;
        let unwritable = ReportError::DestinationUnwritable {
            path: PathBuf::from("/nope/report.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };

        assert_eq!(no_files.exit_code(), 3);
        assert_eq!(unwritable.exit_code(), 4);
    }

    #[test]
    fn test_invalid_grade_message_names_file_and_entity() {
        let skip = Skipped::InvalidGrade {
            path: PathBuf::from("grades.csv"),
            entity: "Eve".to_string(),
            value: "abc".to_string(),
        };
        let message = skip.to_string();

        assert!(message.contains("grades.csv"));
        assert!(message.contains("Eve"));
    }
}
