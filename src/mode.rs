//! Report modes and the column schema each one reads.

use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;

/// Column used for grades in every mode.
pub const GRADE_COLUMN: &str = "grade";

/// Which entity the report ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    #[default]
    StudentPerformance,
    TeacherPerformance,
    SubjectPerformance,
}

/// `(mode, token, entity column)`
static MODES: &[(ReportMode, &str, &str)] = &[
    (
        ReportMode::StudentPerformance,
        "student-performance",
        "student_name",
    ),
    (
        ReportMode::TeacherPerformance,
        "teacher-performance",
        "teacher_name",
    ),
    (ReportMode::SubjectPerformance, "subject-performance", "subject"),
];

impl ReportMode {
    fn entry(self) -> &'static (ReportMode, &'static str, &'static str) {
        MODES
            .iter()
            .find(|(mode, _, _)| *mode == self)
            .unwrap_or(&MODES[0])
    }

    /// The CLI token for this mode, e.g. `student-performance`.
    pub fn token(self) -> &'static str {
        self.entry().1
    }

    /// Resolves the columns this mode reads.
    pub fn schema(self) -> Schema {
        Schema::new(self.entry().2, GRADE_COLUMN)
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ReportMode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MODES
            .iter()
            .find(|(_, token, _)| *token == s)
            .map(|(mode, _, _)| *mode)
            .ok_or_else(|| ReportError::UnknownMode(s.to_string()))
    }
}

/// Entity-key and grade column names, resolved once from a [`ReportMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub entity_column: String,
    pub grade_column: String,
}

impl Schema {
    pub fn new(entity_column: impl Into<String>, grade_column: impl Into<String>) -> Self {
        Self {
            entity_column: entity_column.into(),
            grade_column: grade_column.into(),
        }
    }

    /// Columns a file must declare in its header to be ingested.
    pub fn required_fields(&self) -> [&str; 2] {
        [self.entity_column.as_str(), self.grade_column.as_str()]
    }
}
