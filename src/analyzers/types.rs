//! Data types used by the aggregation pipeline.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Grades collected per entity, kept in first-seen order.
///
/// A key only exists together with its first observation, so no entity ever
/// maps to an empty sequence.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntityAggregate {
    entities: IndexMap<String, Vec<f64>>,
}

impl EntityAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `grade` under `entity`, creating the entity on first sight.
    pub fn record(&mut self, entity: &str, grade: f64) {
        self.entities
            .entry(entity.to_string())
            .or_default()
            .push(grade);
    }

    /// Observations recorded for `entity`, if any.
    pub fn get(&self, entity: &str) -> Option<&[f64]> {
        self.entities.get(entity).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates `(entity, observations)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entities
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// One ranked entity with its rounded mean grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub entity: String,
    #[serde(serialize_with = "serialize_tenth")]
    pub grade: f64,
}

impl ResultRow {
    /// The grade as written to every output, e.g. `4.5` or `3.0`.
    pub fn grade_display(&self) -> String {
        format_tenth(self.grade)
    }
}

/// Formats a value with exactly one decimal digit.
pub fn format_tenth(value: f64) -> String {
    format!("{value:.1}")
}

fn serialize_tenth<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_tenth(*value))
}

/// Result rows sorted by grade, highest first, with the column labels used
/// for both the persisted file and the console table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedReport {
    pub entity_label: String,
    pub grade_label: String,
    pub rows: Vec<ResultRow>,
}

impl RankedReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(entity, grade)` pairs in ranked order.
    pub fn pairs(&self) -> Vec<(&str, f64)> {
        self.rows
            .iter()
            .map(|r| (r.entity.as_str(), r.grade))
            .collect()
    }
}
