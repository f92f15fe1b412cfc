use crate::analyzers::types::{EntityAggregate, RankedReport, ResultRow};
use crate::analyzers::utility::{mean, round_to_tenth};
use crate::mode::Schema;
use tracing::debug;

/// Reduces every entity to its rounded mean grade and ranks them, highest first.
///
/// The sort is stable, so entities with equal grades keep the order in which
/// they were first seen across the input files.
pub fn rank(aggregate: &EntityAggregate, schema: &Schema) -> RankedReport {
    let mut rows: Vec<ResultRow> = aggregate
        .iter()
        .filter(|(_, grades)| !grades.is_empty())
        .map(|(entity, grades)| ResultRow {
            entity: entity.to_string(),
            grade: round_to_tenth(mean(grades)),
        })
        .collect();

    rows.sort_by(|a, b| b.grade.total_cmp(&a.grade));

    debug!(entities = rows.len(), "Ranked report built");

    RankedReport {
        entity_label: schema.entity_column.clone(),
        grade_label: schema.grade_column.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ReportMode;

    fn aggregate(entries: &[(&str, &[f64])]) -> EntityAggregate {
        let mut agg = EntityAggregate::new();
        for (entity, grades) in entries {
            for g in *grades {
                agg.record(entity, *g);
            }
        }
        agg
    }

    #[test]
    fn test_rank_orders_by_mean_descending() {
        let agg = aggregate(&[("Bob", &[3.0, 3.0]), ("Alice", &[5.0, 4.0])]);
        let report = rank(&agg, &ReportMode::StudentPerformance.schema());

        assert_eq!(report.pairs(), vec![("Alice", 4.5), ("Bob", 3.0)]);
        assert_eq!(report.entity_label, "student_name");
        assert_eq!(report.grade_label, "grade");
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let agg = aggregate(&[
            ("Carol", &[4.0]),
            ("Alice", &[3.0, 5.0]),
            ("Dave", &[5.0]),
            ("Bob", &[4.0]),
        ]);
        let report = rank(&agg, &ReportMode::StudentPerformance.schema());

        assert_eq!(
            report.pairs(),
            vec![("Dave", 5.0), ("Carol", 4.0), ("Alice", 4.0), ("Bob", 4.0)]
        );
    }

    #[test]
    fn test_ties_after_rounding_keep_first_seen_order() {
        // 4.25 rounds to 4.2, equal to Bob's 4.2
        let agg = aggregate(&[("Bob", &[4.2]), ("Alice", &[4.0, 4.5])]);
        let report = rank(&agg, &ReportMode::StudentPerformance.schema());

        assert_eq!(report.pairs(), vec![("Bob", 4.2), ("Alice", 4.2)]);
    }

    #[test]
    fn test_empty_aggregate_gives_empty_report() {
        let report = rank(&EntityAggregate::new(), &ReportMode::SubjectPerformance.schema());

        assert!(report.is_empty());
        assert_eq!(report.entity_label, "subject");
    }
}
