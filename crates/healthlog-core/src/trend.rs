//! Projection of the record sequence into chart and log views.
//!
//! The projector holds no state derived from records; every call walks the
//! whole sequence again. The chart primitive downstream only needs an
//! ordered list of `{x, y}` points.

use serde::{Deserialize, Serialize};

use crate::record::HealthRecord;

pub const DEFAULT_MEALS_PLACEHOLDER: &str = "No record";

/// One point of the weight trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Record date, verbatim.
    pub x: String,
    /// Weight as a number. `None` when the stored text does not parse,
    /// which the chart draws as a gap.
    pub y: Option<f64>,
}

/// One line of the meal log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: String,
    pub meals: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub series: Vec<TrendPoint>,
    pub log: Vec<LogEntry>,
}

#[derive(Debug, Clone)]
pub struct TrendProjector {
    meals_placeholder: String,
}

impl Default for TrendProjector {
    fn default() -> Self {
        Self::new(DEFAULT_MEALS_PLACEHOLDER)
    }
}

impl TrendProjector {
    pub fn new(meals_placeholder: impl Into<String>) -> Self {
        Self {
            meals_placeholder: meals_placeholder.into(),
        }
    }

    pub fn meals_placeholder(&self) -> &str {
        &self.meals_placeholder
    }

    /// One point and one log entry per record, in sequence order.
    pub fn project(&self, sequence: &[HealthRecord]) -> Projection {
        let series = sequence
            .iter()
            .map(|record| TrendPoint {
                x: record.date().to_string(),
                y: record.weight().trim().parse::<f64>().ok(),
            })
            .collect();

        let log = sequence
            .iter()
            .map(|record| LogEntry {
                date: record.date().to_string(),
                meals: if record.meals().is_empty() {
                    self.meals_placeholder.clone()
                } else {
                    record.meals().to_string()
                },
            })
            .collect();

        let projection = Projection { series, log };
        tracing::debug!(points = projection.series.len(), "projection rebuilt");
        projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{validate, RecordDraft};

    fn record(date: &str, weight: &str, meals: &str) -> HealthRecord {
        validate(&RecordDraft {
            date: date.into(),
            weight: weight.into(),
            meals: meals.into(),
            ..RecordDraft::default()
        })
        .unwrap()
    }

    #[test]
    fn empty_sequence_projects_to_empty_views() {
        let projection = TrendProjector::default().project(&[]);
        assert!(projection.series.is_empty());
        assert!(projection.log.is_empty());
    }

    #[test]
    fn single_record_becomes_one_point() {
        let projection = TrendProjector::default().project(&[record("2024-01-01", "70", "")]);
        assert_eq!(
            projection.series,
            vec![TrendPoint {
                x: "2024-01-01".into(),
                y: Some(70.0)
            }]
        );
    }

    #[test]
    fn order_is_insertion_order_not_date_order() {
        let records = [
            record("2024-03-01", "72", "a"),
            record("2024-01-01", "70", "b"),
            record("2024-02-01", "71", "c"),
        ];
        let projection = TrendProjector::default().project(&records);
        let xs: Vec<_> = projection.series.iter().map(|p| p.x.as_str()).collect();
        assert_eq!(xs, ["2024-03-01", "2024-01-01", "2024-02-01"]);
        let meals: Vec<_> = projection.log.iter().map(|e| e.meals.as_str()).collect();
        assert_eq!(meals, ["a", "b", "c"]);
    }

    #[test]
    fn repeated_dates_are_not_merged() {
        let records = [record("2024-01-01", "70", ""), record("2024-01-01", "68", "")];
        let projection = TrendProjector::default().project(&records);
        assert_eq!(projection.series.len(), 2);
        assert_eq!(projection.series[0].x, projection.series[1].x);
        assert_eq!(projection.series[0].y, Some(70.0));
        assert_eq!(projection.series[1].y, Some(68.0));
    }

    #[test]
    fn empty_meals_shows_placeholder() {
        let records = [record("2024-01-01", "70", ""), record("2024-01-02", "70", "soup")];
        let projection = TrendProjector::default().project(&records);
        assert_eq!(projection.log[0].meals, "No record");
        assert_eq!(projection.log[1].meals, "soup");
        // stored value is untouched
        assert_eq!(records[0].meals(), "");
    }

    #[test]
    fn custom_placeholder() {
        let projection = TrendProjector::new("-").project(&[record("d", "1", "")]);
        assert_eq!(projection.log[0].meals, "-");
    }

    #[test]
    fn unparseable_weight_keeps_its_point() {
        let projection = TrendProjector::default().project(&[record("2024-01-01", "n/a", "")]);
        assert_eq!(projection.series.len(), 1);
        assert_eq!(projection.series[0].y, None);
    }

    #[test]
    fn series_serializes_as_xy_points() {
        let projection = TrendProjector::default().project(&[record("2024-01-01", "70", "")]);
        let json = serde_json::to_value(&projection.series).unwrap();
        assert_eq!(json, serde_json::json!([{ "x": "2024-01-01", "y": 70.0 }]));
    }
}
