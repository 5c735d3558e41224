use fill_analysis::services::{ColumnAnalyzer, ValidValueSpec};
use polars::prelude::*;
use proptest::prelude::*;

fn text_column() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::of("[SN ]{0,2}"), 0..64)
}

fn numeric_column() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of(-1.0e6..1.0e6f64), 0..64)
}

proptest! {
    /// Filled and empty counts always partition the rows, and the
    /// percentage is the rounded ratio of filled rows.
    #[test]
    fn counts_partition_rows(values in text_column(), whitelist in any::<bool>()) {
        let df = DataFrame::new(vec![Series::new("COL", values.clone())]).unwrap();
        let spec = if whitelist {
            ValidValueSpec::new().with_column("COL", ["S", " "])
        } else {
            ValidValueSpec::new()
        };

        let report = ColumnAnalyzer.analyze_frame(&df, &spec).unwrap();
        let column = report.get("COL").unwrap();

        prop_assert_eq!(column.total_rows, values.len());
        prop_assert_eq!(column.full_values + column.empty_values, column.total_rows);
        prop_assert!((0.0..=100.0).contains(&column.percentage_filled));

        let expected = if values.is_empty() {
            0.0
        } else {
            (column.full_values as f64 / values.len() as f64 * 100.0 * 100.0).round() / 100.0
        };
        prop_assert_eq!(column.percentage_filled, expected);
    }

    /// The default rule counts exactly the non-null, non-empty strings.
    #[test]
    fn default_rule_counts_non_empty_text(values in text_column()) {
        let df = DataFrame::new(vec![Series::new("COL", values.clone())]).unwrap();
        let report = ColumnAnalyzer.analyze_frame(&df, &ValidValueSpec::new()).unwrap();

        let expected = values
            .iter()
            .filter(|v| v.as_deref().map_or(false, |s| !s.is_empty()))
            .count();
        prop_assert_eq!(report.get("COL").unwrap().full_values, expected);
    }

    /// Numeric columns count non-nulls, and analysis is repeatable.
    #[test]
    fn numeric_columns_count_non_nulls(values in numeric_column()) {
        let df = DataFrame::new(vec![Series::new("NUM", values.clone())]).unwrap();
        let spec = ValidValueSpec::new();

        let first = ColumnAnalyzer.analyze_frame(&df, &spec).unwrap();
        let second = ColumnAnalyzer.analyze_frame(&df, &spec).unwrap();

        prop_assert_eq!(first.get("NUM").unwrap().full_values, values.iter().flatten().count());
        prop_assert_eq!(first, second);
    }
}
