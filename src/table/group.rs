// src/table/group.rs

use std::collections::BTreeMap;

use super::Table;
use crate::error::Result;

/// How a group's value sample collapses to a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Median,
    Mean,
}

impl Aggregate {
    /// Short name used in series labels.
    pub fn label(self) -> &'static str {
        match self {
            Aggregate::Median => "median",
            Aggregate::Mean => "mean",
        }
    }

    fn apply(self, sample: &[f64]) -> f64 {
        match self {
            Aggregate::Median => median(sample),
            Aggregate::Mean => sample.iter().sum::<f64>() / sample.len() as f64,
        }
    }
}

/// Median of a non-empty sample; an even sample takes the mean of the two
/// central values.
fn median(sample: &[f64]) -> f64 {
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// One plottable line: a label plus `(tick, value)` points in ascending
/// tick order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(i64, f64)>,
}

impl Table {
    /// Group rows by `(tick, key)` and collapse `value_col` per group with
    /// `agg`.
    ///
    /// Returns one series per distinct key, points in ascending tick order
    /// and series in ascending label order. Rows with a null tick, key, or
    /// value are left out. Ticks truncate to `i64` for the time axis.
    pub fn aggregate_series(
        &self,
        tick_col: &str,
        key_col: &str,
        value_col: &str,
        agg: Aggregate,
    ) -> Result<Vec<Series>> {
        let ticks = self.numeric(tick_col)?;
        let keys = self.column(key_col)?;
        let values = self.numeric(value_col)?;

        let mut groups: BTreeMap<String, BTreeMap<i64, Vec<f64>>> = BTreeMap::new();
        for row in 0..self.len() {
            let (tick, key, value) = match (ticks[row], keys.label(row), values[row]) {
                (Some(t), Some(k), Some(v)) => (t, k, v),
                _ => continue,
            };
            groups
                .entry(key)
                .or_default()
                .entry(tick as i64)
                .or_default()
                .push(value);
        }

        Ok(groups
            .into_iter()
            .map(|(label, by_tick)| Series {
                label,
                points: by_tick
                    .into_iter()
                    .map(|(tick, sample)| (tick, agg.apply(&sample)))
                    .collect(),
            })
            .collect())
    }

    /// One point per `(key, tick)` pair, taken straight from the rows.
    ///
    /// When a pair repeats, the last row in file order wins. Null handling
    /// and ordering match [`Table::aggregate_series`].
    pub fn pivot_series(
        &self,
        tick_col: &str,
        key_col: &str,
        value_col: &str,
    ) -> Result<Vec<Series>> {
        let ticks = self.numeric(tick_col)?;
        let keys = self.column(key_col)?;
        let values = self.numeric(value_col)?;

        let mut lines: BTreeMap<String, BTreeMap<i64, f64>> = BTreeMap::new();
        for row in 0..self.len() {
            let (tick, key, value) = match (ticks[row], keys.label(row), values[row]) {
                (Some(t), Some(k), Some(v)) => (t, k, v),
                _ => continue,
            };
            lines.entry(key).or_default().insert(tick as i64, value);
        }

        Ok(lines
            .into_iter()
            .map(|(label, points)| Series {
                label,
                points: points.into_iter().collect(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::table::Column;

    /// Two ticks x two goods with two observations per group, written out
    /// of order to exercise the sort.
    fn price_table() -> Table {
        let ticks = [1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let goods = [
            "Grain", "Food", "Grain", "Food", "Food", "Grain", "Grain", "Food",
        ];
        let prices = [8.0, 10.0, 4.0, 12.0, 14.0, 10.0, 6.0, 16.0];
        Table::new(
            "price".into(),
            vec!["tick".into(), "good".into(), "old_price".into()],
            vec![
                Column::Num(ticks.iter().copied().map(Some).collect()),
                Column::Text(goods.iter().map(|g| Some(g.to_string())).collect()),
                Column::Num(prices.iter().copied().map(Some).collect()),
            ],
        )
    }

    #[test]
    fn test_two_by_two_grid_aggregates_four_groups() {
        let table = price_table();
        let median = table
            .aggregate_series("tick", "good", "old_price", Aggregate::Median)
            .unwrap();
        let mean = table
            .aggregate_series("tick", "good", "old_price", Aggregate::Mean)
            .unwrap();

        // One series per good, one point per tick: 4 (tick, good) groups.
        assert_eq!(median.len(), 2);
        assert!(median.iter().all(|s| s.points.len() == 2));

        // Food: tick 0 -> {10, 14}, tick 1 -> {12, 16}.
        assert_eq!(median[0].label, "Food");
        assert_eq!(median[0].points, vec![(0, 12.0), (1, 14.0)]);
        assert_eq!(mean[0].points, vec![(0, 12.0), (1, 14.0)]);

        // Grain: tick 0 -> {4, 6}, tick 1 -> {8, 10}.
        assert_eq!(median[1].label, "Grain");
        assert_eq!(median[1].points, vec![(0, 5.0), (1, 9.0)]);
        assert_eq!(mean[1].points, vec![(0, 5.0), (1, 9.0)]);
    }

    #[test]
    fn test_median_splits_even_samples_and_mean_weighs_outliers() {
        let table = Table::new(
            "price".into(),
            vec!["tick".into(), "good".into(), "old_price".into()],
            vec![
                Column::Num(vec![Some(0.0), Some(0.0), Some(0.0), Some(0.0)]),
                Column::Text(vec![Some("Food".into()); 4]),
                Column::Num(vec![Some(1.0), Some(2.0), Some(3.0), Some(90.0)]),
            ],
        );

        let median = table
            .aggregate_series("tick", "good", "old_price", Aggregate::Median)
            .unwrap();
        assert_eq!(median[0].points, vec![(0, 2.5)]);

        let mean = table
            .aggregate_series("tick", "good", "old_price", Aggregate::Mean)
            .unwrap();
        assert_eq!(mean[0].points, vec![(0, 24.0)]);
    }

    #[test]
    fn test_rows_with_nulls_are_excluded() {
        let table = Table::new(
            "price".into(),
            vec!["tick".into(), "good".into(), "old_price".into()],
            vec![
                Column::Num(vec![Some(0.0), None, Some(1.0), Some(2.0)]),
                Column::Text(vec![
                    Some("Food".into()),
                    Some("Food".into()),
                    None,
                    Some("Food".into()),
                ]),
                Column::Num(vec![Some(10.0), Some(11.0), Some(12.0), None]),
            ],
        );

        let series = table
            .aggregate_series("tick", "good", "old_price", Aggregate::Mean)
            .unwrap();
        // Only the first row survives: the others miss a tick, key, or value.
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points, vec![(0, 10.0)]);
    }

    #[test]
    fn test_fractional_ticks_truncate() {
        let table = Table::new(
            "price".into(),
            vec!["tick".into(), "good".into(), "old_price".into()],
            vec![
                Column::Num(vec![Some(0.0), Some(1.9)]),
                Column::Text(vec![Some("Food".into()), Some("Food".into())]),
                Column::Num(vec![Some(10.0), Some(12.0)]),
            ],
        );

        let series = table
            .aggregate_series("tick", "good", "old_price", Aggregate::Mean)
            .unwrap();
        assert_eq!(series[0].points, vec![(0, 10.0), (1, 12.0)]);
    }

    #[test]
    fn test_pivot_takes_last_row_for_duplicate_pairs() {
        let table = Table::new(
            "agent_info".into(),
            vec!["tick".into(), "agent_id".into(), "cash".into()],
            vec![
                Column::Num(vec![Some(0.0), Some(1.0), Some(0.0)]),
                Column::Num(vec![Some(3.0), Some(3.0), Some(3.0)]),
                Column::Num(vec![Some(100.0), Some(95.0), Some(101.5)]),
            ],
        );

        let series = table.pivot_series("tick", "agent_id", "cash").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "3");
        assert_eq!(series[0].points, vec![(0, 101.5), (1, 95.0)]);
    }

    #[test]
    fn test_pivot_one_series_per_agent_in_label_order() {
        let table = Table::new(
            "agent_info".into(),
            vec!["tick".into(), "agent_id".into(), "cash".into()],
            vec![
                Column::Num(vec![Some(0.0), Some(0.0), Some(1.0), Some(1.0)]),
                Column::Num(vec![Some(1.0), Some(0.0), Some(1.0), Some(0.0)]),
                Column::Num(vec![Some(120.0), Some(100.0), Some(118.0), Some(104.0)]),
            ],
        );

        let series = table.pivot_series("tick", "agent_id", "cash").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "0");
        assert_eq!(series[0].points, vec![(0, 100.0), (1, 104.0)]);
        assert_eq!(series[1].label, "1");
        assert_eq!(series[1].points, vec![(0, 120.0), (1, 118.0)]);
    }

    #[test]
    fn test_grouping_over_wrong_columns_is_a_named_failure() {
        let table = price_table();

        let err = table
            .aggregate_series("tick", "good", "good", Aggregate::Median)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotNumeric { .. }));

        let err = table
            .aggregate_series("tick", "agent_id", "old_price", Aggregate::Median)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn { .. }));

        let err = table.pivot_series("good", "good", "old_price").unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotNumeric { .. }));
    }
}
