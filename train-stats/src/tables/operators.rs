//! Operators and brands travelled with, most used first.

use super::{StatsTable, count_cell, delay_cell, duration_cell, mileage_cell};
use crate::domain::OperatorStat;
use crate::ranking::{Cell, Column, SortCriterion, SortKey, SortableTable, TableConfig};

pub const TITLE: &str = "Operators";
pub const COLOUR: &str = "#0623af";
pub const PARAM: &str = "operators";

pub fn columns() -> Vec<Column<OperatorStat>> {
    vec![
        Column::new("Operator", |op: &OperatorStat| Cell::text(op.name.clone()))
            .with_style("col-fill")
            .with_keys(vec![
                SortKey::natural(OperatorStat::by_name),
                SortKey::natural(OperatorStat::by_key),
            ]),
        Column::new("Legs", |op: &OperatorStat| count_cell(op.count))
            .with_style("col-count")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(OperatorStat::by_count),
                SortKey::ascending(OperatorStat::by_name),
                SortKey::ascending(OperatorStat::by_key),
            ]),
        Column::new("Distance", |op: &OperatorStat| mileage_cell(op.distance))
            .with_style("col-distance")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(OperatorStat::by_distance),
                SortKey::ascending(OperatorStat::by_name),
                SortKey::ascending(OperatorStat::by_key),
            ]),
        Column::new("Duration", |op: &OperatorStat| duration_cell(op.duration))
            .with_style("col-duration")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(OperatorStat::by_duration),
                SortKey::ascending(OperatorStat::by_name),
                SortKey::ascending(OperatorStat::by_key),
            ]),
        // Equal delays: less time travelled first.
        Column::new("Delay", |op: &OperatorStat| delay_cell(op.delay))
            .with_style("col-delay")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(OperatorStat::by_delay),
                SortKey::natural(OperatorStat::by_duration),
                SortKey::ascending(OperatorStat::by_name),
                SortKey::ascending(OperatorStat::by_key),
            ]),
    ]
}

pub fn rank() -> Vec<SortCriterion<OperatorStat>> {
    vec![
        SortCriterion::descending(OperatorStat::by_count),
        SortCriterion::descending(OperatorStat::by_duration),
        SortCriterion::descending(OperatorStat::by_distance),
        SortCriterion::ascending(OperatorStat::by_name),
        SortCriterion::ascending(OperatorStat::by_key),
    ]
}

pub fn key(op: &OperatorStat) -> String {
    op.key().to_string()
}

pub fn table(values: Vec<OperatorStat>, config: &TableConfig) -> StatsTable<OperatorStat> {
    StatsTable {
        title: TITLE,
        colour: COLOUR,
        param: PARAM,
        table: SortableTable::new(values, &rank(), columns(), key, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Delay, LegDuration};

    fn op(id: i64, name: &str, is_brand: bool, count: u32, minutes: u64, delay: Option<i64>) -> OperatorStat {
        OperatorStat {
            id,
            name: name.into(),
            is_brand,
            count,
            distance: Some(count as f64 * 10.0),
            duration: Some(LegDuration::from_minutes(minutes)),
            delay: delay.map(Delay::from_minutes),
        }
    }

    fn keys(t: &StatsTable<OperatorStat>) -> Vec<String> {
        t.table.ordered().map(|e| key(&e.value)).collect()
    }

    fn values() -> Vec<OperatorStat> {
        vec![
            op(1, "LNER", false, 12, 900, Some(3)),
            op(2, "ScotRail", false, 12, 400, Some(3)),
            op(1, "Azuma", true, 4, 300, Some(-2)),
            op(3, "Avanti West Coast", false, 1, 120, None),
        ]
    }

    #[test]
    fn ranked_by_count_then_duration() {
        let t = table(values(), &TableConfig::default());
        assert_eq!(keys(&t), ["1-O", "2-O", "1-B", "3-O"]);
    }

    #[test]
    fn delay_ties_prefer_shorter_duration() {
        let mut t = table(values(), &TableConfig::default());
        t.table.activate_column(4);
        assert_eq!(keys(&t), ["2-O", "1-O", "1-B", "3-O"]);

        t.table.activate_column(4);
        assert_eq!(keys(&t), ["3-O", "1-B", "1-O", "2-O"]);
    }

    #[test]
    fn operator_and_brand_rows_distinct() {
        let t = table(values(), &TableConfig::default());
        let rows = t.table.rows();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert!(keys.contains(&"1-O"));
        assert!(keys.contains(&"1-B"));
    }
}
