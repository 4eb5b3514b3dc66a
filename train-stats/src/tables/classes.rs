//! Rolling stock classes travelled behind.

use super::{StatsTable, count_cell, duration_cell, mileage_cell};
use crate::domain::ClassStat;
use crate::ranking::{Cell, Column, SortCriterion, SortKey, SortableTable, TableConfig};

pub const TITLE: &str = "Classes";
pub const COLOUR: &str = "#008f3e";
pub const PARAM: &str = "classes";

pub fn columns() -> Vec<Column<ClassStat>> {
    vec![
        Column::new("Class", |cls: &ClassStat| Cell::text(format!("Class {}", cls.stock_class)))
            .with_style("col-fill")
            .with_keys(vec![SortKey::natural(ClassStat::by_class_number)]),
        Column::new("Legs", |cls: &ClassStat| count_cell(cls.count))
            .with_style("col-count")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(ClassStat::by_count),
                SortKey::ascending(ClassStat::by_class_number),
            ]),
        Column::new("Distance", |cls: &ClassStat| mileage_cell(cls.distance))
            .with_style("col-distance")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(ClassStat::by_distance),
                SortKey::ascending(ClassStat::by_class_number),
            ]),
        Column::new("Duration", |cls: &ClassStat| duration_cell(cls.duration))
            .with_style("col-duration")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(ClassStat::by_duration),
                SortKey::ascending(ClassStat::by_class_number),
            ]),
    ]
}

pub fn rank() -> Vec<SortCriterion<ClassStat>> {
    vec![
        SortCriterion::descending(ClassStat::by_count),
        SortCriterion::descending(ClassStat::by_duration),
        SortCriterion::descending(ClassStat::by_distance),
        SortCriterion::ascending(ClassStat::by_class_number),
    ]
}

pub fn key(cls: &ClassStat) -> String {
    cls.stock_class.to_string()
}

pub fn table(values: Vec<ClassStat>, config: &TableConfig) -> StatsTable<ClassStat> {
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
    use crate::domain::LegDuration;

    fn cls(stock_class: u32, count: u32, miles: f64) -> ClassStat {
        ClassStat {
            stock_class,
            count,
            distance: Some(miles),
            duration: Some(LegDuration::from_minutes(count as u64 * 30)),
        }
    }

    fn order(t: &StatsTable<ClassStat>) -> Vec<String> {
        t.table.ordered().map(|e| key(&e.value)).collect()
    }

    #[test]
    fn rank_and_columns() {
        let values = vec![cls(91, 3, 500.0), cls(387, 8, 120.25), cls(800, 3, 600.0)];
        let mut t = table(values, &TableConfig::default());
        assert_eq!(order(&t), ["387", "800", "91"]);

        t.table.activate_column(0);
        assert_eq!(order(&t), ["91", "387", "800"]);

        t.table.activate_column(2);
        assert_eq!(order(&t), ["800", "91", "387"]);
        assert_eq!(t.table.rows()[2].cells[2].text, "120m 20ch");
        assert_eq!(t.table.rows()[0].cells[0].text, "Class 800");
    }
}
