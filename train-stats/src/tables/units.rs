//! Individual units travelled behind.

use super::{StatsTable, count_cell, duration_cell, mileage_cell};
use crate::domain::UnitStat;
use crate::ranking::{Cell, Column, SortCriterion, SortKey, SortableTable, TableConfig};

pub const TITLE: &str = "Units";
pub const COLOUR: &str = "#6200a1";
pub const PARAM: &str = "units";

pub fn columns() -> Vec<Column<UnitStat>> {
    vec![
        Column::new("Unit no", |unit: &UnitStat| Cell::text(unit.stock_number.to_string()))
            .with_style("col-fill")
            .with_keys(vec![SortKey::natural(UnitStat::by_unit_number)]),
        Column::new("Legs", |unit: &UnitStat| count_cell(unit.count))
            .with_style("col-count")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(UnitStat::by_count),
                SortKey::reversed(UnitStat::by_distance),
                SortKey::reversed(UnitStat::by_duration),
                SortKey::ascending(UnitStat::by_unit_number),
            ]),
        Column::new("Distance", |unit: &UnitStat| mileage_cell(unit.distance))
            .with_style("col-distance")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(UnitStat::by_distance),
                SortKey::ascending(UnitStat::by_unit_number),
            ]),
        Column::new("Duration", |unit: &UnitStat| duration_cell(unit.duration))
            .with_style("col-duration")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(UnitStat::by_duration),
                SortKey::ascending(UnitStat::by_unit_number),
            ]),
    ]
}

pub fn rank() -> Vec<SortCriterion<UnitStat>> {
    vec![
        SortCriterion::descending(UnitStat::by_count),
        SortCriterion::descending(UnitStat::by_duration),
        SortCriterion::descending(UnitStat::by_distance),
        SortCriterion::ascending(UnitStat::by_unit_number),
    ]
}

pub fn key(unit: &UnitStat) -> String {
    unit.stock_number.to_string()
}

pub fn table(values: Vec<UnitStat>, config: &TableConfig) -> StatsTable<UnitStat> {
    StatsTable {
        title: TITLE,
        colour: COLOUR,
        param: PARAM,
        table: SortableTable::new(values, &rank(), columns(), key, config),
    }
}
