//! Every leg of the year, earliest first.

use super::{StatsTable, delay_cell, duration_cell, mileage_cell};
use crate::domain::LegStat;
use crate::ranking::{Cell, Column, SortCriterion, SortKey, SortableTable, TableConfig};

pub const TITLE: &str = "Legs";
pub const COLOUR: &str = "#008eb5";
pub const PARAM: &str = "legs";

pub fn columns() -> Vec<Column<LegStat>> {
    vec![
        Column::new("Date", |leg: &LegStat| Cell::text(leg.board_time.short_date()))
            .with_style("col-date")
            .with_keys(vec![SortKey::natural(LegStat::by_date), SortKey::ascending(LegStat::by_id)]),
        Column::new("Leg", |leg: &LegStat| {
            Cell::text(format!("{} to {}", leg.board_name, leg.alight_name))
                .with_href(format!("/legs/{}", leg.id))
        })
        .with_style("col-fill")
        .unsortable(),
        Column::new("", |leg: &LegStat| {
            Cell::text(leg.operator_code.as_deref().unwrap_or_default())
        })
        .with_style("col-code")
        .unsortable(),
        Column::new("Distance", |leg: &LegStat| mileage_cell(leg.distance))
            .with_style("col-distance")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(LegStat::by_distance),
                SortKey::ascending(LegStat::by_date),
                SortKey::ascending(LegStat::by_id),
            ]),
        Column::new("Duration", |leg: &LegStat| duration_cell(leg.duration))
            .with_style("col-duration")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(LegStat::by_duration),
                SortKey::ascending(LegStat::by_date),
                SortKey::ascending(LegStat::by_id),
            ]),
        Column::new("Delay", |leg: &LegStat| delay_cell(leg.delay))
            .with_style("col-delay")
            .natural_descending()
            .with_keys(vec![
                SortKey::reversed(LegStat::by_delay),
                SortKey::ascending(LegStat::by_date),
                SortKey::ascending(LegStat::by_id),
            ]),
    ]
}

pub fn rank() -> Vec<SortCriterion<LegStat>> {
    vec![
        SortCriterion::ascending(LegStat::by_date),
        SortCriterion::ascending(LegStat::by_id),
    ]
}

pub fn key(leg: &LegStat) -> String {
    leg.id.to_string()
}

pub fn table(values: Vec<LegStat>, config: &TableConfig) -> StatsTable<LegStat> {
    StatsTable {
        title: TITLE,
        colour: COLOUR,
        param: PARAM,
        table: SortableTable::new(values, &rank(), columns(), key, config),
    }
}
