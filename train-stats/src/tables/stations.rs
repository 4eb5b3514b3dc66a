//! Stations visited, busiest first.
//!
//! B is boardings, A alightings, C calls passed through and T all three.

use super::{StatsTable, count_cell};
use crate::domain::StationStat;
use crate::ranking::{Cell, Column, Comparator, SortCriterion, SortKey, SortableTable, TableConfig};

pub const TITLE: &str = "Stations";
pub const COLOUR: &str = "#db2700";
pub const PARAM: &str = "stations";

/// A count column's keys: its own count, then the other counts, then name.
fn counts_after(
    first: SortKey<StationStat>,
    rest: &[Comparator<StationStat>],
) -> Vec<SortKey<StationStat>> {
    let mut keys = vec![first];
    keys.extend(rest.iter().map(|&c| SortKey::reversed(c)));
    keys.push(SortKey::ascending(StationStat::by_name));
    keys.push(SortKey::ascending(StationStat::by_crs));
    keys
}

pub fn columns() -> Vec<Column<StationStat>> {
    vec![
        Column::new("Station", |stn: &StationStat| {
            Cell::text(format!("{} {}", stn.crs, stn.name)).with_href(format!("/stations/{}", stn.crs))
        })
        .with_style("col-fill")
        .with_keys(vec![
            SortKey::natural(StationStat::by_name),
            SortKey::natural(StationStat::by_crs),
        ]),
        Column::new("Operator", |stn: &StationStat| Cell::text(stn.operator_name.clone()))
            .with_style("col-operator")
            .with_keys(vec![
                SortKey::natural(StationStat::by_operator),
                SortKey::reversed(StationStat::by_boards_plus_alights),
                SortKey::reversed(StationStat::by_boards),
                SortKey::reversed(StationStat::by_alights),
                SortKey::reversed(StationStat::by_calls),
                SortKey::natural(StationStat::by_name),
                SortKey::natural(StationStat::by_crs),
            ]),
        Column::new("B", |stn: &StationStat| count_cell(stn.boards))
            .with_style("col-count")
            .natural_descending()
            .with_keys(counts_after(
                SortKey::reversed(StationStat::by_boards),
                &[StationStat::by_alights, StationStat::by_calls],
            )),
        Column::new("A", |stn: &StationStat| count_cell(stn.alights))
            .with_style("col-count")
            .natural_descending()
            .with_keys(counts_after(
                SortKey::reversed(StationStat::by_alights),
                &[StationStat::by_boards, StationStat::by_calls],
            )),
        Column::new("B+A", |stn: &StationStat| count_cell(stn.boards_plus_alights()))
            .with_style("col-count")
            .natural_descending()
            .with_keys(counts_after(
                SortKey::reversed(StationStat::by_boards_plus_alights),
                &[StationStat::by_boards, StationStat::by_alights, StationStat::by_calls],
            )),
        Column::new("C", |stn: &StationStat| count_cell(stn.intermediates))
            .with_style("col-count")
            .natural_descending()
            .with_keys(counts_after(
                SortKey::reversed(StationStat::by_calls),
                &[StationStat::by_boards, StationStat::by_alights],
            )),
        Column::new("T", |stn: &StationStat| count_cell(stn.total()))
            .with_style("col-count")
            .natural_descending()
            .with_keys(counts_after(
                SortKey::reversed(StationStat::by_total),
                &[StationStat::by_boards, StationStat::by_alights, StationStat::by_calls],
            )),
    ]
}

pub fn rank() -> Vec<SortCriterion<StationStat>> {
    vec![
        SortCriterion::descending(StationStat::by_boards_plus_alights),
        SortCriterion::descending(StationStat::by_boards),
        SortCriterion::descending(StationStat::by_alights),
        SortCriterion::descending(StationStat::by_calls),
        SortCriterion::ascending(StationStat::by_name),
        SortCriterion::ascending(StationStat::by_crs),
    ]
}

pub fn key(stn: &StationStat) -> String {
    stn.crs.to_string()
}

pub fn table(values: Vec<StationStat>, config: &TableConfig) -> StatsTable<StationStat> {
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
    use crate::domain::Crs;

    fn stn(crs: &str, name: &str, boards: u32, alights: u32, intermediates: u32) -> StationStat {
        StationStat {
            crs: Crs::parse(crs).unwrap(),
            name: name.into(),
            operator_name: "Network Rail".into(),
            operator_id: 1,
            is_brand: false,
            boards,
            alights,
            intermediates,
        }
    }

    fn crs_order(t: &StatsTable<StationStat>) -> Vec<String> {
        t.table.ordered().map(|e| key(&e.value)).collect()
    }

    #[test]
    fn boards_column_breaks_ties_on_alights() {
        let values = vec![
            stn("AAA", "Alpha", 10, 2, 0),
            stn("BBB", "Bravo", 10, 5, 0),
            stn("CCC", "Charlie", 3, 20, 0),
        ];
        let mut t = table(values, &TableConfig::default());
        t.table.activate_column(2);
        assert_eq!(crs_order(&t), ["BBB", "AAA", "CCC"]);
    }

    #[test]
    fn rank_by_boards_plus_alights() {
        let values = vec![
            stn("AAA", "Alpha", 1, 1, 50),
            stn("BBB", "Bravo", 4, 4, 0),
            stn("CCC", "Charlie", 5, 3, 0),
            stn("DDD", "Delta", 5, 3, 0),
        ];
        let t = table(values, &TableConfig::default());
        assert_eq!(crs_order(&t), ["CCC", "DDD", "BBB", "AAA"]);
    }

    #[test]
    fn total_column_counts_calls() {
        let values = vec![
            stn("AAA", "Alpha", 1, 1, 50),
            stn("BBB", "Bravo", 4, 4, 0),
        ];
        let mut t = table(values, &TableConfig::default());
        t.table.activate_column(6);
        assert_eq!(crs_order(&t), ["AAA", "BBB"]);
        assert_eq!(t.table.rows()[0].cells[6].text, "52");
    }

    #[test]
    fn station_column_alphabetical_then_reverse() {
        let values = vec![
            stn("YRK", "York", 1, 0, 0),
            stn("ABD", "Aberdeen", 0, 1, 0),
            stn("EDB", "Edinburgh", 3, 3, 3),
        ];
        let mut t = table(values, &TableConfig::default());
        t.table.activate_column(0);
        assert_eq!(crs_order(&t), ["ABD", "EDB", "YRK"]);
        t.table.activate_column(0);
        assert_eq!(crs_order(&t), ["YRK", "EDB", "ABD"]);
    }

    #[test]
    fn station_cell_links() {
        let t = table(vec![stn("EDB", "Edinburgh", 1, 1, 1)], &TableConfig::default());
        let rows = t.table.rows();
        let cell = &rows[0].cells[0];
        assert_eq!(cell.text, "EDB Edinburgh");
        assert_eq!(cell.href.as_deref(), Some("/stations/EDB"));
    }
}
