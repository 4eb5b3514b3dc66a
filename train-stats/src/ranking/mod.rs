//! Ranking and sorting for statistics tables.
//!
//! `compare` composes per-field comparators into a deterministic order;
//! `table` holds the click-driven sort state a table page renders from.

mod compare;
mod config;
mod table;

pub use compare::{
    Comparator, KeyOrder, SortCriterion, SortKey, compare_by, compare_keys,
    sort_by_criteria,
};
pub use config::TableConfig;
pub use table::{Arrow, Cell, Column, DisplayRow, InvalidTableState, RankedEntry, SortableTable, TableState};
