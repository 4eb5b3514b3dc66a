//! The statistics tables shown on a year page.
//!
//! Each submodule declares one table's columns, the order it is ranked in
//! and the key that identifies a row. Rank orders always finish on an
//! identity comparison so they are total.

pub mod classes;
pub mod legs;
pub mod operators;
pub mod stations;
pub mod units;

use crate::domain::{Delay, LegDuration, delay_class, delay_text, format_duration, format_mileage};
use crate::ranking::{Cell, SortableTable, TableState};

/// A sortable table with its heading and the query parameter that carries
/// its state between requests.
pub struct StatsTable<T> {
    pub title: &'static str,
    pub colour: &'static str,
    pub param: &'static str,
    pub table: SortableTable<T>,
}

impl<T> StatsTable<T> {
    /// Apply the state from a query parameter, ignoring values that do
    /// not decode.
    pub fn with_state(mut self, encoded: Option<&str>) -> Self {
        if let Some(state) = encoded.and_then(|s| s.parse::<TableState>().ok()) {
            self.table.apply_state(state);
        }
        self
    }
}

fn mileage_cell(miles: Option<f64>) -> Cell {
    Cell::text(format_mileage(miles))
}

fn duration_cell(duration: Option<LegDuration>) -> Cell {
    Cell::text(format_duration(duration))
}

fn delay_cell(delay: Option<Delay>) -> Cell {
    Cell::text(delay_text(delay)).with_class(delay_class(delay))
}

fn count_cell(count: u32) -> Cell {
    Cell::text(count.to_string())
}
