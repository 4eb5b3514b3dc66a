//! Sortable tables.
//!
//! A [`SortableTable`] ranks its values once, when initialized, and keeps
//! that rank as a fallback order. Clicking a column header sorts by that
//! column; clicking it again reverses it. With no column active the table
//! shows rank order, forwards or backwards.
//!
//! Every state change recomputes the displayed order from scratch over the
//! ranked entries, so the result depends only on the current state and
//! never on the sequence of clicks that led to it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::compare::{SortCriterion, SortKey, compare_keys, sort_by_criteria};
use super::config::TableConfig;

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    /// Extra stylesheet class, e.g. a delay band.
    pub class: Option<&'static str>,
    pub href: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
            href: None,
        }
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        if !class.is_empty() {
            self.class = Some(class);
        }
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// A table column: how to render a value and how to order by it.
pub struct Column<T> {
    pub label: &'static str,
    pub style: &'static str,
    /// Whether the column's natural direction is ascending. Only affects
    /// which arrow is drawn.
    pub natural_ascending: bool,
    pub sortable: bool,
    keys: Vec<SortKey<T>>,
    render: fn(&T) -> Cell,
}

impl<T> Column<T> {
    pub fn new(label: &'static str, render: fn(&T) -> Cell) -> Self {
        Self {
            label,
            style: "",
            natural_ascending: true,
            sortable: true,
            keys: Vec::new(),
            render,
        }
    }

    pub fn with_style(mut self, style: &'static str) -> Self {
        self.style = style;
        self
    }

    pub fn natural_descending(mut self) -> Self {
        self.natural_ascending = false;
        self
    }

    /// Keys compared in order when sorting by this column.
    pub fn with_keys(mut self, keys: Vec<SortKey<T>>) -> Self {
        self.keys = keys;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Compare under this column. `direction` is `true` for the column's
    /// natural direction.
    pub fn compare(&self, a: &T, b: &T, direction: bool) -> Ordering {
        compare_keys(a, b, &self.keys, direction)
    }

    pub fn render(&self, value: &T) -> Cell {
        (self.render)(value)
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("label", &self.label)
            .field("natural_ascending", &self.natural_ascending)
            .field("sortable", &self.sortable)
            .field("keys", &self.keys.len())
            .finish()
    }
}

/// A value with its position in the initial rank order (zero-based).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry<T> {
    pub original_rank: usize,
    pub value: T,
}

/// Sort direction indicator drawn next to the active header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
}

impl Arrow {
    pub fn glyph(&self) -> &'static str {
        match self {
            Arrow::Up => "\u{25b2}",
            Arrow::Down => "\u{25bc}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid table state {0:?}")]
pub struct InvalidTableState(String);

/// What the user has chosen for one table.
///
/// Encoded in URLs as `"{rank|<column>}:{natural|reverse}[:all]"`, e.g.
/// `"rank:natural"` or `"3:reverse:all"`.
///
/// # Examples
///
/// ```
/// use train_stats::ranking::TableState;
///
/// let state = TableState::default().activated(Some(2));
/// assert_eq!(state.to_string(), "2:natural");
///
/// let again = state.activated(Some(2)).toggled_extended();
/// assert_eq!(again.to_string(), "2:reverse:all");
/// assert_eq!("2:reverse:all".parse::<TableState>().unwrap(), again);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableState {
    /// `None` means rank order.
    pub active_column: Option<usize>,
    /// `true` for the natural direction.
    pub direction: bool,
    /// Show every row rather than the first few.
    pub extended: bool,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            active_column: None,
            direction: true,
            extended: false,
        }
    }
}

impl TableState {
    /// State after clicking a header. `None` is the rank header.
    ///
    /// Clicking the active header reverses it; clicking another starts it
    /// in its natural direction.
    pub fn activated(self, column: Option<usize>) -> Self {
        if self.active_column == column {
            Self {
                direction: !self.direction,
                ..self
            }
        } else {
            Self {
                active_column: column,
                direction: true,
                ..self
            }
        }
    }

    /// Back to rank order in its natural direction.
    pub fn deactivated(self) -> Self {
        Self {
            active_column: None,
            direction: true,
            ..self
        }
    }

    pub fn toggled_extended(self) -> Self {
        Self {
            extended: !self.extended,
            ..self
        }
    }
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.active_column {
            Some(column) => write!(f, "{}", column)?,
            None => f.write_str("rank")?,
        }
        f.write_str(if self.direction { ":natural" } else { ":reverse" })?;
        if self.extended {
            f.write_str(":all")?;
        }
        Ok(())
    }
}

impl FromStr for TableState {
    type Err = InvalidTableState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTableState(s.to_string());
        let mut parts = s.split(':');

        let active_column = match parts.next().ok_or_else(invalid)? {
            "rank" => None,
            n => Some(n.parse::<usize>().map_err(|_| invalid())?),
        };
        let direction = match parts.next().ok_or_else(invalid)? {
            "natural" => true,
            "reverse" => false,
            _ => return Err(invalid()),
        };
        let extended = match parts.next() {
            None => false,
            Some("all") => true,
            Some(_) => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            active_column,
            direction,
            extended,
        })
    }
}

/// One visible row.
#[derive(Debug)]
pub struct DisplayRow<'a, T> {
    /// 1-based position in the displayed order.
    pub position: usize,
    /// 1-based position in the initial rank order.
    pub rank: usize,
    pub key: String,
    pub cells: Vec<Cell>,
    pub value: &'a T,
}

/// A ranked collection with column sorting and a show more/fewer switch.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use train_stats::ranking::{Cell, Column, SortCriterion, SortKey, SortableTable, TableConfig};
///
/// fn by_count(a: &(&'static str, u32), b: &(&'static str, u32)) -> Ordering {
///     a.1.cmp(&b.1)
/// }
/// fn by_name(a: &(&'static str, u32), b: &(&'static str, u32)) -> Ordering {
///     a.0.cmp(b.0)
/// }
///
/// let columns = vec![
///     Column::new("Name", |v: &(&'static str, u32)| Cell::text(v.0))
///         .with_keys(vec![SortKey::natural(by_name)]),
/// ];
/// let mut table = SortableTable::new(
///     vec![("York", 2), ("Ely", 5), ("Bath", 2)],
///     &[SortCriterion::descending(by_count), SortCriterion::ascending(by_name)],
///     columns,
///     |v| v.0.to_string(),
///     &TableConfig::default(),
/// );
/// let names = |t: &SortableTable<(&'static str, u32)>| {
///     t.ordered().map(|e| e.value.0).collect::<Vec<_>>()
/// };
///
/// assert_eq!(names(&table), ["Ely", "Bath", "York"]);
/// table.activate_column(0);
/// assert_eq!(names(&table), ["Bath", "Ely", "York"]);
/// table.deactivate();
/// assert_eq!(names(&table), ["Ely", "Bath", "York"]);
/// ```
pub struct SortableTable<T> {
    columns: Vec<Column<T>>,
    key: fn(&T) -> String,
    entries: Vec<RankedEntry<T>>,
    /// Indices into `entries` in display order.
    order: Vec<usize>,
    state: TableState,
    rows_shown: usize,
}

impl<T> SortableTable<T> {
    pub fn new(
        values: Vec<T>,
        rank: &[SortCriterion<T>],
        columns: Vec<Column<T>>,
        key: fn(&T) -> String,
        config: &TableConfig,
    ) -> Self {
        let mut table = Self {
            columns,
            key,
            entries: Vec::new(),
            order: Vec::new(),
            state: TableState::default(),
            rows_shown: config.rows_shown,
        };
        table.initialize(values, rank);
        table
    }

    /// Rank `values` and reset the table state. Called again whenever the
    /// underlying collection changes.
    pub fn initialize(&mut self, mut values: Vec<T>, rank: &[SortCriterion<T>]) {
        sort_by_criteria(&mut values, rank);
        self.entries = values
            .into_iter()
            .enumerate()
            .map(|(original_rank, value)| RankedEntry {
                original_rank,
                value,
            })
            .collect();
        self.state = TableState::default();
        self.resort();
    }

    /// Header click on a column. Ignored for unsortable or unknown columns.
    pub fn activate_column(&mut self, index: usize) {
        if self.is_sortable(Some(index)) {
            self.state = self.state.activated(Some(index));
            self.resort();
        }
    }

    /// Header click on the rank column: reverses rank order if it is
    /// already showing, else switches to it.
    pub fn activate_rank(&mut self) {
        self.state = self.state.activated(None);
        self.resort();
    }

    /// Restore the initial rank order.
    pub fn deactivate(&mut self) {
        self.state = self.state.deactivated();
        self.resort();
    }

    pub fn toggle_extended(&mut self) {
        self.state = self.state.toggled_extended();
    }

    /// Adopt a state decoded from a request. A state naming a column that
    /// cannot be sorted falls back to rank order.
    pub fn apply_state(&mut self, state: TableState) {
        self.state = if self.is_sortable(state.active_column) {
            state
        } else {
            state.deactivated()
        };
        self.resort();
    }

    /// State after a click on the given header, or `None` if clicking it
    /// does nothing.
    pub fn header_target(&self, column: Option<usize>) -> Option<TableState> {
        self.is_sortable(column)
            .then(|| self.state.activated(column))
    }

    /// Arrow for a header, drawn only on the active one.
    pub fn arrow(&self, column: Option<usize>) -> Option<Arrow> {
        if self.state.active_column != column {
            return None;
        }
        let natural_ascending = match column {
            Some(i) => self.columns.get(i)?.natural_ascending,
            None => true,
        };
        Some(if self.state.direction == natural_ascending {
            Arrow::Up
        } else {
            Arrow::Down
        })
    }

    fn is_sortable(&self, column: Option<usize>) -> bool {
        match column {
            Some(i) => self.columns.get(i).is_some_and(|c| c.sortable),
            None => true,
        }
    }

    fn resort(&mut self) {
        let entries = &self.entries;
        let mut order: Vec<usize> = (0..entries.len()).collect();
        let direction = self.state.direction;
        match self.state.active_column.and_then(|i| self.columns.get(i)) {
            Some(column) => order.sort_by(|&a, &b| {
                column.compare(&entries[a].value, &entries[b].value, direction)
            }),
            None => order.sort_by(|&a, &b| {
                let ordering = entries[a].original_rank.cmp(&entries[b].original_rank);
                if direction { ordering } else { ordering.reverse() }
            }),
        }
        self.order = order;
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Entries in rank order.
    pub fn entries(&self) -> &[RankedEntry<T>] {
        &self.entries
    }

    /// Every entry in display order.
    pub fn ordered(&self) -> impl Iterator<Item = &RankedEntry<T>> {
        self.order.iter().map(|&i| &self.entries[i])
    }

    /// The rows to draw: the first few unless extended.
    pub fn rows(&self) -> Vec<DisplayRow<'_, T>> {
        let limit = if self.state.extended {
            usize::MAX
        } else {
            self.rows_shown
        };
        self.ordered()
            .take(limit)
            .enumerate()
            .map(|(i, entry)| DisplayRow {
                position: i + 1,
                rank: entry.original_rank + 1,
                key: (self.key)(&entry.value),
                cells: self.columns.iter().map(|c| c.render(&entry.value)).collect(),
                value: &entry.value,
            })
            .collect()
    }

    /// Whether there are rows hidden when not extended.
    pub fn has_more(&self) -> bool {
        self.entries.len() > self.rows_shown
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for SortableTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableTable")
            .field("columns", &self.columns)
            .field("state", &self.state)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Stn {
        id: &'static str,
        boards: u32,
        alights: u32,
    }

    fn by_id(a: &Stn, b: &Stn) -> Ordering {
        a.id.cmp(b.id)
    }

    fn by_boards(a: &Stn, b: &Stn) -> Ordering {
        a.boards.cmp(&b.boards)
    }

    fn by_alights(a: &Stn, b: &Stn) -> Ordering {
        a.alights.cmp(&b.alights)
    }

    fn columns() -> Vec<Column<Stn>> {
        vec![
            Column::new("Station", |s: &Stn| Cell::text(s.id))
                .with_keys(vec![SortKey::natural(by_id)]),
            Column::new("B", |s: &Stn| Cell::text(s.boards.to_string()))
                .natural_descending()
                .with_keys(vec![
                    SortKey::reversed(by_boards),
                    SortKey::reversed(by_alights),
                    SortKey::ascending(by_id),
                ]),
            Column::new("Note", |_: &Stn| Cell::text("")).unsortable(),
        ]
    }

    fn rank() -> [SortCriterion<Stn>; 3] {
        [
            SortCriterion::descending(by_boards),
            SortCriterion::descending(by_alights),
            SortCriterion::ascending(by_id),
        ]
    }

    fn values() -> Vec<Stn> {
        vec![
            Stn { id: "A", boards: 10, alights: 2 },
            Stn { id: "B", boards: 10, alights: 5 },
            Stn { id: "C", boards: 3, alights: 20 },
        ]
    }

    fn table() -> SortableTable<Stn> {
        SortableTable::new(values(), &rank(), columns(), |s| s.id.to_string(), &TableConfig::default())
    }

    fn ids(table: &SortableTable<Stn>) -> Vec<&'static str> {
        table.ordered().map(|e| e.value.id).collect()
    }

    #[test]
    fn initial_rank_order() {
        let t = table();
        assert_eq!(ids(&t), ["B", "A", "C"]);
        let ranks: Vec<usize> = t.entries().iter().map(|e| e.original_rank).collect();
        assert_eq!(ranks, [0, 1, 2]);
        assert_eq!(t.state(), TableState::default());
    }

    #[test]
    fn first_click_is_natural_second_reverses() {
        let mut t = table();
        t.activate_column(0);
        assert_eq!(t.state().direction, true);
        assert_eq!(ids(&t), ["A", "B", "C"]);

        t.activate_column(0);
        assert_eq!(t.state().direction, false);
        assert_eq!(ids(&t), ["C", "B", "A"]);
    }

    #[test]
    fn switching_column_restarts_natural() {
        let mut t = table();
        t.activate_column(0);
        t.activate_column(0);
        t.activate_column(1);
        assert_eq!(t.state().active_column, Some(1));
        assert!(t.state().direction);
        assert_eq!(ids(&t), ["B", "A", "C"]);

        t.activate_column(1);
        assert_eq!(ids(&t), ["C", "A", "B"]);
    }

    #[test]
    fn unsortable_and_unknown_columns_ignored() {
        let mut t = table();
        t.activate_column(2);
        t.activate_column(17);
        assert_eq!(t.state(), TableState::default());
        assert_eq!(t.header_target(Some(2)), None);
        assert_eq!(t.header_target(Some(17)), None);
    }

    #[test]
    fn deactivate_restores_rank() {
        let mut t = table();
        t.activate_column(0);
        t.activate_column(1);
        t.activate_column(1);
        t.deactivate();
        assert_eq!(ids(&t), ["B", "A", "C"]);
        assert_eq!(t.state(), TableState::default());
    }

    #[test]
    fn rank_header_reverses_rank_order() {
        let mut t = table();
        t.activate_rank();
        assert_eq!(ids(&t), ["C", "A", "B"]);
        t.activate_rank();
        assert_eq!(ids(&t), ["B", "A", "C"]);

        t.activate_column(0);
        t.activate_rank();
        assert_eq!(t.state().active_column, None);
        assert_eq!(ids(&t), ["B", "A", "C"]);
    }

    #[test]
    fn arrows() {
        let mut t = table();
        assert_eq!(t.arrow(None), Some(Arrow::Up));
        assert_eq!(t.arrow(Some(0)), None);

        t.activate_column(1);
        // natural direction of a descending column draws a down arrow
        assert_eq!(t.arrow(Some(1)), Some(Arrow::Down));
        t.activate_column(1);
        assert_eq!(t.arrow(Some(1)), Some(Arrow::Up));
        assert_eq!(t.arrow(None), None);
    }

    #[test]
    fn rows_limited_until_extended() {
        let many: Vec<Stn> = (0..15)
            .map(|i| Stn {
                id: ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o"][i],
                boards: i as u32,
                alights: 0,
            })
            .collect();
        let mut t = SortableTable::new(many, &rank(), columns(), |s| s.id.to_string(), &TableConfig::default());
        assert!(t.has_more());
        assert_eq!(t.rows().len(), 10);

        t.toggle_extended();
        let order_before: Vec<_> = ids(&t);
        assert_eq!(t.rows().len(), 15);
        t.toggle_extended();
        assert_eq!(t.rows().len(), 10);
        assert_eq!(ids(&t), order_before);
    }

    #[test]
    fn rows_carry_rank_and_cells() {
        let mut t = table();
        t.activate_column(0);
        let rows = t.rows();
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].key, "A");
        assert_eq!(rows[0].rank, 2);
        assert_eq!(rows[0].cells[1].text, "10");
        assert!(!t.has_more());
    }

    #[test]
    fn apply_state_validates_column() {
        let mut t = table();
        t.apply_state("1:reverse:all".parse().unwrap());
        assert_eq!(ids(&t), ["C", "A", "B"]);
        assert!(t.state().extended);

        t.apply_state("2:natural".parse().unwrap());
        assert_eq!(t.state(), TableState::default());
        assert_eq!(ids(&t), ["B", "A", "C"]);
    }

    #[test]
    fn reinitialize_resets() {
        let mut t = table();
        t.activate_column(0);
        t.toggle_extended();
        t.initialize(vec![Stn { id: "Z", boards: 1, alights: 1 }], &rank());
        assert_eq!(ids(&t), ["Z"]);
        assert_eq!(t.state(), TableState::default());
    }

    #[test]
    fn empty_table() {
        let mut t = SortableTable::new(Vec::new(), &rank(), columns(), |s: &Stn| s.id.to_string(), &TableConfig::default());
        t.activate_column(1);
        assert!(t.is_empty());
        assert!(t.rows().is_empty());
        assert!(!t.has_more());
    }

    #[test]
    fn state_encoding() {
        assert_eq!(TableState::default().to_string(), "rank:natural");
        for s in ["rank:natural", "rank:reverse:all", "0:natural", "12:reverse"] {
            assert_eq!(s.parse::<TableState>().unwrap().to_string(), s);
        }
        for s in ["", "rank", "x:natural", "1:up", "1:natural:some", "1:natural:all:x", "-1:natural"] {
            assert!(s.parse::<TableState>().is_err(), "{s:?} should be rejected");
        }
    }

    #[test]
    fn cell_builders() {
        let cell = Cell::text("+3").with_class("delay-late").with_href("/legs/1");
        assert_eq!(cell.class, Some("delay-late"));
        assert_eq!(cell.href.as_deref(), Some("/legs/1"));
        assert_eq!(Cell::text("x").with_class("").class, None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    type Row = (u8, u8, u32);

    fn by_a(x: &Row, y: &Row) -> Ordering {
        x.0.cmp(&y.0)
    }

    fn by_b(x: &Row, y: &Row) -> Ordering {
        x.1.cmp(&y.1)
    }

    fn by_id(x: &Row, y: &Row) -> Ordering {
        x.2.cmp(&y.2)
    }

    fn rows() -> impl Strategy<Value = Vec<Row>> {
        proptest::collection::vec((0u8..4, 0u8..4), 0..25).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (a, b))| (a, b, i as u32))
                .collect()
        })
    }

    fn make(values: Vec<Row>) -> SortableTable<Row> {
        let columns = vec![
            Column::new("A", |r: &Row| Cell::text(r.0.to_string()))
                .with_keys(vec![SortKey::natural(by_a), SortKey::ascending(by_id)]),
            Column::new("B", |r: &Row| Cell::text(r.1.to_string()))
                .natural_descending()
                .with_keys(vec![SortKey::reversed(by_b), SortKey::reversed(by_a)]),
            Column::new("-", |_: &Row| Cell::default()).unsortable(),
        ];
        SortableTable::new(
            values,
            &[
                SortCriterion::descending(by_b),
                SortCriterion::ascending(by_a),
                SortCriterion::ascending(by_id),
            ],
            columns,
            |r| r.2.to_string(),
            &TableConfig::default(),
        )
    }

    fn order(t: &SortableTable<Row>) -> Vec<u32> {
        t.ordered().map(|e| e.value.2).collect()
    }

    proptest! {
        /// Deactivating after any clicks restores the initial order
        #[test]
        fn rank_stability(values in rows(), clicks in proptest::collection::vec(0usize..4, 0..12)) {
            let mut t = make(values);
            let initial = order(&t);
            for c in clicks {
                match c {
                    3 => t.activate_rank(),
                    i => t.activate_column(i),
                }
            }
            t.deactivate();
            prop_assert_eq!(order(&t), initial);
        }

        /// Two clicks on a fresh column flip direction exactly once
        #[test]
        fn toggle_idempotence(values in rows(), prior in proptest::collection::vec(0usize..2, 0..6), col in 0usize..2) {
            let mut t = make(values);
            for p in prior {
                t.activate_column(p);
            }
            if t.state().active_column == Some(col) {
                t.activate_column(1 - col);
            }
            t.activate_column(col);
            prop_assert!(t.state().direction);
            t.activate_column(col);
            prop_assert!(!t.state().direction);
        }

        /// Display order depends only on state, not on how it was reached
        #[test]
        fn order_is_function_of_state(values in rows(), clicks in proptest::collection::vec(0usize..3, 0..12)) {
            let mut t = make(values.clone());
            for c in clicks {
                t.activate_column(c);
            }
            let mut fresh = make(values);
            fresh.apply_state(t.state());
            prop_assert_eq!(order(&t), order(&fresh));
        }

        /// Extending never changes the order, only how much is shown
        #[test]
        fn extension_preserves_order(values in rows(), col in 0usize..2) {
            let mut t = make(values);
            t.activate_column(col);
            let before = order(&t);
            t.toggle_extended();
            prop_assert_eq!(order(&t), before.clone());
            prop_assert_eq!(t.rows().len(), before.len());
        }

        /// State encoding round-trips
        #[test]
        fn state_roundtrip(column in proptest::option::of(0usize..50), direction: bool, extended: bool) {
            let state = TableState { active_column: column, direction, extended };
            prop_assert_eq!(state.to_string().parse::<TableState>().unwrap(), state);
        }
    }
}
