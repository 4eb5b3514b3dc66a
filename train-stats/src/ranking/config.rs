//! Display configuration for sortable tables.

/// Configuration shared by every sortable table on a page.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Rows shown before "Show more..." is clicked.
    pub rows_shown: usize,
}

impl TableConfig {
    pub fn new(rows_shown: usize) -> Self {
        Self { rows_shown }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { rows_shown: 10 }
    }
}
