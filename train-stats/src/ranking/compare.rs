//! Comparator composition.
//!
//! Tables rank by one primary statistic but must break ties the same way
//! on every render, so orderings are built from a list of criteria applied
//! in sequence: the first criterion that tells two values apart decides.

use std::cmp::Ordering;

/// An ascending comparison on one field of `T`.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// A comparator with a direction.
pub struct SortCriterion<T> {
    pub comparator: Comparator<T>,
    pub ascending: bool,
}

// Derives would require `T: Clone`.
impl<T> Clone for SortCriterion<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SortCriterion<T> {}

impl<T> std::fmt::Debug for SortCriterion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortCriterion")
            .field("ascending", &self.ascending)
            .finish_non_exhaustive()
    }
}

impl<T> SortCriterion<T> {
    pub fn new(comparator: Comparator<T>, ascending: bool) -> Self {
        Self {
            comparator,
            ascending,
        }
    }

    pub fn ascending(comparator: Comparator<T>) -> Self {
        Self::new(comparator, true)
    }

    pub fn descending(comparator: Comparator<T>) -> Self {
        Self::new(comparator, false)
    }

    /// Compare under this criterion, reversed when descending.
    pub fn apply(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.comparator)(a, b);
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// Compare `a` and `b` by each criterion in turn, returning the first
/// result that is not `Equal`.
///
/// Returns `Equal` only when every criterion ties, so callers wanting a
/// total order should finish with an identity comparison.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use train_stats::ranking::{SortCriterion, compare_by};
///
/// fn by_count(a: &(u32, char), b: &(u32, char)) -> Ordering {
///     a.0.cmp(&b.0)
/// }
/// fn by_name(a: &(u32, char), b: &(u32, char)) -> Ordering {
///     a.1.cmp(&b.1)
/// }
///
/// let criteria = [
///     SortCriterion::descending(by_count),
///     SortCriterion::ascending(by_name),
/// ];
/// assert_eq!(compare_by(&(3, 'b'), &(1, 'a'), &criteria), Ordering::Less);
/// assert_eq!(compare_by(&(3, 'b'), &(3, 'a'), &criteria), Ordering::Greater);
/// assert_eq!(compare_by(&(3, 'b'), &(3, 'b'), &criteria), Ordering::Equal);
/// ```
pub fn compare_by<T>(a: &T, b: &T, criteria: &[SortCriterion<T>]) -> Ordering {
    criteria
        .iter()
        .map(|criterion| criterion.apply(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Sort in place by composed criteria. The sort is stable, so values that
/// tie on every criterion keep their relative order.
pub fn sort_by_criteria<T>(values: &mut [T], criteria: &[SortCriterion<T>]) {
    values.sort_by(|a, b| compare_by(a, b, criteria));
}

/// How a sort key's direction relates to the direction a column is sorted
/// in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrder {
    /// Ascending when the column is sorted in its natural direction.
    Natural,
    /// Descending when the column is sorted in its natural direction.
    Reversed,
    /// Always ascending, e.g. a name used to break ties.
    Ascending,
}

impl KeyOrder {
    /// Whether the key sorts ascending for the given column direction
    /// (`true` is the column's natural direction).
    pub fn resolve(self, direction: bool) -> bool {
        match self {
            KeyOrder::Natural => direction,
            KeyOrder::Reversed => !direction,
            KeyOrder::Ascending => true,
        }
    }
}

/// A comparator whose direction depends on the column direction.
pub struct SortKey<T> {
    pub comparator: Comparator<T>,
    pub order: KeyOrder,
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SortKey<T> {}

impl<T> SortKey<T> {
    pub fn new(comparator: Comparator<T>, order: KeyOrder) -> Self {
        Self { comparator, order }
    }

    pub fn natural(comparator: Comparator<T>) -> Self {
        Self::new(comparator, KeyOrder::Natural)
    }

    pub fn reversed(comparator: Comparator<T>) -> Self {
        Self::new(comparator, KeyOrder::Reversed)
    }

    pub fn ascending(comparator: Comparator<T>) -> Self {
        Self::new(comparator, KeyOrder::Ascending)
    }

    pub fn criterion(&self, direction: bool) -> SortCriterion<T> {
        SortCriterion::new(self.comparator, self.order.resolve(direction))
    }
}

/// Compare by a list of keys resolved against a column direction.
pub fn compare_keys<T>(a: &T, b: &T, keys: &[SortKey<T>], direction: bool) -> Ordering {
    keys.iter()
        .map(|key| key.criterion(direction).apply(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
