//! Table state: column filters, a single sort key and a page window.
//!
//! [`derive_view`] is the whole derivation as a pure function of the records
//! and a [`ViewState`]. [`TableController`] owns both and applies the user
//! operations, clamping the page cursor against the current record set.

use std::{borrow::Cow, cmp::Ordering, collections::HashMap, fmt, hash::Hash, sync::Arc};

use shared::domain::parse_leading_float;
use thiserror::Error;

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("page size {0} is not one of 10, 20, 30, 40, 50")]
    InvalidPageSize(usize),
    #[error("column {column} takes a {expected:?} filter, got {actual:?}")]
    FilterKindMismatch {
        column: String,
        expected: FilterKind,
        actual: FilterKind,
    },
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-sensitive substring match.
    Text,
    /// Exact match against a selected value.
    Exact,
    /// Inclusive numeric `{min, max}` range.
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Text,
    Numeric,
}

/// A record type the table can display.
pub trait Tabular {
    type Column: Copy + Eq + Hash + fmt::Debug;

    fn filter_kind(column: Self::Column) -> FilterKind;

    /// Comparator used when sorting by `column`; `None` leaves rows in place.
    fn sort_kind(column: Self::Column) -> Option<SortKind>;

    fn text(&self, column: Self::Column) -> Cow<'_, str>;

    /// Numeric value of the cell, `None` when it does not parse.
    fn number(&self, column: Self::Column) -> Option<f64>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Contains(String),
    Equals(String),
    /// Bounds are kept as typed; a bound that does not parse is ignored.
    Range { min: String, max: String },
}

impl FilterValue {
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    pub fn equals(value: impl Into<String>) -> Self {
        Self::Equals(value.into())
    }

    pub fn range(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self::Range {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Contains(_) => FilterKind::Text,
            Self::Equals(_) => FilterKind::Exact,
            Self::Range { .. } => FilterKind::Range,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Contains(value) | Self::Equals(value) => value.is_empty(),
            Self::Range { min, max } => min.is_empty() && max.is_empty(),
        }
    }

    fn matches<R: Tabular>(&self, record: &R, column: R::Column) -> bool {
        match self {
            Self::Contains(needle) => {
                needle.is_empty() || record.text(column).contains(needle.as_str())
            }
            Self::Equals(selected) => selected.is_empty() || record.text(column) == *selected,
            Self::Range { min, max } => {
                let min = parse_leading_float(min);
                let max = parse_leading_float(max);
                if min.is_none() && max.is_none() {
                    return true;
                }
                // Records without a numeric value never satisfy an active bound.
                let Some(value) = record.number(column) else {
                    return false;
                };
                min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<C> {
    pub column: C,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(20)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TableError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if PAGE_SIZE_OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(TableError::InvalidPageSize(value))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<C: Eq + Hash> {
    pub sort: Option<SortSpec<C>>,
    pub filters: HashMap<C, FilterValue>,
    pub page_index: usize,
    pub page_size: PageSize,
}

impl<C: Eq + Hash> Default for ViewState<C> {
    fn default() -> Self {
        Self {
            sort: None,
            filters: HashMap::new(),
            page_index: 0,
            page_size: PageSize::default(),
        }
    }
}

/// A displayed record and its position in the full record set.
#[derive(Debug)]
pub struct Row<'a, R> {
    pub index: usize,
    pub record: &'a R,
}

impl<R> Clone for Row<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Row<'_, R> {}

#[derive(Debug)]
pub struct TableView<'a, R> {
    pub rows: Vec<Row<'a, R>>,
    /// Page actually shown, after clamping the requested index.
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub filtered_count: usize,
    pub total_count: usize,
}

impl<R> TableView<'_, R> {
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    pub fn records(&self) -> impl Iterator<Item = &R> + '_ {
        self.rows.iter().map(|row| row.record)
    }
}

/// Filters, sorts and pages `records` according to `state`.
pub fn derive_view<'a, R: Tabular>(
    records: &'a [R],
    state: &ViewState<R::Column>,
) -> TableView<'a, R> {
    let mut matching: Vec<Row<'a, R>> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| passes_filters(*record, &state.filters))
        .map(|(index, record)| Row { index, record })
        .collect();

    if let Some(sort) = state.sort {
        sort_rows(&mut matching, sort);
    }

    let filtered_count = matching.len();
    let page_size = state.page_size.get();
    let page_count = filtered_count.div_ceil(page_size);
    let page_index = clamp_page(state.page_index, page_count);
    let rows = matching
        .into_iter()
        .skip(page_index * page_size)
        .take(page_size)
        .collect();

    TableView {
        rows,
        page_index,
        page_count,
        page_size,
        filtered_count,
        total_count: records.len(),
    }
}

fn passes_filters<R: Tabular>(record: &R, filters: &HashMap<R::Column, FilterValue>) -> bool {
    filters
        .iter()
        .all(|(column, filter)| filter.matches(record, *column))
}

fn sort_rows<R: Tabular>(rows: &mut [Row<'_, R>], sort: SortSpec<R::Column>) {
    let column = sort.column;
    match R::sort_kind(column) {
        None => return,
        Some(SortKind::Text) => rows.sort_by_cached_key(|row| {
            let text = row.record.text(column).into_owned();
            (text.to_lowercase(), text)
        }),
        Some(SortKind::Numeric) => rows.sort_by(|a, b| {
            compare_numbers(a.record.number(column), b.record.number(column))
        }),
    }

    // Descending is the exact mirror of the stable ascending order.
    if sort.direction == SortDirection::Descending {
        rows.reverse();
    }
}

/// Values that do not parse rank below every number.
fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

fn clamp_page(index: usize, page_count: usize) -> usize {
    index.min(page_count.saturating_sub(1))
}

/// Owns a record set and its view state.
pub struct TableController<R: Tabular> {
    records: Arc<[R]>,
    state: ViewState<R::Column>,
}

impl<R: Tabular> TableController<R> {
    pub fn new(records: impl Into<Arc<[R]>>) -> Self {
        Self {
            records: records.into(),
            state: ViewState::default(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn state(&self) -> &ViewState<R::Column> {
        &self.state
    }

    pub fn filter(&self, column: R::Column) -> Option<&FilterValue> {
        self.state.filters.get(&column)
    }

    /// Replaces the filter on `column`; an empty value removes it. Any
    /// filter change returns to the first page.
    pub fn set_filter(&mut self, column: R::Column, value: FilterValue) -> Result<(), TableError> {
        let expected = R::filter_kind(column);
        if value.kind() != expected {
            return Err(TableError::FilterKindMismatch {
                column: format!("{column:?}"),
                expected,
                actual: value.kind(),
            });
        }

        if value.is_empty() {
            self.state.filters.remove(&column);
        } else {
            self.state.filters.insert(column, value);
        }
        self.state.page_index = 0;
        Ok(())
    }

    pub fn clear_filter(&mut self, column: R::Column) {
        self.state.filters.remove(&column);
        self.state.page_index = 0;
    }

    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.page_index = 0;
    }

    pub fn sort(&self) -> Option<SortSpec<R::Column>> {
        self.state.sort
    }

    pub fn set_sort(&mut self, column: R::Column, direction: SortDirection) {
        self.state.sort = Some(SortSpec { column, direction });
        self.state.page_index = 0;
    }

    /// Flips the direction when `column` is already sorted, otherwise sorts
    /// it ascending. Returns the new direction.
    pub fn toggle_sort(&mut self, column: R::Column) -> SortDirection {
        let direction = match self.state.sort {
            Some(current) if current.column == column => current.direction.reversed(),
            _ => SortDirection::Ascending,
        };
        self.set_sort(column, direction);
        direction
    }

    pub fn clear_sort(&mut self) {
        self.state.sort = None;
        self.state.page_index = 0;
    }

    pub fn filtered_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| passes_filters(*record, &self.state.filters))
            .count()
    }

    pub fn page_count(&self) -> usize {
        self.filtered_count().div_ceil(self.state.page_size.get())
    }

    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    /// Moves to `index`, clamped to the last page. Returns the page selected.
    pub fn set_page(&mut self, index: usize) -> usize {
        self.state.page_index = clamp_page(index, self.page_count());
        self.state.page_index
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.state.page_index.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.state.page_index.saturating_sub(1))
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size.get()
    }

    /// Keeps the page index numerically, clamped to the new page count.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), TableError> {
        self.state.page_size = PageSize::try_from(size)?;
        self.state.page_index = clamp_page(self.state.page_index, self.page_count());
        Ok(())
    }

    pub fn view(&self) -> TableView<'_, R> {
        derive_view(&self.records, &self.state)
    }

    pub fn visible_rows(&self) -> Vec<&R> {
        self.view().rows.into_iter().map(|row| row.record).collect()
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
