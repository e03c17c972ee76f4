//! The transient state of one query construction.
//!
//! A [`QueryContext`] travels by move through the builder stages, carrying
//! the target table, the projection chosen at entry, and the accumulated
//! [`FilterSet`]. Nothing here mutates the source table.

use crate::data::{DataType, Value};
use crate::table::{normalize, ColumnIdentifier, RowRef, Table};
use std::fmt;

/// A type-erased column id: just the header and the element type tag.
///
/// Lets the projection remember id-based selections without a generic
/// parameter per entry.
#[derive(Debug, Clone)]
pub(crate) struct ErasedId {
    pub(crate) header: String,
    pub(crate) dtype: DataType,
}

impl ErasedId {
    pub(crate) fn from_identifier(id: &dyn ColumnIdentifier) -> Self {
        Self {
            header: id.header().to_string(),
            dtype: id.dtype(),
        }
    }
}

impl ColumnIdentifier for ErasedId {
    fn header(&self) -> &str {
        &self.header
    }

    fn dtype(&self) -> DataType {
        self.dtype
    }
}

/// The projection requested when the query was opened (or at its terminal).
#[derive(Debug, Clone)]
pub(crate) enum Selection {
    /// Keep every column of the source table.
    All,
    /// Keep the named columns, in this order.
    Headers(Vec<String>),
    /// Keep the columns matching these ids, in this order.
    Ids(Vec<ErasedId>),
}

/// A predicate bound to one or more column headers.
///
/// During evaluation the predicate is applied to each bound header of a row
/// independently; a filter over `{A, B}` tests the row's `A` and its `B`
/// separately, it is not a join condition between the two.
pub struct Filter {
    headers: Vec<String>,
    predicate: Box<dyn Fn(&Value) -> bool>,
}

impl Filter {
    /// Builds a filter binding `predicate` to `headers` (case-insensitive
    /// duplicates are dropped, first occurrence wins).
    pub fn new(headers: Vec<String>, predicate: Box<dyn Fn(&Value) -> bool>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(headers.len());
        let mut keys: Vec<String> = Vec::with_capacity(headers.len());
        for header in headers {
            let key = normalize(&header);
            if !keys.contains(&key) {
                keys.push(key);
                deduped.push(header);
            }
        }
        Self {
            headers: deduped,
            predicate,
        }
    }

    /// The headers this filter is bound to.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Whether `value` satisfies the predicate.
    pub fn matches(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// The ordered accumulation of filters built by one query chain.
#[derive(Debug, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// An empty set; it matches every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Number of accumulated filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filter has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterates over the filters in accumulation order.
    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Whether `row` is kept: every filter's predicate must hold for every
    /// one of that filter's headers. A header that does not resolve never
    /// matches (terminal evaluation validates headers up front, so this only
    /// arises when a `FilterSet` is used as a standalone matcher).
    pub fn matches(&self, row: RowRef<'_>) -> bool {
        self.filters.iter().all(|filter| {
            filter.headers().iter().all(|header| {
                row.get_by_header(header)
                    .is_ok_and(|value| filter.matches(value))
            })
        })
    }
}

/// State shared by the stages of one query construction.
pub(crate) struct QueryContext<'t> {
    pub(crate) table: &'t Table,
    pub(crate) selection: Selection,
    pub(crate) filters: FilterSet,
}

impl<'t> QueryContext<'t> {
    pub(crate) fn new(table: &'t Table, selection: Selection) -> Self {
        Self {
            table,
            selection,
            filters: FilterSet::new(),
        }
    }
}
