//! The conjunction stage: extend the chain or evaluate it.
//!
//! Every predicate method of the `where` stages lands here. From an [`And`]
//! the caller either opens another clause (all clauses are ANDed) or runs one
//! of the `select` terminals, which produce a brand-new [`Table`].

use super::context::{ErasedId, Filter, QueryContext, Selection};
use super::typed::{WhereNumber, WhereStr};
use super::where_clause::Where;
use crate::data::{CellType, Value};
use crate::table::{ColumnId, ColumnIdentifier, ColumnOfNumbersId, ColumnOfStringsId, RowRef, Table};
use crate::Result;

/// A query with at least one recorded filter, ready to extend or evaluate.
pub struct And<'t> {
    ctx: QueryContext<'t>,
}

impl<'t> And<'t> {
    /// Appends a filter binding `predicate` to `headers` and moves the chain
    /// into the conjunction stage.
    pub(crate) fn record<P>(mut ctx: QueryContext<'t>, headers: Vec<String>, predicate: P) -> Self
    where
        P: Fn(&Value) -> bool + 'static,
    {
        ctx.filters.push(Filter::new(headers, Box::new(predicate)));
        Self { ctx }
    }

    /// Opens a further clause over every column the table currently has.
    pub fn and_any(self) -> Where<'t, Value> {
        let headers = self.ctx.table.columns().headers();
        Where::new(self.ctx, headers)
    }

    /// Opens a further clause over the column named `header`.
    pub fn and_col(self, header: &str) -> Where<'t, Value> {
        Where::new(self.ctx, vec![header.to_string()])
    }

    /// Opens a further clause over several named columns at once.
    pub fn and_cols<I, S>(self, headers: I) -> Where<'t, Value>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers = headers.into_iter().map(Into::into).collect();
        Where::new(self.ctx, headers)
    }

    /// Opens a further typed clause over the column identified by `id`.
    pub fn and_id<T: CellType>(self, id: &ColumnId<T>) -> Where<'t, T> {
        Where::new(self.ctx, vec![id.header().to_string()])
    }

    /// Opens a further string clause over the column identified by `id`.
    pub fn and_string(self, id: &ColumnOfStringsId) -> WhereStr<'t> {
        WhereStr::new(self.ctx, vec![id.header().to_string()])
    }

    /// Opens a further string clause over several string columns at once.
    pub fn and_strings(self, ids: &[ColumnOfStringsId]) -> WhereStr<'t> {
        let headers = ids.iter().map(|id| id.header().to_string()).collect();
        WhereStr::new(self.ctx, headers)
    }

    /// Opens a further numeric clause over the column identified by `id`.
    pub fn and_number(self, id: &ColumnOfNumbersId) -> WhereNumber<'t> {
        WhereNumber::new(self.ctx, vec![id.header().to_string()])
    }

    /// Opens a further numeric clause over several numeric columns at once.
    pub fn and_numbers(self, ids: &[ColumnOfNumbersId]) -> WhereNumber<'t> {
        let headers = ids.iter().map(|id| id.header().to_string()).collect();
        WhereNumber::new(self.ctx, headers)
    }

    /// Evaluates the chain with the projection chosen at query entry.
    pub fn select(self) -> Result<Table> {
        Self::execute(self.ctx)
    }

    /// Evaluates the chain, overriding the projection with `headers`.
    pub fn select_headers<I, S>(mut self, headers: I) -> Result<Table>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ctx.selection = Selection::Headers(headers.into_iter().map(Into::into).collect());
        Self::execute(self.ctx)
    }

    /// Evaluates the chain, overriding the projection with typed ids.
    pub fn select_ids(mut self, ids: &[&dyn ColumnIdentifier]) -> Result<Table> {
        self.ctx.selection = Selection::Ids(
            ids.iter()
                .map(|id| ErasedId::from_identifier(*id))
                .collect(),
        );
        Self::execute(self.ctx)
    }

    /// Resolves every filter header up front, then scans the rows once.
    fn execute(ctx: QueryContext<'t>) -> Result<Table> {
        let QueryContext {
            table,
            selection,
            filters,
        } = ctx;

        for filter in filters.iter() {
            for header in filter.headers() {
                table.columns().index_of(header)?;
            }
        }

        log::debug!(
            "evaluating query with {} filter(s) over {} row(s)",
            filters.len(),
            table.rows().len()
        );
        let matcher = move |row: RowRef<'_>| filters.matches(row);
        match selection {
            Selection::All => {
                let headers = table.columns().headers();
                table.filter(&headers, matcher)
            }
            Selection::Headers(headers) => table.filter(&headers, matcher),
            Selection::Ids(ids) => {
                let ids: Vec<&dyn ColumnIdentifier> =
                    ids.iter().map(|id| id as &dyn ColumnIdentifier).collect();
                table.filter_by_id(&ids, matcher)
            }
        }
    }
}
