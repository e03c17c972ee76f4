//! The stage that picks which column(s) the next predicate applies to.

use super::context::QueryContext;
use super::typed::{WhereNumber, WhereStr};
use super::where_clause::Where;
use crate::data::{CellType, Value};
use crate::table::{ColumnId, ColumnOfNumbersId, ColumnOfStringsId};

/// A query bound to its source table, ready to open a `where` clause.
pub struct From<'t> {
    ctx: QueryContext<'t>,
}

impl<'t> From<'t> {
    pub(crate) fn new(ctx: QueryContext<'t>) -> Self {
        Self { ctx }
    }

    /// Opens a clause over every column the table currently has.
    ///
    /// The header list is snapshotted now; columns added to the table later
    /// are not covered by this clause.
    pub fn where_any(self) -> Where<'t, Value> {
        let headers = self.ctx.table.columns().headers();
        Where::new(self.ctx, headers)
    }

    /// Opens a clause over the column named `header`.
    pub fn where_col(self, header: &str) -> Where<'t, Value> {
        Where::new(self.ctx, vec![header.to_string()])
    }

    /// Opens a clause over several named columns at once; the predicate must
    /// hold for each of them independently.
    pub fn where_cols<I, S>(self, headers: I) -> Where<'t, Value>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers = headers.into_iter().map(Into::into).collect();
        Where::new(self.ctx, headers)
    }

    /// Opens a typed clause over the column identified by `id`.
    pub fn where_id<T: CellType>(self, id: &ColumnId<T>) -> Where<'t, T> {
        Where::new(self.ctx, vec![id.header().to_string()])
    }

    /// Opens a string clause over the column identified by `id`.
    pub fn where_string(self, id: &ColumnOfStringsId) -> WhereStr<'t> {
        WhereStr::new(self.ctx, vec![id.header().to_string()])
    }

    /// Opens a string clause over several string columns at once.
    pub fn where_strings(self, ids: &[ColumnOfStringsId]) -> WhereStr<'t> {
        let headers = ids.iter().map(|id| id.header().to_string()).collect();
        WhereStr::new(self.ctx, headers)
    }

    /// Opens a numeric clause over the column identified by `id`.
    pub fn where_number(self, id: &ColumnOfNumbersId) -> WhereNumber<'t> {
        WhereNumber::new(self.ctx, vec![id.header().to_string()])
    }

    /// Opens a numeric clause over several numeric columns at once.
    pub fn where_numbers(self, ids: &[ColumnOfNumbersId]) -> WhereNumber<'t> {
        let headers = ids.iter().map(|id| id.header().to_string()).collect();
        WhereNumber::new(self.ctx, headers)
    }
}
