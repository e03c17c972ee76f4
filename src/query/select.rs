//! The entry stage of a query: projection chosen, table not yet bound.

use super::context::{QueryContext, Selection};
use super::from::From;
use crate::table::Table;

/// A query with its projection decided, waiting for a source table.
#[derive(Debug)]
pub struct Select {
    selection: Selection,
}

impl Select {
    pub(crate) fn new(selection: Selection) -> Self {
        Self { selection }
    }

    /// Binds the query to `table` and moves on to the filtering stages.
    pub fn from(self, table: &Table) -> From<'_> {
        From::new(QueryContext::new(table, self.selection))
    }
}
