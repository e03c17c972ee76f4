//! The fluent query DSL: `select → from → where → and* → select`.
//!
//! A query walks through single-purpose stages, each consumed by move:
//! [`Query`] picks the projection, [`From`] binds the table, the `where`
//! stages ([`Where`], [`WhereStr`], [`WhereNumber`], [`WhereBool`]) record
//! predicates, and [`And`] either chains further clauses or evaluates. All
//! recorded clauses are ANDed; evaluation never touches the source table and
//! returns a brand-new [`Table`](crate::Table).
//!
//! ```
//! use datatable::{DataType, Query, Table, Value};
//!
//! let mut people = Table::new();
//! people
//!     .columns_mut()
//!     .create("name", DataType::Str, vec!["Ava".into(), "Bo".into()])?
//!     .create("age", DataType::Int, vec![Value::Int(31), Value::Int(16)])?;
//!
//! let adults = Query::select()
//!     .from(&people)
//!     .where_col("age")
//!     .as_number()
//!     .ge(18.0)
//!     .select()?;
//! assert_eq!(adults.rows().len(), 1);
//! # Ok::<(), datatable::TableError>(())
//! ```

mod and;
mod context;
mod from;
mod select;
mod typed;
mod where_clause;

pub use and::And;
pub use context::{Filter, FilterSet};
pub use from::From;
pub use select::Select;
pub use typed::{WhereBool, WhereNumber, WhereStr};
pub use where_clause::Where;

use crate::table::{ColumnIdentifier, Table};
use context::{ErasedId, Selection};

/// Entry point of the DSL.
pub struct Query;

impl Query {
    /// Starts a query keeping every column of the table it gets bound to.
    pub fn select() -> Select {
        Select::new(Selection::All)
    }

    /// Starts a query projecting onto the named columns, in this order.
    pub fn select_headers<I, S>(headers: I) -> Select
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Select::new(Selection::Headers(
            headers.into_iter().map(Into::into).collect(),
        ))
    }

    /// Starts a query projecting onto the columns matching the given ids.
    pub fn select_ids(ids: &[&dyn ColumnIdentifier]) -> Select {
        Select::new(Selection::Ids(
            ids.iter()
                .map(|id| ErasedId::from_identifier(*id))
                .collect(),
        ))
    }

    /// Shorthand for `Query::select().from(table)`.
    pub fn from(table: &Table) -> From<'_> {
        Self::select().from(table)
    }
}
