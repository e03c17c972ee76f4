//! The table data model: schema, rows, columns and typed addressing.
//!
//! [`Table`] composes an ordered column schema with a row-major store.
//! Access goes through borrow-checked guards ([`Columns`]/[`ColumnsMut`],
//! [`Rows`]/[`RowsMut`]) so that cascading shape changes (adding a column
//! extends every row, removing one shrinks every row) happen in one place
//! and the `row.len() == columns.len()` invariant cannot be observed broken.

mod column;
mod column_id;
mod columns;
mod row;
mod rows;
#[allow(clippy::module_inception)]
mod table;

pub use column::{Column, ColumnMut, TypedColumn};
pub(crate) use column_id::normalize;
pub use column_id::{
    id, numbers, strings, ColumnId, ColumnIdentifier, ColumnOfNumbersId, ColumnOfStringsId,
    NumericCellType,
};
pub use columns::{Columns, ColumnsMut};
pub use row::{Row, RowMut, RowRef};
pub use rows::{Rows, RowsMut};
pub use table::Table;
