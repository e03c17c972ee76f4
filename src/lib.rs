//! An embeddable, in-memory relational table.
//!
//! `datatable` provides a heterogeneous rows × columns container together
//! with a fluent query DSL for filtering and projecting subsets of it. It is
//! meant to be linked into a host application as a data-modeling utility, not
//! run as a service: there is no persistence, no locking and no wire format.
//!
//! ```
//! use datatable::{DataType, Query, Table, Value};
//!
//! # fn main() -> datatable::Result<()> {
//! let mut people = Table::new();
//! people
//!     .columns_mut()
//!     .create("name", DataType::Str, vec!["Luc".into(), "Mathilde".into()])?
//!     .create("age", DataType::Int, vec![Value::Int(23), Value::Int(21)])?;
//!
//! let adults = Query::from(&people)
//!     .where_col("age")
//!     .as_number()
//!     .ge(21.0)
//!     .select()?;
//!
//! assert_eq!(adults.rows().len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod query;
pub mod table;

// Re-export main types
pub use data::{CellType, DataType, Value};
pub use query::{
    And, Filter, FilterSet, From, Query, Select, Where, WhereBool, WhereNumber, WhereStr,
};
pub use table::{
    id, numbers, strings, Column, ColumnId, ColumnIdentifier, ColumnMut, ColumnOfNumbersId,
    ColumnOfStringsId, Columns, ColumnsMut, NumericCellType, Row, RowMut, RowRef, Rows, RowsMut,
    Table, TypedColumn,
};

/// The broad failure categories of the library.
///
/// Every [`TableError`] maps onto exactly one kind; callers that only care
/// about the class of failure can dispatch on [`TableError::kind`] instead of
/// matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The table's shape would become inconsistent (duplicate header,
    /// mismatched row/column length).
    Structural,
    /// A header or column id does not resolve to an existing column.
    Lookup,
    /// A value is not accepted by a column's declared element type.
    Type,
    /// A positional index falls outside the relevant collection.
    Bounds,
    /// A required argument is absent or unusable.
    InvalidArgument,
}

/// Library error type.
///
/// Every validating operation performs all of its checks before mutating any
/// state, so a returned error always leaves the table unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("the header '{0}' already exists in the table")]
    HeaderAlreadyExists(String),

    #[error("column size does not match the number of rows (got: {got}, expected: {expected})")]
    InconsistentColumnSize { got: usize, expected: usize },

    #[error("row size does not match the number of columns (got: {got}, expected: {expected})")]
    InconsistentRowSize { got: usize, expected: usize },

    #[error("the header '{0}' does not exist in the table")]
    HeaderNotFound(String),

    #[error("the id '{header}' of type {dtype} does not match any column")]
    ColumnIdNotFound {
        header: String,
        dtype: data::DataType,
    },

    #[error("value of type {actual} is not accepted by a column of type {expected}")]
    TypeMismatch {
        expected: data::DataType,
        actual: data::DataType,
    },

    #[error("index {index} is out of bounds (len: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("the {0} collection is empty")]
    EmptyCollection(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl TableError {
    /// The broad category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::HeaderAlreadyExists(_)
            | TableError::InconsistentColumnSize { .. }
            | TableError::InconsistentRowSize { .. } => ErrorKind::Structural,
            TableError::HeaderNotFound(_) | TableError::ColumnIdNotFound { .. } => {
                ErrorKind::Lookup
            }
            TableError::TypeMismatch { .. } => ErrorKind::Type,
            TableError::IndexOutOfBounds { .. } | TableError::EmptyCollection(_) => {
                ErrorKind::Bounds
            }
            TableError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Library result type.
pub type Result<T> = std::result::Result<T, TableError>;
