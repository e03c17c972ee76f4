//! Storage-less column views.
//!
//! A column owns no cells: `get`/`set` delegate through the owning table's
//! rows, so a column's size always mirrors the table's row count and schema
//! changes never need a second store to stay in sync.

use super::table::Table;
use crate::data::{CellType, DataType, Value};
use crate::{Result, TableError};
use std::marker::PhantomData;

/// A read-only view over one slot of every row.
#[derive(Clone, Copy)]
pub struct Column<'a> {
    pub(crate) table: &'a Table,
    pub(crate) index: usize,
}

impl<'a> Column<'a> {
    /// The column's header, in its original case.
    pub fn header(&self) -> &'a str {
        &self.table.schema.defs()[self.index].header
    }

    /// The column's declared element type.
    pub fn dtype(&self) -> DataType {
        self.table.schema.defs()[self.index].dtype
    }

    /// Number of cells, always the owning table's row count.
    pub fn len(&self) -> usize {
        self.table.rows.elements.len()
    }

    /// Whether the owning table has no rows.
    pub fn is_empty(&self) -> bool {
        self.table.rows.elements.is_empty()
    }

    /// The cell at `row`.
    pub fn get(&self, row: usize) -> Result<&'a Value> {
        let rows = &self.table.rows.elements;
        let cells = &rows
            .get(row)
            .ok_or(TableError::IndexOutOfBounds {
                index: row,
                len: rows.len(),
            })?
            .cells;
        Ok(&cells[self.index])
    }

    /// Iterates over the column's cells, top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let index = self.index;
        self.table
            .rows
            .elements
            .iter()
            .map(move |row| &row.cells[index])
    }
}

impl<'a> std::fmt::Debug for Column<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header())
            .field("dtype", &self.dtype())
            .field("len", &self.len())
            .finish()
    }
}

/// A writable view over one slot of every row.
pub struct ColumnMut<'a> {
    pub(crate) table: &'a mut Table,
    pub(crate) index: usize,
}

impl<'a> ColumnMut<'a> {
    /// The column's header, in its original case.
    pub fn header(&self) -> &str {
        &self.table.schema.defs()[self.index].header
    }

    /// The column's declared element type.
    pub fn dtype(&self) -> DataType {
        self.table.schema.defs()[self.index].dtype
    }

    /// Number of cells, always the owning table's row count.
    pub fn len(&self) -> usize {
        self.table.rows.elements.len()
    }

    /// The cell at `row`.
    pub fn get(&self, row: usize) -> Result<&Value> {
        let rows = &self.table.rows.elements;
        let cells = &rows
            .get(row)
            .ok_or(TableError::IndexOutOfBounds {
                index: row,
                len: rows.len(),
            })?
            .cells;
        Ok(&cells[self.index])
    }

    /// Replaces the cell at `row`, re-validating the declared type first.
    pub fn set(&mut self, row: usize, value: Value) -> Result<()> {
        let len = self.table.rows.elements.len();
        if row >= len {
            return Err(TableError::IndexOutOfBounds { index: row, len });
        }
        let dtype = self.dtype();
        if !dtype.accepts(&value) {
            return Err(TableError::TypeMismatch {
                expected: dtype,
                actual: value.dtype(),
            });
        }
        self.table.rows.elements[row].cells[self.index] = value;
        Ok(())
    }
}

/// A read-only view over a column whose element type is known statically.
///
/// Obtained through a [`ColumnId`](super::ColumnId); cells come back as
/// `Option<&T>` with null cells reading as `None`.
#[derive(Debug)]
pub struct TypedColumn<'a, T: CellType> {
    table: &'a Table,
    index: usize,
    _cell: PhantomData<fn() -> T>,
}

impl<'a, T: CellType> TypedColumn<'a, T> {
    pub(crate) fn new(table: &'a Table, index: usize) -> Self {
        Self {
            table,
            index,
            _cell: PhantomData,
        }
    }

    /// The column's header, in its original case.
    pub fn header(&self) -> &'a str {
        &self.table.schema.defs()[self.index].header
    }

    /// The column's declared element type (which can be
    /// [`DataType::Any`](crate::DataType::Any) even for a typed view).
    pub fn dtype(&self) -> DataType {
        self.table.schema.defs()[self.index].dtype
    }

    /// Number of cells, always the owning table's row count.
    pub fn len(&self) -> usize {
        self.table.rows.elements.len()
    }

    /// Whether the owning table has no rows.
    pub fn is_empty(&self) -> bool {
        self.table.rows.elements.is_empty()
    }

    /// The cell at `row`, downcast to `T`; a null cell reads as `None`.
    ///
    /// A type mismatch is only possible when the view sits over an `Any`
    /// column, since id resolution already checked assignability.
    pub fn get(&self, row: usize) -> Result<Option<&'a T>> {
        let rows = &self.table.rows.elements;
        let value = &rows
            .get(row)
            .ok_or(TableError::IndexOutOfBounds {
                index: row,
                len: rows.len(),
            })?
            .cells[self.index];
        if value.is_null() {
            return Ok(None);
        }
        T::from_value(value)
            .map(Some)
            .ok_or(TableError::TypeMismatch {
                expected: T::DATA_TYPE,
                actual: value.dtype(),
            })
    }

    /// Iterates over the cells downcast to `T`; null or foreign cells read as
    /// `None`.
    pub fn iter(&self) -> impl Iterator<Item = Option<&'a T>> + 'a {
        let index = self.index;
        self.table
            .rows
            .elements
            .iter()
            .map(move |row| T::from_value(&row.cells[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::id;
    use crate::ErrorKind;

    fn scores() -> Table {
        let mut table = Table::new();
        table
            .columns_mut()
            .create(
                "player",
                DataType::Str,
                vec!["ana".into(), "bob".into(), "cleo".into()],
            )
            .unwrap()
            .create(
                "score",
                DataType::Int,
                vec![Value::Int(10), Value::Null, Value::Int(30)],
            )
            .unwrap();
        table
    }

    #[test]
    fn test_a_column_mirrors_the_row_count() {
        let mut table = scores();
        assert_eq!(table.columns().get(0).unwrap().len(), 3);
        table
            .rows_mut()
            .create(vec!["dan".into(), Value::Int(40)])
            .unwrap();
        assert_eq!(table.columns().get(0).unwrap().len(), 4);
    }

    #[test]
    fn test_get_reads_through_the_rows() {
        let table = scores();
        let column = table.columns().get_by_header("score").unwrap();
        assert_eq!(column.get(0).unwrap(), &Value::Int(10));
        assert_eq!(column.get(1).unwrap(), &Value::Null);
        assert_eq!(column.get(3).unwrap_err().kind(), ErrorKind::Bounds);
    }

    #[test]
    fn test_set_writes_through_to_the_row() {
        let mut table = scores();
        {
            let mut column = table.columns_mut().get_mut_by_header("score").unwrap();
            column.set(1, Value::Int(20)).unwrap();
        }
        assert_eq!(
            table.rows().get(1).unwrap().get_by_header("score").unwrap(),
            &Value::Int(20)
        );
    }

    #[test]
    fn test_set_revalidates_the_declared_type() {
        let mut table = scores();
        let mut column = table.columns_mut().get_mut_by_header("score").unwrap();
        let err = column.set(0, "ten".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(column.get(0).unwrap(), &Value::Int(10));
    }

    #[test]
    fn test_typed_view_reads_nulls_as_none() {
        let table = scores();
        let column = table.columns().get_id(&id::<i64>("score")).unwrap();
        assert_eq!(column.get(0).unwrap(), Some(&10));
        assert_eq!(column.get(1).unwrap(), None);
        let values: Vec<_> = column.iter().collect();
        assert_eq!(values, vec![Some(&10), None, Some(&30)]);
    }

    #[test]
    fn test_typed_view_over_an_any_column_reports_foreign_values() {
        let mut table = Table::new();
        table
            .columns_mut()
            .create("mixed", DataType::Any, vec![Value::Int(5), "five".into()])
            .unwrap();
        let column = table.columns().get_id(&id::<i64>("mixed")).unwrap();
        assert_eq!(column.get(0).unwrap(), Some(&5));
        assert_eq!(column.get(1).unwrap_err().kind(), ErrorKind::Type);
    }
}
