//! Rows: the owned cell tuple and its table-bound accessors.
//!
//! [`Row`] is a plain ordered tuple of cells. Header and id based addressing
//! need the owning table's schema, so they live on [`RowRef`] and [`RowMut`],
//! which borrow the table instead of aliasing it the way the original
//! sub-object design did.

use super::column_id::{ColumnId, ColumnIdentifier};
use super::table::Table;
use crate::data::{CellType, Value};
use crate::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One ordered, heterogeneous tuple of cell values.
///
/// Equality and hashing consider the cells only; the row id is an addressing
/// aid, not part of the content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub(crate) id: u64,
    pub(crate) cells: Vec<Value>,
}

impl Row {
    /// Creates a detached row. It only becomes part of a table through
    /// [`RowsMut::add`](super::RowsMut::add) or
    /// [`RowsMut::insert`](super::RowsMut::insert), which validate its shape
    /// and cell types first.
    pub fn new(id: u64, cells: Vec<Value>) -> Self {
        Self { id, cells }
    }

    /// The id assigned when the row was created.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of cells, always equal to the owning table's column count.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.cells.get(position)
    }

    /// The cells in column order.
    pub fn cells(&self) -> &[Value] {
        &self.cells
    }

    /// Iterates over the cells in column order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.cells.iter()
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Hash for Row {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

/// A read-only handle on one row of a table.
#[derive(Clone, Copy)]
pub struct RowRef<'a> {
    pub(crate) table: &'a Table,
    pub(crate) index: usize,
}

impl<'a> RowRef<'a> {
    fn row(&self) -> &'a Row {
        &self.table.rows.elements[self.index]
    }

    /// The underlying row value.
    pub fn as_row(&self) -> &'a Row {
        self.row()
    }

    /// The row's id.
    pub fn id(&self) -> u64 {
        self.row().id
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.row().len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.row().is_empty()
    }

    /// The cell at `position`.
    pub fn get(&self, position: usize) -> Result<&'a Value> {
        let row = self.row();
        row.cells
            .get(position)
            .ok_or(TableError::IndexOutOfBounds {
                index: position,
                len: row.len(),
            })
    }

    /// The cell under `header` (case-insensitive).
    pub fn get_by_header(&self, header: &str) -> Result<&'a Value> {
        let position = self.table.schema.index_of(header)?;
        Ok(&self.row().cells[position])
    }

    /// The cell addressed by `id`, downcast to the id's element type.
    ///
    /// Returns `Ok(None)` for a null cell. When the id was obtained against
    /// this table's schema the downcast cannot fail for typed columns, since
    /// id identity already guarantees type agreement; only an `Any` column
    /// holding a foreign value reports a type mismatch here.
    pub fn get_id<T: CellType>(&self, id: &ColumnId<T>) -> Result<Option<&'a T>> {
        let position = self.table.schema.index_of_id(id)?;
        let value = &self.row().cells[position];
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

    /// Iterates over the cells in column order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Value> {
        self.row().cells.iter()
    }
}

/// A mutable handle on one row of a table.
///
/// Every `set` re-validates the target column's type-acceptance rule before
/// mutating, so a failed call leaves the cell unchanged.
pub struct RowMut<'a> {
    pub(crate) table: &'a mut Table,
    pub(crate) index: usize,
}

impl<'a> RowMut<'a> {
    /// The row's id.
    pub fn id(&self) -> u64 {
        self.table.rows.elements[self.index].id
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.table.rows.elements[self.index].len()
    }

    /// The cell at `position`.
    pub fn get(&self, position: usize) -> Result<&Value> {
        let row = &self.table.rows.elements[self.index];
        row.cells
            .get(position)
            .ok_or(TableError::IndexOutOfBounds {
                index: position,
                len: row.len(),
            })
    }

    /// The cell under `header` (case-insensitive).
    pub fn get_by_header(&self, header: &str) -> Result<&Value> {
        let position = self.table.schema.index_of(header)?;
        Ok(&self.table.rows.elements[self.index].cells[position])
    }

    /// Replaces the cell at `position`.
    pub fn set(&mut self, position: usize, value: Value) -> Result<()> {
        let len = self.table.schema.len();
        let dtype = self
            .table
            .schema
            .def(position)
            .ok_or(TableError::IndexOutOfBounds {
                index: position,
                len,
            })?
            .dtype;
        if !dtype.accepts(&value) {
            return Err(TableError::TypeMismatch {
                expected: dtype,
                actual: value.dtype(),
            });
        }
        self.table.rows.elements[self.index].cells[position] = value;
        Ok(())
    }

    /// Replaces the cell under `header` (case-insensitive).
    pub fn set_by_header(&mut self, header: &str, value: Value) -> Result<()> {
        let position = self.table.schema.index_of(header)?;
        self.set(position, value)
    }

    /// Replaces the cell addressed by `id`; `None` stores a null cell.
    pub fn set_id<T: CellType>(&mut self, id: &ColumnId<T>, value: Option<T>) -> Result<()> {
        let position = self.table.schema.index_of_id(id)?;
        let value = value.map(CellType::into_value).unwrap_or(Value::Null);
        self.set(position, value)
    }
}

impl<'a> std::fmt::Debug for RowRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RowRef").field(self.row()).finish()
    }
}
