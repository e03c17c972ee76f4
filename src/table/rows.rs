//! The ordered row collection and its access guards.

use super::row::{Row, RowMut, RowRef};
use super::table::Table;
use crate::data::Value;
use crate::{Result, TableError};
use serde::{Deserialize, Serialize};

/// Owned storage for the rows of a table.
///
/// Kept deliberately dumb: every validating operation lives on [`RowsMut`],
/// which sees the whole table and can check the row shape against the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct RowStore {
    pub(crate) elements: Vec<Row>,
}

impl RowStore {
    /// Id for the next appended row: one past the last row's id, or 0.
    ///
    /// Ids are never reused after removal on the append path. Positional
    /// `insert` keeps the given row's id untouched and does not renumber.
    pub(crate) fn next_id(&self) -> u64 {
        self.elements.last().map_or(0, |row| row.id + 1)
    }

    pub(crate) fn push(&mut self, cells: Vec<Value>) {
        let id = self.next_id();
        self.elements.push(Row::new(id, cells));
    }
}

/// Read access to a table's rows.
#[derive(Clone, Copy)]
pub struct Rows<'a> {
    pub(crate) table: &'a Table,
}

impl<'a> Rows<'a> {
    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.table.rows.elements.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.table.rows.elements.is_empty()
    }

    /// The row at `index`.
    pub fn get(&self, index: usize) -> Result<RowRef<'a>> {
        if index >= self.len() {
            return Err(TableError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(RowRef {
            table: self.table,
            index,
        })
    }

    /// The first row.
    pub fn first(&self) -> Result<RowRef<'a>> {
        if self.is_empty() {
            return Err(TableError::EmptyCollection("rows"));
        }
        self.get(0)
    }

    /// The last row.
    pub fn last(&self) -> Result<RowRef<'a>> {
        if self.is_empty() {
            return Err(TableError::EmptyCollection("rows"));
        }
        self.get(self.len() - 1)
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> impl Iterator<Item = RowRef<'a>> + 'a {
        let table = self.table;
        (0..table.rows.elements.len()).map(move |index| RowRef { table, index })
    }
}

/// Mutating access to a table's rows.
///
/// Mutations consume and return the guard so calls can be chained:
///
/// ```
/// use datatable::{DataType, Table, Value};
///
/// # fn main() -> datatable::Result<()> {
/// let mut table = Table::new();
/// table.columns_mut().create("n", DataType::Int, vec![])?;
/// table
///     .rows_mut()
///     .create(vec![Value::Int(1)])?
///     .create(vec![Value::Int(2)])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RowsMut<'a> {
    pub(crate) table: &'a mut Table,
}

impl<'a> RowsMut<'a> {
    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.table.rows.elements.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.table.rows.elements.is_empty()
    }

    /// Checks that `cells` fits the table's shape and column types.
    ///
    /// All checks run before any mutation: length against column count, then
    /// each cell against its column's declared type, positionally.
    fn validate(&self, cells: &[Value]) -> Result<()> {
        let expected = self.table.schema.len();
        if cells.len() != expected {
            return Err(TableError::InconsistentRowSize {
                got: cells.len(),
                expected,
            });
        }
        for (position, value) in cells.iter().enumerate() {
            let dtype = self.table.schema.defs()[position].dtype;
            if !dtype.accepts(value) {
                return Err(TableError::TypeMismatch {
                    expected: dtype,
                    actual: value.dtype(),
                });
            }
        }
        Ok(())
    }

    /// Appends a new row built from `cells`, assigning the next id.
    pub fn create(self, cells: Vec<Value>) -> Result<RowsMut<'a>> {
        self.validate(&cells)?;
        self.table.rows.push(cells);
        Ok(self)
    }

    /// Appends `row`, keeping the id it was built with.
    pub fn add(self, row: Row) -> Result<RowsMut<'a>> {
        self.validate(&row.cells)?;
        self.table.rows.elements.push(row);
        Ok(self)
    }

    /// Inserts `row` at `position`, shifting later rows.
    ///
    /// The row's id is kept as-is; ids are not renumbered, so a positional
    /// insert can break the monotonic-id sequence the append path maintains.
    pub fn insert(self, position: usize, row: Row) -> Result<RowsMut<'a>> {
        let len = self.len();
        if position > len {
            return Err(TableError::IndexOutOfBounds {
                index: position,
                len,
            });
        }
        self.validate(&row.cells)?;
        self.table.rows.elements.insert(position, row);
        Ok(self)
    }

    /// Removes the row at `index`. Its id is never reassigned to a later
    /// appended row.
    pub fn remove(self, index: usize) -> Result<RowsMut<'a>> {
        let len = self.len();
        if index >= len {
            return Err(TableError::IndexOutOfBounds { index, len });
        }
        self.table.rows.elements.remove(index);
        Ok(self)
    }

    /// Drops every row. Columns are untouched and report size 0 afterwards.
    pub fn clear(self) -> RowsMut<'a> {
        self.table.rows.elements.clear();
        self
    }

    /// A mutable handle on the row at `index`.
    pub fn get_mut(self, index: usize) -> Result<RowMut<'a>> {
        let len = self.len();
        if index >= len {
            return Err(TableError::IndexOutOfBounds { index, len });
        }
        Ok(RowMut {
            table: self.table,
            index,
        })
    }

    /// A mutable handle on the first row.
    pub fn first_mut(self) -> Result<RowMut<'a>> {
        if self.is_empty() {
            return Err(TableError::EmptyCollection("rows"));
        }
        self.get_mut(0)
    }

    /// A mutable handle on the last row.
    pub fn last_mut(self) -> Result<RowMut<'a>> {
        if self.is_empty() {
            return Err(TableError::EmptyCollection("rows"));
        }
        let index = self.len() - 1;
        self.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataType;
    use crate::ErrorKind;

    fn people() -> Table {
        let mut table = Table::new();
        table
            .columns_mut()
            .create(
                "name",
                DataType::Str,
                vec!["Luc".into(), "Baptiste".into(), "Anya".into(), "Mathilde".into()],
            )
            .and_then(|columns| {
                columns.create(
                    "age",
                    DataType::Int,
                    vec![
                        Value::Int(23),
                        Value::Int(32),
                        Value::Int(0),
                        Value::Int(21),
                    ],
                )
            })
            .expect("building the fixture table");
        table
    }

    #[test]
    fn test_create_assigns_monotonic_ids() {
        let mut table = people();
        assert_eq!(table.rows().last().unwrap().id(), 3);

        table
            .rows_mut()
            .create(vec!["Eva".into(), Value::Int(21)])
            .unwrap();
        let last = table.rows();
        let last = last.last().unwrap();
        assert_eq!(last.id(), 4);
        assert_eq!(last.get(0).unwrap(), &Value::Str("Eva".into()));
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut table = people();
        table.rows_mut().remove(3).unwrap();
        table
            .rows_mut()
            .create(vec!["Eva".into(), Value::Int(21)])
            .unwrap();
        // Last surviving id was 2, so the new row gets 3 again only because
        // append derives from the last row, never from removed ones.
        assert_eq!(table.rows().last().unwrap().id(), 3);

        let mut table = people();
        table.rows_mut().remove(0).unwrap();
        table
            .rows_mut()
            .create(vec!["Eva".into(), Value::Int(21)])
            .unwrap();
        assert_eq!(table.rows().last().unwrap().id(), 4);
    }

    #[test]
    fn test_create_validates_length_before_linking() {
        let mut table = people();
        let err = table.rows_mut().create(vec!["Eva".into()]).unwrap_err();
        assert_eq!(err, TableError::InconsistentRowSize { got: 1, expected: 2 });
        assert_eq!(table.rows().len(), 4);
    }

    #[test]
    fn test_create_validates_types_positionally() {
        let mut table = people();
        let err = table
            .rows_mut()
            .create(vec![Value::Int(5), Value::Int(21)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        // No partial insert happened.
        assert_eq!(table.rows().len(), 4);
    }

    #[test]
    fn test_add_keeps_the_rows_id_and_validates_first() {
        let mut table = people();
        table
            .rows_mut()
            .add(Row::new(99, vec!["Zoe".into(), Value::Int(30)]))
            .unwrap();
        assert_eq!(table.rows().last().unwrap().id(), 99);
        assert_eq!(table.rows().len(), 5);

        let err = table
            .rows_mut()
            .add(Row::new(100, vec!["Eva".into()]))
            .unwrap_err();
        assert_eq!(err, TableError::InconsistentRowSize { got: 1, expected: 2 });

        let err = table
            .rows_mut()
            .add(Row::new(100, vec![Value::Int(1), Value::Int(2)]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        // Neither rejected row was linked.
        assert_eq!(table.rows().len(), 5);
    }

    #[test]
    fn test_insert_keeps_the_given_id() {
        let mut table = people();
        let row = Row::new(99, vec!["Zoe".into(), Value::Int(30)]);
        table.rows_mut().insert(1, row).unwrap();
        assert_eq!(table.rows().get(1).unwrap().id(), 99);
        assert_eq!(table.rows().len(), 5);
    }

    #[test]
    fn test_insert_past_the_end_is_a_bounds_violation() {
        let mut table = people();
        let row = Row::new(9, vec!["Zoe".into(), Value::Int(30)]);
        let err = table.rows_mut().insert(6, row).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bounds);
    }

    #[test]
    fn test_first_and_last_fail_on_an_empty_table() {
        let table = Table::new();
        assert_eq!(
            table.rows().first().unwrap_err(),
            TableError::EmptyCollection("rows")
        );
        assert_eq!(
            table.rows().last().unwrap_err(),
            TableError::EmptyCollection("rows")
        );
    }

    #[test]
    fn test_clear_keeps_columns() {
        let mut table = people();
        table.rows_mut().clear();
        assert!(table.rows().is_empty());
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.columns().get(0).unwrap().len(), 0);
    }

    #[test]
    fn test_set_through_a_mutable_row() {
        let mut table = people();
        table
            .rows_mut()
            .first_mut()
            .unwrap()
            .set_by_header("name", "Lucas".into())
            .unwrap();
        assert_eq!(
            table.rows().first().unwrap().get_by_header("name").unwrap(),
            &Value::Str("Lucas".into())
        );
    }

    #[test]
    fn test_set_rejects_a_type_violation_and_leaves_the_cell_unchanged() {
        let mut table = people();
        let err = table
            .rows_mut()
            .first_mut()
            .unwrap()
            .set_by_header("name", Value::Int(12))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(
            table.rows().first().unwrap().get_by_header("name").unwrap(),
            &Value::Str("Luc".into())
        );
    }
}
