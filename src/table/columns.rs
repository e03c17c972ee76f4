//! The column schema and its access guards.
//!
//! The schema is an ordered list of `(header, element type)` pairs plus a
//! case-insensitive map from normalized header to positional index. Schema
//! mutation cascades into every row so that `row.len() == columns.len()`
//! holds at all times.

use super::column::{Column, ColumnMut, TypedColumn};
use super::column_id::{normalize, ColumnId, ColumnIdentifier};
use super::table::Table;
use crate::data::{CellType, DataType, Value};
use crate::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One column's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ColumnDef {
    pub(crate) header: String,
    pub(crate) dtype: DataType,
}

/// Ordered column definitions plus the normalized header index.
///
/// Index assignment is dense (`0..len`) and rebuilt on every removal. The
/// index map is not serialized; it is rebuilt from the definitions on
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ColumnDef>", into = "Vec<ColumnDef>")]
pub(crate) struct Schema {
    defs: Vec<ColumnDef>,
    index: HashMap<String, usize, ahash::RandomState>,
}

impl Schema {
    pub(crate) fn len(&self) -> usize {
        self.defs.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub(crate) fn defs(&self) -> &[ColumnDef] {
        &self.defs
    }

    pub(crate) fn def(&self, index: usize) -> Option<&ColumnDef> {
        self.defs.get(index)
    }

    pub(crate) fn contains(&self, header: &str) -> bool {
        self.index.contains_key(&normalize(header))
    }

    pub(crate) fn index_of(&self, header: &str) -> Result<usize> {
        self.index
            .get(&normalize(header))
            .copied()
            .ok_or_else(|| TableError::HeaderNotFound(header.to_string()))
    }

    /// Resolves an id: the header must exist and the column's element type
    /// must be assignable from the id's type.
    pub(crate) fn index_of_id(&self, id: &dyn ColumnIdentifier) -> Result<usize> {
        let not_found = || TableError::ColumnIdNotFound {
            header: id.header().to_string(),
            dtype: id.dtype(),
        };
        let index = *self.index.get(&normalize(id.header())).ok_or_else(not_found)?;
        if !self.defs[index].dtype.is_assignable_from(id.dtype()) {
            return Err(not_found());
        }
        Ok(index)
    }

    /// Appends a definition. The caller has already validated uniqueness.
    pub(crate) fn push(&mut self, header: String, dtype: DataType) {
        self.index.insert(normalize(&header), self.defs.len());
        self.defs.push(ColumnDef { header, dtype });
    }

    /// Removes the definition at `index` and re-densifies the header map.
    pub(crate) fn remove(&mut self, index: usize) -> ColumnDef {
        let removed = self.defs.remove(index);
        self.rebuild_index();
        removed
    }

    pub(crate) fn clear(&mut self) {
        self.defs.clear();
        self.index.clear();
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, def) in self.defs.iter().enumerate() {
            self.index.insert(normalize(&def.header), position);
        }
    }
}

impl From<Vec<ColumnDef>> for Schema {
    fn from(defs: Vec<ColumnDef>) -> Self {
        let mut schema = Schema {
            defs,
            index: HashMap::default(),
        };
        schema.rebuild_index();
        schema
    }
}

impl From<Schema> for Vec<ColumnDef> {
    fn from(schema: Schema) -> Self {
        schema.defs
    }
}

/// Read access to a table's columns.
#[derive(Clone, Copy)]
pub struct Columns<'a> {
    pub(crate) table: &'a Table,
}

impl<'a> Columns<'a> {
    /// Number of columns in the table.
    pub fn len(&self) -> usize {
        self.table.schema.len()
    }

    /// Whether the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.table.schema.is_empty()
    }

    /// The headers in column order, in their original case.
    pub fn headers(&self) -> Vec<String> {
        self.table
            .schema
            .defs()
            .iter()
            .map(|def| def.header.clone())
            .collect()
    }

    /// Whether a column exists under `header` (case-insensitive).
    pub fn contains(&self, header: &str) -> bool {
        self.table.schema.contains(header)
    }

    /// Whether a column matches `id` by header and assignable type.
    pub fn contains_id(&self, id: &dyn ColumnIdentifier) -> bool {
        self.table.schema.index_of_id(id).is_ok()
    }

    /// The position of the column under `header` (case-insensitive).
    pub fn index_of(&self, header: &str) -> Result<usize> {
        self.table.schema.index_of(header)
    }

    /// The position of the column matching `id`.
    pub fn index_of_id(&self, id: &dyn ColumnIdentifier) -> Result<usize> {
        self.table.schema.index_of_id(id)
    }

    /// The column at `index`.
    pub fn get(&self, index: usize) -> Result<Column<'a>> {
        if index >= self.len() {
            return Err(TableError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(Column {
            table: self.table,
            index,
        })
    }

    /// The column under `header` (case-insensitive).
    pub fn get_by_header(&self, header: &str) -> Result<Column<'a>> {
        let index = self.index_of(header)?;
        self.get(index)
    }

    /// The column matching `id`, as a typed view over its cells.
    pub fn get_id<T: CellType>(&self, id: &ColumnId<T>) -> Result<TypedColumn<'a, T>> {
        let index = self.index_of_id(id)?;
        Ok(TypedColumn::new(self.table, index))
    }

    /// The first column.
    pub fn first(&self) -> Result<Column<'a>> {
        if self.is_empty() {
            return Err(TableError::EmptyCollection("columns"));
        }
        self.get(0)
    }

    /// The last column.
    pub fn last(&self) -> Result<Column<'a>> {
        if self.is_empty() {
            return Err(TableError::EmptyCollection("columns"));
        }
        self.get(self.len() - 1)
    }

    /// Iterates over the columns in order.
    pub fn iter(&self) -> impl Iterator<Item = Column<'a>> + 'a {
        let table = self.table;
        (0..table.schema.len()).map(move |index| Column { table, index })
    }
}

/// Mutating access to a table's columns.
///
/// Mutations consume and return the guard so calls can be chained, and they
/// cascade the shape change into every row before returning.
#[derive(Debug)]
pub struct ColumnsMut<'a> {
    pub(crate) table: &'a mut Table,
}

impl<'a> ColumnsMut<'a> {
    /// Number of columns in the table.
    pub fn len(&self) -> usize {
        self.table.schema.len()
    }

    /// Whether the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.table.schema.is_empty()
    }

    /// Whether a column exists under `header` (case-insensitive).
    pub fn contains(&self, header: &str) -> bool {
        self.table.schema.contains(header)
    }

    /// Appends a column at the end of the table.
    ///
    /// When the table already has rows, `content` must hold exactly one
    /// element per row and every row is extended by its element. When the
    /// table has no rows, one row is synthesized per element of `content`, in
    /// order, each initially holding that single cell.
    ///
    /// Checks, in order and before any mutation: the header is not blank, no
    /// column already uses it (case-insensitively), `content` matches the row
    /// count, and every element is accepted by `dtype`.
    pub fn create(
        self,
        header: &str,
        dtype: DataType,
        content: Vec<Value>,
    ) -> Result<ColumnsMut<'a>> {
        if header.trim().is_empty() {
            return Err(TableError::InvalidArgument(
                "a column header must not be blank".to_string(),
            ));
        }
        if self.table.schema.contains(header) {
            return Err(TableError::HeaderAlreadyExists(header.to_string()));
        }
        let rows = self.table.rows.elements.len();
        if rows > 0 && content.len() != rows {
            return Err(TableError::InconsistentColumnSize {
                got: content.len(),
                expected: rows,
            });
        }
        if let Some(value) = content.iter().find(|value| !dtype.accepts(value)) {
            return Err(TableError::TypeMismatch {
                expected: dtype,
                actual: value.dtype(),
            });
        }

        log::debug!(
            "creating column '{header}' of type {dtype} with {} element(s)",
            content.len()
        );

        if rows == 0 {
            for value in content {
                self.table.rows.push(vec![value]);
            }
        } else {
            for (row, value) in self.table.rows.elements.iter_mut().zip(content) {
                row.cells.push(value);
            }
        }
        self.table.schema.push(header.to_string(), dtype);
        Ok(self)
    }

    /// Removes the column at `index`, dropping its cell from every row.
    pub fn remove(self, index: usize) -> Result<ColumnsMut<'a>> {
        let len = self.table.schema.len();
        if index >= len {
            return Err(TableError::IndexOutOfBounds { index, len });
        }
        let removed = self.table.schema.remove(index);
        for row in &mut self.table.rows.elements {
            row.cells.remove(index);
        }
        log::debug!("removed column '{}'", removed.header);
        Ok(self)
    }

    /// Removes the column under `header` (case-insensitive).
    pub fn remove_header(self, header: &str) -> Result<ColumnsMut<'a>> {
        let index = self.table.schema.index_of(header)?;
        self.remove(index)
    }

    /// Drops every column, leaving each row as a zero-length placeholder.
    pub fn clear(self) -> ColumnsMut<'a> {
        self.table.schema.clear();
        for row in &mut self.table.rows.elements {
            row.cells.clear();
        }
        self
    }

    /// A writable view of the column at `index`.
    pub fn get_mut(self, index: usize) -> Result<ColumnMut<'a>> {
        let len = self.table.schema.len();
        if index >= len {
            return Err(TableError::IndexOutOfBounds { index, len });
        }
        Ok(ColumnMut {
            table: self.table,
            index,
        })
    }

    /// A writable view of the column under `header` (case-insensitive).
    pub fn get_mut_by_header(self, header: &str) -> Result<ColumnMut<'a>> {
        let index = self.table.schema.index_of(header)?;
        self.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::id;
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
            .unwrap()
            .create(
                "AGE",
                DataType::Int,
                vec![Value::Int(23), Value::Int(32), Value::Int(0), Value::Int(21)],
            )
            .unwrap()
            .create(
                "sEx",
                DataType::Str,
                vec!["Male".into(), "Male".into(), "Female".into(), "Female".into()],
            )
            .unwrap();
        table
    }

    #[test]
    fn test_create_seeds_rows_on_a_row_empty_table() {
        let mut table = Table::new();
        table
            .columns_mut()
            .create("n", DataType::Int, vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows().get(0).unwrap().len(), 1);
        assert_eq!(table.rows().get(1).unwrap().id(), 1);
    }

    #[test]
    fn test_create_extends_every_existing_row() {
        let table = people();
        for row in table.rows().iter() {
            assert_eq!(row.len(), 3);
        }
    }

    #[test]
    fn test_headers_keep_their_original_case_and_order() {
        let table = people();
        assert_eq!(table.columns().headers(), vec!["name", "AGE", "sEx"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = people();
        assert!(table.columns().contains("NAME"));
        assert!(table.columns().contains("age"));
        assert_eq!(table.columns().index_of("SEX").unwrap(), 2);
    }

    #[test]
    fn test_duplicate_header_is_rejected_case_insensitively() {
        let mut table = people();
        let err = table
            .columns_mut()
            .create("Name", DataType::Str, vec![
                "a".into(),
                "b".into(),
                "c".into(),
                "d".into(),
            ])
            .unwrap_err();
        assert_eq!(err, TableError::HeaderAlreadyExists("Name".into()));
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn test_blank_header_is_rejected() {
        let mut table = Table::new();
        let err = table
            .columns_mut()
            .create("  ", DataType::Any, vec![])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_inconsistent_content_size_is_rejected() {
        let mut table = people();
        let err = table
            .columns_mut()
            .create("Illegal", DataType::Any, vec![Value::Int(1)])
            .unwrap_err();
        assert_eq!(err, TableError::InconsistentColumnSize { got: 1, expected: 4 });
        assert!(!table.columns().contains("Illegal"));
    }

    #[test]
    fn test_content_must_satisfy_the_declared_type() {
        let mut table = Table::new();
        let err = table
            .columns_mut()
            .create("n", DataType::Int, vec![Value::Int(1), "two".into()])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        // Validation happened before any row was synthesized.
        assert!(table.rows().is_empty());
    }

    #[test]
    fn test_remove_cascades_into_every_row() {
        let mut table = people();
        table.columns_mut().remove_header("sex").unwrap();
        assert_eq!(table.columns().len(), 2);
        assert!(!table.columns().contains("sex"));
        for row in table.rows().iter() {
            assert_eq!(row.len(), 2);
        }
        // Index map was re-densified.
        assert_eq!(table.columns().index_of("age").unwrap(), 1);
    }

    #[test]
    fn test_get_id_requires_an_assignable_type() {
        let table = people();
        assert!(table.columns().get_id(&id::<String>("name")).is_ok());
        let err = table.columns().get_id(&id::<i64>("name")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_any_columns_are_assignable_from_every_id_type() {
        let mut table = Table::new();
        table
            .columns_mut()
            .create("mixed", DataType::Any, vec![Value::Int(5)])
            .unwrap();
        assert!(table.columns().contains_id(&id::<i64>("mixed")));
        assert!(table.columns().contains_id(&id::<String>("mixed")));
    }

    #[test]
    fn test_first_and_last_fail_without_columns() {
        let table = Table::new();
        assert_eq!(
            table.columns().first().unwrap_err(),
            TableError::EmptyCollection("columns")
        );
        assert_eq!(
            table.columns().last().unwrap_err(),
            TableError::EmptyCollection("columns")
        );
    }

    #[test]
    fn test_clear_leaves_zero_length_placeholder_rows() {
        let mut table = people();
        table.columns_mut().clear();
        assert_eq!(table.columns().len(), 0);
        assert_eq!(table.rows().len(), 4);
        assert!(table.rows().iter().all(|row| row.is_empty()));
        assert!(table.is_empty());
    }

    #[test]
    fn test_round_trip_create_then_get() {
        let table = people();
        let column = table.columns().get_by_header("name").unwrap();
        let values: Vec<_> = column.iter().cloned().collect();
        assert_eq!(
            values,
            vec![
                Value::Str("Luc".into()),
                Value::Str("Baptiste".into()),
                Value::Str("Anya".into()),
                Value::Str("Mathilde".into()),
            ]
        );
    }
}
