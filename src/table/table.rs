//! The table: one schema, one row store, and the filtering entry points.

use super::column_id::ColumnIdentifier;
use super::columns::{Columns, ColumnsMut, Schema};
use super::row::RowRef;
use super::rows::{RowStore, Rows, RowsMut};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// An in-memory, heterogeneous rows × columns container.
///
/// Invariant: every row has exactly as many cells as there are columns, and
/// every column reports exactly as many values as there are rows. All
/// mutation paths validate before touching state, so the invariant holds even
/// across failed operations.
///
/// Equality and hashing compare row content structurally; the column schema
/// only participates through what the rows imply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub(crate) schema: Schema,
    pub(crate) rows: RowStore,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the columns.
    pub fn columns(&self) -> Columns<'_> {
        Columns { table: self }
    }

    /// Mutating access to the columns.
    pub fn columns_mut(&mut self) -> ColumnsMut<'_> {
        ColumnsMut { table: self }
    }

    /// Read access to the rows.
    pub fn rows(&self) -> Rows<'_> {
        Rows { table: self }
    }

    /// Mutating access to the rows.
    pub fn rows_mut(&mut self) -> RowsMut<'_> {
        RowsMut { table: self }
    }

    /// Whether the table holds no data: no rows at all, or only zero-length
    /// placeholder rows left behind by a column clear.
    pub fn is_empty(&self) -> bool {
        self.rows.elements.iter().all(|row| row.is_empty())
    }

    /// Resets the table to the empty state, keeping the handle usable.
    pub fn clear(&mut self) -> &mut Self {
        self.rows.elements.clear();
        self.schema.clear();
        self
    }

    /// Keeps the rows matching `matcher`, projected onto `headers`.
    ///
    /// Fails with a lookup error if any requested header is absent; otherwise
    /// scans the rows once, in order, and assembles a brand-new table whose
    /// schema is exactly the requested columns, in request order. Cell values
    /// are cloned; row and column structure is fresh, so mutating the result
    /// never touches this table.
    pub fn filter<S, F>(&self, headers: &[S], matcher: F) -> Result<Table>
    where
        S: AsRef<str>,
        F: Fn(RowRef<'_>) -> bool,
    {
        let mut indexes = Vec::with_capacity(headers.len());
        for header in headers {
            indexes.push(self.schema.index_of(header.as_ref())?);
        }
        Ok(self.filter_at(indexes, matcher))
    }

    /// Like [`Table::filter`], with the projection resolved through column
    /// ids (header match plus assignable element type).
    pub fn filter_by_id<F>(&self, ids: &[&dyn ColumnIdentifier], matcher: F) -> Result<Table>
    where
        F: Fn(RowRef<'_>) -> bool,
    {
        let mut indexes = Vec::with_capacity(ids.len());
        for id in ids {
            indexes.push(self.schema.index_of_id(*id)?);
        }
        Ok(self.filter_at(indexes, matcher))
    }

    fn filter_at<F>(&self, mut indexes: Vec<usize>, matcher: F) -> Table
    where
        F: Fn(RowRef<'_>) -> bool,
    {
        // Requested twice means kept once, first position wins.
        let mut seen = vec![false; self.schema.len()];
        indexes.retain(|&index| !std::mem::replace(&mut seen[index], true));

        let mut result = Table::new();
        for &index in &indexes {
            let def = &self.schema.defs()[index];
            result.schema.push(def.header.clone(), def.dtype);
        }

        for index in 0..self.rows.elements.len() {
            let row = RowRef { table: self, index };
            if !matcher(row) {
                continue;
            }
            let cells = indexes
                .iter()
                .map(|&column| self.rows.elements[index].cells[column].clone())
                .collect();
            result.rows.push(cells);
        }

        log::trace!(
            "filter kept {} of {} row(s) over {} column(s)",
            result.rows.elements.len(),
            self.rows.elements.len(),
            indexes.len()
        );
        result
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Hash for Table {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.elements.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataType, Value};
    use crate::table::id;
    use crate::{ErrorKind, TableError};

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
                "age",
                DataType::Int,
                vec![Value::Int(23), Value::Int(32), Value::Int(0), Value::Int(21)],
            )
            .unwrap()
            .create(
                "sex",
                DataType::Str,
                vec!["Male".into(), "Male".into(), "Female".into(), "Female".into()],
            )
            .unwrap();
        table
    }

    #[test]
    fn test_a_new_table_is_empty() {
        let table = Table::new();
        assert!(table.is_empty());
        assert!(table.rows().is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_rows_and_columns_stay_consistent() {
        let table = people();
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.columns().len(), 3);
        for row in table.rows().iter() {
            assert_eq!(row.len(), table.columns().len());
        }
        for column in table.columns().iter() {
            assert_eq!(column.len(), table.rows().len());
        }
    }

    #[test]
    fn test_clear_resets_to_the_empty_state() {
        let mut table = people();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 0);
        assert_eq!(table.rows().len(), 0);
    }

    #[test]
    fn test_filter_projects_in_request_order() {
        let table = people();
        let result = table
            .filter(&["sex", "name"], |row| {
                row.get_by_header("age")
                    .ok()
                    .and_then(Value::as_f64)
                    .is_some_and(|age| age > 21.0)
            })
            .unwrap();

        assert_eq!(result.columns().headers(), vec!["sex", "name"]);
        assert_eq!(result.rows().len(), 2);
        assert_eq!(
            result.rows().get(0).unwrap().get(1).unwrap(),
            &Value::Str("Luc".into())
        );
    }

    #[test]
    fn test_filter_with_an_unknown_header_fails_fast() {
        let table = people();
        let err = table.filter(&["name", "height"], |_| true).unwrap_err();
        assert_eq!(err, TableError::HeaderNotFound("height".into()));
    }

    #[test]
    fn test_filter_never_mutates_the_source() {
        let table = people();
        let snapshot = table.clone();
        let result = table.filter(&["name"], |_| false).unwrap();
        assert!(result.rows().is_empty());
        assert_eq!(table, snapshot);
        assert_eq!(table.rows().len(), 4);
    }

    #[test]
    fn test_filtered_result_is_independent_of_the_source() {
        let table = people();
        let mut result = table.filter(&["name"], |_| true).unwrap();
        result
            .rows_mut()
            .first_mut()
            .unwrap()
            .set_by_header("name", "Changed".into())
            .unwrap();
        assert_eq!(
            table.rows().first().unwrap().get_by_header("name").unwrap(),
            &Value::Str("Luc".into())
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let table = people();
        let keep_males = |row: crate::RowRef<'_>| {
            row.get_by_header("sex")
                .ok()
                .and_then(Value::as_str)
                .is_some_and(|sex| sex == "Male")
        };
        let once = table.filter(&["name", "sex"], keep_males).unwrap();
        let twice = once.filter(&["name", "sex"], keep_males).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_by_id_checks_header_and_type() {
        let table = people();
        let name = id::<String>("NAME");
        let age = id::<i64>("age");
        let result = table
            .filter_by_id(&[&name, &age], |row| {
                row.get_id(&id::<i64>("age"))
                    .unwrap_or(None)
                    .is_some_and(|&age| age >= 21)
            })
            .unwrap();
        assert_eq!(result.rows().len(), 3);
        assert_eq!(result.columns().headers(), vec!["name", "age"]);

        let wrong = id::<i64>("name");
        let err = table.filter_by_id(&[&wrong], |_| true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_tables_compare_by_row_content() {
        let a = people();
        let b = people();
        assert_eq!(a, b);

        let mut c = people();
        c.rows_mut().remove(0).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_two_rows_with_zero_columns_keep_the_table_empty() {
        let mut table = Table::new();
        table
            .rows_mut()
            .create(vec![])
            .unwrap()
            .create(vec![])
            .unwrap();
        assert_eq!(table.rows().len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_two_columns_with_zero_rows_keep_the_table_empty() {
        let mut table = Table::new();
        table
            .columns_mut()
            .create("a", DataType::Any, vec![])
            .unwrap()
            .create("b", DataType::Any, vec![])
            .unwrap();
        assert_eq!(table.columns().len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let table = people();
        let json = serde_json::to_string(&table).expect("serialize");
        let back: Table = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(table, back);
        // The header index is rebuilt, not serialized.
        assert_eq!(back.columns().index_of("SEX").unwrap(), 2);
    }
}
