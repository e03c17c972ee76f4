//! Typed column addressing.
//!
//! A [`ColumnId`] pairs a header with a compile-time element type so callers
//! can fetch a column or a cell without an unchecked cast. Identity is the
//! normalized (lowercased) header plus the element type tag; the phantom
//! parameter never takes part in it beyond its [`DataType`].

use crate::data::{CellType, DataType};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Case normalization used for every header comparison in the crate.
pub(crate) fn normalize(header: &str) -> String {
    header.to_lowercase()
}

/// Object-safe view of a column id: header plus element type tag.
///
/// Implemented by [`ColumnId`] and its narrowing wrappers so heterogeneous id
/// lists (ids of different element types) can travel through one slice.
pub trait ColumnIdentifier {
    /// The header of the addressed column, in its original case.
    fn header(&self) -> &str;

    /// The element type tag of the addressed column.
    fn dtype(&self) -> DataType;
}

/// Identifies a column and carries its element type.
///
/// Two ids are equal iff their headers match case-insensitively and their
/// element types match exactly, whatever the concrete type parameters:
///
/// ```
/// use datatable::{id, ColumnId};
///
/// let a: ColumnId<String> = id("Name");
/// let b: ColumnId<String> = id("nAmE");
/// assert_eq!(a, b);
///
/// let c: ColumnId<i64> = id("Name");
/// assert_ne!(a, c);
/// ```
pub struct ColumnId<T: CellType> {
    header: String,
    _cell: PhantomData<fn() -> T>,
}

impl<T: CellType> ColumnId<T> {
    /// Creates an id addressing the column `header` with element type `T`.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            _cell: PhantomData,
        }
    }

    /// The header of the addressed column, in its original case.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The element type tag of the addressed column.
    pub fn dtype(&self) -> DataType {
        T::DATA_TYPE
    }
}

/// Shorthand for [`ColumnId::new`].
pub fn id<T: CellType>(header: impl Into<String>) -> ColumnId<T> {
    ColumnId::new(header)
}

impl<T: CellType> Clone for ColumnId<T> {
    fn clone(&self) -> Self {
        Self::new(self.header.clone())
    }
}

impl<T: CellType> fmt::Debug for ColumnId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnId")
            .field("header", &self.header)
            .field("dtype", &T::DATA_TYPE)
            .finish()
    }
}

impl<T: CellType, U: CellType> PartialEq<ColumnId<U>> for ColumnId<T> {
    fn eq(&self, other: &ColumnId<U>) -> bool {
        T::DATA_TYPE == U::DATA_TYPE && normalize(&self.header) == normalize(&other.header)
    }
}

impl<T: CellType> Eq for ColumnId<T> {}

impl<T: CellType> Hash for ColumnId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        normalize(&self.header).hash(state);
        T::DATA_TYPE.hash(state);
    }
}

impl<T: CellType> ColumnIdentifier for ColumnId<T> {
    fn header(&self) -> &str {
        self.header()
    }

    fn dtype(&self) -> DataType {
        T::DATA_TYPE
    }
}

/// Marker for cell types that hold numbers, used by [`numbers`].
pub trait NumericCellType: CellType {}

impl NumericCellType for i64 {}
impl NumericCellType for f64 {}

/// A [`ColumnId`] statically known to address a column of strings.
///
/// Exists purely to narrow which query-builder continuation is returned; all
/// identity semantics delegate to the wrapped id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnOfStringsId {
    id: ColumnId<String>,
}

impl ColumnOfStringsId {
    /// The header of the addressed column.
    pub fn header(&self) -> &str {
        self.id.header()
    }

    /// The element type tag, always [`DataType::Str`].
    pub fn dtype(&self) -> DataType {
        self.id.dtype()
    }
}

impl ColumnIdentifier for ColumnOfStringsId {
    fn header(&self) -> &str {
        self.header()
    }

    fn dtype(&self) -> DataType {
        self.dtype()
    }
}

/// Narrows a string-typed id for the query DSL.
pub fn strings(id: &ColumnId<String>) -> ColumnOfStringsId {
    ColumnOfStringsId { id: id.clone() }
}

/// A [`ColumnId`] statically known to address a numeric column.
///
/// Remembers which numeric tag ([`DataType::Int`] or [`DataType::Float`]) the
/// source id carried, so lookups through it stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnOfNumbersId {
    header: String,
    dtype: DataType,
}

impl ColumnOfNumbersId {
    /// The header of the addressed column.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The element type tag of the source id.
    pub fn dtype(&self) -> DataType {
        self.dtype
    }
}

impl ColumnIdentifier for ColumnOfNumbersId {
    fn header(&self) -> &str {
        self.header()
    }

    fn dtype(&self) -> DataType {
        self.dtype()
    }
}

/// Narrows a numeric-typed id for the query DSL.
pub fn numbers<T: NumericCellType>(id: &ColumnId<T>) -> ColumnOfNumbersId {
    ColumnOfNumbersId {
        header: id.header().to_string(),
        dtype: T::DATA_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equality_is_case_insensitive() {
        let a: ColumnId<String> = id("Name");
        let b: ColumnId<String> = id("NAME");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_equality_requires_the_same_element_type() {
        let a: ColumnId<String> = id("age");
        let b: ColumnId<i64> = id("age");
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_headers_are_not_equal() {
        let a: ColumnId<String> = id("name");
        let b: ColumnId<String> = id("sex");
        assert_ne!(a, b);
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_narrowing_preserves_identity() {
        let name: ColumnId<String> = id("Name");
        let narrowed = strings(&name);
        assert_eq!(narrowed.header(), "Name");
        assert_eq!(narrowed.dtype(), DataType::Str);

        let age: ColumnId<i64> = id("age");
        let narrowed = numbers(&age);
        assert_eq!(narrowed.header(), "age");
        assert_eq!(narrowed.dtype(), DataType::Int);
    }

    #[test]
    fn test_ids_report_their_dtype() {
        assert_eq!(id::<bool>("flag").dtype(), DataType::Bool);
        assert_eq!(id::<f64>("score").dtype(), DataType::Float);
        assert_eq!(id::<crate::Value>("anything").dtype(), DataType::Any);
    }
}
