//! Cell values and the runtime type tags that guard them.
//!
//! Every column declares a [`DataType`]; every cell holds a [`Value`]. The
//! acceptance rule is checked before any mutation: a column of type `T` only
//! ever stores `Null` or values whose tag is `T` (a column of type
//! [`DataType::Any`] stores anything). [`CellType`] is the checked-downcast
//! capability that lets typed accessors avoid unchecked casts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The declared element type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Accepts any value; the untyped column.
    Any,
    Bool,
    Int,
    Float,
    Str,
}

impl DataType {
    /// Whether a column of this type accepts `value`.
    ///
    /// `Null` is accepted by every column; `Any` accepts everything;
    /// otherwise the value's tag must match exactly.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            DataType::Any => true,
            _ => value.is_null() || *self == value.dtype(),
        }
    }

    /// Whether a column of this type can be addressed through an id of type
    /// `other`.
    ///
    /// `Any` columns are assignable from every id type; otherwise the types
    /// must match exactly.
    pub fn is_assignable_from(&self, other: DataType) -> bool {
        *self == DataType::Any || *self == other
    }

    /// Whether this type holds numbers ([`DataType::Int`] or
    /// [`DataType::Float`]).
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Any => "any",
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "str",
        };
        write!(f, "{name}")
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Whether this cell is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The runtime tag of this value. `Null` reports [`DataType::Any`] since
    /// it is accepted everywhere and carries no tag of its own.
    pub fn dtype(&self) -> DataType {
        match self {
            Value::Null => DataType::Any,
            Value::Bool(_) => DataType::Bool,
            Value::Int(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
            Value::Str(_) => DataType::Str,
        }
    }

    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// This value read as a double. Both `Int` and `Float` cells widen, so
    /// numeric comparisons work across the two numeric column types.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

// Floats hash by bit pattern so that tables can hash by row content.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// A Rust type that can stand in for a column's element type.
///
/// This is the checked-downcast capability behind typed column ids: a
/// `ColumnId<String>` resolves to a column of type [`DataType::Str`] and its
/// accessors go through [`CellType::from_value`], never an unchecked cast.
///
/// `from_value` returns `None` for `Null` cells and for foreign tags, so
/// null-safe predicates can treat both uniformly as "does not match".
pub trait CellType: Sized + 'static {
    /// The tag of the columns this type addresses.
    const DATA_TYPE: DataType;

    /// Checked downcast of a cell.
    fn from_value(value: &Value) -> Option<&Self>;

    /// Wrap a native value back into a cell.
    fn into_value(self) -> Value;
}

impl CellType for bool {
    const DATA_TYPE: DataType = DataType::Bool;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl CellType for i64 {
    const DATA_TYPE: DataType = DataType::Int;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl CellType for f64 {
    const DATA_TYPE: DataType = DataType::Float;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl CellType for String {
    const DATA_TYPE: DataType = DataType::Str;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

// `Value` itself is the witness for untyped (`Any`) columns. `Null` still
// maps to `None` so that null-safe predicates short-circuit uniformly.
impl CellType for Value {
    const DATA_TYPE: DataType = DataType::Any;

    fn from_value(value: &Value) -> Option<&Self> {
        if value.is_null() {
            None
        } else {
            Some(value)
        }
    }

    fn into_value(self) -> Value {
        self
    }
}
