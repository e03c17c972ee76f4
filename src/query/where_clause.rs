//! The generic `where` stage: predicates over the clause's columns.

use super::and::And;
use super::context::QueryContext;
use super::typed::{WhereBool, WhereNumber, WhereStr};
use crate::data::{CellType, DataType, Value};
use std::marker::PhantomData;

/// A clause bound to one or more columns, waiting for its predicate.
///
/// The type parameter is the element type predicates see; it defaults to
/// [`Value`], the untyped view. Every predicate method consumes the stage and
/// returns [`And`], from which the chain either adds another clause or
/// terminates with a select.
pub struct Where<'t, T: CellType = Value> {
    ctx: QueryContext<'t>,
    headers: Vec<String>,
    _cell: PhantomData<fn() -> T>,
}

impl<'t, T: CellType> Where<'t, T> {
    pub(crate) fn new(ctx: QueryContext<'t>, headers: Vec<String>) -> Self {
        Self {
            ctx,
            headers,
            _cell: PhantomData,
        }
    }

    fn record<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(&Value) -> bool + 'static,
    {
        And::record(self.ctx, self.headers, predicate)
    }

    /// Keeps the rows for which `predicate` holds; the cell arrives downcast
    /// to `T`, with null or foreign cells seen as `None`.
    pub fn matches<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(Option<&T>) -> bool + 'static,
    {
        self.record(move |value| predicate(T::from_value(value)))
    }

    /// Like [`Where::matches`], but null or foreign cells never match, so the
    /// predicate only ever sees a real `T`.
    pub fn matches_safe<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.record(move |value| T::from_value(value).is_some_and(&predicate))
    }

    /// Keeps the rows whose cell is null.
    pub fn is_null(self) -> And<'t> {
        self.record(|value| value.is_null())
    }

    /// Keeps the rows whose cell is not null.
    pub fn is_non_null(self) -> And<'t> {
        self.record(|value| !value.is_null())
    }

    /// Keeps the rows whose cell is a non-null value of `dtype`.
    pub fn is_of_type(self, dtype: DataType) -> And<'t> {
        self.record(move |value| !value.is_null() && dtype.accepts(value))
    }

    /// Re-types the clause; subsequent predicates see cells as `N`.
    pub fn as_type<N: CellType>(self) -> Where<'t, N> {
        Where::new(self.ctx, self.headers)
    }

    /// Narrows the clause to the string-specific predicate set.
    pub fn as_str(self) -> WhereStr<'t> {
        WhereStr::new(self.ctx, self.headers)
    }

    /// Narrows the clause to the number-specific predicate set.
    pub fn as_number(self) -> WhereNumber<'t> {
        WhereNumber::new(self.ctx, self.headers)
    }

    /// Narrows the clause to the boolean-specific predicate set.
    pub fn as_bool(self) -> WhereBool<'t> {
        WhereBool::new(self.ctx, self.headers)
    }
}

impl<'t, T: CellType + PartialEq> Where<'t, T> {
    /// Keeps the rows whose cell equals `value`. Null cells never match,
    /// even against a null `value` on the untyped stage; use
    /// [`Where::is_null`] to select null cells.
    pub fn eq(self, value: T) -> And<'t> {
        self.matches_safe(move |cell| *cell == value)
    }

    /// Keeps the rows whose cell differs from `value`. Null cells match,
    /// since null is not `value`.
    pub fn ne(self, value: T) -> And<'t> {
        self.matches(move |cell| cell.is_none_or(|cell| *cell != value))
    }

    /// Keeps the rows whose cell equals one of `values`. Null cells never
    /// match.
    pub fn is_in(self, values: Vec<T>) -> And<'t> {
        self.matches_safe(move |cell| values.contains(cell))
    }

    /// Keeps the rows whose cell equals none of `values`. Null cells match,
    /// as the exact complement of [`Where::is_in`].
    pub fn not_in(self, values: Vec<T>) -> And<'t> {
        self.matches(move |cell| cell.is_none_or(|cell| !values.contains(cell)))
    }
}
