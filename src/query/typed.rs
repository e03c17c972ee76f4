//! Type-specific `where` stages: string, number and boolean predicate sets.
//!
//! Each stage is a [`Where`](super::Where) narrowed to one family of cell
//! types, trading the generic predicate methods for a vocabulary that fits
//! the family. Numbers are widened to `f64`, so one numeric stage serves
//! both int and float columns.

use super::and::And;
use super::context::QueryContext;
use crate::data::Value;

/// A clause whose predicates read cells as strings.
pub struct WhereStr<'t> {
    ctx: QueryContext<'t>,
    headers: Vec<String>,
}

impl<'t> WhereStr<'t> {
    pub(crate) fn new(ctx: QueryContext<'t>, headers: Vec<String>) -> Self {
        Self { ctx, headers }
    }

    /// Keeps the rows for which `predicate` holds; null or non-string cells
    /// are seen as `None`.
    pub fn matches<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(Option<&str>) -> bool + 'static,
    {
        And::record(self.ctx, self.headers, move |value| {
            predicate(value.as_str())
        })
    }

    /// Like [`WhereStr::matches`], but null or non-string cells never match.
    pub fn matches_safe<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(&str) -> bool + 'static,
    {
        self.matches(move |cell| cell.is_some_and(&predicate))
    }

    /// Keeps the rows whose cell is the empty string.
    pub fn is_empty(self) -> And<'t> {
        self.matches_safe(str::is_empty)
    }

    /// Keeps the rows whose cell equals `expected` ignoring case.
    pub fn equals_ignore_case(self, expected: &str) -> And<'t> {
        let expected = expected.to_lowercase();
        self.matches_safe(move |cell| cell.to_lowercase() == expected)
    }

    /// Keeps the rows whose cell is entirely lowercase.
    pub fn is_in_lower_case(self) -> And<'t> {
        self.matches_safe(|cell| cell == cell.to_lowercase())
    }

    /// Keeps the rows whose cell is entirely uppercase.
    pub fn is_in_upper_case(self) -> And<'t> {
        self.matches_safe(|cell| cell == cell.to_uppercase())
    }

    /// Keeps the rows whose cell contains `pattern`.
    pub fn contains(self, pattern: &str) -> And<'t> {
        let pattern = pattern.to_string();
        self.matches_safe(move |cell| cell.contains(&pattern))
    }

    /// Keeps the rows whose cell starts with `prefix`.
    pub fn starts_with(self, prefix: &str) -> And<'t> {
        let prefix = prefix.to_string();
        self.matches_safe(move |cell| cell.starts_with(&prefix))
    }

    /// Keeps the rows whose cell ends with `suffix`.
    pub fn ends_with(self, suffix: &str) -> And<'t> {
        let suffix = suffix.to_string();
        self.matches_safe(move |cell| cell.ends_with(&suffix))
    }
}

/// A clause whose predicates read cells as numbers, widened to `f64`.
pub struct WhereNumber<'t> {
    ctx: QueryContext<'t>,
    headers: Vec<String>,
}

impl<'t> WhereNumber<'t> {
    pub(crate) fn new(ctx: QueryContext<'t>, headers: Vec<String>) -> Self {
        Self { ctx, headers }
    }

    /// Keeps the rows for which `predicate` holds; null or non-numeric cells
    /// are seen as `None`, int cells are widened.
    pub fn matches<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(Option<f64>) -> bool + 'static,
    {
        And::record(self.ctx, self.headers, move |value| {
            predicate(value.as_f64())
        })
    }

    /// Like [`WhereNumber::matches`], but null or non-numeric cells never
    /// match.
    pub fn matches_safe<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(f64) -> bool + 'static,
    {
        self.matches(move |cell| cell.is_some_and(&predicate))
    }

    /// Keeps the rows whose cell is zero.
    pub fn is_zero(self) -> And<'t> {
        self.matches_safe(|n| n == 0.0)
    }

    /// Keeps the rows whose cell is strictly positive.
    pub fn is_positive(self) -> And<'t> {
        self.matches_safe(|n| n > 0.0)
    }

    /// Keeps the rows whose cell is strictly negative.
    pub fn is_negative(self) -> And<'t> {
        self.matches_safe(|n| n < 0.0)
    }

    /// Keeps the rows whose cell is an even integer value.
    pub fn is_even(self) -> And<'t> {
        self.matches_safe(|n| n % 2.0 == 0.0)
    }

    /// Keeps the rows whose cell is an odd integer value.
    pub fn is_odd(self) -> And<'t> {
        self.matches_safe(|n| (n.abs() % 2.0) == 1.0)
    }

    /// Keeps the rows whose cell lies in `[min, max]`, both ends included.
    pub fn in_range(self, min: f64, max: f64) -> And<'t> {
        self.matches_safe(move |n| n >= min && n <= max)
    }

    /// Keeps the rows whose cell is strictly below `bound`.
    pub fn lt(self, bound: f64) -> And<'t> {
        self.matches_safe(move |n| n < bound)
    }

    /// Keeps the rows whose cell is at most `bound`.
    pub fn le(self, bound: f64) -> And<'t> {
        self.matches_safe(move |n| n <= bound)
    }

    /// Keeps the rows whose cell is strictly above `bound`.
    pub fn gt(self, bound: f64) -> And<'t> {
        self.matches_safe(move |n| n > bound)
    }

    /// Keeps the rows whose cell is at least `bound`.
    pub fn ge(self, bound: f64) -> And<'t> {
        self.matches_safe(move |n| n >= bound)
    }
}

/// A clause whose predicates read cells as booleans.
pub struct WhereBool<'t> {
    ctx: QueryContext<'t>,
    headers: Vec<String>,
}

impl<'t> WhereBool<'t> {
    pub(crate) fn new(ctx: QueryContext<'t>, headers: Vec<String>) -> Self {
        Self { ctx, headers }
    }

    /// Keeps the rows for which `predicate` holds; null or non-boolean cells
    /// are seen as `None`.
    pub fn matches<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(Option<bool>) -> bool + 'static,
    {
        And::record(self.ctx, self.headers, move |value: &Value| {
            predicate(value.as_bool())
        })
    }

    /// Like [`WhereBool::matches`], but null or non-boolean cells never
    /// match.
    pub fn matches_safe<P>(self, predicate: P) -> And<'t>
    where
        P: Fn(bool) -> bool + 'static,
    {
        self.matches(move |cell| cell.is_some_and(&predicate))
    }

    /// Keeps the rows whose cell is `true`.
    pub fn is_true(self) -> And<'t> {
        self.matches_safe(|b| b)
    }

    /// Keeps the rows whose cell is `false`.
    pub fn is_false(self) -> And<'t> {
        self.matches_safe(|b| !b)
    }
}
