//! Row identity: the value that tracks a row across re-sorts and selection,
//! independent of where the row is displayed.

use crate::record::{Record, Value};
use std::fmt;

/// A comparable row identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    /// Identity derived from a field value. Integral numbers within `i64`
    /// range stay numeric; everything else is keyed by its display text.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 => {
                RowId::Number(*n as i64)
            }
            Value::Text(s) => RowId::Text(s.clone()),
            other => RowId::Text(other.to_string()),
        }
    }

    fn positional(position: usize) -> Self {
        RowId::Number(position as i64)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Text(s) => f.write_str(s),
            RowId::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Text(s)
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Number(n)
    }
}

/// How a table derives [`RowId`]s from its rows.
pub enum RowKey<R> {
    /// Read the named field; rows missing it fall back to their position.
    Field(String),
    /// Compute the identity. Never falls back.
    Func(Box<dyn Fn(&R) -> RowId + Send>),
    /// Use the row's position in the original (unsorted) input.
    Positional,
}

impl<R> RowKey<R> {
    pub fn field(name: impl Into<String>) -> Self {
        RowKey::Field(name.into())
    }

    pub fn func(f: impl Fn(&R) -> RowId + Send + 'static) -> Self {
        RowKey::Func(Box::new(f))
    }
}

impl<R> Default for RowKey<R> {
    fn default() -> Self {
        RowKey::Field("id".to_string())
    }
}

impl<R> fmt::Debug for RowKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Field(name) => f.debug_tuple("Field").field(name).finish(),
            RowKey::Func(_) => f.write_str("Func(..)"),
            RowKey::Positional => f.write_str("Positional"),
        }
    }
}

impl<R: Record> RowKey<R> {
    /// Identity of `row`. `original_position` must be the row's index in the
    /// input as given, never its display index, or identities would shift
    /// whenever the sort changes.
    pub fn resolve(&self, row: &R, original_position: usize) -> RowId {
        match self {
            RowKey::Field(name) => row
                .field(name)
                .map(|v| RowId::from_value(&v))
                .unwrap_or_else(|| RowId::positional(original_position)),
            RowKey::Func(f) => f(row),
            RowKey::Positional => RowId::positional(original_position),
        }
    }

    /// Identities for every row, indexed by original position.
    pub fn resolve_all(&self, rows: &[R]) -> Vec<RowId> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.resolve(row, i))
            .collect()
    }
}
