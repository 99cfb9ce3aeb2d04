//! Generic row access for the data table.
//!
//! The table never assumes a schema. Anything implementing [`Record`] can be
//! displayed: the table asks for fields by name and gets back an optional
//! [`Value`]. `None` means the field is missing (null/undefined), which the
//! sort engine and identity resolver treat specially.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            // Integral numbers print without a fractional part ("75000", not "75000.0").
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A row the data table can read fields from.
///
/// ```rust,ignore
/// struct User { id: u32, name: String, manager: Option<String> }
///
/// impl Record for User {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(self.id.into()),
///             "name" => Some(self.name.as_str().into()),
///             "manager" => self.manager.clone().map(Value::from),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// The value of `name`, or `None` when the field is absent.
    fn field(&self, name: &str) -> Option<Value>;
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Build a schema-less row from `(field, value)` pairs.
///
/// ```rust,ignore
/// let row = record([("name", "Ada".into()), ("salary", 75_000.into())]);
/// ```
pub fn record<'a>(fields: impl IntoIterator<Item = (&'a str, Value)>) -> BTreeMap<String, Value> {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Value::Number(75000.0).to_string(), "75000");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn text_and_bool_display() {
        assert_eq!(Value::from("Ada").to_string(), "Ada");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn map_records_report_missing_fields_as_none() {
        let row = record([("name", "Ada".into())]);
        assert_eq!(row.field("name"), Some(Value::from("Ada")));
        assert_eq!(row.field("email"), None);
    }
}
