//! Dynamically typed values flowing through template evaluation.

use std::collections::BTreeMap;
use std::fmt;

use crate::schema::{Column, Table};

/// A value produced or consumed while a template executes.
///
/// Schema objects are borrowed so that helpers such as `tag` and `type` can work
/// on the real [`Table`] and [`Column`] rather than a copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(f64, f64),
    Str(String),
    List(Vec<Value<'a>>),
    Map(BTreeMap<String, Value<'a>>),
    Table(&'a Table),
    Column(&'a Column),
}

impl<'a> Value<'a> {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Complex(..) => "complex",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Table(_) => "table",
            Value::Column(_) => "column",
        }
    }

    /// Looks up a named field on maps and schema objects.
    pub fn field(&self, name: &str) -> Option<Value<'a>> {
        match self {
            Value::Map(map) => map.get(name).cloned(),
            Value::Table(table) => {
                let table: &'a Table = table;
                match name {
                    "name" => Some(Value::from(table.name.as_str())),
                    "columns" => Some(Value::List(table.columns.iter().map(Value::Column).collect())),
                    _ => None,
                }
            }
            Value::Column(col) => match name {
                "name" => Some(Value::from(col.name.as_str())),
                "comment" => Some(Value::from(col.comment.as_str())),
                "default" => Some(Value::from(col.default.as_str())),
                "sql_type" => Some(Value::from(col.sql_type.name.as_str())),
                "nullable" => Some(Value::Bool(col.nullable)),
                "pk" => Some(Value::Bool(col.is_primary_key)),
                "autoincr" => Some(Value::Bool(col.is_auto_increment)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Truthiness used by `if`: zero values and empty containers are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Uint(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Complex(re, im) => *re != 0.0 || *im != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Table(_) | Value::Column(_) => true,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Complex(re, im) => write!(f, "({re}{im:+}i)"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("map[")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("]")
            }
            Value::Table(table) => f.write_str(&table.name),
            Value::Column(col) => f.write_str(&col.name),
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value<'_> {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value<'_> {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u64> for Value<'_> {
    fn from(value: u64) -> Self {
        Value::Uint(value)
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value<'_> {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<'a> From<&'a Table> for Value<'a> {
    fn from(value: &'a Table) -> Self {
        Value::Table(value)
    }
}

impl<'a> From<&'a Column> for Value<'a> {
    fn from(value: &'a Column) -> Self {
        Value::Column(value)
    }
}
