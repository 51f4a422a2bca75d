use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a column. Every type has a fixed on-page width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int32,
    FixedText(usize),
}

impl ColumnType {
    pub fn width(&self) -> usize {
        match self {
            ColumnType::Int32 => 4,
            ColumnType::FixedText(len) => *len,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int32 => write!(f, "INT"),
            ColumnType::FixedText(len) => write!(f, "VARCHAR({})", len),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(i32),
    Text(String),
}

impl Value {
    pub fn matches_type(&self, column_type: &ColumnType) -> bool {
        matches!(
            (self, column_type),
            (Value::Integer(_), ColumnType::Int32) | (Value::Text(_), ColumnType::FixedText(_))
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INT",
            Value::Text(_) => "TEXT",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}
