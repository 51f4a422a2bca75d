use std::cmp::Ordering;

use crate::{
    storage::schema::TableSchema,
    types::{
        error::{DatabaseError, Result},
        row::Row,
        value::{ColumnType, Value},
    },
};

/// Comparison operators supported in WHERE clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOp {
    fn matches(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::Equal => ordering == Ordering::Equal,
            ComparisonOp::NotEqual => ordering != Ordering::Equal,
            ComparisonOp::LessThan => ordering == Ordering::Less,
            ComparisonOp::LessThanOrEqual => ordering != Ordering::Greater,
            ComparisonOp::GreaterThan => ordering == Ordering::Greater,
            ComparisonOp::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }
}

/// A single `column op literal` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: ComparisonOp,
    pub value: Value,
}

/// Primary-key constraint extracted from a predicate, used to narrow a scan
/// through the index. The index only narrows; the full predicate is always
/// re-applied to every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRange {
    Exact(u32),
    AtLeast(u32),
    Greater(u32),
    AtMost(u32),
    Less(u32),
}

/// A conjunction of column comparisons. An empty predicate matches every
/// row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_conditions(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn with(mut self, column: &str, op: ComparisonOp, value: Value) -> Self {
        self.conditions.push(Condition {
            column: column.to_string(),
            op,
            value,
        });
        self
    }

    pub fn eq(self, column: &str, value: Value) -> Self {
        self.with(column, ComparisonOp::Equal, value)
    }

    pub fn ne(self, column: &str, value: Value) -> Self {
        self.with(column, ComparisonOp::NotEqual, value)
    }

    pub fn lt(self, column: &str, value: Value) -> Self {
        self.with(column, ComparisonOp::LessThan, value)
    }

    pub fn le(self, column: &str, value: Value) -> Self {
        self.with(column, ComparisonOp::LessThanOrEqual, value)
    }

    pub fn gt(self, column: &str, value: Value) -> Self {
        self.with(column, ComparisonOp::GreaterThan, value)
    }

    pub fn ge(self, column: &str, value: Value) -> Self {
        self.with(column, ComparisonOp::GreaterThanOrEqual, value)
    }

    /// Check every referenced column exists and its declared type agrees
    /// with the literal's kind. A disagreement is a hard error before any
    /// row is evaluated, never a silent false.
    pub fn validate(&self, schema: &TableSchema, table_name: &str) -> Result<()> {
        for condition in &self.conditions {
            let column = schema.column(&condition.column).ok_or_else(|| {
                DatabaseError::ColumnNotFound {
                    name: condition.column.clone(),
                    table: table_name.to_string(),
                }
            })?;
            if !condition.value.matches_type(&column.column_type) {
                return Err(DatabaseError::TypeMismatch {
                    expected: column.column_type.to_string(),
                    actual: condition.value.type_name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Evaluate the conjunction against a row, short-circuiting on the first
    /// failed condition. Integer comparisons are numeric; text comparisons
    /// are byte-wise lexicographic after truncating the literal to the
    /// column's declared width.
    pub fn evaluate(&self, row: &Row, schema: &TableSchema) -> Result<bool> {
        for condition in &self.conditions {
            let index = schema.column_index(&condition.column).ok_or_else(|| {
                DatabaseError::InvalidData {
                    details: format!(
                        "predicate references unknown column '{}'",
                        condition.column
                    ),
                }
            })?;
            let column_type = schema.columns()[index].column_type;

            let ordering = match (&condition.value, column_type) {
                (Value::Integer(literal), ColumnType::Int32) => {
                    row.get_int(schema, index)?.cmp(literal)
                }
                (Value::Text(literal), ColumnType::FixedText(width)) => {
                    let stored = row.text_bytes(schema, index)?;
                    let literal = &literal.as_bytes()[..literal.len().min(width)];
                    stored.cmp(literal)
                }
                (value, column_type) => {
                    return Err(DatabaseError::TypeMismatch {
                        expected: column_type.to_string(),
                        actual: value.type_name().to_string(),
                    });
                }
            };

            if !condition.op.matches(ordering) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// First index-usable constraint on the primary-key column. Negative
    /// literals are skipped: the index keys are `u32` and would order them
    /// incorrectly, so those predicates fall back to a full scan.
    pub fn key_range(&self, primary_column: &str) -> Option<KeyRange> {
        self.conditions.iter().find_map(|condition| {
            if condition.column != primary_column {
                return None;
            }
            let Value::Integer(literal) = condition.value else {
                return None;
            };
            if literal < 0 {
                return None;
            }
            let key = literal as u32;
            match condition.op {
                ComparisonOp::Equal => Some(KeyRange::Exact(key)),
                ComparisonOp::GreaterThanOrEqual => Some(KeyRange::AtLeast(key)),
                ComparisonOp::GreaterThan => Some(KeyRange::Greater(key)),
                ComparisonOp::LessThanOrEqual => Some(KeyRange::AtMost(key)),
                ComparisonOp::LessThan => Some(KeyRange::Less(key)),
                ComparisonOp::NotEqual => None,
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
