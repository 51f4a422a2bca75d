use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{
    MAX_COLUMNS, MAX_NAME_LEN, PAGE_SIZE, SLOT_HEADER_SIZE,
    error::{DatabaseError, Result},
    value::ColumnType,
};

/// A column definition. Columns are immutable once the table is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub primary_key: bool,
}

impl Column {
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            primary_key: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// Ordered column list defining the canonical byte layout of every row in a
/// table. Offsets are the running sum of the preceding columns' fixed widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(DatabaseError::InvalidData {
                details: "table must have at least one column".to_string(),
            });
        }
        if columns.len() > MAX_COLUMNS {
            return Err(DatabaseError::TooManyColumns { max: MAX_COLUMNS });
        }

        let mut names = HashSet::new();
        for column in &columns {
            if column.name.is_empty() || column.name.len() > MAX_NAME_LEN {
                return Err(DatabaseError::InvalidData {
                    details: format!(
                        "column name '{}' must be 1..={} bytes",
                        column.name, MAX_NAME_LEN
                    ),
                });
            }
            if !names.insert(column.name.as_str()) {
                return Err(DatabaseError::InvalidData {
                    details: format!("duplicate column name: {}", column.name),
                });
            }
        }

        let primary_count = columns.iter().filter(|c| c.primary_key).count();
        if primary_count > 1 {
            return Err(DatabaseError::InvalidData {
                details: "table can have at most one primary key column".to_string(),
            });
        }
        if let Some(primary) = columns.iter().find(|c| c.primary_key) {
            if primary.column_type != ColumnType::Int32 {
                return Err(DatabaseError::TypeMismatch {
                    expected: ColumnType::Int32.to_string(),
                    actual: primary.column_type.to_string(),
                });
            }
        }

        let schema = Self { columns };
        if schema.slot_size() > PAGE_SIZE {
            return Err(DatabaseError::RowTooLarge {
                width: schema.slot_size(),
                max: PAGE_SIZE,
            });
        }
        Ok(schema)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_key_index(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.primary_key)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Width of the packed row bytes, excluding the liveness byte.
    pub fn row_width(&self) -> usize {
        self.columns.iter().map(|c| c.column_type.width()).sum()
    }

    /// In-row byte offset of a column. On-page offsets differ by the
    /// liveness byte, which only `slot_size` and the slot codec account for.
    pub fn column_offset(&self, index: usize) -> usize {
        self.columns[..index]
            .iter()
            .map(|c| c.column_type.width())
            .sum()
    }

    /// On-page slot width: liveness byte plus the row bytes.
    pub fn slot_size(&self) -> usize {
        SLOT_HEADER_SIZE + self.row_width()
    }
}
