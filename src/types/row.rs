use serde::{Deserialize, Serialize};

use crate::{
    storage::schema::TableSchema,
    types::{
        SLOT_HEADER_SIZE, SLOT_LIVE,
        error::{DatabaseError, Result},
        value::{ColumnType, Value},
    },
};

/// An owned row buffer sized to the schema's row width. The buffer holds the
/// packed column bytes only; the on-page liveness byte is added by
/// `write_slot` and skipped by `read_slot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    data: Vec<u8>,
}

impl Row {
    pub fn new(schema: &TableSchema) -> Self {
        Self {
            data: vec![0; schema.row_width()],
        }
    }

    /// Build a row from literal values, validating count, type, and text
    /// width before anything is written. Oversize text is rejected here;
    /// the raw `set_text` below truncates instead.
    pub fn from_values(schema: &TableSchema, values: &[Value]) -> Result<Self> {
        let columns = schema.columns();
        if values.len() != columns.len() {
            return Err(DatabaseError::InvalidData {
                details: format!(
                    "row has {} values but the table expects {} columns",
                    values.len(),
                    columns.len()
                ),
            });
        }
        for (column, value) in columns.iter().zip(values) {
            if !value.matches_type(&column.column_type) {
                return Err(DatabaseError::TypeMismatch {
                    expected: column.column_type.to_string(),
                    actual: value.type_name().to_string(),
                });
            }
            if let (Value::Text(text), ColumnType::FixedText(max)) = (value, &column.column_type) {
                if text.len() > *max {
                    return Err(DatabaseError::TextTooLong {
                        column: column.name.clone(),
                        max: *max,
                        actual: text.len(),
                    });
                }
            }
        }
        let mut row = Row::new(schema);
        for (index, value) in values.iter().enumerate() {
            match value {
                Value::Integer(v) => row.set_int(schema, index, *v)?,
                Value::Text(text) => row.set_text(schema, index, text)?,
            }
        }
        Ok(row)
    }

    fn column_type(&self, schema: &TableSchema, index: usize) -> Result<ColumnType> {
        schema
            .columns()
            .get(index)
            .map(|column| column.column_type)
            .ok_or(DatabaseError::ColumnIndexOutOfBounds { index })
    }

    pub fn set_int(&mut self, schema: &TableSchema, index: usize, value: i32) -> Result<()> {
        match self.column_type(schema, index)? {
            ColumnType::Int32 => {
                let offset = schema.column_offset(index);
                self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
                Ok(())
            }
            other => Err(DatabaseError::TypeMismatch {
                expected: other.to_string(),
                actual: "INT".to_string(),
            }),
        }
    }

    /// Write a text value at the column's offset, zero-padded to the
    /// declared width. Longer text is truncated to that width.
    pub fn set_text(&mut self, schema: &TableSchema, index: usize, text: &str) -> Result<()> {
        match self.column_type(schema, index)? {
            ColumnType::FixedText(width) => {
                let offset = schema.column_offset(index);
                let bytes = text.as_bytes();
                let len = bytes.len().min(width);
                self.data[offset..offset + len].copy_from_slice(&bytes[..len]);
                self.data[offset + len..offset + width].fill(0);
                Ok(())
            }
            other => Err(DatabaseError::TypeMismatch {
                expected: other.to_string(),
                actual: "TEXT".to_string(),
            }),
        }
    }

    pub fn get_int(&self, schema: &TableSchema, index: usize) -> Result<i32> {
        match self.column_type(schema, index)? {
            ColumnType::Int32 => {
                let offset = schema.column_offset(index);
                let mut bytes = [0u8; 4];
                bytes.copy_from_slice(&self.data[offset..offset + 4]);
                Ok(i32::from_le_bytes(bytes))
            }
            other => Err(DatabaseError::TypeMismatch {
                expected: "INT".to_string(),
                actual: other.to_string(),
            }),
        }
    }

    pub fn get_text(&self, schema: &TableSchema, index: usize) -> Result<String> {
        let bytes = self.text_bytes(schema, index)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// The stored text bytes with trailing padding stripped. Text reads stop
    /// at the first NUL, as the fixed-width slots are zero-padded.
    pub fn text_bytes(&self, schema: &TableSchema, index: usize) -> Result<&[u8]> {
        match self.column_type(schema, index)? {
            ColumnType::FixedText(width) => {
                let offset = schema.column_offset(index);
                let slot = &self.data[offset..offset + width];
                let len = slot.iter().position(|&b| b == 0).unwrap_or(width);
                Ok(&slot[..len])
            }
            other => Err(DatabaseError::TypeMismatch {
                expected: "TEXT".to_string(),
                actual: other.to_string(),
            }),
        }
    }

    pub fn value(&self, schema: &TableSchema, index: usize) -> Result<Value> {
        match self.column_type(schema, index)? {
            ColumnType::Int32 => Ok(Value::Integer(self.get_int(schema, index)?)),
            ColumnType::FixedText(_) => Ok(Value::Text(self.get_text(schema, index)?)),
        }
    }

    /// Read the primary-key column as the index key. Keys are the 4-byte
    /// little-endian integer reinterpreted as `u32`, the key space of the
    /// B+-tree.
    pub fn primary_key(&self, schema: &TableSchema, index: usize) -> Result<u32> {
        Ok(self.get_int(schema, index)? as u32)
    }

    /// Serialize into an on-page slot: liveness byte first, row bytes after.
    pub fn write_slot(&self, slot: &mut [u8]) {
        slot[0] = SLOT_LIVE;
        slot[SLOT_HEADER_SIZE..SLOT_HEADER_SIZE + self.data.len()].copy_from_slice(&self.data);
    }

    /// Deserialize from an on-page slot, skipping the liveness byte.
    pub fn read_slot(schema: &TableSchema, slot: &[u8]) -> Self {
        let width = schema.row_width();
        Self {
            data: slot[SLOT_HEADER_SIZE..SLOT_HEADER_SIZE + width].to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
