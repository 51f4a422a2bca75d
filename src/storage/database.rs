use std::collections::HashMap;

use crate::{
    storage::{schema::TableSchema, table::Table},
    types::{
        MAX_NAME_LEN, MAX_TABLES,
        error::{DatabaseError, Result},
    },
};

/// Registry mapping table names to owned tables. Passed explicitly to every
/// operation; there is no process-wide instance. Dropping a table releases
/// its pages and its whole index tree.
pub struct Database {
    name: String,
    tables: HashMap<String, Table>,
}

impl Database {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tables: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create_table(&mut self, name: &str, schema: TableSchema) -> Result<()> {
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(DatabaseError::InvalidData {
                details: format!("table name '{}' must be 1..={} bytes", name, MAX_NAME_LEN),
            });
        }
        if self.tables.contains_key(name) {
            return Err(DatabaseError::TableAlreadyExists {
                name: name.to_string(),
            });
        }
        if self.tables.len() >= MAX_TABLES {
            return Err(DatabaseError::TooManyTables { max: MAX_TABLES });
        }
        self.tables.insert(name.to_string(), Table::new(name, schema));
        Ok(())
    }

    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        self.tables
            .remove(name)
            .map(|_| ())
            .ok_or(DatabaseError::TableNotFound {
                name: name.to_string(),
            })
    }

    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables.get(name).ok_or(DatabaseError::TableNotFound {
            name: name.to_string(),
        })
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or(DatabaseError::TableNotFound {
                name: name.to_string(),
            })
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// All table names, sorted for deterministic output.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
