use crate::{
    planner::statement::{CreateTableStatement, DropTableStatement},
    storage::{
        database::Database,
        schema::{Column, TableSchema},
    },
    types::error::Result,
};

pub fn execute_create_table(db: &mut Database, statement: &CreateTableStatement) -> Result<()> {
    let columns = statement
        .columns
        .iter()
        .map(|definition| Column {
            name: definition.name.clone(),
            column_type: definition.column_type,
            primary_key: definition.primary_key,
        })
        .collect();
    let schema = TableSchema::new(columns)?;
    db.create_table(&statement.table_name, schema)
}

pub fn execute_drop_table(db: &mut Database, statement: &DropTableStatement) -> Result<()> {
    if statement.if_exists && !db.table_exists(&statement.table_name) {
        return Ok(());
    }
    db.drop_table(&statement.table_name)
}

pub fn execute_show_tables(db: &Database) -> Vec<String> {
    db.table_names()
}
