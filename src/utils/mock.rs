//! Shared fixtures for tests and benchmarks.

use crate::{
    storage::{
        database::Database,
        schema::{Column, TableSchema},
    },
    types::{row::Row, value::ColumnType},
};

/// The classic users table: integer primary key plus two text columns.
pub fn user_schema() -> TableSchema {
    TableSchema::new(vec![
        Column::new("id", ColumnType::Int32).primary_key(),
        Column::new("username", ColumnType::FixedText(32)),
        Column::new("email", ColumnType::FixedText(255)),
    ])
    .expect("fixture schema is valid")
}

pub fn user_row(schema: &TableSchema, id: i32, username: &str, email: &str) -> Row {
    let mut row = Row::new(schema);
    row.set_int(schema, 0, id).unwrap();
    row.set_text(schema, 1, username).unwrap();
    row.set_text(schema, 2, email).unwrap();
    row
}

/// A database with a populated `users` table, ids 1..=count.
pub fn database_with_users(count: i32) -> Database {
    let mut db = Database::new("main");
    let schema = user_schema();
    db.create_table("users", schema.clone()).unwrap();
    let table = db.table_mut("users").unwrap();
    for i in 1..=count {
        let row = user_row(
            &schema,
            i,
            &format!("user_{}", i),
            &format!("user_{}@example.com", i),
        );
        table.insert(&row).unwrap();
    }
    db
}
