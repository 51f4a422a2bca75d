use lumbung::{
    executor::create_table::{execute_create_table, execute_drop_table, execute_show_tables},
    planner::{
        parser::SqlParser,
        statement::{ColumnDefinition, CreateTableStatement, DropTableStatement, Statement},
    },
    storage::{
        database::Database,
        schema::{Column, TableSchema},
    },
    types::{MAX_COLUMNS, MAX_TABLES, error::DatabaseError, value::ColumnType},
};

fn users_statement(name: &str) -> CreateTableStatement {
    CreateTableStatement {
        table_name: name.to_string(),
        columns: vec![
            ColumnDefinition {
                name: "id".to_string(),
                column_type: ColumnType::Int32,
                primary_key: true,
            },
            ColumnDefinition {
                name: "name".to_string(),
                column_type: ColumnType::FixedText(10),
                primary_key: false,
            },
        ],
    }
}

#[test]
fn test_create_table() {
    let mut db = Database::new("main");
    execute_create_table(&mut db, &users_statement("users")).unwrap();

    assert!(db.table_exists("users"));
    let table = db.table("users").unwrap();
    assert_eq!(table.num_rows(), 0);
    assert!(table.index().is_some());
    assert_eq!(table.primary_key_column(), Some(0));
}

#[test]
fn test_create_duplicate_table_fails() {
    let mut db = Database::new("main");
    execute_create_table(&mut db, &users_statement("users")).unwrap();
    let result = execute_create_table(&mut db, &users_statement("users"));
    assert!(matches!(
        result,
        Err(DatabaseError::TableAlreadyExists { name }) if name == "users"
    ));
}

#[test]
fn test_table_limit() {
    let mut db = Database::new("main");
    for i in 0..MAX_TABLES {
        execute_create_table(&mut db, &users_statement(&format!("t{}", i))).unwrap();
    }
    assert_eq!(db.table_count(), MAX_TABLES);
    let result = execute_create_table(&mut db, &users_statement("one_too_many"));
    assert!(matches!(result, Err(DatabaseError::TooManyTables { .. })));
}

#[test]
fn test_show_tables_is_sorted() {
    let mut db = Database::new("main");
    for name in ["zebra", "apple", "mango"] {
        execute_create_table(&mut db, &users_statement(name)).unwrap();
    }
    assert_eq!(execute_show_tables(&db), vec!["apple", "mango", "zebra"]);
}

#[test]
fn test_drop_table() {
    let mut db = Database::new("main");
    execute_create_table(&mut db, &users_statement("users")).unwrap();

    execute_drop_table(
        &mut db,
        &DropTableStatement {
            table_name: "users".to_string(),
            if_exists: false,
        },
    )
    .unwrap();
    assert!(!db.table_exists("users"));
}

#[test]
fn test_drop_missing_table_fails() {
    let mut db = Database::new("main");
    let result = execute_drop_table(
        &mut db,
        &DropTableStatement {
            table_name: "ghost".to_string(),
            if_exists: false,
        },
    );
    assert!(matches!(result, Err(DatabaseError::TableNotFound { .. })));
}

#[test]
fn test_drop_if_exists_is_quiet() {
    let mut db = Database::new("main");
    execute_drop_table(
        &mut db,
        &DropTableStatement {
            table_name: "ghost".to_string(),
            if_exists: true,
        },
    )
    .unwrap();
}

#[test]
fn test_schema_rejects_too_many_columns() {
    let columns: Vec<Column> = (0..=MAX_COLUMNS)
        .map(|i| Column::new(&format!("c{}", i), ColumnType::Int32))
        .collect();
    let result = TableSchema::new(columns);
    assert!(matches!(result, Err(DatabaseError::TooManyColumns { .. })));
}

#[test]
fn test_schema_rejects_two_primary_keys() {
    let result = TableSchema::new(vec![
        Column::new("a", ColumnType::Int32).primary_key(),
        Column::new("b", ColumnType::Int32).primary_key(),
    ]);
    assert!(matches!(result, Err(DatabaseError::InvalidData { .. })));
}

#[test]
fn test_schema_rejects_text_primary_key() {
    let result = TableSchema::new(vec![
        Column::new("name", ColumnType::FixedText(10)).primary_key(),
    ]);
    assert!(matches!(result, Err(DatabaseError::TypeMismatch { .. })));
}

#[test]
fn test_schema_rejects_duplicate_column_names() {
    let result = TableSchema::new(vec![
        Column::new("id", ColumnType::Int32),
        Column::new("id", ColumnType::Int32),
    ]);
    assert!(matches!(result, Err(DatabaseError::InvalidData { .. })));
}

#[test]
fn test_schema_rejects_overlong_column_name() {
    let result = TableSchema::new(vec![Column::new(&"x".repeat(32), ColumnType::Int32)]);
    assert!(matches!(result, Err(DatabaseError::InvalidData { .. })));
}

#[test]
fn test_schema_rejects_row_wider_than_a_page() {
    let result = TableSchema::new(vec![Column::new("blob", ColumnType::FixedText(4096))]);
    assert!(matches!(result, Err(DatabaseError::RowTooLarge { .. })));
}

#[test]
fn test_create_table_via_sql() {
    let parser = SqlParser::new();
    let statement = parser
        .parse_statement("CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(10))")
        .unwrap();

    let Statement::CreateTable(create) = &statement else {
        panic!("expected a CREATE TABLE statement");
    };
    assert_eq!(create.table_name, "users");
    assert_eq!(create.columns.len(), 2);
    assert!(create.columns[0].primary_key);
    assert_eq!(create.columns[1].column_type, ColumnType::FixedText(10));

    let mut db = Database::new("main");
    lumbung::executor::execute(&mut db, &statement).unwrap();
    assert!(db.table_exists("users"));
}

#[test]
fn test_drop_table_via_sql() {
    let parser = SqlParser::new();
    let mut db = Database::new("main");
    execute_create_table(&mut db, &users_statement("users")).unwrap();

    let statement = parser.parse_statement("DROP TABLE IF EXISTS users").unwrap();
    lumbung::executor::execute(&mut db, &statement).unwrap();
    assert!(!db.table_exists("users"));
}
