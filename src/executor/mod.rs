pub mod create_table;
pub mod delete;
pub mod insert;
pub mod predicate;
pub mod scan;
pub mod select;

use std::fmt;

use crate::{
    executor::select::SelectResult,
    planner::statement::Statement,
    storage::database::Database,
    types::error::Result,
};

/// Outcome of a successfully executed statement, rendered by the driver.
#[derive(Debug)]
pub enum ExecutionResult {
    TableCreated { name: String, columns: usize },
    Inserted { count: u32 },
    Rows(SelectResult),
    Deleted { count: u32 },
    TableDropped { name: String },
    TableNames(Vec<String>),
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::TableCreated { name, columns } => {
                writeln!(f, "Table '{}' created with {} columns.", name, columns)
            }
            ExecutionResult::Inserted { .. } => Ok(()),
            ExecutionResult::Rows(result) => write!(f, "{}", result),
            ExecutionResult::Deleted { count } => writeln!(f, "Deleted {} rows.", count),
            ExecutionResult::TableDropped { name } => writeln!(f, "Table '{}' dropped.", name),
            ExecutionResult::TableNames(names) => {
                for name in names {
                    writeln!(f, "{}", name)?;
                }
                Ok(())
            }
        }
    }
}

/// Dispatch a parsed statement against the database.
pub fn execute(db: &mut Database, statement: &Statement) -> Result<ExecutionResult> {
    match statement {
        Statement::CreateTable(stmt) => {
            create_table::execute_create_table(db, stmt)?;
            Ok(ExecutionResult::TableCreated {
                name: stmt.table_name.clone(),
                columns: stmt.columns.len(),
            })
        }
        Statement::Insert(stmt) => {
            let count = insert::execute_insert(db, stmt)?;
            Ok(ExecutionResult::Inserted { count })
        }
        Statement::Select(stmt) => {
            let result = select::execute_select(db, stmt)?;
            Ok(ExecutionResult::Rows(result))
        }
        Statement::Delete(stmt) => {
            let count = delete::execute_delete(db, stmt)?;
            Ok(ExecutionResult::Deleted { count })
        }
        Statement::DropTable(stmt) => {
            create_table::execute_drop_table(db, stmt)?;
            Ok(ExecutionResult::TableDropped {
                name: stmt.table_name.clone(),
            })
        }
        Statement::ShowTables => Ok(ExecutionResult::TableNames(create_table::execute_show_tables(
            db,
        ))),
    }
}
