use crate::{
    planner::statement::InsertStatement,
    storage::database::Database,
    types::{error::Result, row::Row},
};

/// Insert every VALUES row of the statement. All rows are validated against
/// the schema before any of them is written, so a type or width error leaves
/// the table untouched.
pub fn execute_insert(db: &mut Database, statement: &InsertStatement) -> Result<u32> {
    let table = db.table_mut(&statement.table_name)?;

    let mut rows = Vec::with_capacity(statement.rows.len());
    for values in &statement.rows {
        rows.push(Row::from_values(table.schema(), values)?);
    }

    let mut inserted = 0;
    for row in &rows {
        table.insert(row)?;
        inserted += 1;
    }
    Ok(inserted)
}
