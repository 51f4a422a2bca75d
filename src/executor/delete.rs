use crate::{
    planner::statement::DeleteStatement,
    storage::database::Database,
    types::error::Result,
};

/// Tombstone every live row matching the predicate (all rows when there is
/// none) and return the count. Index entries are never removed; lookups
/// detect the tombstone and skip the row.
pub fn execute_delete(db: &mut Database, statement: &DeleteStatement) -> Result<u32> {
    let table = db.table_mut(&statement.table_name)?;
    if let Some(predicate) = &statement.predicate {
        predicate.validate(table.schema(), &statement.table_name)?;
    }

    let mut removed = 0;
    for addr in 0..table.num_rows() {
        let Some(row) = table.read_row(addr)? else {
            continue;
        };
        let matches = match &statement.predicate {
            Some(predicate) => predicate.evaluate(&row, table.schema())?,
            None => true,
        };
        if matches {
            table.mark_deleted(addr)?;
            removed += 1;
        }
    }
    Ok(removed)
}
