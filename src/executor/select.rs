use std::fmt;

use crate::{
    executor::{
        predicate::{KeyRange, Predicate},
        scan::TableScanner,
    },
    planner::statement::{Projection, SelectStatement},
    storage::{bplus_tree::BPlusTree, database::Database, table::Table},
    types::{
        RowAddr,
        error::{DatabaseError, Result},
        row::Row,
        value::Value,
    },
};

/// Projected result rows in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl SelectResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for SelectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let rendered: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "({})", rendered.join(", "))?;
        }
        Ok(())
    }
}

pub fn execute_select(db: &Database, statement: &SelectStatement) -> Result<SelectResult> {
    let table = db.table(&statement.table_name)?;
    let predicate = statement.predicate.as_ref();
    if let Some(predicate) = predicate {
        predicate.validate(table.schema(), table.name())?;
    }

    let (indices, columns) = resolve_projection(table, &statement.projection)?;
    let mut rows = Vec::new();

    match index_probe(table, predicate) {
        Some((KeyRange::Exact(key), index)) => {
            // Index narrows to at most one candidate; the full predicate is
            // still applied and tombstoned hits are discarded.
            if let Some(addr) = index.search_equals(key) {
                collect_candidate(table, addr, predicate, &indices, &mut rows)?;
            }
        }
        Some((KeyRange::AtLeast(key), index)) | Some((KeyRange::Greater(key), index)) => {
            // Greater-than keeps the equal keys in the candidate set and
            // lets the full predicate drop them.
            for (_, addr) in index.range_from(key) {
                collect_candidate(table, addr, predicate, &indices, &mut rows)?;
            }
        }
        Some((range @ (KeyRange::AtMost(bound) | KeyRange::Less(bound)), index)) => {
            let inclusive = matches!(range, KeyRange::AtMost(_));
            for (key, addr) in index.range_from(0) {
                if key > bound || (!inclusive && key == bound) {
                    break;
                }
                collect_candidate(table, addr, predicate, &indices, &mut rows)?;
            }
        }
        None => {
            for item in TableScanner::new(table) {
                let (_, row) = item?;
                let matches = match predicate {
                    Some(predicate) => predicate.evaluate(&row, table.schema())?,
                    None => true,
                };
                if matches {
                    rows.push(project(&row, table, &indices)?);
                }
            }
        }
    }

    Ok(SelectResult { columns, rows })
}

/// Primary-key constraint usable for index narrowing, paired with the index
/// itself when the table has one.
fn index_probe<'a>(
    table: &'a Table,
    predicate: Option<&Predicate>,
) -> Option<(KeyRange, &'a BPlusTree)> {
    let predicate = predicate?;
    let index = table.index()?;
    let primary = table.primary_key_column()?;
    let name = &table.schema().columns()[primary].name;
    predicate.key_range(name).map(|range| (range, index))
}

fn collect_candidate(
    table: &Table,
    addr: RowAddr,
    predicate: Option<&Predicate>,
    indices: &[usize],
    rows: &mut Vec<Vec<Value>>,
) -> Result<()> {
    // Stale index entries point at tombstoned slots; skip them.
    let Some(row) = table.read_row(addr)? else {
        return Ok(());
    };
    let matches = match predicate {
        Some(predicate) => predicate.evaluate(&row, table.schema())?,
        None => true,
    };
    if matches {
        rows.push(project(&row, table, indices)?);
    }
    Ok(())
}

fn resolve_projection(
    table: &Table,
    projection: &Projection,
) -> Result<(Vec<usize>, Vec<String>)> {
    match projection {
        Projection::All => {
            let names = table.schema().column_names();
            Ok(((0..names.len()).collect(), names))
        }
        Projection::Columns(names) => {
            let mut indices = Vec::with_capacity(names.len());
            for name in names {
                let index = table.schema().column_index(name).ok_or_else(|| {
                    DatabaseError::ColumnNotFound {
                        name: name.clone(),
                        table: table.name().to_string(),
                    }
                })?;
                indices.push(index);
            }
            Ok((indices, names.clone()))
        }
    }
}

fn project(row: &Row, table: &Table, indices: &[usize]) -> Result<Vec<Value>> {
    indices
        .iter()
        .map(|&index| row.value(table.schema(), index))
        .collect()
}
