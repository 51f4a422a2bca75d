use crate::{
    storage::table::Table,
    types::{RowAddr, error::Result, row::Row},
};

/// Iterator over a table's live rows in insertion order. Scans every slot
/// from 0 to the row counter and skips tombstoned ones.
pub struct TableScanner<'a> {
    table: &'a Table,
    next_row: RowAddr,
}

impl<'a> TableScanner<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table, next_row: 0 }
    }
}

impl Iterator for TableScanner<'_> {
    type Item = Result<(RowAddr, Row)>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_row < self.table.num_rows() {
            let addr = self.next_row;
            self.next_row += 1;
            match self.table.read_row(addr) {
                Ok(Some(row)) => return Some(Ok((addr, row))),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
