use crate::{
    storage::{bplus_tree::BPlusTree, pager::Pager, schema::TableSchema},
    types::{
        RowAddr, SLOT_TOMBSTONE,
        error::{DatabaseError, Result},
        row::Row,
    },
};

/// A table: schema, paged row store, monotonic row counter, and the optional
/// primary-key index. Row numbers are never reused; DELETE tombstones a slot
/// without shrinking the counter.
pub struct Table {
    name: String,
    schema: TableSchema,
    pager: Pager,
    num_rows: RowAddr,
    index: Option<BPlusTree>,
    primary_col: Option<usize>,
}

impl Table {
    pub fn new(name: &str, schema: TableSchema) -> Self {
        let primary_col = schema.primary_key_index();
        let pager = Pager::new(schema.slot_size());
        Self {
            name: name.to_string(),
            index: primary_col.map(|_| BPlusTree::new()),
            schema,
            pager,
            num_rows: 0,
            primary_col,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn num_rows(&self) -> RowAddr {
        self.num_rows
    }

    pub fn max_rows(&self) -> RowAddr {
        self.pager.max_rows()
    }

    pub fn index(&self) -> Option<&BPlusTree> {
        self.index.as_ref()
    }

    pub fn primary_key_column(&self) -> Option<usize> {
        self.primary_col
    }

    /// Append a row at the next slot and maintain the index. A failed insert
    /// leaves the row counter, pages, and index unchanged: the key is
    /// extracted and the capacity checked before the slot is written.
    pub fn insert(&mut self, row: &Row) -> Result<RowAddr> {
        if self.num_rows >= self.pager.max_rows() {
            return Err(DatabaseError::CapacityExceeded {
                table: self.name.clone(),
            });
        }
        let key = match self.primary_col {
            Some(index) => Some(row.primary_key(&self.schema, index)?),
            None => None,
        };

        let addr = self.num_rows;
        let slot = self.pager.slot_mut(addr)?;
        row.write_slot(slot);

        if let (Some(key), Some(index)) = (key, self.index.as_mut()) {
            index.insert(key, addr);
        }
        self.num_rows += 1;
        Ok(addr)
    }

    /// Deserialize the row at `addr`, or `None` when the slot is tombstoned.
    pub fn read_row(&self, addr: RowAddr) -> Result<Option<Row>> {
        let slot = self.pager.slot(addr)?;
        if slot[0] == SLOT_TOMBSTONE {
            return Ok(None);
        }
        Ok(Some(Row::read_slot(&self.schema, slot)))
    }

    pub fn mark_deleted(&mut self, addr: RowAddr) -> Result<()> {
        self.pager.mark_deleted(addr)
    }

    pub fn is_deleted(&self, addr: RowAddr) -> Result<bool> {
        self.pager.is_deleted(addr)
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }
}
