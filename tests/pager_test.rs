use lumbung::{
    storage::pager::Pager,
    types::{PAGE_SIZE, TABLE_MAX_PAGES, error::DatabaseError},
};

#[test]
fn test_rows_per_page_arithmetic() {
    // 14-byte row plus the liveness byte
    let pager = Pager::new(15);
    assert_eq!(pager.rows_per_page(), PAGE_SIZE / 15);
    assert_eq!(
        pager.max_rows(),
        (PAGE_SIZE / 15 * TABLE_MAX_PAGES) as u32
    );
}

#[test]
fn test_pages_are_allocated_lazily() {
    let mut pager = Pager::new(15);
    assert_eq!(pager.page_count(), 0);

    pager.slot_mut(0).unwrap();
    assert_eq!(pager.page_count(), 1);

    // Same page, no new allocation
    pager.slot_mut(1).unwrap();
    assert_eq!(pager.page_count(), 1);

    // First row of the second page
    let rows_per_page = pager.rows_per_page() as u32;
    pager.slot_mut(rows_per_page).unwrap();
    assert_eq!(pager.page_count(), 2);
}

#[test]
fn test_new_pages_are_zero_filled() {
    let mut pager = Pager::new(15);
    let slot = pager.slot_mut(3).unwrap();
    assert!(slot.iter().all(|&b| b == 0));
}

#[test]
fn test_slot_round_trip_across_page_boundary() {
    let mut pager = Pager::new(15);
    let rows_per_page = pager.rows_per_page() as u32;

    for row in [0, rows_per_page - 1, rows_per_page, rows_per_page + 1] {
        let slot = pager.slot_mut(row).unwrap();
        slot.fill(row as u8 + 1);
    }
    for row in [0, rows_per_page - 1, rows_per_page, rows_per_page + 1] {
        let slot = pager.slot(row).unwrap();
        assert!(slot.iter().all(|&b| b == row as u8 + 1));
        assert_eq!(slot.len(), 15);
    }
}

#[test]
fn test_slots_do_not_overlap() {
    let mut pager = Pager::new(15);
    pager.slot_mut(0).unwrap().fill(1);
    pager.slot_mut(1).unwrap().fill(2);
    assert!(pager.slot(0).unwrap().iter().all(|&b| b == 1));
    assert!(pager.slot(1).unwrap().iter().all(|&b| b == 2));
}

#[test]
fn test_mark_deleted_flips_liveness_byte() {
    let mut pager = Pager::new(15);
    pager.slot_mut(5).unwrap();
    assert!(!pager.is_deleted(5).unwrap());

    pager.mark_deleted(5).unwrap();
    assert!(pager.is_deleted(5).unwrap());
    assert_eq!(pager.slot(5).unwrap()[0], 1);
}

#[test]
fn test_page_limit_is_enforced() {
    // One slot per page: row number equals page number
    let mut pager = Pager::new(PAGE_SIZE);
    assert_eq!(pager.rows_per_page(), 1);
    assert_eq!(pager.max_rows(), TABLE_MAX_PAGES as u32);

    pager.slot_mut(TABLE_MAX_PAGES as u32 - 1).unwrap();

    let result = pager.slot_mut(TABLE_MAX_PAGES as u32);
    assert!(matches!(
        result,
        Err(DatabaseError::PageLimitExceeded { page, max })
            if page == TABLE_MAX_PAGES && max == TABLE_MAX_PAGES
    ));
}

#[test]
fn test_reading_unallocated_page_fails() {
    let pager = Pager::new(15);
    assert!(pager.slot(0).is_err());
}
