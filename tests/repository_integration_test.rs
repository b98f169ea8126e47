// ==========================================
// Repository integration tests
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use test_helpers::{create_seeded_db, create_test_db, open_shared_connection};
use voltway_ios::domain::{BomLine, MovementType, Part, StockMovement};
use voltway_ios::repository::{
    BomRepository, PartRepository, PurchaseOrderRepository, RepositoryError, StockRepository,
};
use voltway_ios::seed::DemoDataset;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
}

#[test]
fn test_part_crud_round_trip() {
    let (_temp, db_path) = create_test_db().unwrap();
    let repo = PartRepository::from_connection(open_shared_connection(&db_path).unwrap());

    let part = Part::new("P900", "Test Hub", "assembly", 1.5).with_successors(&["P901"]);
    repo.upsert(&part).unwrap();
    assert_eq!(repo.find_by_id("P900").unwrap(), Some(part.clone()));

    let mut renamed = part.clone();
    renamed.part_name = "Test Hub v2".to_string();
    repo.upsert(&renamed).unwrap();
    assert_eq!(repo.list_all().unwrap().len(), 1);
    assert_eq!(repo.find_by_id("P900").unwrap().unwrap().part_name, "Test Hub v2");

    repo.delete("P900").unwrap();
    assert!(repo.find_by_id("P900").unwrap().is_none());
    assert!(matches!(repo.delete("P900"), Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_bom_line_requires_known_part() {
    let (_temp, db_path) = create_seeded_db().unwrap();
    let repo = BomRepository::from_connection(open_shared_connection(&db_path).unwrap());

    assert!(repo.upsert(&BomLine::new("S1_V1", "NOT_A_PART", 1)).is_err());
    assert_eq!(repo.list_by_product("S1_V1").unwrap().len(), 3);
}

#[test]
fn test_outbound_beyond_stock_rejected() {
    let (_temp, db_path) = create_seeded_db().unwrap();
    let repo = StockRepository::from_connection(open_shared_connection(&db_path).unwrap());

    let too_many = StockMovement::new(day(2), "P301", "WH1", MovementType::Outbound, 46);
    let err = repo.record_movement(&too_many).unwrap_err();
    assert!(matches!(err, RepositoryError::BusinessRuleViolation(_)));
    assert_eq!(repo.find("P301", "WH1").unwrap().unwrap().quantity_available, 45);

    let ok = StockMovement::new(day(2), "P301", "WH1", MovementType::Outbound, 45);
    assert_eq!(repo.record_movement(&ok).unwrap().quantity_available, 0);
}

#[test]
fn test_movement_ledger_is_kept() {
    let (_temp, db_path) = create_seeded_db().unwrap();
    let repo = StockRepository::from_connection(open_shared_connection(&db_path).unwrap());

    repo.record_movement(&StockMovement::new(day(3), "P300", "WH1", MovementType::Inbound, 10))
        .unwrap();
    let ledger = repo.list_movements("P300").unwrap();
    // seeded history plus the new booking
    assert_eq!(ledger.len(), 2);
    assert_eq!(repo.find("P300", "WH1").unwrap().unwrap().quantity_available, 168);
}

#[test]
fn test_mark_delivered_only_once() {
    let (_temp, db_path) = create_seeded_db().unwrap();
    let repo = PurchaseOrderRepository::from_connection(open_shared_connection(&db_path).unwrap());

    repo.mark_delivered("PO-9001", day(14)).unwrap();
    let order = repo.find_by_id("PO-9001").unwrap().unwrap();
    assert!(!order.is_pending());
    assert_eq!(order.actual_delivered_at, Some(day(14)));

    assert!(repo.mark_delivered("PO-9001", day(15)).is_err());
}

#[test]
fn test_seeding_twice_is_idempotent() {
    let (_temp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();

    DemoDataset::new().seed(conn.clone()).unwrap();
    DemoDataset::new().seed(conn.clone()).unwrap();

    let stock = StockRepository::from_connection(conn.clone());
    assert_eq!(stock.find("P300", "WH1").unwrap().unwrap().quantity_available, 158);
    assert_eq!(stock.list_movements("P300").unwrap().len(), 1);
    assert_eq!(PartRepository::from_connection(conn).list_all().unwrap().len(), 7);
}

#[test]
fn test_overflowing_inbound_rejected() {
    let (_temp, db_path) = create_seeded_db().unwrap();
    let repo = StockRepository::from_connection(open_shared_connection(&db_path).unwrap());

    let huge = StockMovement::new(day(4), "P300", "WH1", MovementType::Inbound, i64::MAX);
    let err = repo.record_movement(&huge).unwrap_err();
    assert!(matches!(err, RepositoryError::BusinessRuleViolation(_)));
    assert_eq!(repo.find("P300", "WH1").unwrap().unwrap().quantity_available, 158);
    assert_eq!(repo.list_movements("P300").unwrap().len(), 1);
}

#[test]
fn test_receive_commits_all_or_nothing() {
    let (_temp, db_path) = create_seeded_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    let orders = PurchaseOrderRepository::from_connection(conn.clone());
    let stock = StockRepository::from_connection(conn);

    let (order, record) = orders.receive("PO-9001", "WH1", day(14)).unwrap();
    assert_eq!(order.quantity_ordered, 50);
    assert_eq!(record.quantity_available, 62);

    assert!(matches!(
        orders.receive("PO-9001", "WH1", day(15)),
        Err(RepositoryError::BusinessRuleViolation(_))
    ));
    assert!(matches!(
        orders.receive("PO-0000", "WH1", day(15)),
        Err(RepositoryError::NotFound { .. })
    ));
    assert_eq!(stock.find("P304", "WH1").unwrap().unwrap().quantity_available, 62);
    assert_eq!(stock.list_movements("P304").unwrap().len(), 1);
}
