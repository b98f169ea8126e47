// ==========================================
// Inventory / master data API integration tests
// ==========================================

mod helpers;

use chrono::NaiveDate;
use helpers::api_test_helper::setup_default_state;
use std::sync::Barrier;
use voltway_ios::domain::{MovementType, Part, PurchaseOrderStatus, StockRecord};
use voltway_ios::ApiError;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
}

#[tokio::test]
async fn test_inventory_search_matches_name_or_type() {
    let (_temp, state) = setup_default_state().await;

    let all = state.inventory_api.list_inventory("").await.unwrap();
    assert_eq!(all.len(), 4);

    let motors = state.inventory_api.list_inventory("brushless").await.unwrap();
    let ids: Vec<&str> = motors.iter().map(|r| r.part_id.as_str()).collect();
    assert_eq!(ids, vec!["P300", "P304"]);

    let hardware = state.inventory_api.list_inventory("HARDWARE").await.unwrap();
    assert_eq!(hardware.len(), 1);
    assert_eq!(hardware[0].part_id, "P337");

    let p300 = all.iter().find(|r| r.part_id == "P300").unwrap();
    assert_eq!(p300.minimum_stock_threshold, Some(50));
    assert!(!p300.is_short);
}

#[tokio::test]
async fn test_receive_purchase_order_books_inbound() {
    let (_temp, state) = setup_default_state().await;

    let record = state
        .inventory_api
        .receive_purchase_order("PO-9001", "WH1", day(14))
        .unwrap();
    assert_eq!(record.quantity_available, 62);

    let orders = state.master_data_api.list_purchase_orders().unwrap();
    assert_eq!(orders[0].status, PurchaseOrderStatus::Delivered);
    assert_eq!(state.inventory_api.list_movements("P304").unwrap().len(), 1);

    let err = state
        .inventory_api
        .receive_purchase_order("PO-9001", "WH1", day(15))
        .unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));
    // stock unchanged by the rejected receipt
    let s1_v2 = state.bom_api.get_build_potential("S1_V2", None).await.unwrap();
    assert_eq!(s1_v2.buildable_units, 45);
}

#[tokio::test]
async fn test_movement_validation() {
    let (_temp, state) = setup_default_state().await;

    let err = state
        .inventory_api
        .record_movement(day(1), "P300", "WH1", MovementType::Inbound, 0)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let err = state
        .inventory_api
        .record_movement(day(1), "P304", "WH1", MovementType::Outbound, 13)
        .unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));
}

#[tokio::test]
async fn test_part_crud_is_visible_in_snapshot() {
    let (_temp, state) = setup_default_state().await;

    let part = Part::new("P339", "Spring Washer M6", "hardware", 0.01);
    state.master_data_api.save_part(&part).unwrap();
    state
        .master_data_api
        .save_stock_record(&StockRecord::new("P339", "WH1", 900))
        .unwrap();

    let rows = state.inventory_api.list_inventory("spring").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity_available, 900);

    state.master_data_api.delete_stock_record("P339", "WH1").unwrap();
    state.master_data_api.delete_part("P339").unwrap();
    assert!(state.master_data_api.get_part("P339").unwrap().is_none());
    assert!(state.inventory_api.list_inventory("spring").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_master_data_rejects_bad_input() {
    let (_temp, state) = setup_default_state().await;

    let nameless = Part::new("P340", "", "hardware", 0.01);
    assert!(matches!(
        state.master_data_api.save_part(&nameless),
        Err(ApiError::InvalidInput(_))
    ));

    assert!(matches!(
        state.master_data_api.delete_customer("C999"),
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_repeated_receipt_leaves_stock_and_ledger_alone() {
    let (_temp, state) = setup_default_state().await;

    state
        .inventory_api
        .receive_purchase_order("PO-9001", "WH1", day(14))
        .unwrap();
    let err = state
        .inventory_api
        .receive_purchase_order("PO-9001", "WH1", day(15))
        .unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));

    assert_eq!(state.inventory_api.list_movements("P304").unwrap().len(), 1);
    let rows = state.inventory_api.list_inventory("750W").await.unwrap();
    assert_eq!(rows[0].quantity_available, 62);
}

#[tokio::test]
async fn test_concurrent_receipts_book_once() {
    let (_temp, state) = setup_default_state().await;
    let api = state.inventory_api.clone();
    let barrier = Barrier::new(2);

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    api.receive_purchase_order("PO-9001", "WH1", day(14))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(state.inventory_api.list_movements("P304").unwrap().len(), 1);
    let rows = state.inventory_api.list_inventory("750W").await.unwrap();
    assert_eq!(rows[0].quantity_available, 62);
}

#[tokio::test]
async fn test_failed_receipt_keeps_order_pending() {
    let (_temp, state) = setup_default_state().await;

    // WH9 is not a known warehouse, the stock insert fails
    assert!(state
        .inventory_api
        .receive_purchase_order("PO-9001", "WH9", day(14))
        .is_err());

    let orders = state.master_data_api.list_purchase_orders().unwrap();
    assert_eq!(orders[0].status, PurchaseOrderStatus::Ordered);
    assert!(orders[0].actual_delivered_at.is_none());
    assert!(state.inventory_api.list_movements("P304").unwrap().is_empty());
}
