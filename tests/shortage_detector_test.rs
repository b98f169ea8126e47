// ==========================================
// Shortage detector integration tests
// ==========================================

mod helpers;

use helpers::test_data_builder::CatalogBuilder;
use serde_json::json;
use voltway_ios::engine::ShortageDetector;
use voltway_ios::snapshot::CatalogSnapshot;

#[test]
fn test_threshold_is_inclusive() {
    let snapshot = CatalogSnapshot::build(
        CatalogBuilder::new()
            .stock("AT", "WH1", 50)
            .min_stock("AT", 50)
            .stock("ABOVE", "WH1", 51)
            .min_stock("ABOVE", 50)
            .build(),
    );

    let alerts = ShortageDetector::new().detect(&snapshot);
    let ids: Vec<&str> = alerts.iter().map(|a| a.part_id.as_str()).collect();
    assert_eq!(ids, vec!["AT"]);
    assert_eq!(alerts[0].deficit(), 1);
}

#[test]
fn test_unconfigured_parts_never_alert() {
    let snapshot = CatalogSnapshot::build(CatalogBuilder::new().stock("FREE", "WH1", 0).build());
    assert!(ShortageDetector::new().detect(&snapshot).is_empty());
}

#[test]
fn test_configured_part_without_stock_alerts_at_zero() {
    let snapshot = CatalogSnapshot::build(
        CatalogBuilder::new()
            .part("GHOST", "Ghost Bracket", "hardware")
            .min_stock("GHOST", 0)
            .build(),
    );
    let alerts = ShortageDetector::new().detect(&snapshot);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].quantity_available, 0);
    assert_eq!(alerts[0].part_name, "Ghost Bracket");
}

#[test]
fn test_location_view_checks_each_record() {
    let snapshot = CatalogSnapshot::build(
        CatalogBuilder::new()
            .stock("BOLT", "WH1", 40)
            .stock("BOLT", "WH2", 5)
            .min_stock("BOLT", 30)
            .build(),
    );
    let detector = ShortageDetector::new();

    // 45 in total is fine, WH2 alone is not
    assert!(detector.detect(&snapshot).is_empty());
    let by_location = detector.detect_by_location(&snapshot);
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].location.as_deref(), Some("WH2"));
}

#[test]
fn test_unreadable_config_is_reported_not_alerted() {
    let snapshot = CatalogSnapshot::build(
        CatalogBuilder::new()
            .stock("ODD", "WH1", 0)
            .raw_config("ODD", json!({ "reorder_qty": 10 }))
            .build(),
    );
    assert!(ShortageDetector::new().detect(&snapshot).is_empty());
    assert!(!snapshot.issues().is_empty());
}

#[test]
fn test_alerts_sorted_by_part() {
    let snapshot = CatalogSnapshot::build(
        CatalogBuilder::new()
            .stock("Z9", "WH1", 0)
            .min_stock("Z9", 1)
            .stock("A1", "WH1", 0)
            .min_stock("A1", 1)
            .build(),
    );
    let ids: Vec<String> = ShortageDetector::new()
        .detect(&snapshot)
        .into_iter()
        .map(|a| a.part_id)
        .collect();
    assert_eq!(ids, vec!["A1".to_string(), "Z9".to_string()]);
}
