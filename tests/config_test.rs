// ==========================================
// Configuration integration tests
// ==========================================

mod test_helpers;

use std::sync::Arc;
use std::time::Duration;
use test_helpers::{create_test_db, insert_test_config, open_shared_connection, open_test_connection};
use voltway_ios::api::ConfigApi;
use voltway_ios::config::{config_keys, ConfigManager, PlanningSettings};
use voltway_ios::engine::SubstitutionPolicy;

fn config_api(db_path: &str) -> ConfigApi {
    let manager = ConfigManager::from_connection(open_shared_connection(db_path).unwrap()).unwrap();
    ConfigApi::new(Arc::new(manager))
}

#[tokio::test]
async fn test_defaults_without_stored_values() {
    let (_temp, db_path) = create_test_db().unwrap();
    let settings = config_api(&db_path).get_settings().await.unwrap();
    assert_eq!(settings, PlanningSettings::default());
    assert_eq!(settings.refresh_interval, Duration::from_secs(30));
}

#[tokio::test]
async fn test_stored_values_override_defaults() {
    let (_temp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_test_config(&conn, config_keys::REFRESH_INTERVAL_SECS, "5").unwrap();
    insert_test_config(&conn, config_keys::CREDIT_SUCCESSORS, "true").unwrap();

    let settings = config_api(&db_path).get_settings().await.unwrap();
    assert_eq!(settings.refresh_interval, Duration::from_secs(5));
    assert_eq!(
        settings.evaluation_options().substitution,
        SubstitutionPolicy::CreditSuccessors
    );
}

#[tokio::test]
async fn test_invalid_update_rolls_back() {
    let (_temp, db_path) = create_test_db().unwrap();
    let api = config_api(&db_path);

    api.update_config(config_keys::REFRESH_INTERVAL_SECS, "10").await.unwrap();
    assert!(api
        .update_config(config_keys::REFRESH_INTERVAL_SECS, "0")
        .await
        .is_err());
    assert_eq!(
        api.get_config(config_keys::REFRESH_INTERVAL_SECS).unwrap().as_deref(),
        Some("10")
    );

    assert!(api
        .update_config(config_keys::ASSISTANT_TEMPERATURE, "3.5")
        .await
        .is_err());
    assert!(api.get_config(config_keys::ASSISTANT_TEMPERATURE).unwrap().is_none());

    assert!(api.update_config("no_such_key", "1").await.is_err());
}

#[tokio::test]
async fn test_snapshot_restore() {
    let (_temp, db_path) = create_test_db().unwrap();
    let api = config_api(&db_path);
    api.update_config(config_keys::UTILIZATION_CHART_SIZE, "4").await.unwrap();
    let saved = api.get_config_snapshot().unwrap();

    api.update_config(config_keys::UTILIZATION_CHART_SIZE, "9").await.unwrap();
    api.restore_from_snapshot(&saved).unwrap();

    assert_eq!(api.get_settings().await.unwrap().utilization_chart_size, 4);
}
