// ==========================================
// Test helpers
// ==========================================
// Temp SQLite databases with the production schema
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use voltway_ios::seed::DemoDataset;

/// Temp database with schema applied
///
/// # Returns
/// - NamedTempFile: keep alive for the test's duration
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().ok_or("non-utf8 temp path")?.to_string();

    let conn = voltway_ios::db::open_sqlite_connection(&db_path)?;
    voltway_ios::db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Temp database holding the demo dataset
pub fn create_seeded_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    DemoDataset::new().seed(open_shared_connection(&db_path)?)?;
    Ok((temp_file, db_path))
}

pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(voltway_ios::db::open_sqlite_connection(db_path)?)
}

pub fn open_shared_connection(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    Ok(Arc::new(Mutex::new(open_test_connection(db_path)?)))
}

pub fn insert_test_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// Overwrite one stock record directly
pub fn set_stock(conn: &Connection, part_id: &str, location: &str, qty: i64) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO stock (part_id, location, quantity_available) VALUES (?1, ?2, ?3)
        ON CONFLICT(part_id, location) DO UPDATE SET quantity_available = excluded.quantity_available
        "#,
        params![part_id, location, qty],
    )?;
    Ok(())
}
