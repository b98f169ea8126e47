// ==========================================
// Voltway Industrial OS - SQLite connection setup
// ==========================================
// Goals:
// - every Connection::open goes through the same PRAGMAs
// - one place that owns the table layout
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version written by `init_schema`
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Apply the shared PRAGMAs
///
/// foreign_keys and busy_timeout are per-connection settings.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a connection with the shared configuration
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create all tables if missing (idempotent)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        -- ===== Primary entities =====
        CREATE TABLE IF NOT EXISTS materials (
            part_id TEXT PRIMARY KEY,
            part_name TEXT NOT NULL,
            part_type TEXT NOT NULL,
            dimensions TEXT,
            weight REAL NOT NULL DEFAULT 0,
            blocked_parts TEXT NOT NULL DEFAULT '[]',
            successor_parts TEXT NOT NULL DEFAULT '[]',
            comment TEXT
        );

        CREATE TABLE IF NOT EXISTS products (
            product_id TEXT PRIMARY KEY,
            model TEXT NOT NULL,
            version TEXT NOT NULL,
            product_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS customers (
            customer_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            customer_type TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS warehouses (
            location TEXT PRIMARY KEY,
            description TEXT
        );

        -- ===== Secondary entities =====
        CREATE TABLE IF NOT EXISTS bom (
            product_id TEXT NOT NULL REFERENCES products(product_id) ON DELETE CASCADE,
            part_id TEXT NOT NULL REFERENCES materials(part_id),
            quantity INTEGER NOT NULL,
            notes TEXT,
            PRIMARY KEY (product_id, part_id)
        );

        CREATE TABLE IF NOT EXISTS stock (
            part_id TEXT NOT NULL REFERENCES materials(part_id),
            location TEXT NOT NULL REFERENCES warehouses(location),
            quantity_available INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (part_id, location)
        );

        CREATE TABLE IF NOT EXISTS suppliers (
            supplier_id TEXT NOT NULL,
            part_id TEXT NOT NULL REFERENCES materials(part_id),
            price_per_unit REAL NOT NULL,
            lead_time_days INTEGER NOT NULL,
            min_order_qty INTEGER NOT NULL,
            reliability_rating REAL NOT NULL,
            PRIMARY KEY (supplier_id, part_id)
        );

        CREATE TABLE IF NOT EXISTS dispatch_parameters (
            part_id TEXT PRIMARY KEY REFERENCES materials(part_id),
            config_data TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- ===== Transactions =====
        CREATE TABLE IF NOT EXISTS sales_orders (
            sales_order_id TEXT PRIMARY KEY,
            product_id TEXT NOT NULL REFERENCES products(product_id),
            customer_id TEXT NOT NULL REFERENCES customers(customer_id),
            quantity INTEGER NOT NULL,
            order_type TEXT NOT NULL,
            requested_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            accepted_request_date TEXT NOT NULL,
            status TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS material_orders (
            order_id TEXT PRIMARY KEY,
            part_id TEXT NOT NULL REFERENCES materials(part_id),
            supplier_id TEXT NOT NULL,
            quantity_ordered INTEGER NOT NULL,
            order_date TEXT NOT NULL,
            expected_delivery_date TEXT NOT NULL,
            status TEXT NOT NULL,
            actual_delivered_at TEXT
        );

        CREATE TABLE IF NOT EXISTS stock_movements (
            movement_id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            part_id TEXT NOT NULL REFERENCES materials(part_id),
            location TEXT NOT NULL REFERENCES warehouses(location),
            movement_type TEXT NOT NULL,
            quantity INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_stock_movements_part ON stock_movements(part_id, date);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Read schema_version (None if the table does not exist)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
