// ==========================================
// Voltway Industrial OS - Demo database seeder
// ==========================================
// Usage: seed_demo_db [db_path] [--reset]
// --reset backs up and removes an existing file first
// ==========================================

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use voltway_ios::app::get_default_db_path;
use voltway_ios::db::{init_schema, open_sqlite_connection};
use voltway_ios::seed::DemoDataset;
use voltway_ios::snapshot::{CatalogSnapshot, SnapshotSource, SqliteSnapshotSource};

fn main() -> Result<()> {
    voltway_ios::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let reset = args.iter().any(|a| a == "--reset");
    let db_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(get_default_db_path);

    if reset {
        backup_and_reset_db(&db_path)?;
    }

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("cannot open {}", db_path))?;
    init_schema(&conn).context("schema initialization failed")?;
    let conn = Arc::new(Mutex::new(conn));

    let report = DemoDataset::new()
        .seed(conn.clone())
        .context("seeding demo dataset failed")?;

    let snapshot = CatalogSnapshot::build(SqliteSnapshotSource::new(conn).load()?);
    println!("Seeded {}", db_path);
    println!(
        "  parts={} products={} bom_lines={} stock_records={} offers={} orders={}",
        report.parts,
        report.products,
        report.bom_lines,
        report.stock_records,
        report.supplier_offers,
        report.orders
    );
    println!("  snapshot issues={}", snapshot.issues().len());
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<()> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}
