// ==========================================
// Voltway Industrial OS - Stock repositories
// ==========================================
// Tables: warehouses, stock, stock_movements
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::stock::{StockMovement, StockRecord, Warehouse};
use crate::domain::types::MovementType;
use crate::repository::columns::{enum_column, lock_conn};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// WarehouseRepository
// ==========================================
pub struct WarehouseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WarehouseRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, warehouse: &Warehouse) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            INSERT INTO warehouses (location, description) VALUES (?1, ?2)
            ON CONFLICT(location) DO UPDATE SET description = excluded.description
            "#,
            params![warehouse.location, warehouse.description],
        )?;
        Ok(())
    }

    pub fn delete(&self, location: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected =
            conn.execute("DELETE FROM warehouses WHERE location = ?1", params![location])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Warehouse".to_string(),
                id: location.to_string(),
            });
        }
        Ok(())
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Warehouse>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt =
            conn.prepare("SELECT location, description FROM warehouses ORDER BY location")?;
        let rows = stmt.query_map([], |row| {
            Ok(Warehouse {
                location: row.get(0)?,
                description: row.get(1)?,
            })
        })?;
        let mut warehouses = Vec::new();
        for row in rows {
            warehouses.push(row?);
        }
        Ok(warehouses)
    }
}

// ==========================================
// StockRepository
// ==========================================
/// Stock levels and the movement ledger
pub struct StockRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StockRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Set stock for (part_id, location)
    pub fn upsert(&self, record: &StockRecord) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        Self::upsert_with(&conn, record)
    }

    pub fn batch_upsert(&self, records: &[StockRecord]) -> RepositoryResult<usize> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        for record in records {
            Self::upsert_with(&tx, record)?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    fn upsert_with(conn: &Connection, record: &StockRecord) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO stock (part_id, location, quantity_available)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(part_id, location) DO UPDATE SET
                quantity_available = excluded.quantity_available
            "#,
            params![record.part_id, record.location, record.quantity_available],
        )?;
        Ok(())
    }

    pub fn delete(&self, part_id: &str, location: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected = conn.execute(
            "DELETE FROM stock WHERE part_id = ?1 AND location = ?2",
            params![part_id, location],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "StockRecord".to_string(),
                id: format!("{}@{}", part_id, location),
            });
        }
        Ok(())
    }

    pub fn find(&self, part_id: &str, location: &str) -> RepositoryResult<Option<StockRecord>> {
        let conn = lock_conn(&self.conn)?;
        let record = conn
            .query_row(
                r#"
                SELECT part_id, location, quantity_available
                FROM stock
                WHERE part_id = ?1 AND location = ?2
                "#,
                params![part_id, location],
                map_stock,
            )
            .optional()?;
        Ok(record)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<StockRecord>> {
        let conn = lock_conn(&self.conn)?;
        Self::query_all(&conn)
    }

    pub fn query_all(conn: &Connection) -> RepositoryResult<Vec<StockRecord>> {
        let mut stmt = conn.prepare(
            "SELECT part_id, location, quantity_available FROM stock ORDER BY part_id, location",
        )?;
        let rows = stmt.query_map([], map_stock)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Book a movement and apply it to the stock record atomically
    ///
    /// # Returns
    /// - Ok(StockRecord): stock after the booking
    /// - Err(BusinessRuleViolation): outbound quantity exceeds stock on hand,
    ///   quantity is not positive, or the result overflows
    pub fn record_movement(&self, movement: &StockMovement) -> RepositoryResult<StockRecord> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        let record = Self::apply_movement_with(&tx, movement)?;
        tx.commit()?;
        Ok(record)
    }

    /// Apply a movement inside the caller's transaction (stock row + ledger row)
    pub(crate) fn apply_movement_with(
        conn: &Connection,
        movement: &StockMovement,
    ) -> RepositoryResult<StockRecord> {
        if movement.quantity <= 0 {
            return Err(RepositoryError::BusinessRuleViolation(format!(
                "movement quantity must be positive, got {}",
                movement.quantity
            )));
        }

        let current: i64 = conn
            .query_row(
                "SELECT quantity_available FROM stock WHERE part_id = ?1 AND location = ?2",
                params![movement.part_id, movement.location],
                |row| row.get(0),
            )
            .optional()?
            .unwrap_or(0);

        let updated = current
            .checked_add(movement.signed_quantity())
            .ok_or_else(|| {
                RepositoryError::BusinessRuleViolation(format!(
                    "movement of {} on {} at {} overflows stock {}",
                    movement.quantity, movement.part_id, movement.location, current
                ))
            })?;
        if updated < 0 {
            return Err(RepositoryError::BusinessRuleViolation(format!(
                "outbound {} of {} at {} exceeds available {}",
                movement.quantity, movement.part_id, movement.location, current
            )));
        }

        let record = StockRecord {
            part_id: movement.part_id.clone(),
            location: movement.location.clone(),
            quantity_available: updated,
        };
        Self::upsert_with(conn, &record)?;

        conn.execute(
            r#"
            INSERT INTO stock_movements (
                movement_id, date, part_id, location, movement_type, quantity
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                movement.movement_id,
                movement.date,
                movement.part_id,
                movement.location,
                movement.movement_type.as_str(),
                movement.quantity,
            ],
        )?;

        tracing::debug!(
            part_id = %movement.part_id,
            location = %movement.location,
            before = current,
            after = updated,
            "stock movement booked"
        );
        Ok(record)
    }

    /// Write ledger rows without touching stock (history already reflected)
    pub fn import_movements(&self, movements: &[StockMovement]) -> RepositoryResult<usize> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO stock_movements (
                    movement_id, date, part_id, location, movement_type, quantity
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for m in movements {
                count += stmt.execute(params![
                    m.movement_id,
                    m.date,
                    m.part_id,
                    m.location,
                    m.movement_type.as_str(),
                    m.quantity,
                ])?;
            }
        }
        tx.commit()?;
        Ok(count)
    }

    /// Movement ledger for one part, oldest first
    pub fn list_movements(&self, part_id: &str) -> RepositoryResult<Vec<StockMovement>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(
            r#"
            SELECT movement_id, date, part_id, location, movement_type, quantity
            FROM stock_movements
            WHERE part_id = ?1
            ORDER BY date, movement_id
            "#,
        )?;
        let rows = stmt.query_map(params![part_id], map_movement)?;
        let mut movements = Vec::new();
        for row in rows {
            movements.push(row?);
        }
        Ok(movements)
    }
}

fn map_stock(row: &Row<'_>) -> rusqlite::Result<StockRecord> {
    Ok(StockRecord {
        part_id: row.get(0)?,
        location: row.get(1)?,
        quantity_available: row.get(2)?,
    })
}

fn map_movement(row: &Row<'_>) -> rusqlite::Result<StockMovement> {
    Ok(StockMovement {
        movement_id: row.get(0)?,
        date: row.get(1)?,
        part_id: row.get(2)?,
        location: row.get(3)?,
        movement_type: enum_column(row, 4, MovementType::parse)?,
        quantity: row.get(5)?,
    })
}
