// ==========================================
// Voltway Industrial OS - Supplier offer repository
// ==========================================
// Table: suppliers, key (supplier_id, part_id)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::supplier::SupplierOffer;
use crate::repository::columns::lock_conn;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

const SELECT_OFFERS: &str = r#"
    SELECT supplier_id, part_id, price_per_unit, lead_time_days,
           min_order_qty, reliability_rating
    FROM suppliers
"#;

pub struct SupplierRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SupplierRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, offer: &SupplierOffer) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        Self::upsert_with(&conn, offer)
    }

    pub fn batch_upsert(&self, offers: &[SupplierOffer]) -> RepositoryResult<usize> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        for offer in offers {
            Self::upsert_with(&tx, offer)?;
        }
        tx.commit()?;
        Ok(offers.len())
    }

    fn upsert_with(conn: &Connection, offer: &SupplierOffer) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO suppliers (
                supplier_id, part_id, price_per_unit, lead_time_days,
                min_order_qty, reliability_rating
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(supplier_id, part_id) DO UPDATE SET
                price_per_unit = excluded.price_per_unit,
                lead_time_days = excluded.lead_time_days,
                min_order_qty = excluded.min_order_qty,
                reliability_rating = excluded.reliability_rating
            "#,
            params![
                offer.supplier_id,
                offer.part_id,
                offer.price_per_unit,
                offer.lead_time_days,
                offer.min_order_qty,
                offer.reliability_rating,
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, supplier_id: &str, part_id: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected = conn.execute(
            "DELETE FROM suppliers WHERE supplier_id = ?1 AND part_id = ?2",
            params![supplier_id, part_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "SupplierOffer".to_string(),
                id: format!("{}/{}", supplier_id, part_id),
            });
        }
        Ok(())
    }

    pub fn list_by_part(&self, part_id: &str) -> RepositoryResult<Vec<SupplierOffer>> {
        let conn = lock_conn(&self.conn)?;
        let sql = format!("{} WHERE part_id = ?1 ORDER BY supplier_id", SELECT_OFFERS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![part_id], map_offer)?;
        let mut offers = Vec::new();
        for row in rows {
            offers.push(row?);
        }
        Ok(offers)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<SupplierOffer>> {
        let conn = lock_conn(&self.conn)?;
        Self::query_all(&conn)
    }

    pub fn query_all(conn: &Connection) -> RepositoryResult<Vec<SupplierOffer>> {
        let sql = format!("{} ORDER BY supplier_id, part_id", SELECT_OFFERS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_offer)?;
        let mut offers = Vec::new();
        for row in rows {
            offers.push(row?);
        }
        Ok(offers)
    }
}

fn map_offer(row: &Row<'_>) -> rusqlite::Result<SupplierOffer> {
    Ok(SupplierOffer {
        supplier_id: row.get(0)?,
        part_id: row.get(1)?,
        price_per_unit: row.get(2)?,
        lead_time_days: row.get(3)?,
        min_order_qty: row.get(4)?,
        reliability_rating: row.get(5)?,
    })
}
