// ==========================================
// Voltway Industrial OS - Product & BOM repositories
// ==========================================
// Tables: products, bom
// Note: BOM quantities are stored as-is; validation happens at the
//       snapshot boundary and in the API layer
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::product::{BomLine, Product};
use crate::repository::columns::lock_conn;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ProductRepository
// ==========================================
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, product: &Product) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        Self::upsert_with(&conn, product)
    }

    pub fn batch_upsert(&self, products: &[Product]) -> RepositoryResult<usize> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        for product in products {
            Self::upsert_with(&tx, product)?;
        }
        tx.commit()?;
        Ok(products.len())
    }

    fn upsert_with(conn: &Connection, product: &Product) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO products (product_id, model, version, product_name)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(product_id) DO UPDATE SET
                model = excluded.model,
                version = excluded.version,
                product_name = excluded.product_name
            "#,
            params![
                product.product_id,
                product.model,
                product.version,
                product.product_name
            ],
        )?;
        Ok(())
    }

    /// Delete a product; its BOM lines cascade
    pub fn delete(&self, product_id: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected =
            conn.execute("DELETE FROM products WHERE product_id = ?1", params![product_id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product".to_string(),
                id: product_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn find_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>> {
        let conn = lock_conn(&self.conn)?;
        let product = conn
            .query_row(
                "SELECT product_id, model, version, product_name FROM products WHERE product_id = ?1",
                params![product_id],
                map_product,
            )
            .optional()?;
        Ok(product)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        let conn = lock_conn(&self.conn)?;
        Self::query_all(&conn)
    }

    pub fn query_all(conn: &Connection) -> RepositoryResult<Vec<Product>> {
        let mut stmt = conn.prepare(
            "SELECT product_id, model, version, product_name FROM products ORDER BY product_id",
        )?;
        let rows = stmt.query_map([], map_product)?;
        let mut products = Vec::new();
        for row in rows {
            products.push(row?);
        }
        Ok(products)
    }
}

fn map_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        product_id: row.get(0)?,
        model: row.get(1)?,
        version: row.get(2)?,
        product_name: row.get(3)?,
    })
}

// ==========================================
// BomRepository
// ==========================================
pub struct BomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BomRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, line: &BomLine) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        Self::upsert_with(&conn, line)
    }

    pub fn batch_upsert(&self, lines: &[BomLine]) -> RepositoryResult<usize> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        for line in lines {
            Self::upsert_with(&tx, line)?;
        }
        tx.commit()?;
        Ok(lines.len())
    }

    fn upsert_with(conn: &Connection, line: &BomLine) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO bom (product_id, part_id, quantity, notes)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(product_id, part_id) DO UPDATE SET
                quantity = excluded.quantity,
                notes = excluded.notes
            "#,
            params![line.product_id, line.part_id, line.quantity, line.notes],
        )?;
        Ok(())
    }

    /// Delete by composite key (product_id, part_id)
    pub fn delete(&self, product_id: &str, part_id: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected = conn.execute(
            "DELETE FROM bom WHERE product_id = ?1 AND part_id = ?2",
            params![product_id, part_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "BomLine".to_string(),
                id: format!("{}/{}", product_id, part_id),
            });
        }
        Ok(())
    }

    pub fn list_by_product(&self, product_id: &str) -> RepositoryResult<Vec<BomLine>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(
            r#"
            SELECT product_id, part_id, quantity, notes
            FROM bom
            WHERE product_id = ?1
            ORDER BY part_id
            "#,
        )?;
        let rows = stmt.query_map(params![product_id], map_bom_line)?;
        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<BomLine>> {
        let conn = lock_conn(&self.conn)?;
        Self::query_all(&conn)
    }

    pub fn query_all(conn: &Connection) -> RepositoryResult<Vec<BomLine>> {
        let mut stmt = conn.prepare(
            "SELECT product_id, part_id, quantity, notes FROM bom ORDER BY product_id, part_id",
        )?;
        let rows = stmt.query_map([], map_bom_line)?;
        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }
}

fn map_bom_line(row: &Row<'_>) -> rusqlite::Result<BomLine> {
    Ok(BomLine {
        product_id: row.get(0)?,
        part_id: row.get(1)?,
        quantity: row.get(2)?,
        notes: row.get(3)?,
    })
}
