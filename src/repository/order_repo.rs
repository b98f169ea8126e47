// ==========================================
// Voltway Industrial OS - Order repositories
// ==========================================
// Tables: material_orders (purchase), sales_orders
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::order::{PurchaseOrder, SalesOrder};
use crate::domain::stock::{StockMovement, StockRecord};
use crate::domain::types::{MovementType, PurchaseOrderStatus};
use crate::repository::columns::{enum_column, lock_conn};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::stock_repo::StockRepository;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_PURCHASE_ORDERS: &str = r#"
    SELECT order_id, part_id, supplier_id, quantity_ordered, order_date,
           expected_delivery_date, status, actual_delivered_at
    FROM material_orders
"#;

const SELECT_SALES_ORDERS: &str = r#"
    SELECT sales_order_id, product_id, customer_id, quantity, order_type,
           requested_date, created_at, accepted_request_date, status
    FROM sales_orders
"#;

// ==========================================
// PurchaseOrderRepository
// ==========================================
pub struct PurchaseOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PurchaseOrderRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, order: &PurchaseOrder) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            INSERT INTO material_orders (
                order_id, part_id, supplier_id, quantity_ordered, order_date,
                expected_delivery_date, status, actual_delivered_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(order_id) DO UPDATE SET
                part_id = excluded.part_id,
                supplier_id = excluded.supplier_id,
                quantity_ordered = excluded.quantity_ordered,
                order_date = excluded.order_date,
                expected_delivery_date = excluded.expected_delivery_date,
                status = excluded.status,
                actual_delivered_at = excluded.actual_delivered_at
            "#,
            params![
                order.order_id,
                order.part_id,
                order.supplier_id,
                order.quantity_ordered,
                order.order_date,
                order.expected_delivery_date,
                order.status.as_str(),
                order.actual_delivered_at,
            ],
        )?;
        Ok(())
    }

    /// Mark an ordered PO as delivered
    ///
    /// # Returns
    /// - Err(NotFound): unknown order_id
    /// - Err(BusinessRuleViolation): already delivered
    pub fn mark_delivered(&self, order_id: &str, delivered_at: NaiveDate) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        Self::pending_order_with(&tx, order_id)?;
        Self::mark_delivered_with(&tx, order_id, delivered_at)?;
        tx.commit()?;
        Ok(())
    }

    /// Receive a pending PO: inbound movement, stock update and status change
    /// commit together or not at all
    ///
    /// # Arguments
    /// - `order_id`: purchase order to receive
    /// - `location`: warehouse booking the inbound quantity
    /// - `delivered_at`: movement date and `actual_delivered_at`
    ///
    /// # Returns
    /// - Ok((PurchaseOrder, StockRecord)): order as it was before receipt, stock after
    /// - Err(NotFound): unknown order_id
    /// - Err(BusinessRuleViolation): already delivered or the booking is rejected
    pub fn receive(
        &self,
        order_id: &str,
        location: &str,
        delivered_at: NaiveDate,
    ) -> RepositoryResult<(PurchaseOrder, StockRecord)> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;

        let order = Self::pending_order_with(&tx, order_id)?;
        let movement = StockMovement::new(
            delivered_at,
            &order.part_id,
            location,
            MovementType::Inbound,
            order.quantity_ordered,
        );
        let record = StockRepository::apply_movement_with(&tx, &movement)?;
        Self::mark_delivered_with(&tx, order_id, delivered_at)?;

        tx.commit()?;
        Ok((order, record))
    }

    fn pending_order_with(conn: &Connection, order_id: &str) -> RepositoryResult<PurchaseOrder> {
        let sql = format!("{} WHERE order_id = ?1", SELECT_PURCHASE_ORDERS);
        let order = conn
            .query_row(&sql, params![order_id], map_purchase_order)
            .optional()?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "PurchaseOrder".to_string(),
                id: order_id.to_string(),
            })?;
        if !order.is_pending() {
            return Err(already_delivered(order_id));
        }
        Ok(order)
    }

    // status guard: a concurrent receipt that already flipped the row updates nothing
    fn mark_delivered_with(
        conn: &Connection,
        order_id: &str,
        delivered_at: NaiveDate,
    ) -> RepositoryResult<()> {
        let affected = conn.execute(
            r#"
            UPDATE material_orders
            SET status = ?2, actual_delivered_at = ?3
            WHERE order_id = ?1 AND status = ?4
            "#,
            params![
                order_id,
                PurchaseOrderStatus::Delivered.as_str(),
                delivered_at,
                PurchaseOrderStatus::Ordered.as_str(),
            ],
        )?;
        if affected == 0 {
            return Err(already_delivered(order_id));
        }
        Ok(())
    }

    pub fn delete(&self, order_id: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected =
            conn.execute("DELETE FROM material_orders WHERE order_id = ?1", params![order_id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "PurchaseOrder".to_string(),
                id: order_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<PurchaseOrder>> {
        let conn = lock_conn(&self.conn)?;
        let sql = format!("{} WHERE order_id = ?1", SELECT_PURCHASE_ORDERS);
        let order = conn
            .query_row(&sql, params![order_id], map_purchase_order)
            .optional()?;
        Ok(order)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<PurchaseOrder>> {
        let conn = lock_conn(&self.conn)?;
        Self::query_all(&conn)
    }

    pub fn query_all(conn: &Connection) -> RepositoryResult<Vec<PurchaseOrder>> {
        let sql = format!("{} ORDER BY order_date, order_id", SELECT_PURCHASE_ORDERS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_purchase_order)?;
        let mut orders = Vec::new();
        for row in rows {
            orders.push(row?);
        }
        Ok(orders)
    }
}

fn already_delivered(order_id: &str) -> RepositoryError {
    RepositoryError::BusinessRuleViolation(format!(
        "purchase order {} is already delivered",
        order_id
    ))
}

fn map_purchase_order(row: &Row<'_>) -> rusqlite::Result<PurchaseOrder> {
    Ok(PurchaseOrder {
        order_id: row.get(0)?,
        part_id: row.get(1)?,
        supplier_id: row.get(2)?,
        quantity_ordered: row.get(3)?,
        order_date: row.get(4)?,
        expected_delivery_date: row.get(5)?,
        status: enum_column(row, 6, PurchaseOrderStatus::parse)?,
        actual_delivered_at: row.get(7)?,
    })
}

// ==========================================
// SalesOrderRepository
// ==========================================
pub struct SalesOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SalesOrderRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, order: &SalesOrder) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            INSERT INTO sales_orders (
                sales_order_id, product_id, customer_id, quantity, order_type,
                requested_date, created_at, accepted_request_date, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(sales_order_id) DO UPDATE SET
                product_id = excluded.product_id,
                customer_id = excluded.customer_id,
                quantity = excluded.quantity,
                order_type = excluded.order_type,
                requested_date = excluded.requested_date,
                created_at = excluded.created_at,
                accepted_request_date = excluded.accepted_request_date,
                status = excluded.status
            "#,
            params![
                order.sales_order_id,
                order.product_id,
                order.customer_id,
                order.quantity,
                order.order_type,
                order.requested_date,
                order.created_at,
                order.accepted_request_date,
                order.status,
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, sales_order_id: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected = conn.execute(
            "DELETE FROM sales_orders WHERE sales_order_id = ?1",
            params![sales_order_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "SalesOrder".to_string(),
                id: sales_order_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<SalesOrder>> {
        let conn = lock_conn(&self.conn)?;
        Self::query_all(&conn)
    }

    pub fn query_all(conn: &Connection) -> RepositoryResult<Vec<SalesOrder>> {
        let sql = format!("{} ORDER BY requested_date, sales_order_id", SELECT_SALES_ORDERS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(SalesOrder {
                sales_order_id: row.get(0)?,
                product_id: row.get(1)?,
                customer_id: row.get(2)?,
                quantity: row.get(3)?,
                order_type: row.get(4)?,
                requested_date: row.get(5)?,
                created_at: row.get(6)?,
                accepted_request_date: row.get(7)?,
                status: row.get(8)?,
            })
        })?;
        let mut orders = Vec::new();
        for row in rows {
            orders.push(row?);
        }
        Ok(orders)
    }
}
