use crate::db::open_sqlite_connection;
use crate::domain::customer::Customer;
use crate::domain::types::CustomerType;
use crate::repository::columns::{enum_column, lock_conn};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// Customer master repository (table: customers)
pub struct CustomerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CustomerRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, customer: &Customer) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            INSERT INTO customers (customer_id, name, customer_type) VALUES (?1, ?2, ?3)
            ON CONFLICT(customer_id) DO UPDATE SET
                name = excluded.name,
                customer_type = excluded.customer_type
            "#,
            params![
                customer.customer_id,
                customer.name,
                customer.customer_type.as_str()
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, customer_id: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected =
            conn.execute("DELETE FROM customers WHERE customer_id = ?1", params![customer_id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Customer".to_string(),
                id: customer_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Customer>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT customer_id, name, customer_type FROM customers ORDER BY customer_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Customer {
                customer_id: row.get(0)?,
                name: row.get(1)?,
                customer_type: enum_column(row, 2, CustomerType::parse)?,
            })
        })?;
        let mut customers = Vec::new();
        for row in rows {
            customers.push(row?);
        }
        Ok(customers)
    }
}
