// ==========================================
// Voltway Industrial OS - Dispatch parameter repository
// ==========================================
// Table: dispatch_parameters
// config_data is stored as JSON text; typing happens in the snapshot
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::reorder::{DispatchParameter, ReorderConfig};
use crate::repository::columns::{json_value, lock_conn};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

pub struct DispatchParameterRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DispatchParameterRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, param: &DispatchParameter) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        Self::upsert_with(&conn, param)
    }

    /// Write a typed reorder config in the canonical blob layout
    pub fn upsert_reorder_config(
        &self,
        config: &ReorderConfig,
        updated_at: NaiveDate,
    ) -> RepositoryResult<()> {
        self.upsert(&DispatchParameter {
            part_id: config.part_id.clone(),
            config_data: config.to_config_data(),
            updated_at,
        })
    }

    pub fn batch_upsert(&self, params_list: &[DispatchParameter]) -> RepositoryResult<usize> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        for param in params_list {
            Self::upsert_with(&tx, param)?;
        }
        tx.commit()?;
        Ok(params_list.len())
    }

    fn upsert_with(conn: &Connection, param: &DispatchParameter) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO dispatch_parameters (part_id, config_data, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(part_id) DO UPDATE SET
                config_data = excluded.config_data,
                updated_at = excluded.updated_at
            "#,
            params![
                param.part_id,
                serde_json::to_string(&param.config_data)?,
                param.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, part_id: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected = conn.execute(
            "DELETE FROM dispatch_parameters WHERE part_id = ?1",
            params![part_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "DispatchParameter".to_string(),
                id: part_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn find_by_part(&self, part_id: &str) -> RepositoryResult<Option<DispatchParameter>> {
        let conn = lock_conn(&self.conn)?;
        let param = conn
            .query_row(
                "SELECT part_id, config_data, updated_at FROM dispatch_parameters WHERE part_id = ?1",
                params![part_id],
                map_param,
            )
            .optional()?;
        Ok(param)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<DispatchParameter>> {
        let conn = lock_conn(&self.conn)?;
        Self::query_all(&conn)
    }

    pub fn query_all(conn: &Connection) -> RepositoryResult<Vec<DispatchParameter>> {
        let mut stmt = conn.prepare(
            "SELECT part_id, config_data, updated_at FROM dispatch_parameters ORDER BY part_id",
        )?;
        let rows = stmt.query_map([], map_param)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn map_param(row: &Row<'_>) -> rusqlite::Result<DispatchParameter> {
    Ok(DispatchParameter {
        part_id: row.get(0)?,
        config_data: json_value(row, 1)?,
        updated_at: row.get(2)?,
    })
}
