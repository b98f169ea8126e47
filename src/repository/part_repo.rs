// ==========================================
// Voltway Industrial OS - Part master repository
// ==========================================
// Table: materials
// Rule: data access only, no business logic
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::part::Part;
use crate::repository::columns::{json_list, lock_conn};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_PARTS: &str = r#"
    SELECT part_id, part_name, part_type, dimensions, weight,
           blocked_parts, successor_parts, comment
    FROM materials
"#;

/// Part master repository
pub struct PartRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PartRepository {
    /// Open a dedicated connection
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Insert or replace one part
    pub fn upsert(&self, part: &Part) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        Self::upsert_with(&conn, part)
    }

    /// Insert or replace many parts in one transaction
    ///
    /// # Returns
    /// - number of rows written
    pub fn batch_upsert(&self, parts: &[Part]) -> RepositoryResult<usize> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn.unchecked_transaction()?;
        for part in parts {
            Self::upsert_with(&tx, part)?;
        }
        tx.commit()?;
        Ok(parts.len())
    }

    fn upsert_with(conn: &Connection, part: &Part) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO materials (
                part_id, part_name, part_type, dimensions, weight,
                blocked_parts, successor_parts, comment
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(part_id) DO UPDATE SET
                part_name = excluded.part_name,
                part_type = excluded.part_type,
                dimensions = excluded.dimensions,
                weight = excluded.weight,
                blocked_parts = excluded.blocked_parts,
                successor_parts = excluded.successor_parts,
                comment = excluded.comment
            "#,
            params![
                part.part_id,
                part.part_name,
                part.part_type,
                part.dimensions,
                part.weight,
                serde_json::to_string(&part.blocked_parts)?,
                serde_json::to_string(&part.successor_parts)?,
                part.comment,
            ],
        )?;
        Ok(())
    }

    /// Delete by part_id
    ///
    /// # Returns
    /// - Err(NotFound) if no row matched
    pub fn delete(&self, part_id: &str) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        let affected = conn.execute("DELETE FROM materials WHERE part_id = ?1", params![part_id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Part".to_string(),
                id: part_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn find_by_id(&self, part_id: &str) -> RepositoryResult<Option<Part>> {
        let conn = lock_conn(&self.conn)?;
        let sql = format!("{} WHERE part_id = ?1", SELECT_PARTS);
        let part = conn
            .query_row(&sql, params![part_id], map_part)
            .optional()?;
        Ok(part)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Part>> {
        let conn = lock_conn(&self.conn)?;
        Self::query_all(&conn)
    }

    /// Read every part on a caller-held connection (snapshot loads)
    pub fn query_all(conn: &Connection) -> RepositoryResult<Vec<Part>> {
        let sql = format!("{} ORDER BY part_id", SELECT_PARTS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_part)?;
        let mut parts = Vec::new();
        for row in rows {
            parts.push(row?);
        }
        Ok(parts)
    }
}

fn map_part(row: &Row<'_>) -> rusqlite::Result<Part> {
    Ok(Part {
        part_id: row.get(0)?,
        part_name: row.get(1)?,
        part_type: row.get(2)?,
        dimensions: row.get(3)?,
        weight: row.get(4)?,
        blocked_parts: json_list(row, 5)?,
        successor_parts: json_list(row, 6)?,
        comment: row.get(7)?,
    })
}
