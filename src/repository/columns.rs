// ==========================================
// Voltway Industrial OS - Column conversion helpers
// ==========================================
// Row closures must return rusqlite::Error, so parse failures are
// wrapped as FromSqlConversionFailure with the column index
// ==========================================

use rusqlite::types::Type;
use rusqlite::Row;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::repository::error::{RepositoryError, RepositoryResult};

#[derive(Debug)]
struct UnknownVariant(String);

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown enum value '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// TEXT column holding a JSON string array
pub(crate) fn json_list(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(&s)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
    }
}

/// TEXT column holding an arbitrary JSON document
pub(crate) fn json_value(row: &Row<'_>, idx: usize) -> rusqlite::Result<serde_json::Value> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// TEXT column holding a lowercase enum tag
pub(crate) fn enum_column<T>(
    row: &Row<'_>,
    idx: usize,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(UnknownVariant(raw)))
    })
}

/// Lock the shared connection
pub(crate) fn lock_conn(
    conn: &Arc<Mutex<rusqlite::Connection>>,
) -> RepositoryResult<MutexGuard<'_, rusqlite::Connection>> {
    conn.lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))
}
