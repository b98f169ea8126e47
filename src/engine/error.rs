// ==========================================
// Voltway Industrial OS - Engine errors
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("malformed BOM line {product_id}/{part_id}: quantity {quantity} must be positive")]
    MalformedBomLine {
        product_id: String,
        part_id: String,
        quantity: i64,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
