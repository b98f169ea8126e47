// ==========================================
// Voltway Industrial OS - Write-side input checks
// ==========================================
// Applied before anything reaches a repository
// ==========================================

use crate::api::error::{ApiError, ApiResult};

/// Keys and required names must carry at least one visible character
pub fn require_key(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: i64) -> ApiResult<()> {
    if value <= 0 {
        return Err(ApiError::InvalidInput(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: i64) -> ApiResult<()> {
    if value < 0 {
        return Err(ApiError::InvalidInput(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    Ok(())
}

pub fn require_non_negative_f64(field: &str, value: f64) -> ApiResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Supplier reliability is a ratio in [0, 1]
pub fn require_ratio(field: &str, value: f64) -> ApiResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ApiError::InvalidInput(format!(
            "{} must be within [0, 1], got {}",
            field, value
        )));
    }
    Ok(())
}
