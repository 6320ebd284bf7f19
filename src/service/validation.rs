//! Payload validation rules shared by the services.

use crate::error::AppError;

const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

pub struct RequestValidator;

impl RequestValidator {
    /// Names and titles must be present once trimmed.
    pub fn name(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }
        Ok(())
    }

    pub fn rating(value: i32) -> Result<(), AppError> {
        if !RATING_RANGE.contains(&value) {
            return Err(AppError::Validation(format!(
                "rating must be between {} and {}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            )));
        }
        Ok(())
    }

    /// Route id and body id must agree on a full replace.
    pub fn same_id(route_id: i32, body_id: i32) -> Result<(), AppError> {
        if route_id != body_id {
            return Err(AppError::BadRequest(format!(
                "id in body ({}) does not match id in path ({})",
                body_id, route_id
            )));
        }
        Ok(())
    }
}

/// Names collide when equal after trimming and case folding.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}
