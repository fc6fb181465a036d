// src/handlers/mod.rs

use crate::error::AppError;

pub mod admin;
pub mod health;
pub mod quiz;

/// Fallback for unknown routes, so every error body has the same shape.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
