//! Error handling for the Fertilizer Manager
//!
//! Ledger operations never fail: storage problems are absorbed and logged
//! by the persistence layer. These errors cover opening a store, loading
//! configuration, and the boundary checks a view runs before calling in.

use rust_decimal::Decimal;
use thiserror::Error;
use validator::ValidationErrors;

use crate::storage::StorageError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Insufficient stock: only {available} {unit} of {product} available")]
    InsufficientStock {
        product: String,
        available: Decimal,
        unit: String,
    },

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl AppError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Field the error refers to, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let (field, message) = shared::first_violation(&errors)
            .unwrap_or_else(|| (String::new(), "Invalid input".to_string()));
        AppError::Validation { field, message }
    }
}

/// Result type alias for fallible operations
pub type AppResult<T> = Result<T, AppError>;
