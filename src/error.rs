//! Custom error types for SleekFinance
//!
//! The computation core never fails on domain data; these errors only come
//! from the edges: loading settings and snapshots, resolving budgets by name,
//! and validating store-side mutations.

use thiserror::Error;

/// The main error type for SleekFinance operations
#[derive(Error, Debug)]
pub enum SleekError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for store-side mutations
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SleekError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for budget lines
    pub fn duplicate_line(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Budget line",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for sub-lines
    pub fn duplicate_sub_line(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Sub-line",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for SleekError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SleekError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for SleekFinance operations
pub type SleekResult<T> = Result<T, SleekError>;
