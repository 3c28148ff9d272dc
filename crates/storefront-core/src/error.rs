//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog and price errors                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  App errors (apps/storefront)                                          │
//! │  ├── ConfigError      - Config / catalog file loading                  │
//! │  └── ApiError         - What the shell prints (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Shell                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart ledger operations never fail. Hitting a stock ceiling is reported
//! as an [`IncrementOutcome`](crate::ledger::IncrementOutcome), not an error.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not part of the catalog.
    ///
    /// The ledger itself tolerates unknown ids; this is raised by hosts
    /// that validate ids against a catalog before mutating a cart.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A price could not be turned into an amount of cents.
    #[error("Invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two catalog entries sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
