//! # Validation Module
//!
//! Input validation for catalog data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog file (TOML)                                          │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog::new                                                 │
//! │  └── THIS MODULE: id / name / price / uniqueness rules                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartLedger                                                   │
//! │  └── Presence invariant and stock ceilings (never errors)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_name, validate_price_cents};
//!
//! validate_product_name("Dog").unwrap();
//! assert!(validate_price_cents(-1).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{Product, ProductId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Highest accepted unit price, in cents ($21,474,836.48).
///
/// Any accepted price times any `u32` quantity fits in an `i64`, so a line
/// total can never overflow.
pub const MAX_PRICE_CENTS: i64 = i64::MAX / u32::MAX as i64;

/// Validates a product id (must be positive).
pub fn validate_product_id(id: ProductId) -> ValidationResult<()> {
    if id.get() == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product id".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Pneumonoultramicroscopicsilicovolcanoconiosis").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates every field of a single product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(product.id)?;
    validate_product_name(&product.name)?;
    validate_price_cents(product.unit_price.cents())?;
    Ok(())
}

/// Rejects the first id that appears twice.
pub fn validate_unique_ids(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        if !seen.insert(product.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
