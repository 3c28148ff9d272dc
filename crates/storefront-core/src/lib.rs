//! # storefront-core: Pure Cart Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It owns the cart ledger and
//! every piece of cart arithmetic as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host UI (apps/storefront)                    │   │
//! │  │    Product List ──► Cart ──► Checkout ──► Confirmation          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ increment / decrement / summarize      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  ledger   │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │CartLedger │  │  Catalog  │  │   │
//! │  │   │ LineItem  │  │ half-even │  │ outcomes  │  │validation │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • NO LOGGING • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, CartSummary)
//! - [`money`] - Money type with integer arithmetic
//! - [`ledger`] - The cart ledger and its mutation outcomes
//! - [`catalog`] - Validated, ordered product catalog
//! - [`validation`] - Catalog validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `summarize` is a function of `(ledger, catalog)` only
//! 2. **No I/O**: Files, network and logging live in the host app
//! 3. **Integer Money**: All amounts are cents (i64); decimals are rounded once
//! 4. **Total Operations**: Cart mutations never fail; a full shelf is an outcome
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Catalog, CartLedger, IncrementOutcome, ProductId};
//!
//! let catalog = Catalog::demo();
//! let mut cart = CartLedger::new();
//!
//! let dog = ProductId::new(3);
//! assert_eq!(cart.increment(dog), IncrementOutcome::Added { quantity: 1 });
//! cart.increment(dog);
//!
//! let summary = cart.summarize(&catalog);
//! assert_eq!(summary.grand_total.to_string(), "$19.98");
//!
//! cart.clear();
//! assert!(cart.summarize(&catalog).is_empty);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{CartLedger, DecrementOutcome, IncrementOutcome, ToggleOutcome};
pub use money::Money;
pub use types::*;
