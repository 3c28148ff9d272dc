//! # Domain Types
//!
//! Core domain types shared by the ledger, the catalog and the host.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐         ┌─────────────────┐                       │
//! │  │    Product      │         │   CartSummary   │   derived, never      │
//! │  │  ─────────────  │         │  ─────────────  │   stored              │
//! │  │  id             │         │  items[]  ──────┼──► LineItem           │
//! │  │  name           │         │  grand_total    │    product_id         │
//! │  │  unit_price     │         │  item_count     │    unit_price × qty   │
//! │  │  available_stock│         │  total_quantity │    = line_total       │
//! │  └─────────────────┘         └─────────────────┘                       │
//! │   read-only input             recomputed on every render               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Identifier of a catalog product.
///
/// Catalog validation rejects zero, so every id found in a validated
/// catalog is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Supplied by an external catalog; the cart core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique positive identifier.
    pub id: ProductId,

    /// Display label, non-empty.
    pub name: String,

    /// Unit price in cents.
    pub unit_price: Money,

    /// Ceiling on the quantity a cart may hold. `None` means unbounded.
    pub available_stock: Option<u32>,
}

impl Product {
    /// Creates a product without a stock ceiling.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, unit_price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            unit_price,
            available_stock: None,
        }
    }

    /// Sets the stock ceiling.
    pub fn with_stock(mut self, available_stock: u32) -> Self {
        self.available_stock = Some(available_stock);
        self
    }

    /// Checks if `quantity` units can be held given the stock ceiling.
    pub fn can_hold(&self, quantity: u32) -> bool {
        self.available_stock.map_or(true, |stock| quantity <= stock)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced, quantified row derived from the ledger and catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price × quantity
    pub line_total: Money,
}

impl LineItem {
    /// Prices `quantity` units of `product`.
    pub fn priced(product: &Product, quantity: u32) -> Self {
        LineItem {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity,
            line_total: product.unit_price.multiply_quantity(quantity),
        }
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Display-ready view of a cart against a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Line items in catalog order.
    pub items: Vec<LineItem>,
    /// Sum of every line total.
    pub grand_total: Money,
    /// Number of distinct lines.
    pub item_count: usize,
    /// Sum of all quantities (the cart badge).
    pub total_quantity: u64,
    pub is_empty: bool,
}

impl CartSummary {
    /// Builds a summary, deriving every aggregate from `items`.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let grand_total = items.iter().map(|item| item.line_total).sum();
        let total_quantity = items.iter().map(|item| u64::from(item.quantity)).sum();

        CartSummary {
            item_count: items.len(),
            is_empty: items.is_empty(),
            grand_total,
            total_quantity,
            items,
        }
    }

    /// The summary of an empty cart.
    pub fn empty() -> Self {
        CartSummary::from_items(Vec::new())
    }

    /// Returns the line for `product_id`, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

impl Default for CartSummary {
    fn default() -> Self {
        CartSummary::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
