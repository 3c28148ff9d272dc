//! # Product List Commands
//!
//! Renders the product list: every catalog product with its price, how many
//! the cart holds, and which action its button performs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Products                                              Cart (3)        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Dog                         Php 9.99              [Remove from Cart]  │
//! │  Defenestrate                Php 20.75             [Add to Cart]       │
//! │  ...                                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{Money, ProductId};
use tracing::debug;

use crate::state::{AppConfig, CartState, CatalogState};

/// What the product row's button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductAction {
    /// "Add to Cart"
    Add,
    /// "Remove from Cart"
    Remove,
    /// Nothing left to add; the button is disabled.
    SoldOut,
}

/// One row of the product list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub formatted_price: String,
    pub available_stock: Option<u32>,
    /// Quantity currently held by the cart
    pub in_cart: u32,
    pub action: ProductAction,
}

/// Product list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub store_name: String,
    pub products: Vec<ProductRow>,
    /// Total units in the cart, for the cart button badge
    pub total_quantity: u64,
}

/// Lists every catalog product in catalog order.
pub fn list_products(
    cart: &CartState,
    catalog: &CatalogState,
    config: &AppConfig,
) -> ProductListResponse {
    debug!("list_products command");

    cart.with_session(|session| {
        let products = catalog
            .catalog()
            .iter()
            .map(|product| {
                let in_cart = session.ledger.quantity_of(product.id);
                let action = if in_cart > 0 {
                    ProductAction::Remove
                } else if !product.can_hold(1) {
                    ProductAction::SoldOut
                } else {
                    ProductAction::Add
                };

                ProductRow {
                    product_id: product.id,
                    name: product.name.clone(),
                    price: product.unit_price,
                    formatted_price: config.format_currency(product.unit_price),
                    available_stock: product.available_stock,
                    in_cart,
                    action,
                }
            })
            .collect();

        ProductListResponse {
            store_name: config.store_name.clone(),
            products,
            total_quantity: session.ledger.summarize(catalog.catalog()).total_quantity,
        }
    })
}
