//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│Confirmed │       │
//! │  │  Cart    │     │          │     │ Preview  │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └────┬─────┘       │
//! │       ▲                │                                  │             │
//! │       │           add_to_cart                             │             │
//! │       │           decrement_cart_item                     │             │
//! │       │           remove_from_cart                        │             │
//! │       │           toggle_cart_item                        │             │
//! │       │                │                                  │             │
//! │       └──── clear_cart ┘◄──────── new session ────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response carries a freshly derived summary; nothing is cached
//! between commands.

use serde::Serialize;
use storefront_core::{CartSummary, DecrementOutcome, IncrementOutcome, ProductId, ToggleOutcome};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{AppConfig, CartState, CatalogState, Session};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub session_id: Uuid,

    #[serde(flatten)]
    pub summary: CartSummary,

    pub formatted_total: String,

    /// Set when the last increment hit the product's stock ceiling.
    /// The UI disables the "+" control rather than showing an error.
    pub at_capacity: bool,
}

impl CartResponse {
    fn render(session: &Session, catalog: &CatalogState, config: &AppConfig) -> Self {
        let summary = session.ledger.summarize(catalog.catalog());
        CartResponse {
            session_id: session.id,
            formatted_total: config.format_currency(summary.grand_total),
            summary,
            at_capacity: false,
        }
    }

    fn with_capacity_flag(mut self, outcome: IncrementOutcome) -> Self {
        self.at_capacity = outcome.is_at_capacity();
        self
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState, catalog: &CatalogState, config: &AppConfig) -> CartResponse {
    debug!("get_cart command");
    cart.with_session(|session| CartResponse::render(session, catalog, config))
}

/// Adds one unit of a product, respecting its stock ceiling.
///
/// ## Behavior
/// - Unknown product: `NOT_FOUND`, cart unchanged
/// - Below ceiling: quantity + 1
/// - At ceiling: cart unchanged, `atCapacity = true`
pub fn add_to_cart(
    cart: &CartState,
    catalog: &CatalogState,
    config: &AppConfig,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog.catalog().require(product_id)?;

    Ok(cart.with_session_mut(|session| {
        let outcome = session.ledger.increment_product(product);
        if let IncrementOutcome::AtCapacity { quantity, ceiling } = outcome {
            warn!(product_id = %product_id, quantity, ceiling, "Product at capacity");
        }
        CartResponse::render(session, catalog, config).with_capacity_flag(outcome)
    }))
}

/// Removes one unit of a product.
///
/// Ids are not checked against the catalog so that a product dropped from
/// the catalog can still be taken out of the cart. Absent ids are a no-op.
pub fn decrement_cart_item(
    cart: &CartState,
    catalog: &CatalogState,
    config: &AppConfig,
    product_id: ProductId,
) -> CartResponse {
    debug!(product_id = %product_id, "decrement_cart_item command");

    cart.with_session_mut(|session| {
        if session.ledger.decrement(product_id) == DecrementOutcome::Absent {
            debug!(product_id = %product_id, "Decrement of product not in cart");
        }
        CartResponse::render(session, catalog, config)
    })
}

/// Removes a product from the cart entirely.
///
/// ## Returns
/// Updated cart, or `CART_ERROR` if the product was not in the cart
pub fn remove_from_cart(
    cart: &CartState,
    catalog: &CatalogState,
    config: &AppConfig,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.with_session_mut(|session| match session.ledger.remove(product_id) {
        Some(_) => Ok(CartResponse::render(session, catalog, config)),
        None => Err(ApiError::cart(format!("Product {} not in cart", product_id))),
    })
}

/// The product list button: removes a held product, otherwise adds one.
pub fn toggle_cart_item(
    cart: &CartState,
    catalog: &CatalogState,
    config: &AppConfig,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "toggle_cart_item command");

    let product = catalog.catalog().require(product_id)?;

    Ok(cart.with_session_mut(|session| {
        match session.ledger.toggle(product.id, product.available_stock) {
            ToggleOutcome::Removed { quantity } => {
                debug!(product_id = %product_id, quantity, "Product removed from cart");
                CartResponse::render(session, catalog, config)
            }
            ToggleOutcome::Incremented { outcome } => {
                CartResponse::render(session, catalog, config).with_capacity_flag(outcome)
            }
        }
    }))
}

/// Clears all items from the cart. The session continues.
pub fn clear_cart(cart: &CartState, catalog: &CatalogState, config: &AppConfig) -> CartResponse {
    debug!("clear_cart command");

    cart.with_session_mut(|session| {
        session.ledger.clear();
        CartResponse::render(session, catalog, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{Catalog, Money, Product};

    fn stocked_catalog() -> CatalogState {
        CatalogState::new(
            Catalog::new(vec![
                Product::new(1, "Widget", Money::from_cents(1000)).with_stock(3),
                Product::new(2, "Gadget", Money::from_cents(1500)),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_add_to_cart_totals() {
        let cart = CartState::new();
        let catalog = stocked_catalog();
        let config = AppConfig::default();

        add_to_cart(&cart, &catalog, &config, ProductId::new(1)).unwrap();
        add_to_cart(&cart, &catalog, &config, ProductId::new(1)).unwrap();
        let response = add_to_cart(&cart, &catalog, &config, ProductId::new(2)).unwrap();

        assert_eq!(response.summary.grand_total, Money::from_cents(3500));
        assert_eq!(response.formatted_total, "Php 35.00");
        assert_eq!(response.summary.total_quantity, 3);
        assert!(!response.at_capacity);
    }

    #[test]
    fn test_add_to_cart_at_capacity() {
        let cart = CartState::new();
        let catalog = stocked_catalog();
        let config = AppConfig::default();

        for _ in 0..3 {
            add_to_cart(&cart, &catalog, &config, ProductId::new(1)).unwrap();
        }
        let response = add_to_cart(&cart, &catalog, &config, ProductId::new(1)).unwrap();

        assert!(response.at_capacity);
        assert_eq!(response.summary.items[0].quantity, 3);
    }

    #[test]
    fn test_add_unknown_product_is_not_found() {
        let cart = CartState::new();
        let err = add_to_cart(&cart, &stocked_catalog(), &AppConfig::default(), ProductId::new(9))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(cart.with_session(|s| s.ledger.is_empty()));
    }

    #[test]
    fn test_decrement_to_removal() {
        let cart = CartState::new();
        let catalog = stocked_catalog();
        let config = AppConfig::default();

        add_to_cart(&cart, &catalog, &config, ProductId::new(2)).unwrap();
        let response = decrement_cart_item(&cart, &catalog, &config, ProductId::new(2));
        assert!(response.summary.is_empty);

        // Again, on an absent product: harmless.
        let response = decrement_cart_item(&cart, &catalog, &config, ProductId::new(2));
        assert!(response.summary.is_empty);
    }

    #[test]
    fn test_remove_from_cart() {
        let cart = CartState::new();
        let catalog = stocked_catalog();
        let config = AppConfig::default();

        add_to_cart(&cart, &catalog, &config, ProductId::new(2)).unwrap();
        add_to_cart(&cart, &catalog, &config, ProductId::new(2)).unwrap();

        let response = remove_from_cart(&cart, &catalog, &config, ProductId::new(2)).unwrap();
        assert!(response.summary.is_empty);

        let err = remove_from_cart(&cart, &catalog, &config, ProductId::new(2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_toggle_cart_item() {
        let cart = CartState::new();
        let catalog = stocked_catalog();
        let config = AppConfig::default();

        let response = toggle_cart_item(&cart, &catalog, &config, ProductId::new(1)).unwrap();
        assert_eq!(response.summary.total_quantity, 1);

        let response = toggle_cart_item(&cart, &catalog, &config, ProductId::new(1)).unwrap();
        assert!(response.summary.is_empty);
    }

    #[test]
    fn test_clear_cart_keeps_session() {
        let cart = CartState::new();
        let catalog = stocked_catalog();
        let config = AppConfig::default();
        let session_id = cart.session_id();

        add_to_cart(&cart, &catalog, &config, ProductId::new(1)).unwrap();
        let response = clear_cart(&cart, &catalog, &config);

        assert!(response.summary.is_empty);
        assert_eq!(response.session_id, session_id);
    }

    #[test]
    fn test_response_shape() {
        let cart = CartState::new();
        let catalog = stocked_catalog();
        let config = AppConfig::default();
        add_to_cart(&cart, &catalog, &config, ProductId::new(2)).unwrap();

        let json = serde_json::to_value(get_cart(&cart, &catalog, &config)).unwrap();
        assert_eq!(json["grandTotal"], 1500);
        assert_eq!(json["items"][0]["productId"], 2);
        assert_eq!(json["atCapacity"], false);
        assert_eq!(json["isEmpty"], false);
    }
}
