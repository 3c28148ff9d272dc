//! # Checkout Commands
//!
//! Preview and confirm a checkout.
//!
//! No payment or order system is contacted. Confirming produces a
//! confirmation snapshot, clears the ledger and starts a fresh session, all
//! under one lock so no cart mutation can slip in between.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::{CartSummary, LineItem, Money};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{AppConfig, CartState, CatalogState};

/// What the checkout screen shows before confirmation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPreview {
    pub session_id: Uuid,
    pub store_name: String,
    #[serde(flatten)]
    pub summary: CartSummary,
    pub formatted_total: String,
}

/// Snapshot of a confirmed checkout.
///
/// Built from the summary at the instant of confirmation; the ledger it
/// came from is already empty when this is returned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfirmation {
    /// Session the purchase belonged to
    pub session_id: Uuid,
    /// Session that replaces it
    pub next_session_id: Uuid,
    pub store_name: String,
    pub items: Vec<LineItem>,
    pub grand_total: Money,
    pub formatted_total: String,
    pub confirmed_at: DateTime<Utc>,
}

fn empty_cart_error() -> ApiError {
    ApiError::cart("Cart is empty")
}

/// Shows the order about to be placed.
///
/// ## Errors
/// `CART_ERROR` when there is nothing to check out.
pub fn checkout_preview(
    cart: &CartState,
    catalog: &CatalogState,
    config: &AppConfig,
) -> Result<CheckoutPreview, ApiError> {
    debug!("checkout_preview command");

    cart.with_session(|session| {
        let summary = session.ledger.summarize(catalog.catalog());
        if summary.is_empty {
            return Err(empty_cart_error());
        }

        Ok(CheckoutPreview {
            session_id: session.id,
            store_name: config.store_name.clone(),
            formatted_total: config.format_currency(summary.grand_total),
            summary,
        })
    })
}

/// Confirms the checkout and resets the cart for the next session.
///
/// ## Errors
/// `CART_ERROR` when there is nothing to check out; the session is kept.
pub fn confirm_checkout(
    cart: &CartState,
    catalog: &CatalogState,
    config: &AppConfig,
) -> Result<CheckoutConfirmation, ApiError> {
    debug!("confirm_checkout command");

    cart.with_session_mut(|session| {
        let summary = session.ledger.summarize(catalog.catalog());
        if summary.is_empty {
            return Err(empty_cart_error());
        }

        let session_id = session.restart();

        info!(
            session_id = %session_id,
            lines = summary.item_count,
            total_cents = summary.grand_total.cents(),
            "Checkout confirmed"
        );

        Ok(CheckoutConfirmation {
            session_id,
            next_session_id: session.id,
            store_name: config.store_name.clone(),
            formatted_total: config.format_currency(summary.grand_total),
            grand_total: summary.grand_total,
            items: summary.items,
            confirmed_at: Utc::now(),
        })
    })
}
