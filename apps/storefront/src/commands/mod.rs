//! # Commands Module
//!
//! All commands the host exposes to its views.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product list (HomeScreen)
//! ├── cart.rs      ◄─── Cart manipulation (CartScreen)
//! └── checkout.rs  ◄─── Preview and confirm (CheckoutScreen)
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs, by reference:
//! ```rust,ignore
//! // Read-only
//! fn get_cart(cart: &CartState, catalog: &CatalogState, config: &AppConfig)
//!
//! // Needs the catalog to validate the id and read its stock ceiling
//! fn add_to_cart(cart: &CartState, catalog: &CatalogState, config: &AppConfig, id: ProductId)
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
