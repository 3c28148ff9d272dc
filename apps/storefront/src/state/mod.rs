//! # State Module
//!
//! Application state for the storefront host.
//!
//! ## Why Multiple State Types?
//! Instead of a single struct containing everything, each concern gets its
//! own state type, and each command declares exactly what it needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartState     Mutex<Session>   mutated by cart/checkout commands      │
//! │  CatalogState  Catalog          read-only after startup                │
//! │  AppConfig     plain struct     read-only after startup                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::{CartState, Session};
pub use catalog::CatalogState;
pub use config::{AppConfig, ConfigError, ConfigResult, CONFIG_PATH_ENV};
