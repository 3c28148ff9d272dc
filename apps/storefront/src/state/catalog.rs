//! # Catalog State
//!
//! The product catalog for this process, loaded once at startup.
//!
//! ## Catalog File Format
//! ```toml
//! [[products]]
//! id = 3
//! name = "Dog"
//! price = "9.99"   # string, integer or float; rounded half-even to cents
//! stock = 3        # optional ceiling on cart quantity
//! ```
//!
//! Prices are best written as strings. Floats are accepted and converted
//! through their shortest decimal form (`9.99` stays `9.99`).

use std::path::Path;

use serde::Deserialize;
use storefront_core::{Catalog, Money, Product};
use tracing::info;

use super::config::ConfigResult;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: u32,
    name: String,
    price: PriceInput,
    #[serde(default)]
    stock: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceInput {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl PriceInput {
    fn to_money(&self) -> storefront_core::CoreResult<Money> {
        match self {
            PriceInput::Text(text) => Money::parse(text),
            PriceInput::Integer(whole) => Money::parse(&whole.to_string()),
            PriceInput::Float(value) => Money::parse(&value.to_string()),
        }
    }
}

impl CatalogEntry {
    fn into_product(self) -> storefront_core::CoreResult<Product> {
        Ok(Product {
            id: self.id.into(),
            unit_price: self.price.to_money()?,
            name: self.name,
            available_stock: self.stock,
        })
    }
}

/// Read-only catalog shared by every command.
#[derive(Debug)]
pub struct CatalogState {
    catalog: Catalog,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState { catalog }
    }

    /// Loads the catalog file at `path`, or the demo catalog when `None`.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let Some(path) = path else {
            info!("Using built-in demo catalog");
            return Ok(CatalogState::new(Catalog::demo()));
        };

        info!(?path, "Loading catalog from file");
        let contents = std::fs::read_to_string(path)?;
        let state = Self::from_toml_str(&contents)?;
        info!(products = state.catalog.len(), "Catalog loaded");
        Ok(state)
    }

    /// Parses and validates a catalog TOML document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let file: CatalogFile = toml::from_str(contents)?;

        let products = file
            .products
            .into_iter()
            .map(CatalogEntry::into_product)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CatalogState::new(Catalog::new(products)?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState::new(Catalog::demo())
    }
}
