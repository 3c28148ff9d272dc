//! # Catalog
//!
//! The read-only, ordered list of purchasable products.
//!
//! A `Catalog` is validated once at construction and never mutated. It
//! derefs to `[Product]`, so it can be handed straight to
//! [`CartLedger::summarize`](crate::ledger::CartLedger::summarize).

use std::ops::Deref;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{validate_product, validate_unique_ids};

/// Validated product list in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Validates `products` and wraps them, preserving their order.
    ///
    /// ## Errors
    /// - Any product with a zero id, blank name or negative price
    /// - Two products sharing an id
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        for product in &products {
            validate_product(product)?;
        }
        validate_unique_ids(&products)?;

        Ok(Catalog { products })
    }

    /// The built-in demo assortment.
    ///
    /// ```rust
    /// use storefront_core::{Catalog, ProductId};
    ///
    /// let catalog = Catalog::demo();
    /// assert_eq!(catalog.len(), 6);
    /// assert_eq!(catalog.get(ProductId::new(3)).unwrap().name, "Dog");
    /// ```
    pub fn demo() -> Self {
        let products = vec![
            Product::new(
                1,
                "Pneumonoultramicroscopicsilicovolcanoconiosis",
                Money::from_cents(15000),
            ),
            Product::new(2, "Supercalifragilisticexpialidocious", Money::from_cents(7850)),
            Product::new(3, "Dog", Money::from_cents(999)),
            Product::new(5, "Defenestrate", Money::from_cents(2075)),
            Product::new(6, "Pogchamp", Money::from_cents(1200)),
            Product::new(7, "Sus", Money::from_cents(225)),
        ];

        Catalog { products }
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Looks up a product by id, failing with [`CoreError::ProductNotFound`].
    pub fn require(&self, id: ProductId) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl Deref for Catalog {
    type Target = [Product];

    fn deref(&self) -> &[Product] {
        &self.products
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
