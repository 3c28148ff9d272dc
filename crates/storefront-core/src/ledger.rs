//! # Cart Ledger
//!
//! The authoritative record of what a shopping session currently holds.
//!
//! ## Presence Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A product id is present in the ledger  ⇔  its held quantity is ≥ 1    │
//! │                                                                         │
//! │  increment(3)   {}          ──►  {3: 1}                                 │
//! │  increment(3)   {3: 1}      ──►  {3: 2}                                 │
//! │  decrement(3)   {3: 2}      ──►  {3: 1}                                 │
//! │  decrement(3)   {3: 1}      ──►  {}        key removed, never {3: 0}   │
//! │  decrement(3)   {}          ──►  {}        no-op                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities are stored as [`NonZeroU32`], so a stored zero cannot be
//! represented at all. Every mutation goes through this type; callers never
//! re-implement the "delete when it reaches zero" rule.
//!
//! ## Rendering
//! The ledger holds quantities only. Names and prices come from the catalog
//! at render time through [`CartLedger::summarize`], so a summary is never
//! stale and never carried between views.
//!
//! ## Example
//! ```rust
//! use storefront_core::{CartLedger, Money, Product, ProductId};
//!
//! let catalog = vec![
//!     Product::new(1, "Widget", Money::from_cents(1000)),
//!     Product::new(2, "Gadget", Money::from_cents(1500)),
//! ];
//!
//! let mut ledger = CartLedger::new();
//! ledger.increment(ProductId::new(1));
//! ledger.increment(ProductId::new(1));
//! ledger.increment(ProductId::new(2));
//!
//! let summary = ledger.summarize(&catalog);
//! assert_eq!(summary.grand_total, Money::from_cents(3500));
//! ```

use std::collections::btree_map::{BTreeMap, Entry};
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{CartSummary, LineItem, Product, ProductId};

// =============================================================================
// Mutation Outcomes
// =============================================================================

/// Result of an increment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncrementOutcome {
    /// Quantity went up by one.
    Added { quantity: u32 },
    /// The ceiling is already reached; the ledger is unchanged.
    AtCapacity { quantity: u32, ceiling: u32 },
}

impl IncrementOutcome {
    pub fn is_at_capacity(&self) -> bool {
        matches!(self, IncrementOutcome::AtCapacity { .. })
    }
}

/// Result of a decrement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecrementOutcome {
    /// Quantity went down by one and is still at least 1.
    Decremented { quantity: u32 },
    /// Quantity was 1; the product left the cart.
    Removed,
    /// Product was not in the cart; nothing changed.
    Absent,
}

/// Result of the product list's add/remove button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Product was held and has been removed entirely.
    Removed { quantity: u32 },
    /// Product was not held; an increment was attempted.
    Incremented { outcome: IncrementOutcome },
}

// =============================================================================
// Cart Ledger
// =============================================================================

/// Mapping from product id to held quantity for one shopping session.
///
/// ## Invariants
/// - A key is present iff its quantity is ≥ 1
/// - Instances are independent; there is no shared or global cart
/// - Iteration is in ascending product id order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartLedger {
    quantities: BTreeMap<ProductId, NonZeroU32>,
}

impl CartLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        CartLedger::default()
    }

    /// Adds one unit of `product_id`. Always succeeds short of `u32::MAX`.
    ///
    /// The id is not checked against any catalog; that is the caller's job.
    pub fn increment(&mut self, product_id: ProductId) -> IncrementOutcome {
        self.increment_bounded(product_id, None)
    }

    /// Adds one unit of `product_id` unless the result would exceed `ceiling`.
    ///
    /// A rejected request leaves the ledger untouched and reports
    /// [`IncrementOutcome::AtCapacity`]. A ceiling of 0 rejects every request.
    pub fn increment_bounded(
        &mut self,
        product_id: ProductId,
        ceiling: Option<u32>,
    ) -> IncrementOutcome {
        let current = self.quantity_of(product_id);
        let ceiling = ceiling.unwrap_or(u32::MAX);

        if current >= ceiling {
            return IncrementOutcome::AtCapacity {
                quantity: current,
                ceiling,
            };
        }

        // current < ceiling <= u32::MAX, so this cannot wrap to zero.
        let Some(next) = NonZeroU32::new(current + 1) else {
            return IncrementOutcome::AtCapacity {
                quantity: current,
                ceiling,
            };
        };
        self.quantities.insert(product_id, next);

        IncrementOutcome::Added {
            quantity: next.get(),
        }
    }

    /// Adds one unit of `product`, using its `available_stock` as the ceiling.
    pub fn increment_product(&mut self, product: &Product) -> IncrementOutcome {
        self.increment_bounded(product.id, product.available_stock)
    }

    /// Removes one unit of `product_id`.
    ///
    /// At quantity 1 the key is deleted. Absent ids are a harmless no-op.
    pub fn decrement(&mut self, product_id: ProductId) -> DecrementOutcome {
        match self.quantities.entry(product_id) {
            Entry::Vacant(_) => DecrementOutcome::Absent,
            Entry::Occupied(mut slot) => match NonZeroU32::new(slot.get().get() - 1) {
                Some(lower) => {
                    slot.insert(lower);
                    DecrementOutcome::Decremented {
                        quantity: lower.get(),
                    }
                }
                None => {
                    slot.remove();
                    DecrementOutcome::Removed
                }
            },
        }
    }

    /// Drops `product_id` from the cart regardless of its quantity.
    ///
    /// Returns the quantity that was held, or `None` if it was absent.
    pub fn remove(&mut self, product_id: ProductId) -> Option<u32> {
        self.quantities.remove(&product_id).map(NonZeroU32::get)
    }

    /// Removes the product when held, otherwise adds one unit within `ceiling`.
    pub fn toggle(&mut self, product_id: ProductId, ceiling: Option<u32>) -> ToggleOutcome {
        match self.remove(product_id) {
            Some(quantity) => ToggleOutcome::Removed { quantity },
            None => ToggleOutcome::Incremented {
                outcome: self.increment_bounded(product_id, ceiling),
            },
        }
    }

    /// Empties the ledger. Used after a confirmed checkout.
    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    /// Held quantity of `product_id`, 0 when absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.quantities.get(&product_id).map_or(0, |qty| qty.get())
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.quantities.contains_key(&product_id)
    }

    /// Number of distinct products held.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Iterates `(product id, quantity)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.quantities.iter().map(|(id, qty)| (*id, qty.get()))
    }

    /// Derives priced line items and totals against `catalog`.
    ///
    /// ## Algorithm
    /// ```text
    /// for product in catalog (in catalog order):
    ///     qty = quantities[product.id] or 0
    ///     if qty == 0: skip
    ///     emit LineItem { unit_price × qty }
    /// grand_total = Σ line_total
    /// ```
    ///
    /// Held ids missing from `catalog` are dropped silently: a cart may be
    /// carried across a catalog that changed underneath it.
    pub fn summarize(&self, catalog: &[Product]) -> CartSummary {
        let items = catalog
            .iter()
            .filter_map(|product| {
                self.quantities
                    .get(&product.id)
                    .map(|qty| LineItem::priced(product, qty.get()))
            })
            .collect();

        CartSummary::from_items(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::validation::MAX_PRICE_CENTS;

    fn id(raw: u32) -> ProductId {
        ProductId::new(raw)
    }

    fn two_product_catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Widget", Money::from_cents(1000)),
            Product::new(2, "Gadget", Money::from_cents(1500)),
        ]
    }

    #[test]
    fn test_increment_from_absent() {
        let mut ledger = CartLedger::new();
        assert_eq!(ledger.increment(id(7)), IncrementOutcome::Added { quantity: 1 });
        assert_eq!(ledger.increment(id(7)), IncrementOutcome::Added { quantity: 2 });
        assert_eq!(ledger.quantity_of(id(7)), 2);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_decrement_removes_key_at_one() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(1));
        ledger.increment(id(1));

        assert_eq!(ledger.decrement(id(1)), DecrementOutcome::Decremented { quantity: 1 });
        assert!(ledger.contains(id(1)));

        assert_eq!(ledger.decrement(id(1)), DecrementOutcome::Removed);
        assert!(!ledger.contains(id(1)));
        assert_eq!(ledger.quantity_of(id(1)), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(2));
        let before = ledger.clone();

        assert_eq!(ledger.decrement(id(9)), DecrementOutcome::Absent);
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_increment_then_decrement_restores_quantity() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(4));
        ledger.increment(id(4));
        let before = ledger.clone();

        ledger.increment(id(4));
        ledger.decrement(id(4));
        assert_eq!(ledger, before);
        assert_eq!(ledger.quantity_of(id(4)), 2);
    }

    #[test]
    fn test_summarize_totals() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(1));
        ledger.increment(id(1));
        ledger.increment(id(2));

        let summary = ledger.summarize(&two_product_catalog());

        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.items[0].product_id, id(1));
        assert_eq!(summary.items[0].quantity, 2);
        assert_eq!(summary.items[0].line_total, Money::from_cents(2000));
        assert_eq!(summary.items[1].product_id, id(2));
        assert_eq!(summary.items[1].quantity, 1);
        assert_eq!(summary.items[1].line_total, Money::from_cents(1500));
        assert_eq!(summary.grand_total, Money::from_cents(3500));
        assert!(!summary.is_empty);
    }

    #[test]
    fn test_summarize_follows_catalog_order() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(2));
        ledger.increment(id(1));

        let mut catalog = two_product_catalog();
        catalog.reverse();

        let ids: Vec<_> = ledger.summarize(&catalog).items.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![id(2), id(1)]);
    }

    #[test]
    fn test_empty_ledger_summary() {
        let summary = CartLedger::new().summarize(&two_product_catalog());
        assert!(summary.is_empty);
        assert!(summary.items.is_empty());
        assert_eq!(summary.grand_total, Money::zero());

        let summary = CartLedger::new().summarize(&[]);
        assert!(summary.is_empty);
    }

    #[test]
    fn test_stale_ids_are_dropped() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(1));
        ledger.increment(id(99));
        ledger.increment(id(99));

        let summary = ledger.summarize(&two_product_catalog());

        assert_eq!(summary.items.len(), 1);
        assert!(summary.line(id(99)).is_none());
        assert_eq!(summary.grand_total, Money::from_cents(1000));
        // Still held; a later catalog may know it again.
        assert_eq!(ledger.quantity_of(id(99)), 2);
    }

    #[test]
    fn test_stock_ceiling() {
        let product = Product::new(1, "Widget", Money::from_cents(1000)).with_stock(3);
        let mut ledger = CartLedger::new();

        for expected in 1..=3 {
            assert_eq!(
                ledger.increment_product(&product),
                IncrementOutcome::Added { quantity: expected }
            );
        }

        let outcome = ledger.increment_product(&product);
        assert_eq!(outcome, IncrementOutcome::AtCapacity { quantity: 3, ceiling: 3 });
        assert!(outcome.is_at_capacity());
        assert_eq!(ledger.quantity_of(product.id), 3);
    }

    #[test]
    fn test_unbounded_increment_stops_at_u32_max() {
        let mut ledger = CartLedger::new();
        ledger.quantities.insert(id(1), NonZeroU32::MAX);
        let before = ledger.clone();

        assert_eq!(
            ledger.increment(id(1)),
            IncrementOutcome::AtCapacity {
                quantity: u32::MAX,
                ceiling: u32::MAX
            }
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.quantity_of(id(1)), u32::MAX);
    }

    #[test]
    fn test_summarize_at_largest_allowed_values() {
        let catalog = vec![
            Product::new(1, "Yacht", Money::from_cents(MAX_PRICE_CENTS)),
            Product::new(2, "Island", Money::from_cents(MAX_PRICE_CENTS)),
        ];
        let mut ledger = CartLedger::new();
        ledger.quantities.insert(id(1), NonZeroU32::MAX);
        ledger.increment(id(2));
        ledger.increment(id(2));

        let summary = ledger.summarize(&catalog);

        let max_line = MAX_PRICE_CENTS * i64::from(u32::MAX);
        assert_eq!(summary.items[0].line_total.cents(), max_line);
        assert_eq!(summary.items[1].line_total.cents(), MAX_PRICE_CENTS * 2);
        assert_eq!(summary.grand_total.cents(), i64::MAX);
        assert!(summary.grand_total.cents() > 0);
    }

    #[test]
    fn test_zero_stock_never_enters_cart() {
        let mut ledger = CartLedger::new();
        let outcome = ledger.increment_bounded(id(5), Some(0));
        assert_eq!(outcome, IncrementOutcome::AtCapacity { quantity: 0, ceiling: 0 });
        assert!(!ledger.contains(id(5)));
    }

    #[test]
    fn test_remove_and_toggle() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(3));
        ledger.increment(id(3));

        assert_eq!(ledger.remove(id(3)), Some(2));
        assert_eq!(ledger.remove(id(3)), None);

        assert_eq!(
            ledger.toggle(id(3), None),
            ToggleOutcome::Incremented {
                outcome: IncrementOutcome::Added { quantity: 1 }
            }
        );
        assert_eq!(ledger.toggle(id(3), None), ToggleOutcome::Removed { quantity: 1 });
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_clear_resets() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(1));
        ledger.increment(id(2));
        ledger.decrement(id(2));
        ledger.increment(id(3));

        ledger.clear();

        assert!(ledger.is_empty());
        assert!(ledger.summarize(&two_product_catalog()).is_empty);
    }

    #[test]
    fn test_ledgers_are_independent() {
        let mut a = CartLedger::new();
        let b = CartLedger::new();
        a.increment(id(1));
        assert!(b.is_empty());
    }

    #[test]
    fn test_iter_is_id_ordered() {
        let mut ledger = CartLedger::new();
        ledger.increment(id(9));
        ledger.increment(id(2));
        ledger.increment(id(2));

        let held: Vec<_> = ledger.iter().collect();
        assert_eq!(held, vec![(id(2), 2), (id(9), 1)]);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = IncrementOutcome::AtCapacity {
            quantity: 3,
            ceiling: 3,
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["kind"], "at_capacity");
        assert_eq!(json["ceiling"], 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::money::Money;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Increment(u32),
        Bounded(u32, Option<u32>),
        Decrement(u32),
        Remove(u32),
        Toggle(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        let id = 1u32..6;
        prop_oneof![
            id.clone().prop_map(Op::Increment),
            (id.clone(), proptest::option::of(0u32..4)).prop_map(|(i, c)| Op::Bounded(i, c)),
            id.clone().prop_map(Op::Decrement),
            id.clone().prop_map(Op::Remove),
            id.prop_map(Op::Toggle),
        ]
    }

    fn apply(ledger: &mut CartLedger, op: &Op) {
        match *op {
            Op::Increment(i) => {
                ledger.increment(ProductId::new(i));
            }
            Op::Bounded(i, c) => {
                ledger.increment_bounded(ProductId::new(i), c);
            }
            Op::Decrement(i) => {
                ledger.decrement(ProductId::new(i));
            }
            Op::Remove(i) => {
                ledger.remove(ProductId::new(i));
            }
            Op::Toggle(i) => {
                ledger.toggle(ProductId::new(i), None);
            }
        }
    }

    proptest! {
        #[test]
        fn presence_matches_positive_quantity(ops in proptest::collection::vec(op(), 0..64)) {
            let mut ledger = CartLedger::new();
            for op in &ops {
                apply(&mut ledger, op);
                for raw in 0u32..8 {
                    let pid = ProductId::new(raw);
                    prop_assert_eq!(ledger.contains(pid), ledger.quantity_of(pid) >= 1);
                }
                prop_assert!(ledger.iter().all(|(_, qty)| qty >= 1));
            }
        }

        #[test]
        fn increment_then_decrement_is_identity(
            ops in proptest::collection::vec(op(), 0..32),
            target in 1u32..6,
        ) {
            let mut ledger = CartLedger::new();
            for op in &ops {
                apply(&mut ledger, op);
            }
            let before = ledger.clone();

            ledger.increment(ProductId::new(target));
            ledger.decrement(ProductId::new(target));
            prop_assert_eq!(ledger, before);
        }

        #[test]
        fn grand_total_equals_sum_of_lines(
            ops in proptest::collection::vec(op(), 0..64),
            prices in proptest::collection::vec(0i64..100_000, 5),
        ) {
            let catalog: Vec<Product> = prices
                .iter()
                .enumerate()
                .map(|(i, cents)| {
                    Product::new(i as u32 + 1, format!("P{}", i + 1), Money::from_cents(*cents))
                })
                .collect();

            let mut ledger = CartLedger::new();
            for op in &ops {
                apply(&mut ledger, op);
            }

            let summary = ledger.summarize(&catalog);
            let by_hand: i64 = summary
                .items
                .iter()
                .map(|l| l.unit_price.cents() * i64::from(l.quantity))
                .sum();
            prop_assert_eq!(summary.grand_total.cents(), by_hand);
            prop_assert_eq!(summary.is_empty, ledger.is_empty());
        }
    }
}
