//! # Cart Aggregator
//!
//! The shopping cart: one line per product, priced through the tier resolver.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront Action        Operation                 Line Change         │
//! │  ─────────────────        ─────────                 ───────────         │
//! │                                                                         │
//! │  "Add to cart" ─────────► add(product, q, opts) ──► push / qty += q     │
//! │                                                     (opens the drawer)  │
//! │  Change quantity ───────► set_quantity(id, q) ────► qty = q  (q<1: rm)  │
//! │                                                                         │
//! │  Click remove ──────────► remove(id) ─────────────► line dropped        │
//! │                                                                         │
//! │  Order placed ──────────► clear() ────────────────► lines emptied       │
//! │                                                                         │
//! │  Drawer / badge ────────► total(), count() ───────► (recomputed)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id (adding again increments the quantity)
//! - Every stored quantity is at least 1
//! - Totals are never cached: each call resolves tiers against the
//!   current pricing snapshot of every line
//!
//! Persistence lives behind [`CartStore`]; [`CartSession`] couples a cart
//! to a store and saves after every mutation.

pub mod session;
pub mod store;

pub use session::CartSession;
pub use store::{CartStore, CartStoreError, MemoryCartStore};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing;
use crate::types::{OrderItem, PriceTier, Product};

// =============================================================================
// Cart Line
// =============================================================================

/// Pricing and display snapshot of a product, captured when it is added.
///
/// [`Cart::refresh_product`] replaces it so catalog price edits show up
/// in an open cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: Money,
    #[serde(default)]
    pub price_tiers: Vec<PriceTier>,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        CartProduct {
            id: product.id.clone(),
            name_en: product.name_en.clone(),
            name_ar: product.name_ar.clone(),
            image: product.image.clone(),
            price: product.price,
            price_tiers: product.price_tiers.clone(),
        }
    }
}

/// Options picked on the product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: CartProduct,
    pub quantity: i64,
    /// Browsers persist this under `options`.
    #[serde(default, alias = "options")]
    pub selected_options: CartOptions,
}

impl CartLine {
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price at the current quantity.
    pub fn unit_price(&self) -> Money {
        pricing::resolve_unit_price(self.product.price, &self.product.price_tiers, self.quantity)
    }

    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// In-memory cart aggregate. Single owner, no I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    is_open: bool,
}

impl Cart {
    /// Creates an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from persisted lines.
    ///
    /// Persisted data is not trusted: duplicate product ids are merged and
    /// lines with a quantity below 1 are dropped.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity < 1 {
                continue;
            }
            match cart.line_mut(line.product_id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product.id == product_id)
    }

    /// Adds `quantity` units of `product`, merging with an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity grows by `quantity`; the
    ///   options chosen first are kept
    /// - Otherwise: a new line is appended
    /// - A quantity below 1 adds nothing
    /// - The cart display opens either way
    pub fn add(&mut self, product: CartProduct, quantity: i64, options: CartOptions) {
        self.is_open = true;

        if quantity < 1 {
            return;
        }

        match self.line_mut(&product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product,
                quantity,
                selected_options: options,
            }),
        }
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        self.lines.len() != before
    }

    /// Sets the quantity of an existing line.
    ///
    /// A quantity below 1 removes the line. Unknown products are ignored.
    /// Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(product_id);
        }

        match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Replaces the pricing snapshot of the line holding `product`.
    ///
    /// Returns whether anything changed.
    pub fn refresh_product(&mut self, product: CartProduct) -> bool {
        match self.line_mut(&product.id) {
            Some(line) if line.product != product => {
                line.product = product;
                true
            }
            _ => false,
        }
    }

    /// Refreshes every line from `catalog` and drops lines whose product
    /// no longer exists. Returns whether anything changed.
    pub fn sync_with_catalog(&mut self, catalog: &[Product]) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|line| catalog.iter().any(|p| p.id == line.product.id));
        let mut changed = self.lines.len() != before;

        for product in catalog {
            changed |= self.refresh_product(CartProduct::from(product));
        }
        changed
    }

    /// Σ resolved unit price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ quantities (the badge number).
    pub fn count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|l| l.product.id == product_id)
            .map(|l| l.quantity)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Priced lines for the order-placement request.
    pub fn order_lines(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|line| OrderItem {
                product_id: line.product.id.clone(),
                quantity: line.quantity,
                finish: line.selected_options.finish.clone(),
                unit_price: line.unit_price(),
                line_total: line.line_total(),
            })
            .collect()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

// =============================================================================
// Cart Summary (response view)
// =============================================================================

/// A priced line as shown in the cart drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name_en: String,
    pub name_ar: String,
    pub image: String,
    pub quantity: i64,
    pub selected_options: CartOptions,
    pub base_price: Money,
    pub unit_price: Money,
    pub line_total: Money,
    /// Tier in effect at this quantity, if any.
    pub applied_tier: Option<PriceTier>,
}

/// Cart state for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    pub count: i64,
    pub total: Money,
    pub is_open: bool,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        let lines = cart
            .lines
            .iter()
            .map(|line| CartLineView {
                product_id: line.product.id.clone(),
                name_en: line.product.name_en.clone(),
                name_ar: line.product.name_ar.clone(),
                image: line.product.image.clone(),
                quantity: line.quantity,
                selected_options: line.selected_options.clone(),
                base_price: line.product.price,
                unit_price: line.unit_price(),
                line_total: line.line_total(),
                applied_tier: pricing::applicable_tier(&line.product.price_tiers, line.quantity)
                    .copied(),
            })
            .collect();

        CartSummary {
            lines,
            count: cart.count(),
            total: cart.total(),
            is_open: cart.is_open,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
