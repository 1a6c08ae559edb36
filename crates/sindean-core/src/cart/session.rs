//! # Cart Session
//!
//! A [`Cart`] bound to a [`CartStore`]. The owner (an HTTP handler, a
//! test) creates one explicitly; there is no process-wide cart.
//!
//! ## Lifecycle
//! ```text
//! open(store) ──► store.load()
//!                   ├── Ok(Some(lines)) ──► Cart::from_lines(lines)
//!                   ├── Ok(None) ─────────► empty cart
//!                   └── Err(e) ───────────► warn!, empty cart
//!
//! add / remove / set_quantity / clear / refresh ──► store.save(all lines)
//! ```
//!
//! A failed save is logged and returned; the in-memory cart keeps the
//! mutation either way.

use tracing::{debug, warn};

use super::store::{CartStore, CartStoreError};
use super::{Cart, CartLine, CartOptions, CartProduct, CartSummary};
use crate::money::Money;
use crate::types::{OrderItem, Product};

pub struct CartSession<S: CartStore> {
    cart: Cart,
    store: S,
}

impl<S: CartStore> CartSession<S> {
    /// Loads the saved cart. Never fails: unreadable storage yields an
    /// empty cart.
    pub async fn open(store: S) -> Self {
        let cart = match store.load().await {
            Ok(Some(lines)) => Cart::from_lines(lines),
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(error = %err, "Cart storage unreadable, starting with an empty cart");
                Cart::new()
            }
        };

        debug!(lines = cart.lines().len(), "Cart session opened");
        CartSession { cart, store }
    }

    async fn persist(&self) -> Result<(), CartStoreError> {
        self.store.save(self.cart.lines()).await.inspect_err(|err| {
            warn!(error = %err, "Failed to persist cart");
        })
    }

    // -------------------------------------------------------------------------
    // Mutations (each one saves)
    // -------------------------------------------------------------------------

    pub async fn add(
        &mut self,
        product: CartProduct,
        quantity: i64,
        options: CartOptions,
    ) -> Result<(), CartStoreError> {
        self.cart.add(product, quantity, options);
        self.persist().await
    }

    pub async fn remove(&mut self, product_id: &str) -> Result<(), CartStoreError> {
        self.cart.remove(product_id);
        self.persist().await
    }

    pub async fn set_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
    ) -> Result<(), CartStoreError> {
        self.cart.set_quantity(product_id, quantity);
        self.persist().await
    }

    pub async fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();
        self.persist().await
    }

    pub async fn refresh_product(&mut self, product: CartProduct) -> Result<(), CartStoreError> {
        self.cart.refresh_product(product);
        self.persist().await
    }

    /// Re-snapshots every line from `catalog`; saves only when a line changed.
    pub async fn sync_with_catalog(&mut self, catalog: &[Product]) -> Result<(), CartStoreError> {
        if self.cart.sync_with_catalog(catalog) {
            self.persist().await?;
        }
        Ok(())
    }

    /// Display state is per session and not persisted.
    pub fn toggle_open(&mut self) {
        self.cart.toggle_open();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn count(&self) -> i64 {
        self.cart.count()
    }

    pub fn is_open(&self) -> bool {
        self.cart.is_open()
    }

    pub fn order_lines(&self) -> Vec<OrderItem> {
        self.cart.order_lines()
    }

    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::store::{decode_lines, MemoryCartStore};
    use crate::types::PriceTier;

    fn door(id: &str) -> CartProduct {
        CartProduct {
            id: id.into(),
            name_en: "Door".into(),
            name_ar: "باب".into(),
            image: String::new(),
            price: Money::from_halalas(1000),
            price_tiers: vec![
                PriceTier::new(5, Money::from_halalas(900)),
                PriceTier::new(10, Money::from_halalas(800)),
            ],
        }
    }

    fn saved(store: &MemoryCartStore) -> Vec<CartLine> {
        decode_lines(&store.raw().unwrap()).unwrap()
    }

    /// Always fails to save; loads nothing.
    struct BrokenStore;

    impl CartStore for BrokenStore {
        async fn load(&self) -> Result<Option<Vec<CartLine>>, CartStoreError> {
            Err(CartStoreError::Backend("disk on fire".into()))
        }

        async fn save(&self, _lines: &[CartLine]) -> Result<(), CartStoreError> {
            Err(CartStoreError::Backend("disk on fire".into()))
        }
    }

    #[tokio::test]
    async fn test_open_missing_is_empty() {
        let session = CartSession::open(MemoryCartStore::new()).await;
        assert_eq!(session.count(), 0);
        assert_eq!(session.total(), Money::zero());
    }

    #[tokio::test]
    async fn test_open_corrupt_is_empty() {
        let session = CartSession::open(MemoryCartStore::with_raw("not json at all")).await;
        assert!(session.lines().is_empty());
    }

    #[tokio::test]
    async fn test_every_mutation_persists() {
        let store = MemoryCartStore::new();
        let mut session = CartSession::open(store.clone()).await;

        session.add(door("a"), 2, CartOptions::default()).await.unwrap();
        assert_eq!(saved(&store)[0].quantity, 2);

        session.add(door("a"), 3, CartOptions::default()).await.unwrap();
        assert_eq!(saved(&store)[0].quantity, 5);

        session.set_quantity("a", 7).await.unwrap();
        assert_eq!(saved(&store)[0].quantity, 7);

        session.add(door("b"), 1, CartOptions::default()).await.unwrap();
        session.remove("a").await.unwrap();
        let lines = saved(&store);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product.id, "b");

        session.clear().await.unwrap();
        assert!(saved(&store).is_empty());
    }

    #[tokio::test]
    async fn test_reopen_rehydrates() {
        let store = MemoryCartStore::new();
        {
            let mut session = CartSession::open(store.clone()).await;
            session.add(door("a"), 7, CartOptions::default()).await.unwrap();
        }

        let session = CartSession::open(store).await;
        assert_eq!(session.count(), 7);
        assert_eq!(session.total(), Money::from_halalas(6300));
        // Display state starts closed on a fresh session
        assert!(!session.is_open());
    }

    #[tokio::test]
    async fn test_refresh_product_persists_new_price() {
        let store = MemoryCartStore::new();
        let mut session = CartSession::open(store.clone()).await;
        session.add(door("a"), 3, CartOptions::default()).await.unwrap();

        let mut cheaper = door("a");
        cheaper.price = Money::from_halalas(950);
        session.refresh_product(cheaper).await.unwrap();

        assert_eq!(session.total(), Money::from_halalas(2850));
        assert_eq!(saved(&store)[0].product.price, Money::from_halalas(950));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_mutation_in_memory() {
        let mut session = CartSession::open(BrokenStore).await;
        assert!(session.lines().is_empty());

        let result = session.add(door("a"), 1, CartOptions::default()).await;
        assert!(matches!(result, Err(CartStoreError::Backend(_))));
        assert_eq!(session.count(), 1);
        assert!(session.is_open());
    }
}
