//! # sindean-core: Pure Storefront Logic
//!
//! Domain types, tiered pricing and the cart for the Sindean Doors
//! storefront. No database, no HTTP, no file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront / Admin frontend (EN · AR)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-api (axum handlers)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ sindean-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ pricing  │ │   cart   │ │ checkout │ │  stats   │          │   │
//! │  │   │ tiers    │ │ Cart     │ │ quote    │ │ activity │          │   │
//! │  │   │ resolve  │ │ Session  │ │ COD fee  │ │ labels   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           sindean-db (SQLite repositories, SqliteCartStore)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` in halalas (integer, no floating point)
//! - [`types`] - Catalog and back-office records
//! - [`pricing`] - Tiered volume price resolution
//! - [`cart`] - Cart aggregate, `CartSession`, `CartStore` seam
//! - [`checkout`] - Server-side repricing of checkout requests
//! - [`input`] - Create/patch payloads with defaults
//! - [`stats`] - Dashboard shaping helpers
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sindean_core::cart::{Cart, CartOptions, CartProduct};
//! use sindean_core::{Money, PriceTier};
//!
//! let door = CartProduct {
//!     id: "oak-classic".into(),
//!     name_en: "Oak Classic".into(),
//!     name_ar: "كلاسيك بلوط".into(),
//!     image: String::new(),
//!     price: Money::from_halalas(1000),
//!     price_tiers: vec![
//!         PriceTier::new(5, Money::from_halalas(900)),
//!         PriceTier::new(10, Money::from_halalas(800)),
//!     ],
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(door, 7, CartOptions::default());
//! assert_eq!(cart.total().halalas(), 6300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod input;
pub mod money;
pub mod pricing;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products in one cart or order.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single product per line.
///
/// ## Business Reason
/// Catches typos (1000 instead of 10); larger projects go through an inquiry.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Highest base or tier price the catalog accepts (SAR 100,000,000).
///
/// `MAX_PRICE × MAX_LINE_QUANTITY × MAX_CART_LINES` stays far inside `i64`,
/// so cart and checkout totals cannot overflow.
pub const MAX_PRICE: Money = Money::from_riyals(100_000_000);

/// Cash-on-delivery fee when none is configured.
pub const DEFAULT_COD_FEE: Money = Money::from_riyals(15);
