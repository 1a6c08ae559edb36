//! # Tiered Volume Pricing
//!
//! Resolves the effective unit price of a product at a given quantity.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base = 1000, tiers = [{min 5, 900}, {min 10, 800}]                     │
//! │                                                                         │
//! │   qty:   1 ─── 4 │ 5 ──────── 9 │ 10 ──────────►                         │
//! │   unit:    1000  │      900     │      800                               │
//! │                                                                         │
//! │  1. Keep tiers with min <= qty                                          │
//! │  2. Pick the largest min                                                │
//! │  3. Several tiers share that min: the lowest price wins                 │
//! │  4. Nothing qualifies (or no tiers): base price                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver never fails and accepts tiers in any order. Tier lists are
//! checked on catalog writes by [`crate::validation::validate_price_tiers`].

use crate::money::Money;
use crate::types::PriceTier;

/// Returns the tier that applies at `quantity`, if any.
///
/// ## Example
/// ```rust
/// use sindean_core::{pricing::applicable_tier, Money, PriceTier};
///
/// let tiers = [
///     PriceTier::new(10, Money::from_halalas(800)),
///     PriceTier::new(5, Money::from_halalas(900)),
/// ];
/// assert_eq!(applicable_tier(&tiers, 7).map(|t| t.min), Some(5));
/// assert!(applicable_tier(&tiers, 3).is_none());
/// ```
pub fn applicable_tier(tiers: &[PriceTier], quantity: i64) -> Option<&PriceTier> {
    tiers
        .iter()
        .filter(|tier| tier.min <= quantity)
        // Larger min wins; on equal min the cheaper tier compares greater.
        .max_by(|a, b| a.min.cmp(&b.min).then_with(|| b.price.cmp(&a.price)))
}

/// Effective per-unit price of a product bought `quantity` times.
///
/// ## Example
/// ```rust
/// use sindean_core::{pricing::resolve_unit_price, Money, PriceTier};
///
/// let base = Money::from_halalas(1000);
/// let tiers = [
///     PriceTier::new(5, Money::from_halalas(900)),
///     PriceTier::new(10, Money::from_halalas(800)),
/// ];
/// assert_eq!(resolve_unit_price(base, &tiers, 7).halalas(), 900);
/// assert_eq!(resolve_unit_price(base, &tiers, 3).halalas(), 1000);
/// ```
pub fn resolve_unit_price(base_price: Money, tiers: &[PriceTier], quantity: i64) -> Money {
    applicable_tier(tiers, quantity)
        .map(|tier| tier.price)
        .unwrap_or(base_price)
}

/// Resolved unit price multiplied by `quantity`.
pub fn line_total(base_price: Money, tiers: &[PriceTier], quantity: i64) -> Money {
    resolve_unit_price(base_price, tiers, quantity).multiply_quantity(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
