//! # Money Module
//!
//! Provides the `Money` type for handling prices, line totals and fees.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A door priced at SAR 1,249.95 bought 7 times:                          │
//! │    1249.95 * 7 = 8749.650000000001   ❌ WRONG!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Halalas (1 SAR = 100 halalas)                    │
//! │    124995 * 7 = 874965 halalas = SAR 8749.65                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sindean_core::money::Money;
//!
//! let price = Money::from_halalas(124995); // SAR 1249.95
//! let line = price * 7;
//! assert_eq!(line.halalas(), 874965);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in halalas, the minor unit of the Saudi riyal.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction stays closed, e.g. client vs server totals
/// - **Single field tuple struct**: serializes as a bare JSON integer
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ─┐                                                       │
/// │                 ├──► resolve_unit_price(qty) ──► unit × qty = line      │
/// │  PriceTier.price┘                                                       │
/// │                                                                         │
/// │  Σ lines = subtotal ──► + COD fee ──► Order.total_amount                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from halalas (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use sindean_core::money::Money;
    ///
    /// let price = Money::from_halalas(1099); // SAR 10.99
    /// assert_eq!(price.halalas(), 1099);
    /// ```
    #[inline]
    pub const fn from_halalas(halalas: i64) -> Self {
        Money(halalas)
    }

    /// Creates a Money value from whole riyals.
    ///
    /// ## Example
    /// ```rust
    /// use sindean_core::money::Money;
    ///
    /// assert_eq!(Money::from_riyals(15).halalas(), 1500);
    /// ```
    #[inline]
    pub const fn from_riyals(riyals: i64) -> Self {
        Money(riyals * 100)
    }

    /// Returns the value in halalas.
    #[inline]
    pub const fn halalas(&self) -> i64 {
        self.0
    }

    /// Returns the whole riyal portion (truncated toward zero).
    #[inline]
    pub const fn riyals(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the halala portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use sindean_core::money::Money;
    ///
    /// assert_eq!(Money::from_halalas(-550).halalas_part(), 50);
    /// ```
    #[inline]
    pub const fn halalas_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use sindean_core::money::Money;
    ///
    /// let unit_price = Money::from_halalas(90000); // SAR 900.00
    /// let line_total = unit_price.multiply_quantity(7);
    /// assert_eq!(line_total.halalas(), 630000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style rendering, e.g. `SAR 1249.95`.
///
/// Locale-aware grouping and Arabic numerals are left to the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}SAR {}.{:02}",
            sign,
            self.riyals().abs(),
            self.halalas_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Money arithmetic saturates instead of overflowing. Validated prices keep
// real totals far from the bounds.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
