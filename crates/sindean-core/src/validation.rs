//! # Validation Module
//!
//! Input validation for catalog writes, inquiries, checkout and carts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Storefront forms    - immediate feedback, not trusted         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handlers       - serde deserialization (shape)           │
//! │           └── THIS MODULE: business rules (ranges, required fields)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite              - NOT NULL / PRIMARY KEY constraints      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PriceTier;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Trims `value` and fails when nothing is left.
///
/// ## Example
/// ```rust
/// use sindean_core::validation::validate_required;
///
/// assert_eq!(validate_required("name", "  Huda ").unwrap(), "Huda");
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value.to_string())
}

/// Like [`validate_required`] for optional inputs.
pub fn validate_required_opt(field: &str, value: Option<&str>) -> ValidationResult<String> {
    validate_required(field, value.unwrap_or_default())
}

/// Validates a bilingual product name.
///
/// ## Rules
/// - English name must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("nameEn"));
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "nameEn".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Minimal email shape check: `local@domain`.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Between 1 and MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_LINE_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a base price. Zero is allowed (price on request).
///
/// ## Rules
/// - Not negative
/// - At most MAX_PRICE
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }
    if price > MAX_PRICE {
        return Err(price_too_large("price"));
    }
    Ok(())
}

fn price_too_large(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: MAX_PRICE.halalas(),
    }
}

/// Validates a product's volume tiers before they are written to the catalog.
///
/// ## Rules
/// - Every `min` is at least 1
/// - Every `price` is non-negative and at most MAX_PRICE
/// - At most one tier per `min`
///
/// ## Example
/// ```rust
/// use sindean_core::{validation::validate_price_tiers, Money, PriceTier};
///
/// let ok = [PriceTier::new(5, Money::from_halalas(900))];
/// assert!(validate_price_tiers(&ok).is_ok());
///
/// let dup = [
///     PriceTier::new(5, Money::from_halalas(900)),
///     PriceTier::new(5, Money::from_halalas(850)),
/// ];
/// assert!(validate_price_tiers(&dup).is_err());
/// ```
pub fn validate_price_tiers(tiers: &[PriceTier]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(tiers.len());

    for tier in tiers {
        if tier.min < 1 {
            return Err(ValidationError::OutOfRange {
                field: "priceTiers.min".to_string(),
                min: 1,
                max: i64::MAX,
            });
        }
        if tier.price.is_negative() {
            return Err(ValidationError::MustNotBeNegative {
                field: "priceTiers.price".to_string(),
            });
        }
        if tier.price > MAX_PRICE {
            return Err(price_too_large("priceTiers.price"));
        }
        if !seen.insert(tier.min) {
            return Err(ValidationError::Duplicate {
                field: "priceTiers.min".to_string(),
                value: tier.min.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of distinct lines in a cart or checkout.
pub fn validate_cart_size(lines: usize) -> ValidationResult<()> {
    if lines > MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }
    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string, e.g. the session cart id cookie.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("phone", " 0500000000 ").unwrap(), "0500000000");
        assert!(validate_required("phone", "").is_err());
        assert!(validate_required_opt("phone", None).is_err());
        assert!(validate_required_opt("phone", Some("1")).is_ok());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Oak Veneer Door").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        // Arabic characters count as one each
        assert!(validate_product_name(&"ب".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("sara@example.sa").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.sa").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_halalas(-1)).is_err());
        assert!(validate_price(MAX_PRICE).is_ok());
        assert!(validate_price(MAX_PRICE + Money::from_halalas(1)).is_err());
        assert!(validate_price(Money::from_halalas(i64::MAX / 500)).is_err());
    }

    #[test]
    fn test_largest_valid_cart_total_fits() {
        // Every line at the price and quantity ceilings.
        let line = crate::pricing::line_total(MAX_PRICE, &[], MAX_LINE_QUANTITY);
        let total: Money = std::iter::repeat(line).take(MAX_CART_LINES).sum();

        assert_eq!(
            total.halalas(),
            MAX_PRICE.halalas() * MAX_LINE_QUANTITY * MAX_CART_LINES as i64
        );
        assert!(total.is_positive());
    }

    #[test]
    fn test_validate_price_tiers() {
        let m = Money::from_halalas;
        assert!(validate_price_tiers(&[]).is_ok());
        assert!(validate_price_tiers(&[PriceTier::new(5, m(900)), PriceTier::new(10, m(800))]).is_ok());
        assert!(validate_price_tiers(&[PriceTier::new(0, m(900))]).is_err());
        assert!(validate_price_tiers(&[PriceTier::new(3, m(-1))]).is_err());
        assert!(validate_price_tiers(&[PriceTier::new(3, MAX_PRICE)]).is_ok());
        assert!(matches!(
            validate_price_tiers(&[PriceTier::new(3, m(i64::MAX / 500))]),
            Err(ValidationError::OutOfRange { .. })
        ));

        let err = validate_price_tiers(&[PriceTier::new(5, m(900)), PriceTier::new(5, m(850))])
            .unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_LINES).is_ok());
        assert!(validate_cart_size(MAX_CART_LINES + 1).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
