//! # Checkout Pricing
//!
//! Turns a storefront checkout request into a priced order.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutRequest (client)                                               │
//! │    items[{productId, quantity, finish, price}]  total  paymentMethod    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  price_checkout(request, catalog, cod_fee) ← THIS MODULE                │
//! │    1. validate customer + items                                         │
//! │    2. rebuild a Cart from CATALOG prices (client prices are ignored)    │
//! │    3. subtotal = cart.total()                                           │
//! │    4. fees = cod_fee when paying cash on delivery                       │
//! │    5. client total differs? warn, server total wins                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CheckoutQuote ──► into_order(id, now) ──► Order (status pending)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartOptions, CartProduct};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Locale, Order, OrderItem, OrderStatus, PaymentMethod, Product};
use crate::validation::{self, ValidationResult};

// =============================================================================
// Request
// =============================================================================

/// A line as the storefront submits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub finish: Option<String>,
    /// Unit price the client displayed. Informational only.
    #[serde(default)]
    pub price: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl CheckoutCustomer {
    /// First name, last name, email and phone are required.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_required("firstName", &self.first_name)?;
        validation::validate_required("lastName", &self.last_name)?;
        validation::validate_email(&self.email)?;
        validation::validate_required("phone", &self.phone)?;
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub customer: CheckoutCustomer,
    /// Grand total the client computed, compared against the server's.
    #[serde(default)]
    pub total: Option<Money>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub locale: Locale,
}

// =============================================================================
// Quote
// =============================================================================

/// Server-side pricing of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub fees: Money,
    pub total: Money,
}

/// Fee charged for `method`.
pub fn payment_fee(method: PaymentMethod, cod_fee: Money) -> Money {
    match method {
        PaymentMethod::Cod => cod_fee,
        PaymentMethod::BankTransfer | PaymentMethod::Tabby | PaymentMethod::Tamara => {
            Money::zero()
        }
    }
}

/// Prices `request` against `catalog`.
///
/// ## Errors
/// - `EmptyCart` when there are no items
/// - `ProductNotFound` for an id missing from `catalog`
/// - `Validation` for customer fields, quantities and cart size
pub fn price_checkout(
    request: &CheckoutRequest,
    catalog: &[Product],
    cod_fee: Money,
) -> CoreResult<CheckoutQuote> {
    request.customer.validate()?;

    if request.items.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    validation::validate_cart_size(request.items.len())?;

    let mut cart = Cart::new();
    for item in &request.items {
        validation::validate_quantity(item.quantity)?;

        let product = catalog
            .iter()
            .find(|p| p.id == item.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(item.product_id.clone()))?;

        cart.add(
            CartProduct::from(product),
            item.quantity,
            CartOptions {
                finish: item.finish.clone(),
                size: None,
            },
        );
    }

    // Repeated ids were merged; the merged quantity must still be in range.
    for line in cart.lines() {
        validation::validate_quantity(line.quantity)?;
    }

    let subtotal = cart.total();
    let fees = payment_fee(request.payment_method, cod_fee);
    let total = subtotal + fees;

    if let Some(client_total) = request.total {
        if client_total != total {
            warn!(
                client_total = client_total.halalas(),
                server_total = total.halalas(),
                "Checkout total mismatch, using server total"
            );
        }
    }

    Ok(CheckoutQuote {
        items: cart.order_lines(),
        subtotal,
        fees,
        total,
    })
}

impl CheckoutQuote {
    /// Builds the pending order for this quote.
    pub fn into_order(self, request: &CheckoutRequest, id: String, now: DateTime<Utc>) -> Order {
        let customer = &request.customer;
        Order {
            id,
            customer_name: customer.full_name(),
            email: customer.email.trim().to_string(),
            phone: Some(customer.phone.trim().to_string()),
            city: customer.city.clone(),
            address: customer.address.clone(),
            notes: customer.notes.clone(),
            payment_method: request.payment_method,
            locale: request.locale,
            items: self.items,
            subtotal: self.subtotal,
            fees: self.fees,
            total_amount: self.total,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// `ORD-<unix millis>-<4 hex>`; the suffix keeps ids unique within a millisecond.
pub fn new_order_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", now.timestamp_millis(), suffix[..4].to_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================
