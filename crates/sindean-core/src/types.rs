//! # Domain Types
//!
//! Catalog and back-office records for the storefront.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Project      │   │   Collection    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name_en/ar     │   │  title_en/ar    │   │  name_en/ar     │       │
//! │  │  price          │   │  status         │   │  product_count  │       │
//! │  │  price_tiers[]  │   │  tags, images   │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Inquiry      │   │     Order       │   │ Specification   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │     Field       │       │
//! │  │  name, phone    │   │  items[]        │   │  ─────────────  │       │
//! │  │  status         │   │  total_amount   │   │  type, options  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every record serializes with camelCase keys (`nameEn`, `priceTiers`,
//! `showInStore`) because that is what the storefront frontend reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Price Tier
// =============================================================================

/// A volume-pricing threshold: from `min` units upward, each unit costs `price`.
///
/// Tiers are stored unordered. See [`crate::pricing`] for how one is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceTier {
    /// Smallest quantity at which this tier applies.
    pub min: i64,
    /// Per-unit price once the tier applies.
    pub price: Money,
}

impl PriceTier {
    #[inline]
    pub const fn new(min: i64, price: Money) -> Self {
        PriceTier { min, price }
    }
}

// =============================================================================
// Product
// =============================================================================

/// Door product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    #[default]
    Interior,
    Exterior,
    #[serde(rename = "fire-rated")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "fire-rated"))]
    FireRated,
    Custom,
}

/// A finish option shown as a colour swatch on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Finish {
    pub name: String,
    /// CSS colour of the swatch.
    pub color: String,
    /// Gallery image to show when this finish is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_index: Option<u32>,
}

/// Technical sheet of a door.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpecs {
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub finish: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_insulation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier, e.g. `product-1718000000000` or a seeded slug.
    pub id: String,
    pub name_en: String,
    pub name_ar: String,
    pub desc_en: String,
    pub desc_ar: String,
    pub category: ProductCategory,
    pub series_en: String,
    pub series_ar: String,
    pub badges: Vec<String>,
    /// Primary image URL.
    pub image: String,
    pub images: Vec<String>,
    pub finishes: Vec<Finish>,
    pub specs: ProductSpecs,
    /// Catalog reference code (`WDF-...`).
    #[serde(rename = "ref")]
    pub reference: String,
    /// Link to a downloadable catalog PDF.
    pub catalog: Option<String>,
    /// Base unit price, used when no tier applies.
    pub price: Money,
    pub price_tiers: Vec<PriceTier>,
    /// Hidden products stay in the back-office but not in the storefront.
    pub show_in_store: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Project
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Published,
    #[default]
    Draft,
}

/// A portfolio project (installation reference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title_en: String,
    pub title_ar: String,
    pub desc_en: String,
    pub desc_ar: String,
    pub category: String,
    pub subcategory: String,
    pub status: ProjectStatus,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub featured_image: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Collection
// =============================================================================

/// A curated group of products shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name_en: String,
    pub name_ar: String,
    pub desc_en: String,
    pub desc_ar: String,
    pub image: String,
    pub product_count: i64,
}

// =============================================================================
// Inquiry
// =============================================================================

/// Follow-up state of a customer inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    Pending,
    Read,
    Contacted,
}

/// A contact/quote request from the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// Product the customer asked about, if any.
    pub product_id: Option<String>,
    pub status: InquiryStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery; carries the COD fee.
    #[default]
    Cod,
    BankTransfer,
    Tabby,
    Tamara,
}

/// Language the customer checked out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

/// One priced line of a placed order.
///
/// Snapshot pattern: the unit price is frozen at checkout, later catalog
/// edits do not change placed orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i64,
    pub finish: Option<String>,
    /// Effective unit price after tier resolution.
    #[serde(rename = "price")]
    pub unit_price: Money,
    pub line_total: Money,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `ORD-<unix millis>-<suffix>`.
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub payment_method: PaymentMethod,
    pub locale: Locale,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub fees: Money,
    pub total_amount: Money,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Specification Template
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SpecFieldType {
    #[default]
    Text,
    Dropdown,
    Number,
}

/// A field of the admin product-specification template.
///
/// The template is an ordered list; position is the index in that list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationField {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name_en: String,
    pub name_ar: String,
    #[serde(rename = "type", default)]
    pub field_type: SpecFieldType,
    #[serde(default)]
    pub unit: Option<String>,
    /// Choices for `dropdown` fields.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&ProductCategory::FireRated).unwrap();
        assert_eq!(json, "\"fire-rated\"");
        let parsed: ProductCategory = serde_json::from_str("\"exterior\"").unwrap();
        assert_eq!(parsed, ProductCategory::Exterior);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ProductCategory::default(), ProductCategory::Interior);
        assert_eq!(ProjectStatus::default(), ProjectStatus::Draft);
        assert_eq!(InquiryStatus::default(), InquiryStatus::Pending);
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_payment_method_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"bank_transfer\"");
    }

    #[test]
    fn test_order_item_uses_price_key() {
        let item = OrderItem {
            product_id: "door-1".into(),
            quantity: 2,
            finish: Some("Walnut".into()),
            unit_price: Money::from_halalas(90000),
            line_total: Money::from_halalas(180000),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["productId"], "door-1");
        assert_eq!(value["price"], 90000);
        assert_eq!(value["lineTotal"], 180000);
    }

    #[test]
    fn test_specification_field_type_key() {
        let field: SpecificationField = serde_json::from_str(
            r#"{"id":"f1","nameEn":"Width","nameAr":"العرض","type":"number","unit":"cm"}"#,
        )
        .unwrap();
        assert_eq!(field.field_type, SpecFieldType::Number);
        assert_eq!(field.unit.as_deref(), Some("cm"));
        assert!(field.options.is_empty());
        assert!(!field.required);
    }
}
