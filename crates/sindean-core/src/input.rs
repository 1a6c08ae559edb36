//! # Write Payloads
//!
//! Request bodies for back-office writes and the rules that turn them into
//! records. Every field of a create payload is optional on the wire; missing
//! fields fall back to the storefront defaults below.
//!
//! ## Product defaults
//! | field         | default                 |
//! |---------------|-------------------------|
//! | `id`          | `product-<unix millis>` |
//! | `category`    | `interior`              |
//! | `ref`         | `WDF-NEW-<unix millis>` |
//! | `price`       | 0                       |
//! | `showInStore` | `true`                  |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{
    Collection, Finish, Inquiry, InquiryStatus, OrderStatus, PriceTier, Product, ProductCategory,
    ProductSpecs, Project, ProjectStatus,
};
use crate::validation::{self, ValidationResult};

/// Non-empty, trimmed id from the payload, or a generated one.
fn id_or(id: Option<String>, prefix: &str, now: DateTime<Utc>) -> String {
    id.map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("{prefix}-{}", now.timestamp_millis()))
}

/// Overwrites `slot` when the patch carries a value.
fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    pub id: Option<String>,
    pub name_en: String,
    pub name_ar: String,
    pub desc_en: String,
    pub desc_ar: String,
    pub category: Option<ProductCategory>,
    pub series_en: String,
    pub series_ar: String,
    pub badges: Vec<String>,
    pub image: String,
    pub images: Vec<String>,
    pub finishes: Vec<Finish>,
    pub specs: ProductSpecs,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub catalog: Option<String>,
    pub price: Option<Money>,
    pub price_tiers: Vec<PriceTier>,
    pub show_in_store: Option<bool>,
}

impl NewProduct {
    /// Validates the payload and fills in defaults.
    pub fn into_product(self, now: DateTime<Utc>) -> ValidationResult<Product> {
        validation::validate_product_name(&self.name_en)?;
        let price = self.price.unwrap_or_default();
        validation::validate_price(price)?;
        validation::validate_price_tiers(&self.price_tiers)?;

        let reference = self
            .reference
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| format!("WDF-NEW-{}", now.timestamp_millis()));

        Ok(Product {
            id: id_or(self.id, "product", now),
            name_en: self.name_en.trim().to_string(),
            name_ar: self.name_ar,
            desc_en: self.desc_en,
            desc_ar: self.desc_ar,
            category: self.category.unwrap_or_default(),
            series_en: self.series_en,
            series_ar: self.series_ar,
            badges: self.badges,
            image: self.image,
            images: self.images,
            finishes: self.finishes,
            specs: self.specs,
            reference,
            catalog: self.catalog,
            price,
            price_tiers: self.price_tiers,
            show_in_store: self.show_in_store.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial product update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub desc_en: Option<String>,
    pub desc_ar: Option<String>,
    pub category: Option<ProductCategory>,
    pub series_en: Option<String>,
    pub series_ar: Option<String>,
    pub badges: Option<Vec<String>>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub finishes: Option<Vec<Finish>>,
    pub specs: Option<ProductSpecs>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub catalog: Option<String>,
    pub price: Option<Money>,
    pub price_tiers: Option<Vec<PriceTier>>,
    pub show_in_store: Option<bool>,
}

impl ProductPatch {
    /// Applies the patch after validating the fields it touches.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) -> ValidationResult<()> {
        if let Some(name) = &self.name_en {
            validation::validate_product_name(name)?;
        }
        if let Some(price) = self.price {
            validation::validate_price(price)?;
        }
        if let Some(tiers) = &self.price_tiers {
            validation::validate_price_tiers(tiers)?;
        }

        set(&mut product.name_en, self.name_en);
        set(&mut product.name_ar, self.name_ar);
        set(&mut product.desc_en, self.desc_en);
        set(&mut product.desc_ar, self.desc_ar);
        set(&mut product.category, self.category);
        set(&mut product.series_en, self.series_en);
        set(&mut product.series_ar, self.series_ar);
        set(&mut product.badges, self.badges);
        set(&mut product.image, self.image);
        set(&mut product.images, self.images);
        set(&mut product.finishes, self.finishes);
        set(&mut product.specs, self.specs);
        set(&mut product.reference, self.reference);
        set(&mut product.price, self.price);
        set(&mut product.price_tiers, self.price_tiers);
        set(&mut product.show_in_store, self.show_in_store);
        if self.catalog.is_some() {
            product.catalog = self.catalog;
        }

        product.updated_at = now;
        Ok(())
    }
}

// =============================================================================
// Projects
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProject {
    pub id: Option<String>,
    pub title_en: String,
    pub title_ar: String,
    pub desc_en: String,
    pub desc_ar: String,
    pub category: String,
    pub subcategory: String,
    pub status: Option<ProjectStatus>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub featured_image: String,
}

impl NewProject {
    pub fn into_project(self, now: DateTime<Utc>) -> ValidationResult<Project> {
        validation::validate_required("titleEn", &self.title_en)?;

        Ok(Project {
            id: id_or(self.id, "project", now),
            title_en: self.title_en.trim().to_string(),
            title_ar: self.title_ar,
            desc_en: self.desc_en,
            desc_ar: self.desc_ar,
            category: self.category,
            subcategory: self.subcategory,
            status: self.status.unwrap_or_default(),
            tags: self.tags,
            images: self.images,
            featured_image: self.featured_image,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub desc_en: Option<String>,
    pub desc_ar: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub status: Option<ProjectStatus>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub featured_image: Option<String>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project, now: DateTime<Utc>) -> ValidationResult<()> {
        if let Some(title) = &self.title_en {
            validation::validate_required("titleEn", title)?;
        }

        set(&mut project.title_en, self.title_en);
        set(&mut project.title_ar, self.title_ar);
        set(&mut project.desc_en, self.desc_en);
        set(&mut project.desc_ar, self.desc_ar);
        set(&mut project.category, self.category);
        set(&mut project.subcategory, self.subcategory);
        set(&mut project.status, self.status);
        set(&mut project.tags, self.tags);
        set(&mut project.images, self.images);
        set(&mut project.featured_image, self.featured_image);

        project.updated_at = now;
        Ok(())
    }
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCollection {
    pub id: Option<String>,
    pub name_en: String,
    pub name_ar: String,
    pub desc_en: String,
    pub desc_ar: String,
    pub image: String,
    pub product_count: i64,
}

impl NewCollection {
    pub fn into_collection(self, now: DateTime<Utc>) -> ValidationResult<Collection> {
        validation::validate_required("nameEn", &self.name_en)?;
        if self.product_count < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "productCount".to_string(),
            });
        }

        Ok(Collection {
            id: id_or(self.id, "collection", now),
            name_en: self.name_en.trim().to_string(),
            name_ar: self.name_ar,
            desc_en: self.desc_en,
            desc_ar: self.desc_ar,
            image: self.image,
            product_count: self.product_count,
        })
    }
}

// =============================================================================
// Inquiries
// =============================================================================

/// Contact form body. The message may arrive as `message` or `details`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewInquiry {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub product_id: Option<String>,
}

impl NewInquiry {
    /// ## Rules
    /// - `name` and `phone` are required
    /// - `message`, or `details` when `message` is blank, is required
    pub fn into_inquiry(self, now: DateTime<Utc>) -> ValidationResult<Inquiry> {
        let name = validation::validate_required_opt("name", self.name.as_deref())?;
        let phone = validation::validate_required_opt("phone", self.phone.as_deref())?;
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .or(self.details);
        let message = validation::validate_required_opt("message", message.as_deref())?;

        Ok(Inquiry {
            id: Uuid::new_v4().to_string(),
            name,
            email: self.email.unwrap_or_default().trim().to_string(),
            phone,
            message,
            product_id: self.product_id.filter(|p| !p.trim().is_empty()),
            status: InquiryStatus::Pending,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InquiryStatusUpdate {
    pub status: InquiryStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================
