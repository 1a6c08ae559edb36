//! # sindean-db: Database Layer for the Sindean storefront
//!
//! SQLite storage for the catalog, customer traffic and session carts,
//! using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sindean Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (GET /api/products, POST /api/orders, ...)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    sindean-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ Product/Project│    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Inquiry/Order  │    │ 001_initial  │  │   │
//! │  │   │ WAL, FKs      │    │ Tmpl/Cart/Stats│    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (sindean.db)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per table, plus dashboard stats
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sindean_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sindean.db")).await?;
//!
//! let catalog = db.products().list_storefront().await?;
//! let session = CartSession::open(db.carts().store(cart_id)).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::{CartRepository, SqliteCartStore};
pub use repository::collection::CollectionRepository;
pub use repository::inquiry::InquiryRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::project::ProjectRepository;
pub use repository::specification::SpecificationRepository;
pub use repository::stats::StatsRepository;
