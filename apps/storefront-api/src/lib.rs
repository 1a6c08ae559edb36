//! # Sindean Storefront API
//!
//! axum server for the public storefront and the admin back-office.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client ──► TraceLayer ──► Router                                       │
//! │                              │                                          │
//! │              ┌───────────────┴────────────────┐                         │
//! │              ▼                                ▼                         │
//! │        public routes                  /api/admin/* routes               │
//! │        (catalog reads,                require_admin (admin_token        │
//! │         inquiries, cart,              cookie, HS256 JWT)                │
//! │         checkout, login)                      │                         │
//! │              │                                ▼                         │
//! │              └──────────► handlers ◄──────────┘                         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │              sindean-core (pricing, cart, checkout)                     │
//! │              sindean-db   (SQLite repositories)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors leave every handler as [`ApiError`]: an HTTP status plus a
//! `{ "code", "message" }` body.

pub mod auth;
pub mod config;
pub mod cookies;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use crate::config::{ConfigError, ServerConfig};
pub use crate::error::{ApiError, ApiResult, ErrorCode};
pub use crate::state::AppState;

use routes::{
    admin, cart, collections, health, inquiries, orders, products, projects, specifications,
};

/// Builds the full router: public routes merged with the cookie-guarded
/// admin routes.
pub fn build_app(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/products", get(products::list_storefront))
        .route("/api/products/{id}", get(products::get_storefront))
        .route("/api/projects", get(projects::list_published))
        .route("/api/projects/{id}", get(projects::get_published))
        .route("/api/collections", get(collections::list))
        .route("/api/specifications", get(specifications::list))
        .route("/api/inquiries", post(inquiries::create))
        .route("/api/orders", post(orders::checkout))
        .route("/api/cart", get(cart::get).delete(cart::clear))
        .route("/api/cart/items", post(cart::add_item))
        .route(
            "/api/cart/items/{product_id}",
            put(cart::set_quantity).delete(cart::remove_item),
        )
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout));

    let admin = Router::new()
        .route(
            "/api/admin/products",
            get(products::list_all).post(products::create),
        )
        .route(
            "/api/admin/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/api/admin/projects",
            get(projects::list_all).post(projects::create),
        )
        .route(
            "/api/admin/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/api/admin/collections", post(collections::create))
        .route("/api/admin/specifications", put(specifications::replace_all))
        .route("/api/admin/inquiries", get(inquiries::list))
        .route("/api/admin/inquiries/{id}", patch(inquiries::update_status))
        .route("/api/admin/orders", get(orders::list))
        .route("/api/admin/orders/{id}", patch(orders::update_status))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/session", get(admin::session))
        .route("/api/admin/cleanup", post(admin::cleanup))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    public
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
