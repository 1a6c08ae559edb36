//! HTTP route handlers, one module per resource.
//!
//! ```text
//! public                              admin (admin_token cookie)
//! ──────                              ──────────────────────────
//! GET  /api/health                    GET|POST        /api/admin/products
//! GET  /api/products[/{id}]           GET|PUT|DELETE  /api/admin/products/{id}
//! GET  /api/projects[/{id}]           GET|POST        /api/admin/projects
//! GET  /api/collections               GET|PUT|DELETE  /api/admin/projects/{id}
//! GET  /api/specifications            POST            /api/admin/collections
//! POST /api/inquiries                 PUT             /api/admin/specifications
//! POST /api/orders      (checkout)    GET             /api/admin/inquiries
//! GET|DELETE /api/cart                PATCH           /api/admin/inquiries/{id}
//! POST /api/cart/items                GET             /api/admin/orders
//! PUT|DELETE /api/cart/items/{id}     PATCH           /api/admin/orders/{id}
//! POST /api/admin/login               GET             /api/admin/stats
//! POST /api/admin/logout              GET             /api/admin/session
//!                                     POST            /api/admin/cleanup
//! ```

pub mod admin;
pub mod cart;
pub mod collections;
pub mod health;
pub mod inquiries;
pub mod orders;
pub mod products;
pub mod projects;
pub mod specifications;

use serde::Serialize;

/// Acknowledgement body for writes that return no record.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Ack {
            success: true,
            message: message.into(),
        }
    }
}
