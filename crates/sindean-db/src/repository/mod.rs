//! # Repositories
//!
//! One repository per table, each holding a clone of the pool.
//!
//! ## Row Mapping
//! ```text
//! SQLite row ──FromRow──► XxxRow ──TryFrom──► sindean_core::Xxx
//!                         (JSON columns as String)   (decode_json per column)
//! ```
//! Queries are checked at runtime (`query_as::<_, Row>`), so building the
//! crate never needs a live database.

pub mod cart;
pub mod collection;
pub mod inquiry;
pub mod order;
pub mod product;
pub mod project;
pub mod specification;
pub mod stats;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DbError, DbResult};

/// Serializes a value for a JSON TEXT column.
pub(crate) fn encode_json<T: Serialize + ?Sized>(column: &str, value: &T) -> DbResult<String> {
    serde_json::to_string(value).map_err(|e| DbError::corrupt(column, e))
}

/// Parses a JSON TEXT column.
pub(crate) fn decode_json<T: DeserializeOwned>(column: &str, raw: &str) -> DbResult<T> {
    serde_json::from_str(raw).map_err(|e| DbError::corrupt(column, e))
}
