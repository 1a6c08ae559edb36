//! # Cart Storage Seam
//!
//! [`CartStore`] is the persistence boundary of the cart: load the saved
//! lines once when a session opens, save the full line list after every
//! mutation.
//!
//! ```text
//! ┌──────────────┐   load() / save(lines)   ┌──────────────────────────────┐
//! │ CartSession  │ ───────────────────────► │ impl CartStore               │
//! └──────────────┘                          │  • MemoryCartStore (here)    │
//!                                           │  • SqliteCartStore (db crate)│
//!                                           └──────────────────────────────┘
//! ```
//!
//! Both backends store the same payload: a JSON array of [`CartLine`]
//! with camelCase keys.

use std::future::Future;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::CartLine;

/// Cart persistence failures.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The stored payload is not a valid line list.
    #[error("Corrupt cart payload: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The backend itself failed (database, lock, ...).
    #[error("Cart storage failed: {0}")]
    Backend(String),
}

/// Where a cart's lines live between requests.
pub trait CartStore: Send + Sync {
    /// Returns the saved lines, or `None` when nothing was ever saved.
    fn load(&self) -> impl Future<Output = Result<Option<Vec<CartLine>>, CartStoreError>> + Send;

    /// Replaces the saved lines with `lines`.
    fn save(&self, lines: &[CartLine]) -> impl Future<Output = Result<(), CartStoreError>> + Send;
}

/// Serializes lines into the stored payload.
pub fn encode_lines(lines: &[CartLine]) -> Result<String, CartStoreError> {
    Ok(serde_json::to_string(lines)?)
}

/// Parses a stored payload.
pub fn decode_lines(raw: &str) -> Result<Vec<CartLine>, CartStoreError> {
    Ok(serde_json::from_str(raw)?)
}

// =============================================================================
// In-memory backend
// =============================================================================

/// Keeps the serialized payload in memory.
///
/// Clones share the same slot, so a test can hand one clone to a session
/// and inspect what was written through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose slot already holds `raw`, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryCartStore {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The payload currently stored.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Result<Option<Vec<CartLine>>, CartStoreError> {
        let raw = self
            .slot
            .lock()
            .map_err(|_| CartStoreError::Backend("cart slot lock poisoned".to_string()))?
            .clone();

        raw.as_deref().map(decode_lines).transpose()
    }

    async fn save(&self, lines: &[CartLine]) -> Result<(), CartStoreError> {
        let payload = encode_lines(lines)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| CartStoreError::Backend("cart slot lock poisoned".to_string()))?;
        *slot = Some(payload);
        Ok(())
    }
}
