//! Session cart over HTTP.
//!
//! The `cart_id` cookie names a row in the `carts` table. Each request opens
//! its own [`CartSession`] over that row, applies one mutation and answers
//! with the priced `CartSummary`. A request without a usable cookie gets a
//! fresh id and a `Set-Cookie` header.

use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sindean_core::cart::{CartOptions, CartProduct, CartSession};
use sindean_core::validation::{validate_quantity, validate_uuid};
use sindean_core::{CoreError, MAX_CART_LINES};
use sindean_db::SqliteCartStore;
use tracing::debug;
use uuid::Uuid;

use crate::cookies::{cart_cookie, read_cookie, CART_COOKIE};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub finish: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

// =============================================================================
// Session plumbing
// =============================================================================

struct SessionCart {
    session: CartSession<SqliteCartStore>,
    /// `Set-Cookie` value when the id was minted by this request.
    new_cookie: Option<String>,
}

impl SessionCart {
    async fn open(state: &AppState, headers: &HeaderMap) -> Self {
        let existing = read_cookie(headers, CART_COOKIE)
            .filter(|id| validate_uuid(id).is_ok())
            .map(str::to_string);

        let (cart_id, new_cookie) = match existing {
            Some(id) => (id, None),
            None => {
                let id = Uuid::new_v4().to_string();
                debug!(cart_id = %id, "Issuing new cart id");
                let cookie = cart_cookie(&id, state.config.is_production());
                (id, Some(cookie))
            }
        };

        let session = CartSession::open(state.db.carts().store(cart_id)).await;
        SessionCart {
            session,
            new_cookie,
        }
    }

    fn respond(self) -> ApiResult<Response> {
        let mut response = Json(self.session.summary()).into_response();
        if let Some(cookie) = self.new_cookie {
            let value = HeaderValue::from_str(&cookie)
                .map_err(|_| ApiError::internal("Invalid cart cookie"))?;
            response.headers_mut().insert(SET_COOKIE, value);
        }
        Ok(response)
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart, re-priced against the storefront catalog. Lines whose
/// product was deleted or hidden are dropped.
pub async fn get(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let mut cart = SessionCart::open(&state, &headers).await;

    if !cart.session.cart().is_empty() {
        let ids: Vec<String> = cart
            .session
            .lines()
            .iter()
            .map(|l| l.product_id().to_string())
            .collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let catalog: Vec<_> = state
            .db
            .products()
            .get_many(&ids)
            .await?
            .into_iter()
            .filter(|p| p.show_in_store)
            .collect();
        cart.session.sync_with_catalog(&catalog).await?;
    }

    cart.respond()
}

pub async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<AddItemRequest>,
) -> ApiResult<Response> {
    validate_quantity(request.quantity)?;

    let product = state
        .db
        .products()
        .get_by_id(&request.product_id)
        .await?
        .filter(|p| p.show_in_store)
        .ok_or_else(|| CoreError::ProductNotFound(request.product_id.clone()))?;

    let mut cart = SessionCart::open(&state, &headers).await;
    match cart.session.cart().quantity_of(&product.id) {
        Some(current) => validate_quantity(current + request.quantity)?,
        None if cart.session.lines().len() >= MAX_CART_LINES => {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            }
            .into());
        }
        None => {}
    }

    let options = CartOptions {
        finish: request.finish,
        size: request.size,
    };
    cart.session
        .add(CartProduct::from(&product), request.quantity, options)
        .await?;

    cart.respond()
}

/// Sets a line's quantity; below 1 removes the line.
pub async fn set_quantity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    ApiJson(update): ApiJson<QuantityUpdate>,
) -> ApiResult<Response> {
    if update.quantity >= 1 {
        validate_quantity(update.quantity)?;
    }

    let mut cart = SessionCart::open(&state, &headers).await;
    if cart.session.cart().quantity_of(&product_id).is_none() {
        return Err(ApiError::not_found("Cart item", &product_id));
    }
    cart.session.set_quantity(&product_id, update.quantity).await?;

    cart.respond()
}

pub async fn remove_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> ApiResult<Response> {
    let mut cart = SessionCart::open(&state, &headers).await;
    cart.session.remove(&product_id).await?;
    cart.respond()
}

pub async fn clear(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let mut cart = SessionCart::open(&state, &headers).await;
    cart.session.clear().await?;
    cart.respond()
}
