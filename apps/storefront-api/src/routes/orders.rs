//! Checkout and order administration.
//!
//! ```text
//! POST /api/orders
//!   body.items ──► products.get_many(ids) ──► storefront-visible only
//!                                  │
//!                                  ▼
//!        price_checkout(request, catalog, cod_fee)   (server prices win)
//!                                  │
//!                                  ▼
//!        orders.insert(order) ──► session cart row dropped ──► 201 Order
//! ```

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use sindean_core::checkout::{new_order_id, price_checkout, CheckoutRequest};
use sindean_core::input::OrderStatusUpdate;
use sindean_core::Order;
use tracing::{info, warn};

use crate::cookies::{read_cookie, CART_COOKIE};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let ids: Vec<&str> = request.items.iter().map(|i| i.product_id.as_str()).collect();
    let catalog: Vec<_> = state
        .db
        .products()
        .get_many(&ids)
        .await?
        .into_iter()
        .filter(|p| p.show_in_store)
        .collect();

    let quote = price_checkout(&request, &catalog, state.config.cod_fee())?;

    let now = Utc::now();
    let order = quote.into_order(&request, new_order_id(now), now);
    let order = state.db.orders().insert(&order).await?;

    info!(
        id = %order.id,
        total = order.total_amount.halalas(),
        payment = ?order.payment_method,
        "Order placed"
    );

    if let Some(cart_id) = read_cookie(&headers, CART_COOKIE) {
        if let Err(err) = state.db.carts().delete(cart_id).await {
            warn!(error = %err, "Failed to clear cart after checkout");
        }
    }

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.db.orders().list().await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<OrderStatusUpdate>,
) -> ApiResult<Json<Order>> {
    let order = state
        .db
        .orders()
        .update_status(&id, update.status, Utc::now())
        .await?;

    info!(id = %order.id, status = ?order.status, "Order status updated");
    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use crate::state::test_support::{admin_cookie, app, send};
    use axum::http::StatusCode;
    use axum::Router;
    use serde_json::{json, Value};

    async fn seed_door(app: &Router, cookie: &str, id: &str, visible: bool) {
        let (status, _, _) = send(
            app,
            "POST",
            "/api/admin/products",
            Some(cookie),
            Some(json!({
                "id": id,
                "nameEn": "Oak Classic",
                "price": 100000,
                "priceTiers": [{ "min": 5, "price": 90000 }, { "min": 10, "price": 80000 }],
                "showInStore": visible
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    fn customer() -> Value {
        json!({
            "firstName": "Huda",
            "lastName": "Al Harbi",
            "email": "huda@example.com",
            "phone": "+966500000000",
            "city": "Riyadh"
        })
    }

    #[tokio::test]
    async fn test_checkout_uses_catalog_prices_and_cod_fee() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);
        seed_door(&app, &cookie, "wd-1", true).await;

        let (status, _, order) = send(
            &app,
            "POST",
            "/api/orders",
            None,
            Some(json!({
                "items": [{ "productId": "wd-1", "quantity": 7, "price": 1 }],
                "customer": customer(),
                "total": 5,
                "paymentMethod": "cod"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(order["id"].as_str().unwrap().starts_with("ORD-"));
        assert_eq!(order["customerName"], "Huda Al Harbi");
        assert_eq!(order["items"][0]["price"], 90000);
        assert_eq!(order["subtotal"], 630000);
        assert_eq!(order["fees"], 1500);
        assert_eq!(order["totalAmount"], 631500);
        assert_eq!(order["status"], "pending");
    }

    #[tokio::test]
    async fn test_checkout_without_fee_for_bank_transfer() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);
        seed_door(&app, &cookie, "wd-1", true).await;

        let (_, _, order) = send(
            &app,
            "POST",
            "/api/orders",
            None,
            Some(json!({
                "items": [{ "productId": "wd-1", "quantity": 10 }],
                "customer": customer(),
                "paymentMethod": "bank_transfer",
                "locale": "ar"
            })),
        )
        .await;
        assert_eq!(order["fees"], 0);
        assert_eq!(order["totalAmount"], 800000);
        assert_eq!(order["locale"], "ar");
    }

    #[tokio::test]
    async fn test_checkout_rejects_hidden_and_empty() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);
        seed_door(&app, &cookie, "hidden", false).await;

        let (status, _, body) = send(
            &app,
            "POST",
            "/api/orders",
            None,
            Some(json!({
                "items": [{ "productId": "hidden", "quantity": 1 }],
                "customer": customer()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found: hidden");

        let (status, _, body) = send(
            &app,
            "POST",
            "/api/orders",
            None,
            Some(json!({ "items": [], "customer": customer() })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Cart is empty");
    }

    #[tokio::test]
    async fn test_admin_updates_status() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);
        seed_door(&app, &cookie, "wd-1", true).await;

        let (_, _, order) = send(
            &app,
            "POST",
            "/api/orders",
            None,
            Some(json!({
                "items": [{ "productId": "wd-1", "quantity": 1 }],
                "customer": customer()
            })),
        )
        .await;
        let id = order["id"].as_str().unwrap();

        let (status, _, updated) = send(
            &app,
            "PATCH",
            &format!("/api/admin/orders/{id}"),
            Some(&cookie),
            Some(json!({ "status": "processing" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "processing");

        let (_, _, list) = send(&app, "GET", "/api/admin/orders", Some(&cookie), None).await;
        assert_eq!(list[0]["status"], "processing");
    }
}
