//! Catalog routes. The storefront sees only `showInStore` products; the
//! admin variants see everything.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sindean_core::input::{NewProduct, ProductPatch};
use sindean_core::Product;
use tracing::info;

use super::Ack;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list_storefront(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list_storefront().await?))
}

pub async fn get_storefront(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .filter(|p| p.show_in_store)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", &id))
}

pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Product>> {
    state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", &id))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = payload.into_product(Utc::now())?;
    let product = state.db.products().insert(&product).await?;

    info!(id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> ApiResult<Json<Product>> {
    let repo = state.db.products();
    let mut product = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    patch.apply(&mut product, Utc::now())?;
    repo.update(&product).await?;

    info!(id = %product.id, "Product updated");
    Ok(Json(product))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Ack>> {
    state.db.products().delete(&id).await?;

    info!(id = %id, "Product deleted");
    Ok(Json(Ack::ok("Product deleted")))
}

#[cfg(test)]
mod tests {
    use crate::state::test_support::{admin_cookie, app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_requires_admin() {
        let (app, _) = app().await;
        let (status, _, body) = send(
            &app,
            "POST",
            "/api/admin/products",
            None,
            Some(json!({ "nameEn": "Oak" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);

        let (status, _, body) = send(
            &app,
            "POST",
            "/api/admin/products",
            Some(&cookie),
            Some(json!({
                "id": "wd-101",
                "nameEn": "Oak Classic",
                "price": 100000,
                "priceTiers": [{ "min": 5, "price": 90000 }]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "wd-101");
        assert_eq!(body["category"], "interior");
        assert_eq!(body["showInStore"], true);
        assert!(body["ref"].as_str().unwrap().starts_with("WDF-NEW-"));
        assert_eq!(body["priceTiers"][0]["price"], 90000);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payloads() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);

        let (status, _, body) = send(
            &app,
            "POST",
            "/api/admin/products",
            Some(&cookie),
            Some(json!({ "nameEn": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _, body) = send(
            &app,
            "POST",
            "/api/admin/products",
            Some(&cookie),
            Some(json!({ "nameEn": "Oak", "category": "wooden" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_price_above_ceiling_rejected() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);

        let (status, _, body) = send(
            &app,
            "POST",
            "/api/admin/products",
            Some(&cookie),
            Some(json!({ "id": "wd-1", "nameEn": "Oak", "price": 10_000_000_001_i64 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "price must be between 0 and 10000000000");

        let (status, _, body) = send(
            &app,
            "POST",
            "/api/admin/products",
            Some(&cookie),
            Some(json!({
                "id": "wd-2",
                "nameEn": "Oak",
                "price": 1000,
                "priceTiers": [{ "min": 5, "price": i64::MAX / 500 }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _, _) = send(
            &app,
            "POST",
            "/api/admin/products",
            Some(&cookie),
            Some(json!({ "id": "wd-3", "nameEn": "Oak", "price": 10_000_000_000_i64 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_storefront_hides_unlisted_products() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);
        for (id, visible) in [("shown", true), ("hidden", false)] {
            send(
                &app,
                "POST",
                "/api/admin/products",
                Some(&cookie),
                Some(json!({ "id": id, "nameEn": id, "showInStore": visible })),
            )
            .await;
        }

        let (_, _, public) = send(&app, "GET", "/api/products", None, None).await;
        assert_eq!(public.as_array().unwrap().len(), 1);
        assert_eq!(public[0]["id"], "shown");

        let (status, _, _) = send(&app, "GET", "/api/products/hidden", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, _, all) = send(&app, "GET", "/api/admin/products", Some(&cookie), None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);
        send(
            &app,
            "POST",
            "/api/admin/products",
            Some(&cookie),
            Some(json!({ "id": "wd-1", "nameEn": "Oak", "price": 1000 })),
        )
        .await;

        let (status, _, body) = send(
            &app,
            "PUT",
            "/api/admin/products/wd-1",
            Some(&cookie),
            Some(json!({ "price": 1200, "badges": ["new"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 1200);
        assert_eq!(body["nameEn"], "Oak");
        assert_eq!(body["badges"][0], "new");

        let (status, _, _) =
            send(&app, "DELETE", "/api/admin/products/wd-1", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) =
            send(&app, "DELETE", "/api/admin/products/wd-1", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");

        let (status, _, _) = send(
            &app,
            "PUT",
            "/api/admin/products/wd-1",
            Some(&cookie),
            Some(json!({ "price": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);
        let body = json!({ "id": "wd-1", "nameEn": "Oak" });

        send(&app, "POST", "/api/admin/products", Some(&cookie), Some(body.clone())).await;
        let (status, _, body) =
            send(&app, "POST", "/api/admin/products", Some(&cookie), Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");
    }
}
