use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sindean_core::input::{InquiryStatusUpdate, NewInquiry};
use sindean_core::Inquiry;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

/// Contact form submission. New inquiries start as `pending`.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewInquiry>,
) -> ApiResult<(StatusCode, Json<Inquiry>)> {
    let inquiry = payload.into_inquiry(Utc::now())?;
    let inquiry = state.db.inquiries().insert(&inquiry).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Inquiry>>> {
    Ok(Json(state.db.inquiries().list().await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<InquiryStatusUpdate>,
) -> ApiResult<Json<Inquiry>> {
    let inquiry = state.db.inquiries().update_status(&id, update.status).await?;
    Ok(Json(inquiry))
}

#[cfg(test)]
mod tests {
    use crate::state::test_support::{admin_cookie, app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_submit_and_mark_contacted() {
        let (app, state) = app().await;

        let (status, _, body) = send(
            &app,
            "POST",
            "/api/inquiries",
            None,
            Some(json!({
                "name": "Huda",
                "phone": "+966500000000",
                "details": "Need 12 fire doors",
                "productId": "fire-60"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["message"], "Need 12 fire doors");
        let id = body["id"].as_str().unwrap().to_string();

        let cookie = admin_cookie(&state);
        let (status, _, body) = send(
            &app,
            "PATCH",
            &format!("/api/admin/inquiries/{id}"),
            Some(&cookie),
            Some(json!({ "status": "contacted" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "contacted");

        let (_, _, list) = send(&app, "GET", "/api/admin/inquiries", Some(&cookie), None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["status"], "contacted");
    }

    #[tokio::test]
    async fn test_missing_phone_rejected() {
        let (app, _) = app().await;
        let (status, _, body) = send(
            &app,
            "POST",
            "/api/inquiries",
            None,
            Some(json!({ "name": "Huda", "message": "Hello" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "phone is required");
    }

    #[tokio::test]
    async fn test_listing_requires_admin() {
        let (app, _) = app().await;
        let (status, _, _) = send(&app, "GET", "/api/admin/inquiries", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_inquiry_status_update() {
        let (app, state) = app().await;
        let cookie = admin_cookie(&state);
        let (status, _, _) = send(
            &app,
            "PATCH",
            "/api/admin/inquiries/nope",
            Some(&cookie),
            Some(json!({ "status": "read" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
