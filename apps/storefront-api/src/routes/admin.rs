//! Admin session, dashboard and maintenance routes.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sindean_core::stats::DashboardStats;
use tracing::{info, warn};

use super::Ack;
use crate::cookies::{admin_session_cookie, clear_admin_session_cookie};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::middleware::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub email: String,
}

fn with_cookie(body: impl IntoResponse, cookie: &str) -> ApiResult<Response> {
    let value =
        HeaderValue::from_str(cookie).map_err(|_| ApiError::internal("Invalid session cookie"))?;
    let mut response = body.into_response();
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}

/// Checks the configured admin credentials and sets the `admin_token` cookie.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Response> {
    if !state.admin.verify(&request.email, &request.password) {
        warn!(email = %request.email, "Admin login rejected");
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = state.jwt.issue_admin_token(&request.email)?;
    let cookie = admin_session_cookie(
        &token,
        state.jwt.lifetime_secs(),
        state.config.is_production(),
    );

    info!(email = %request.email, "Admin logged in");
    with_cookie(Json(Ack::ok("Login successful")), &cookie)
}

pub async fn logout(State(state): State<AppState>) -> ApiResult<Response> {
    let cookie = clear_admin_session_cookie(state.config.is_production());
    with_cookie(Json(Ack::ok("Logged out")), &cookie)
}

pub async fn session(Extension(admin): Extension<AdminSession>) -> Json<SessionInfo> {
    Json(SessionInfo {
        authenticated: true,
        email: admin.email,
    })
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(state.db.stats().dashboard(Utc::now()).await?))
}

/// Deletes every stored record. Used to reset a staging database.
pub async fn cleanup(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
) -> ApiResult<Json<Ack>> {
    state.db.purge_all().await?;

    warn!(by = %admin.email, "All storefront data purged");
    Ok(Json(Ack::ok("All data has been cleared successfully.")))
}
