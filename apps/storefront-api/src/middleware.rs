//! Request middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::cookies::{read_cookie, ADMIN_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub email: String,
}

/// Rejects requests without a valid `admin_token` cookie.
pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = read_cookie(req.headers(), ADMIN_COOKIE) else {
        return ApiError::unauthorized("Authentication required").into_response();
    };

    match state.jwt.validate_admin_token(token) {
        Ok(claims) => {
            req.extensions_mut()
                .insert(AdminSession { email: claims.sub });
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
