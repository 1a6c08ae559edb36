use axum::extract::State;
use axum::Json;
use serde_json::Value;
use sindean_core::SpecificationField;
use tracing::info;

use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<SpecificationField>>> {
    Ok(Json(state.db.specifications().list().await?))
}

/// Replaces the whole template. The body must be a JSON array; its order
/// becomes the field order.
pub async fn replace_all(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<Vec<SpecificationField>>> {
    if !body.is_array() {
        return Err(ApiError::validation("Specifications must be an array"));
    }
    let fields: Vec<SpecificationField> = serde_json::from_value(body)
        .map_err(|err| ApiError::validation(format!("Invalid specification field: {err}")))?;

    state.db.specifications().replace_all(&fields).await?;

    info!(count = fields.len(), "Specification template replaced");
    Ok(Json(fields))
}
