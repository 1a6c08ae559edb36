use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sindean_core::input::NewCollection;
use sindean_core::Collection;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Collection>>> {
    Ok(Json(state.db.collections().list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewCollection>,
) -> ApiResult<(StatusCode, Json<Collection>)> {
    let collection = payload.into_collection(Utc::now())?;
    let collection = state.db.collections().insert(&collection).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}
