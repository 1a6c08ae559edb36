//! Portfolio routes. Drafts are visible only to the admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sindean_core::input::{NewProject, ProjectPatch};
use sindean_core::{Project, ProjectStatus};
use tracing::info;

use super::Ack;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list_published(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.db.projects().list().await?;
    Ok(Json(
        projects
            .into_iter()
            .filter(|p| p.status == ProjectStatus::Published)
            .collect(),
    ))
}

pub async fn get_published(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Project>> {
    state
        .db
        .projects()
        .get_by_id(&id)
        .await?
        .filter(|p| p.status == ProjectStatus::Published)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project", &id))
}

pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.db.projects().list().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Project>> {
    state
        .db
        .projects()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project", &id))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = payload.into_project(Utc::now())?;
    let project = state.db.projects().insert(&project).await?;

    info!(id = %project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProjectPatch>,
) -> ApiResult<Json<Project>> {
    let repo = state.db.projects();
    let mut project = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project", &id))?;

    patch.apply(&mut project, Utc::now())?;
    repo.update(&project).await?;

    Ok(Json(project))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Ack>> {
    state.db.projects().delete(&id).await?;

    info!(id = %id, "Project deleted");
    Ok(Json(Ack::ok("Project deleted")))
}
