// src/handlers/profiles.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::tenant::{CreateTenantProfileInput, UpdateTenantProfileInput},
};

// GET /tenant-profile — incluye el tenant dueño para visualización
pub async fn find_all(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let profiles = app_state.profile_service.find_all().await?;
    Ok(Json(profiles))
}

// GET /tenant-profile/{id} — acepta el id o el RUC
pub async fn find_one(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state.profile_service.find_one(&id).await?;
    Ok(Json(profile))
}

pub async fn find_by_tenant(
    State(app_state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state.profile_service.find_by_tenant(tenant_id).await?;
    Ok(Json(profile))
}

pub async fn create(
    State(app_state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<CreateTenantProfileInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = app_state.profile_service.create(tenant_id, payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTenantProfileInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = app_state.profile_service.update(&id, payload).await?;
    Ok(Json(profile))
}

pub async fn remove(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let confirmation = app_state.profile_service.remove(&id).await?;
    Ok(Json(confirmation))
}
