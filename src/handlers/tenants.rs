// src/handlers/tenants.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::tenant::CreateTenantInput};

// POST /tenants — crea el tenant y, en la misma transacción, su perfil
// fiscal semilla a partir del RUC del payload.
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTenantInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tenant = app_state.tenant_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

pub async fn find_one(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = app_state.tenant_service.find_one(id).await?;
    Ok(Json(tenant))
}

pub async fn deactivate(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = app_state.tenant_service.deactivate(id).await?;
    Ok(Json(tenant))
}
