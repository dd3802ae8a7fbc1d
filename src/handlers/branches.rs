// src/handlers/branches.rs

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
    models::branch::{CreateBranchInput, UpdateBranchInput},
};

// El derive de `validator` no entra en los elementos del horario
// semanal; se chequea su forma HH:MM a mano antes de llamar al servicio.
fn validate_entries(
    entries: Option<&Vec<crate::models::branch::OpeningHour>>,
) -> Result<(), AppError> {
    if let Some(entries) = entries {
        for entry in entries {
            entry.validate_format().map_err(|e| {
                let mut errors = validator::ValidationErrors::new();
                errors.add("openingHours", e);
                AppError::InvalidPayload(errors)
            })?;
        }
    }
    Ok(())
}

pub async fn find_all(
    State(app_state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let branches = app_state.branch_service.find_all(tenant_id).await?;
    Ok(Json(branches))
}

pub async fn create(
    State(app_state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<CreateBranchInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    validate_entries(payload.opening_hours.as_ref())?;

    let branch = app_state.branch_service.create(tenant_id, payload).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn update(
    State(app_state): State<AppState>,
    Path((tenant_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateBranchInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    validate_entries(payload.opening_hours.as_ref())?;

    let branch = app_state.branch_service.update(tenant_id, id, payload).await?;
    Ok(Json(branch))
}

pub async fn remove(
    State(app_state): State<AppState>,
    Path((tenant_id, id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let confirmation = app_state.branch_service.remove(tenant_id, id).await?;
    Ok(Json(confirmation))
}
