// src/handlers/plans.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::plan::{CreatePlanInput, PlanFilters, UpdatePlanInput},
};

// GET /plans?active=false&orderName=DESC&orderPrice=ASC
pub async fn find_all(
    State(app_state): State<AppState>,
    Query(filters): Query<PlanFilters>,
) -> Result<impl IntoResponse, AppError> {
    let plans = app_state.plan_service.find_all(&filters).await?;
    Ok(Json(plans))
}

// GET /plans/{id} — acepta el id o el código ("FREE")
pub async fn find_one(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let plan = app_state.plan_service.find_one(&id).await?;
    Ok(Json(plan))
}

pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePlanInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let plan = app_state.plan_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePlanInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let plan = app_state.plan_service.update(&id, payload).await?;
    Ok(Json(plan))
}

// DELETE /plans/{id} — baja comercial, nunca borrado físico
pub async fn deactivate(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let plan = app_state.plan_service.deactivate(&id).await?;
    Ok(Json(plan))
}
