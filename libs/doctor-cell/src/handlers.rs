use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extractor::{JsonBody, RecordIdPath};
use shared_utils::AppState;

use crate::models::{CreateDoctorRequest, DoctorError, UpdateDoctorRequest};
use crate::services::doctor::DoctorService;

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.create_doctor(request).await?;

    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    RecordIdPath(doctor_id): RecordIdPath,
) -> Result<Json<Value>, AppError> {
    let doctor_id = doctor_id.ok_or(DoctorError::NotFound)?;
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.get_doctor(doctor_id).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<Arc<AppState>>) -> Json<Value> {
    let doctor_service = DoctorService::new(&state);

    let doctors = doctor_service.list_doctors().await;

    Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    }))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<AppState>>,
    RecordIdPath(doctor_id): RecordIdPath,
    JsonBody(request): JsonBody<UpdateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor_id = doctor_id.ok_or(DoctorError::NotFound)?;
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.update_doctor(doctor_id, request).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    RecordIdPath(doctor_id): RecordIdPath,
) -> Result<Json<Value>, AppError> {
    let doctor_id = doctor_id.ok_or(DoctorError::NotFound)?;
    let doctor_service = DoctorService::new(&state);

    doctor_service.delete_doctor(doctor_id).await?;

    Ok(Json(json!({
        "message": "Doctor deleted successfully"
    })))
}
