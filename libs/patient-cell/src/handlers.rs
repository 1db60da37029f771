use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extractor::{JsonBody, RecordIdPath};
use shared_utils::AppState;

use crate::models::{CreatePatientRequest, PatientError, UpdatePatientRequest};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let patient_service = PatientService::new(&state);

    let patient = patient_service.create_patient(request).await?;

    Ok((StatusCode::CREATED, Json(json!(patient))))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    RecordIdPath(patient_id): RecordIdPath,
) -> Result<Json<Value>, AppError> {
    let patient_id = patient_id.ok_or(PatientError::NotFound)?;
    let patient_service = PatientService::new(&state);

    let patient = patient_service.get_patient(patient_id).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn list_patients(State(state): State<Arc<AppState>>) -> Json<Value> {
    let patient_service = PatientService::new(&state);

    let patients = patient_service.list_patients().await;

    Json(json!({
        "patients": patients,
        "total": patients.len()
    }))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    RecordIdPath(patient_id): RecordIdPath,
    JsonBody(request): JsonBody<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let patient_id = patient_id.ok_or(PatientError::NotFound)?;
    let patient_service = PatientService::new(&state);

    let patient = patient_service.update_patient(patient_id, request).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    RecordIdPath(patient_id): RecordIdPath,
) -> Result<Json<Value>, AppError> {
    let patient_id = patient_id.ok_or(PatientError::NotFound)?;
    let patient_service = PatientService::new(&state);

    patient_service.delete_patient(patient_id).await?;

    Ok(Json(json!({
        "message": "Patient deleted successfully"
    })))
}
