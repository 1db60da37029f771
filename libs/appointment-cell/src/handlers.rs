use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extractor::{JsonBody, QueryParams, RecordIdPath};
use shared_utils::AppState;

use crate::models::{
    AppointmentError, AppointmentQuery, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::services::AppointmentService;

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service.create_appointment(request).await?;

    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    RecordIdPath(appointment_id): RecordIdPath,
) -> Result<Json<Value>, AppError> {
    let appointment_id = appointment_id.ok_or(AppointmentError::NotFound)?;
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service.get_appointment(appointment_id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<AppointmentQuery>,
) -> Json<Value> {
    let appointment_service = AppointmentService::new(&state);

    let appointments = appointment_service.list_appointments(&query).await;

    Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    }))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    RecordIdPath(appointment_id): RecordIdPath,
    JsonBody(request): JsonBody<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment_id = appointment_id.ok_or(AppointmentError::NotFound)?;
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service
        .update_appointment(appointment_id, request)
        .await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    RecordIdPath(appointment_id): RecordIdPath,
) -> Result<Json<Value>, AppError> {
    let appointment_id = appointment_id.ok_or(AppointmentError::NotFound)?;
    let appointment_service = AppointmentService::new(&state);

    appointment_service.delete_appointment(appointment_id).await?;

    Ok(Json(json!({
        "message": "Appointment deleted successfully"
    })))
}
