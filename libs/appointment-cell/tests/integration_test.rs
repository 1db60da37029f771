use std::sync::Arc;

use axum::{http::StatusCode, Router};
use chrono::Utc;
use serde_json::json;

use appointment_cell::router::appointment_routes;
use shared_database::ClinicDatabase;
use shared_models::{Doctor, Patient};
use shared_utils::test_utils::{send_json, MockClinicPayloads, TestConfig};

async fn seed_patient(db: &ClinicDatabase, name: &str) -> Patient {
    let now = Utc::now();
    db.patients
        .insert_with(|id| Patient {
            id,
            name: name.to_string(),
            age: Some(40),
            gender: None,
            email: None,
            phone_number: None,
            address: None,
            medical_history: None,
            created_at: now,
            updated_at: now,
        })
        .await
}

async fn seed_doctor(db: &ClinicDatabase, name: &str) -> Doctor {
    let now = Utc::now();
    db.doctors
        .insert_with(|id| Doctor {
            id,
            name: name.to_string(),
            specialty: Some("General Practice".to_string()),
            email: None,
            phone_number: None,
            license_number: None,
            years_experience: None,
            is_available: true,
            created_at: now,
            updated_at: now,
        })
        .await
}

async fn create_test_app() -> (Arc<ClinicDatabase>, Router) {
    let db = Arc::new(ClinicDatabase::new());
    seed_patient(&db, "Alice").await;
    seed_patient(&db, "Bob").await;
    seed_doctor(&db, "Dr. Grey").await;
    seed_doctor(&db, "Dr. Shepherd").await;

    let app = appointment_routes(TestConfig::default().to_state_with(Arc::clone(&db)));
    (db, app)
}

#[tokio::test]
async fn test_create_appointment_embeds_patient_and_doctor() {
    let (_db, app) = create_test_app().await;

    let (status, body) = send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 2))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["patient"]["id"], 1);
    assert_eq!(body["patient"]["name"], "Alice");
    assert_eq!(body["doctor"]["name"], "Dr. Shepherd");
    assert_eq!(body["duration_minutes"], 30);
    assert_eq!(body["scheduled_at"], "2030-03-14T09:30:00Z");
}

#[tokio::test]
async fn test_create_appointment_defaults_duration() {
    let (_db, app) = create_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/",
        Some(json!({ "patient_id": 2, "doctor_id": 1, "scheduled_at": "2030-01-01T08:00:00Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["duration_minutes"], 30);
}

#[tokio::test]
async fn test_create_appointment_unknown_patient_is_not_found() {
    let (db, app) = create_test_app().await;

    let (status, body) = send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(9, 1))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Patient not found");
    assert!(db.appointments.is_empty().await);
}

#[tokio::test]
async fn test_create_appointment_unknown_doctor_is_not_found() {
    let (_db, app) = create_test_app().await;

    let (status, body) = send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 9))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Doctor not found");
}

#[tokio::test]
async fn test_create_appointment_bad_timestamp_is_unprocessable() {
    let (_db, app) = create_test_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/",
        Some(json!({ "patient_id": 1, "doctor_id": 1, "scheduled_at": "next tuesday" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_appointments_filters_by_patient_and_doctor() {
    let (_db, app) = create_test_app().await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 1))).await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 2))).await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(2, 2))).await;

    let (_, all) = send_json(&app, "GET", "/", None).await;
    assert_eq!(all["total"], 3);

    let (_, alices) = send_json(&app, "GET", "/?patient_id=1", None).await;
    assert_eq!(alices["total"], 2);

    let (_, shepherds) = send_json(&app, "GET", "/?doctor_id=2", None).await;
    assert_eq!(shepherds["total"], 2);

    let (status, both) = send_json(&app, "GET", "/?patient_id=2&doctor_id=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(both["total"], 1);
    assert_eq!(both["appointments"][0]["id"], 3);
}

#[tokio::test]
async fn test_list_appointments_bad_filter_is_unprocessable() {
    let (_db, app) = create_test_app().await;

    let (status, body) = send_json(&app, "GET", "/?patient_id=abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_negative_appointment_id_is_not_found() {
    let (_db, app) = create_test_app().await;

    let (status, body) = send_json(&app, "GET", "/-3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Appointment not found");
}

#[tokio::test]
async fn test_update_appointment_merges_and_repoints_doctor() {
    let (_db, app) = create_test_app().await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 1))).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/1",
        Some(json!({ "doctor_id": 2, "notes": "Referred on" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctor"]["id"], 2);
    assert_eq!(body["patient"]["id"], 1);
    assert_eq!(body["reason"], "Annual check-up");
    assert_eq!(body["notes"], "Referred on");
}

#[tokio::test]
async fn test_update_refreshes_patient_snapshot() {
    let (db, app) = create_test_app().await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 1))).await;

    db.patients
        .update_with(1, |patient| Patient {
            name: "Alice Smith".to_string(),
            ..patient.clone()
        })
        .await;

    let (_, before) = send_json(&app, "GET", "/1", None).await;
    assert_eq!(before["patient"]["name"], "Alice");

    let (_, after) = send_json(&app, "PUT", "/1", Some(json!({}))).await;
    assert_eq!(after["patient"]["name"], "Alice Smith");
}

#[tokio::test]
async fn test_update_keeps_snapshot_of_deleted_doctor() {
    let (db, app) = create_test_app().await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 1))).await;
    db.doctors.remove(1).await;

    let (status, body) = send_json(&app, "PUT", "/1", Some(json!({ "duration_minutes": 60 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctor"]["name"], "Dr. Grey");
    assert_eq!(body["duration_minutes"], 60);
}

#[tokio::test]
async fn test_update_to_unknown_patient_is_not_found() {
    let (_db, app) = create_test_app().await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 1))).await;

    let (status, body) = send_json(&app, "PUT", "/1", Some(json!({ "patient_id": 77 }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Patient not found");
}

#[tokio::test]
async fn test_update_unknown_appointment_is_not_found() {
    let (_db, app) = create_test_app().await;

    let (status, body) = send_json(&app, "PUT", "/4", Some(json!({ "notes": "x" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Appointment not found");
}

#[tokio::test]
async fn test_update_with_invalid_duration_is_unprocessable() {
    let (_db, app) = create_test_app().await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 1))).await;

    let (status, _) = send_json(&app, "PUT", "/1", Some(json!({ "duration_minutes": 1000 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_appointment() {
    let (_db, app) = create_test_app().await;
    send_json(&app, "POST", "/", Some(MockClinicPayloads::appointment(1, 1))).await;

    let (status, body) = send_json(&app, "DELETE", "/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Appointment deleted successfully");

    let (status, _) = send_json(&app, "GET", "/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, "DELETE", "/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
