use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use patient_cell::router::patient_routes;
use shared_utils::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic records API is running!" }))
        .route("/home", get(home))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use shared_utils::test_utils::{send_json, MockClinicPayloads, TestConfig};

    fn app() -> Router {
        create_router(TestConfig::default().to_state())
    }

    #[tokio::test]
    async fn test_home_says_hello() {
        let (status, body) = send_json(&app(), "GET", "/home", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Hello World" }));
    }

    #[tokio::test]
    async fn test_root_liveness() {
        let (status, body) = send_json(&app(), "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Clinic records API is running!");
    }

    #[tokio::test]
    async fn test_create_delete_scenario() {
        let app = app();

        let (status, alice) = send_json(&app, "POST", "/patients", Some(json!({ "name": "Alice" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(alice["id"], 1);
        assert_eq!(alice["name"], "Alice");

        let (status, bob) = send_json(&app, "POST", "/patients", Some(json!({ "name": "Bob" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(bob["id"], 2);

        let (status, body) = send_json(&app, "DELETE", "/patients/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Patient deleted successfully");

        let (status, _) = send_json(&app, "GET", "/patients/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patient_delete_cascades_but_doctor_delete_does_not() {
        let app = app();
        send_json(&app, "POST", "/patients", Some(MockClinicPayloads::patient("Alice"))).await;
        send_json(&app, "POST", "/patients", Some(MockClinicPayloads::patient("Bob"))).await;
        send_json(&app, "POST", "/doctors", Some(MockClinicPayloads::doctor("Dr. Grey", "Surgery"))).await;

        for (patient_id, doctor_id) in [(1, 1), (2, 1), (1, 1)] {
            let (status, _) = send_json(
                &app,
                "POST",
                "/appointments",
                Some(MockClinicPayloads::appointment(patient_id, doctor_id)),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        send_json(&app, "DELETE", "/patients/1", None).await;
        let (_, remaining) = send_json(&app, "GET", "/appointments", None).await;
        assert_eq!(remaining["total"], 1);
        assert_eq!(remaining["appointments"][0]["id"], 2);

        send_json(&app, "DELETE", "/doctors/1", None).await;
        let (_, remaining) = send_json(&app, "GET", "/appointments", None).await;
        assert_eq!(remaining["total"], 1);

        let (status, _) = send_json(&app, "GET", "/appointments/2", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found_across_resources() {
        let app = app();
        for uri in ["/patients/1", "/doctors/1", "/appointments/1"] {
            let (status, _) = send_json(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        }
    }
}
