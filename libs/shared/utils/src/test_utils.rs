use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shared_config::AppConfig;
use shared_database::ClinicDatabase;

use crate::state::AppState;

pub struct TestConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            host: self.host,
            port: self.port,
        }
    }

    /// Fresh state backed by an empty database.
    pub fn to_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config()))
    }

    /// State sharing `db`, so a test can seed or inspect the tables directly.
    pub fn to_state_with(&self, db: Arc<ClinicDatabase>) -> Arc<AppState> {
        Arc::new(AppState::with_database(self.to_app_config(), db))
    }
}

/// Request bodies shaped like real client payloads.
pub struct MockClinicPayloads;

impl MockClinicPayloads {
    pub fn patient(name: &str) -> Value {
        json!({
            "name": name,
            "age": 34,
            "gender": "female",
            "email": format!("{}@example.com", name.to_lowercase()),
            "phone_number": "+353 1 555 0100",
            "address": "1 Main Street, Dublin",
            "medical_history": "None reported"
        })
    }

    pub fn doctor(name: &str, specialty: &str) -> Value {
        json!({
            "name": name,
            "specialty": specialty,
            "email": "doctor@example.com",
            "license_number": "MD123456",
            "years_experience": 10
        })
    }

    pub fn appointment(patient_id: u64, doctor_id: u64) -> Value {
        json!({
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "scheduled_at": "2030-03-14T09:30:00Z",
            "duration_minutes": 30,
            "reason": "Annual check-up"
        })
    }
}

/// Sends one request through `app` and decodes the JSON response body.
///
/// An empty body decodes to `Value::Null`; a non-JSON body becomes a
/// `Value::String`.
pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}
