use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;
use shared_models::validation::{Validate, ValidationErrors};
use shared_models::{Patient, RecordId};

pub const MAX_PATIENT_AGE: u32 = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
}

impl CreatePatientRequest {
    pub fn into_patient(self, id: RecordId, now: DateTime<Utc>) -> Patient {
        Patient {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            email: self.email,
            phone_number: self.phone_number,
            address: self.address,
            medical_history: self.medical_history,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for CreatePatientRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.optional_range("age", self.age, 0, MAX_PATIENT_AGE);
        errors.optional_email("email", self.email.as_deref());
        errors.into_result()
    }
}

/// Body of `PUT /patients/{id}`. Any field left out keeps its stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
}

impl UpdatePatientRequest {
    pub fn merge_into(self, current: &Patient, now: DateTime<Utc>) -> Patient {
        Patient {
            id: current.id,
            name: self.name.unwrap_or_else(|| current.name.clone()),
            age: self.age.or(current.age),
            gender: self.gender.or_else(|| current.gender.clone()),
            email: self.email.or_else(|| current.email.clone()),
            phone_number: self.phone_number.or_else(|| current.phone_number.clone()),
            address: self.address.or_else(|| current.address.clone()),
            medical_history: self.medical_history.or_else(|| current.medical_history.clone()),
            created_at: current.created_at,
            updated_at: now,
        }
    }
}

impl Validate for UpdatePatientRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.optional_non_blank("name", self.name.as_deref());
        errors.optional_range("age", self.age, 0, MAX_PATIENT_AGE);
        errors.optional_email("email", self.email.as_deref());
        errors.into_result()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

impl From<PatientError> for AppError {
    fn from(error: PatientError) -> Self {
        match error {
            not_found @ PatientError::NotFound => AppError::NotFound(not_found.to_string()),
            PatientError::Validation(errors) => AppError::from(errors),
        }
    }
}
