use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;
use shared_models::validation::{Validate, ValidationErrors};
use shared_models::{Doctor, RecordId};

pub const MAX_YEARS_EXPERIENCE: u32 = 80;

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub license_number: Option<String>,
    pub years_experience: Option<u32>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl CreateDoctorRequest {
    pub fn into_doctor(self, id: RecordId, now: DateTime<Utc>) -> Doctor {
        Doctor {
            id,
            name: self.name,
            specialty: self.specialty,
            email: self.email,
            phone_number: self.phone_number,
            license_number: self.license_number,
            years_experience: self.years_experience,
            is_available: self.is_available,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for CreateDoctorRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.optional_non_blank("specialty", self.specialty.as_deref());
        errors.optional_non_blank("license_number", self.license_number.as_deref());
        errors.optional_email("email", self.email.as_deref());
        errors.optional_range("years_experience", self.years_experience, 0, MAX_YEARS_EXPERIENCE);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub license_number: Option<String>,
    pub years_experience: Option<u32>,
    pub is_available: Option<bool>,
}

impl UpdateDoctorRequest {
    pub fn merge_into(self, current: &Doctor, now: DateTime<Utc>) -> Doctor {
        Doctor {
            id: current.id,
            name: self.name.unwrap_or_else(|| current.name.clone()),
            specialty: self.specialty.or_else(|| current.specialty.clone()),
            email: self.email.or_else(|| current.email.clone()),
            phone_number: self.phone_number.or_else(|| current.phone_number.clone()),
            license_number: self.license_number.or_else(|| current.license_number.clone()),
            years_experience: self.years_experience.or(current.years_experience),
            is_available: self.is_available.unwrap_or(current.is_available),
            created_at: current.created_at,
            updated_at: now,
        }
    }
}

impl Validate for UpdateDoctorRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.optional_non_blank("name", self.name.as_deref());
        errors.optional_non_blank("specialty", self.specialty.as_deref());
        errors.optional_non_blank("license_number", self.license_number.as_deref());
        errors.optional_email("email", self.email.as_deref());
        errors.optional_range("years_experience", self.years_experience, 0, MAX_YEARS_EXPERIENCE);
        errors.into_result()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

impl From<DoctorError> for AppError {
    fn from(error: DoctorError) -> Self {
        match error {
            not_found @ DoctorError::NotFound => AppError::NotFound(not_found.to_string()),
            DoctorError::Validation(errors) => AppError::from(errors),
        }
    }
}
