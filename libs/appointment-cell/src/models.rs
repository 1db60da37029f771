// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::appointment::DEFAULT_DURATION_MINUTES;
use shared_models::error::AppError;
use shared_models::validation::{Validate, ValidationErrors};
use shared_models::{Appointment, Doctor, Patient, RecordId};

pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 480;

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: Option<u32>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    pub fn into_appointment(
        self,
        id: RecordId,
        patient: Patient,
        doctor: Doctor,
        now: DateTime<Utc>,
    ) -> Appointment {
        Appointment {
            id,
            patient,
            doctor,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            reason: self.reason,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for CreateAppointmentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.optional_range(
            "duration_minutes",
            self.duration_minutes,
            MIN_DURATION_MINUTES,
            MAX_DURATION_MINUTES,
        );
        errors.optional_non_blank("reason", self.reason.as_deref());
        errors.into_result()
    }
}

/// Body of `PUT /appointments/{id}`. A new `patient_id` or `doctor_id`
/// re-points the booking; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl UpdateAppointmentRequest {
    pub fn merge_into(
        self,
        current: &Appointment,
        patient: Patient,
        doctor: Doctor,
        now: DateTime<Utc>,
    ) -> Appointment {
        Appointment {
            id: current.id,
            patient,
            doctor,
            scheduled_at: self.scheduled_at.unwrap_or(current.scheduled_at),
            duration_minutes: self.duration_minutes.unwrap_or(current.duration_minutes),
            reason: self.reason.or_else(|| current.reason.clone()),
            notes: self.notes.or_else(|| current.notes.clone()),
            created_at: current.created_at,
            updated_at: now,
        }
    }
}

impl Validate for UpdateAppointmentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.optional_range(
            "duration_minutes",
            self.duration_minutes,
            MIN_DURATION_MINUTES,
            MAX_DURATION_MINUTES,
        );
        errors.optional_non_blank("reason", self.reason.as_deref());
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
}

impl AppointmentQuery {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.patient_id.map_or(true, |id| appointment.is_for_patient(id))
            && self.doctor_id.map_or(true, |id| appointment.is_with_doctor(id))
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

impl From<AppointmentError> for AppError {
    fn from(error: AppointmentError) -> Self {
        match error {
            AppointmentError::Validation(errors) => AppError::from(errors),
            missing => AppError::NotFound(missing.to_string()),
        }
    }
}
