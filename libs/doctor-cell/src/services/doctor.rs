use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use shared_database::ClinicDatabase;
use shared_models::validation::Validate;
use shared_models::{Doctor, RecordId};
use shared_utils::AppState;

use crate::models::{CreateDoctorRequest, DoctorError, UpdateDoctorRequest};

pub struct DoctorService {
    db: Arc<ClinicDatabase>,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: Arc::clone(&state.db),
        }
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        request.validate()?;

        let now = Utc::now();
        let doctor = self
            .db
            .doctors
            .insert_with(|id| request.into_doctor(id, now))
            .await;

        info!("Doctor created with ID: {}", doctor.id);
        Ok(doctor)
    }

    pub async fn get_doctor(&self, doctor_id: RecordId) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor: {}", doctor_id);

        self.db
            .doctors
            .get(doctor_id)
            .await
            .ok_or(DoctorError::NotFound)
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.db.doctors.list().await
    }

    pub async fn update_doctor(
        &self,
        doctor_id: RecordId,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, DoctorError> {
        debug!("Updating doctor: {}", doctor_id);
        request.validate()?;

        let now = Utc::now();
        self.db
            .doctors
            .update_with(doctor_id, |current| request.merge_into(current, now))
            .await
            .ok_or(DoctorError::NotFound)
    }

    /// Removes the doctor record only. Appointments booked with this doctor
    /// keep their embedded snapshot and stay in place.
    pub async fn delete_doctor(&self, doctor_id: RecordId) -> Result<(), DoctorError> {
        self.db
            .doctors
            .remove(doctor_id)
            .await
            .ok_or(DoctorError::NotFound)?;

        info!("Doctor {} deleted", doctor_id);
        Ok(())
    }
}
