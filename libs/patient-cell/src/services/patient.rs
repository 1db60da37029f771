use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use shared_database::ClinicDatabase;
use shared_models::validation::Validate;
use shared_models::{Patient, RecordId};
use shared_utils::AppState;

use crate::models::{CreatePatientRequest, PatientError, UpdatePatientRequest};

pub struct PatientService {
    db: Arc<ClinicDatabase>,
}

impl PatientService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: Arc::clone(&state.db),
        }
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        request.validate()?;

        let now = Utc::now();
        let patient = self
            .db
            .patients
            .insert_with(|id| request.into_patient(id, now))
            .await;

        info!("Patient created with ID: {}", patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: RecordId) -> Result<Patient, PatientError> {
        debug!("Fetching patient: {}", patient_id);

        self.db
            .patients
            .get(patient_id)
            .await
            .ok_or(PatientError::NotFound)
    }

    pub async fn list_patients(&self) -> Vec<Patient> {
        self.db.patients.list().await
    }

    pub async fn update_patient(
        &self,
        patient_id: RecordId,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!("Updating patient: {}", patient_id);
        request.validate()?;

        let now = Utc::now();
        self.db
            .patients
            .update_with(patient_id, |current| request.merge_into(current, now))
            .await
            .ok_or(PatientError::NotFound)
    }

    /// Removes the patient together with every appointment booked for them.
    /// Returns how many appointments went with it.
    pub async fn delete_patient(&self, patient_id: RecordId) -> Result<usize, PatientError> {
        let _relations = self.db.lock_relations().await;

        self.db
            .patients
            .remove(patient_id)
            .await
            .ok_or(PatientError::NotFound)?;

        let removed = self
            .db
            .appointments
            .remove_where(|appointment| appointment.is_for_patient(patient_id))
            .await;

        info!(
            "Patient {} deleted along with {} appointment(s)",
            patient_id,
            removed.len()
        );
        Ok(removed.len())
    }
}
