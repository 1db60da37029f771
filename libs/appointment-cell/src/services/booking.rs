use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use shared_database::ClinicDatabase;
use shared_models::validation::Validate;
use shared_models::{Appointment, Doctor, Patient, RecordId};
use shared_utils::AppState;

use crate::models::{
    AppointmentError, AppointmentQuery, CreateAppointmentRequest, UpdateAppointmentRequest,
};

pub struct AppointmentService {
    db: Arc<ClinicDatabase>,
}

impl AppointmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: Arc::clone(&state.db),
        }
    }

    /// Books an appointment, embedding the current patient and doctor records.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        request.validate()?;

        let _relations = self.db.lock_relations().await;
        let patient = self.resolve_patient(request.patient_id).await?;
        let doctor = self.resolve_doctor(request.doctor_id).await?;

        let now = Utc::now();
        let appointment = self
            .db
            .appointments
            .insert_with(|id| request.into_appointment(id, patient, doctor, now))
            .await;

        info!(
            "Appointment {} booked for patient {} with doctor {} ({} to {})",
            appointment.id,
            appointment.patient.id,
            appointment.doctor.id,
            appointment.scheduled_at,
            appointment.scheduled_end_time()
        );
        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: RecordId) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment: {}", appointment_id);

        self.db
            .appointments
            .get(appointment_id)
            .await
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn list_appointments(&self, query: &AppointmentQuery) -> Vec<Appointment> {
        debug!("Listing appointments with query: {:?}", query);

        self.db
            .appointments
            .filter(|appointment| query.matches(appointment))
            .await
    }

    /// Merges the update into the stored appointment and refreshes the
    /// embedded snapshots. An explicit `patient_id`/`doctor_id` must exist;
    /// otherwise the current record is re-read, falling back to the old
    /// snapshot if that record has since been deleted.
    pub async fn update_appointment(
        &self,
        appointment_id: RecordId,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment: {}", appointment_id);
        request.validate()?;

        let _relations = self.db.lock_relations().await;
        let current = self.get_appointment(appointment_id).await?;

        let patient = match request.patient_id {
            Some(patient_id) => self.resolve_patient(patient_id).await?,
            None => self
                .db
                .patients
                .get(current.patient.id)
                .await
                .unwrap_or_else(|| current.patient.clone()),
        };
        let doctor = match request.doctor_id {
            Some(doctor_id) => self.resolve_doctor(doctor_id).await?,
            None => self
                .db
                .doctors
                .get(current.doctor.id)
                .await
                .unwrap_or_else(|| current.doctor.clone()),
        };

        let now = Utc::now();
        self.db
            .appointments
            .update_with(appointment_id, |existing| {
                request.merge_into(existing, patient, doctor, now)
            })
            .await
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn delete_appointment(&self, appointment_id: RecordId) -> Result<(), AppointmentError> {
        self.db
            .appointments
            .remove(appointment_id)
            .await
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} deleted", appointment_id);
        Ok(())
    }

    async fn resolve_patient(&self, patient_id: RecordId) -> Result<Patient, AppointmentError> {
        self.db
            .patients
            .get(patient_id)
            .await
            .ok_or(AppointmentError::PatientNotFound)
    }

    async fn resolve_doctor(&self, doctor_id: RecordId) -> Result<Doctor, AppointmentError> {
        self.db
            .doctors
            .get(doctor_id)
            .await
            .ok_or(AppointmentError::DoctorNotFound)
    }
}
