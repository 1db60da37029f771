pub mod memory;

use tokio::sync::{Mutex, MutexGuard};

use shared_models::{Appointment, Doctor, Patient};

pub use memory::MemoryTable;

/// Process-lifetime storage for every clinic record kind.
///
/// Each table is independently locked. Operations that must observe more
/// than one table consistently (cascading deletes, booking against a
/// patient and doctor) hold [`ClinicDatabase::lock_relations`] for their
/// whole duration.
pub struct ClinicDatabase {
    pub patients: MemoryTable<Patient>,
    pub doctors: MemoryTable<Doctor>,
    pub appointments: MemoryTable<Appointment>,
    relations: Mutex<()>,
}

impl ClinicDatabase {
    pub fn new() -> Self {
        Self {
            patients: MemoryTable::new("patients"),
            doctors: MemoryTable::new("doctors"),
            appointments: MemoryTable::new("appointments"),
            relations: Mutex::new(()),
        }
    }

    pub async fn lock_relations(&self) -> MutexGuard<'_, ()> {
        self.relations.lock().await
    }
}

impl Default for ClinicDatabase {
    fn default() -> Self {
        Self::new()
    }
}
