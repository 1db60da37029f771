pub mod appointment;
pub mod doctor;
pub mod error;
pub mod patient;
pub mod validation;

/// Store-assigned identifier shared by every clinic record.
pub type RecordId = u64;

pub use appointment::Appointment;
pub use doctor::Doctor;
pub use patient::Patient;
