//! Request and response bodies for the record endpoints.
//!
//! Create bodies mark every field `required`; update bodies accept any subset
//! of fields and check only the ones supplied. Update bodies serialize back to
//! just the supplied fields so they can be applied as a partial `$set`.
//! Response bodies render the record id as a hex string.

mod appointment;
mod doctor;
mod patient;

pub use appointment::{AppointmentResponse, CreateAppointmentRequest, UpdateAppointmentRequest};
pub use doctor::{CreateDoctorRequest, DoctorResponse, UpdateDoctorRequest};
pub use patient::{CreatePatientRequest, PatientResponse, UpdatePatientRequest};
