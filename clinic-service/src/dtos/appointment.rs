use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[validate(
        required(message = "Path `patientName` is required."),
        length(min = 1, message = "Path `patientName` is required.")
    )]
    pub patient_name: Option<String>,

    #[validate(
        required(message = "Path `doctorName` is required."),
        length(min = 1, message = "Path `doctorName` is required.")
    )]
    pub doctor_name: Option<String>,

    #[validate(
        required(message = "Path `date` is required."),
        length(min = 1, message = "Path `date` is required.")
    )]
    pub date: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Path `patientName` cannot be empty."))]
    pub patient_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Path `doctorName` cannot be empty."))]
    pub doctor_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Path `date` cannot be empty."))]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
}

impl From<crate::models::Appointment> for AppointmentResponse {
    fn from(appointment: crate::models::Appointment) -> Self {
        Self {
            id: appointment.id.to_hex(),
            patient_name: appointment.patient_name,
            doctor_name: appointment.doctor_name,
            date: appointment.date,
        }
    }
}
