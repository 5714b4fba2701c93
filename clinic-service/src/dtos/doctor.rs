use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDoctorRequest {
    #[validate(
        required(message = "Path `name` is required."),
        length(min = 1, message = "Path `name` is required.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Path `specialization` is required."),
        length(min = 1, message = "Path `specialization` is required.")
    )]
    pub specialization: Option<String>,

    #[validate(
        required(message = "Path `phone` is required."),
        length(min = 1, message = "Path `phone` is required.")
    )]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDoctorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Path `name` cannot be empty."))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Path `specialization` cannot be empty."))]
    pub specialization: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Path `phone` cannot be empty."))]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DoctorResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub phone: String,
}

impl From<crate::models::Doctor> for DoctorResponse {
    fn from(doctor: crate::models::Doctor) -> Self {
        Self {
            id: doctor.id.to_hex(),
            name: doctor.name,
            specialization: doctor.specialization,
            phone: doctor.phone,
        }
    }
}
