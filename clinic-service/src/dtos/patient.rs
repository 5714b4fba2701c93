use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{Gender, Patient};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePatientRequest {
    #[validate(
        required(message = "Path `name` is required."),
        length(min = 1, message = "Path `name` is required.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Path `age` is required."),
        range(min = 0, message = "Path `age` must be at least 0.")
    )]
    pub age: Option<i64>,

    #[validate(
        required(message = "Path `gender` is required."),
        custom(function = "validate_gender")
    )]
    pub gender: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePatientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Path `name` cannot be empty."))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Path `age` must be at least 0."))]
    pub age: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PatientResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: i64,
    pub gender: Gender,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.to_hex(),
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
        }
    }
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    gender.parse::<Gender>().map(|_| ())
}
