use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::str::FromStr;
use validator::{ValidationError, ValidationErrors};

use super::{required, set_if_some, Record};
use crate::dtos::{CreatePatientRequest, PatientResponse, UpdatePatientRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    /// Exact, case-sensitive match on the stored spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| {
                let mut error = ValidationError::new("enum");
                error.message = Some(
                    format!("`{}` is not a valid enum value for path `gender`.", s).into(),
                );
                error
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub age: i64,
    pub gender: Gender,
}

impl Record for Patient {
    const COLLECTION: &'static str = "patients";
    const LABEL: &'static str = "Patient";

    type Create = CreatePatientRequest;
    type Update = UpdatePatientRequest;
    type Response = PatientResponse;

    fn from_create(id: ObjectId, payload: CreatePatientRequest) -> Result<Self, AppError> {
        let gender = parse_gender(&required(payload.gender, "gender")?)?;

        Ok(Self {
            id,
            name: required(payload.name, "name")?,
            age: required(payload.age, "age")?,
            gender,
        })
    }

    fn apply(&mut self, changes: &UpdatePatientRequest) -> Result<(), AppError> {
        // Parse first so a bad gender leaves the record untouched
        let gender = changes.gender.as_deref().map(parse_gender).transpose()?;

        set_if_some(&mut self.name, &changes.name);
        set_if_some(&mut self.age, &changes.age);
        set_if_some(&mut self.gender, &gender);
        Ok(())
    }

    fn id(&self) -> ObjectId {
        self.id
    }
}

fn parse_gender(value: &str) -> Result<Gender, AppError> {
    value.parse::<Gender>().map_err(|error| {
        let mut errors = ValidationErrors::new();
        errors.add("gender", error);
        AppError::ValidationError(errors)
    })
}
