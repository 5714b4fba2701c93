use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use super::{required, set_if_some, Record};
use crate::dtos::{CreateDoctorRequest, DoctorResponse, UpdateDoctorRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub specialization: String,
    pub phone: String,
}

impl Record for Doctor {
    const COLLECTION: &'static str = "doctors";
    const LABEL: &'static str = "Doctor";

    type Create = CreateDoctorRequest;
    type Update = UpdateDoctorRequest;
    type Response = DoctorResponse;

    fn from_create(id: ObjectId, payload: CreateDoctorRequest) -> Result<Self, AppError> {
        Ok(Self {
            id,
            name: required(payload.name, "name")?,
            specialization: required(payload.specialization, "specialization")?,
            phone: required(payload.phone, "phone")?,
        })
    }

    fn apply(&mut self, changes: &UpdateDoctorRequest) -> Result<(), AppError> {
        set_if_some(&mut self.name, &changes.name);
        set_if_some(&mut self.specialization, &changes.specialization);
        set_if_some(&mut self.phone, &changes.phone);
        Ok(())
    }

    fn id(&self) -> ObjectId {
        self.id
    }
}
