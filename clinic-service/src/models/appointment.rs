use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use super::{required, set_if_some, Record};
use crate::dtos::{AppointmentResponse, CreateAppointmentRequest, UpdateAppointmentRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub patient_name: String,
    pub doctor_name: String,
    /// Free-form date text, stored as given.
    pub date: String,
}

impl Record for Appointment {
    const COLLECTION: &'static str = "appointments";
    const LABEL: &'static str = "Appointment";

    type Create = CreateAppointmentRequest;
    type Update = UpdateAppointmentRequest;
    type Response = AppointmentResponse;

    fn from_create(id: ObjectId, payload: CreateAppointmentRequest) -> Result<Self, AppError> {
        Ok(Self {
            id,
            patient_name: required(payload.patient_name, "patientName")?,
            doctor_name: required(payload.doctor_name, "doctorName")?,
            date: required(payload.date, "date")?,
        })
    }

    fn apply(&mut self, changes: &UpdateAppointmentRequest) -> Result<(), AppError> {
        set_if_some(&mut self.patient_name, &changes.patient_name);
        set_if_some(&mut self.doctor_name, &changes.doctor_name);
        set_if_some(&mut self.date, &changes.date);
        Ok(())
    }

    fn id(&self) -> ObjectId {
        self.id
    }
}
