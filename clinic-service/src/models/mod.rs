//! Stored record types.
//!
//! Each record is a flat document with no references to the others. The
//! [`Record`] trait ties a stored type to its collection, its request and
//! response bodies, and the checked conversions from those requests.

mod appointment;
mod doctor;
mod patient;

pub use appointment::Appointment;
pub use doctor::Doctor;
pub use patient::{Gender, Patient};

use mongodb::bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};
use service_core::error::AppError;
use validator::{Validate, ValidationError, ValidationErrors};

pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// MongoDB collection holding this record type.
    const COLLECTION: &'static str;
    /// Name used in response messages, e.g. "Doctor not found".
    const LABEL: &'static str;

    /// Body accepted by the create operation.
    type Create: DeserializeOwned + Validate + Send + 'static;
    /// Body accepted by the update operation. Serializes to only the supplied fields.
    type Update: DeserializeOwned + Serialize + Validate + Send + Sync + 'static;
    /// JSON shape returned to clients, with the id rendered as hex.
    type Response: Serialize + From<Self> + Send + 'static;

    /// Build the stored record from a create body under the given id.
    fn from_create(id: ObjectId, payload: Self::Create) -> Result<Self, AppError>;

    /// Overwrite the fields supplied in `changes`.
    fn apply(&mut self, changes: &Self::Update) -> Result<(), AppError>;

    fn id(&self) -> ObjectId;
}

/// Take a field that validation already marked as required.
pub(crate) fn required<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or_else(|| {
        let mut error = ValidationError::new("required");
        error.message = Some(format!("Path `{}` is required.", field).into());
        let mut errors = ValidationErrors::new();
        errors.add(field, error);
        AppError::ValidationError(errors)
    })
}

/// Replace `target` when an update supplies a value.
pub(crate) fn set_if_some<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
