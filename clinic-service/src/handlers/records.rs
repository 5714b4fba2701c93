//! CRUD handlers shared by every record type.
//!
//! Each handler is generic over [`Record`] and is instantiated once per
//! collection when the router is built.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::models::Record;
use crate::services::{record_write, SharedStore};

/// Create a record from a validated body.
///
/// POST /api/{collection}
pub async fn create_record<R: Record>(
    State(store): State<SharedStore<R>>,
    ValidatedJson(payload): ValidatedJson<R::Create>,
) -> Result<(StatusCode, Json<R::Response>), AppError> {
    let record = R::from_create(ObjectId::new(), payload)?;

    tracing::info!(
        resource = R::COLLECTION,
        record_id = %record.id(),
        "Creating record"
    );

    store
        .insert(&record)
        .await
        .map_err(|e| write_failure::<R>("creating", e))?;
    record_write(R::COLLECTION, "create");

    Ok((StatusCode::CREATED, Json(R::Response::from(record))))
}

/// List every record of the type.
///
/// GET /api/{collection}
pub async fn list_records<R: Record>(
    State(store): State<SharedStore<R>>,
) -> Result<Json<Vec<R::Response>>, AppError> {
    let records = store.list().await.map_err(|e| {
        tracing::error!(resource = R::COLLECTION, error = %e, "Failed to list records");
        e
    })?;

    Ok(Json(records.into_iter().map(R::Response::from).collect()))
}

/// Apply the supplied fields to an existing record.
///
/// PUT /api/{collection}/:id
pub async fn update_record<R: Record>(
    State(store): State<SharedStore<R>>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<R::Update>,
) -> Result<Json<R::Response>, AppError> {
    tracing::info!(resource = R::COLLECTION, record_id = %id, "Updating record");
    let id = parse_id::<R>(&id)?;

    let record = store
        .update(id, &changes)
        .await
        .map_err(|e| write_failure::<R>("updating", e))?
        .ok_or_else(not_found::<R>)?;
    record_write(R::COLLECTION, "update");

    Ok(Json(R::Response::from(record)))
}

/// Remove a record.
///
/// DELETE /api/{collection}/:id
pub async fn delete_record<R: Record>(
    State(store): State<SharedStore<R>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    tracing::info!(resource = R::COLLECTION, record_id = %id, "Deleting record");
    let id = parse_id::<R>(&id)?;

    store
        .delete(id)
        .await
        .map_err(|e| {
            tracing::error!(
                resource = R::COLLECTION,
                record_id = %id,
                error = %e,
                "Failed to delete record"
            );
            e
        })?
        .ok_or_else(not_found::<R>)?;
    record_write(R::COLLECTION, "delete");

    Ok(Json(json!({
        "message": format!("{} deleted successfully", R::LABEL)
    })))
}

/// An id that is not a valid ObjectId cannot name a stored record.
fn parse_id<R: Record>(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| not_found::<R>())
}

fn not_found<R: Record>() -> AppError {
    AppError::NotFound(anyhow::anyhow!("{} not found", R::LABEL))
}

/// Store failures on create/update are reported to the caller as 400.
fn write_failure<R: Record>(action: &str, err: AppError) -> AppError {
    match err {
        AppError::DatabaseError(e) | AppError::InternalError(e) => {
            tracing::error!(resource = R::COLLECTION, error = %e, "Error {} record", action);
            AppError::BadRequest(anyhow::anyhow!(
                "Error {} {}: {}",
                action,
                R::LABEL.to_lowercase(),
                e
            ))
        }
        other => other,
    }
}
