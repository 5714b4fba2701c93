use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection,
};
use service_core::error::AppError;
use std::sync::Arc;

use super::ClinicDb;
use crate::models::Record;

/// Single-document persistence for one record type.
///
/// `update` and `delete` return `None` when no record has the id; callers
/// decide how to report that.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    async fn insert(&self, record: &R) -> Result<(), AppError>;

    /// All records in natural storage order.
    async fn list(&self) -> Result<Vec<R>, AppError>;

    /// Apply the supplied fields and return the record as stored afterwards.
    async fn update(&self, id: ObjectId, changes: &R::Update) -> Result<Option<R>, AppError>;

    /// Remove the record and return what was removed.
    async fn delete(&self, id: ObjectId) -> Result<Option<R>, AppError>;
}

pub type SharedStore<R> = Arc<dyn RecordStore<R>>;

pub struct MongoStore<R: Record> {
    collection: Collection<R>,
}

impl<R: Record> MongoStore<R> {
    pub fn new(db: &ClinicDb) -> Self {
        Self {
            collection: db.collection::<R>(),
        }
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MongoStore<R> {
    async fn insert(&self, record: &R) -> Result<(), AppError> {
        self.collection.insert_one(record, None).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<R>, AppError> {
        let cursor = self.collection.find(None, None).await?;
        let records: Vec<R> = cursor.try_collect().await?;
        Ok(records)
    }

    async fn update(&self, id: ObjectId, changes: &R::Update) -> Result<Option<R>, AppError> {
        let changes = bson::to_document(changes).map_err(anyhow::Error::from)?;
        let filter = doc! { "_id": id };

        // `$set` rejects an empty document
        if changes.is_empty() {
            return Ok(self.collection.find_one(filter, None).await?);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let record = self
            .collection
            .find_one_and_update(filter, doc! { "$set": changes }, options)
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<R>, AppError> {
        let record = self
            .collection
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?;
        Ok(record)
    }
}
