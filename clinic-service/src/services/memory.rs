use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::models::Record;

/// Insertion-ordered store kept in process memory.
///
/// Used when `STORE_BACKEND=memory` and by the HTTP test suite. Updates go
/// through [`Record::apply`] on a copy, so a rejected change leaves the stored
/// record as it was.
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn insert(&self, record: &R) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: {}",
                record.id()
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<R>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn update(&self, id: ObjectId, changes: &R::Update) -> Result<Option<R>, AppError> {
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };

        let mut updated = slot.clone();
        updated.apply(changes)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<R>, AppError> {
        let mut records = self.records.write().await;
        let removed = records
            .iter()
            .position(|r| r.id() == id)
            .map(|index| records.remove(index));
        Ok(removed)
    }
}
