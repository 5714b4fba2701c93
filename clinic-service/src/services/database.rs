use mongodb::{bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database};
use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;

use crate::models::Record;

/// MongoDB handle built once at startup and cloned into each store.
#[derive(Clone)]
pub struct ClinicDb {
    client: MongoClient,
    db: Database,
}

impl ClinicDb {
    pub async fn connect(uri: &Secret<String>, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");

        let mut client_options = ClientOptions::parse(uri.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB connection string: {}", e);
                AppError::from(e)
            })?;
        client_options.app_name = Some("clinic-service".to_string());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);

        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn collection<R: Record>(&self) -> Collection<R> {
        self.db.collection(R::COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}
