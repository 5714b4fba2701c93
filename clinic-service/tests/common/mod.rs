//! Test helper module for clinic-service integration tests.
//!
//! Spawns the real application on a random port. The default backend is the
//! in-memory store so the suite runs without a database.

#![allow(dead_code)]

use clinic_service::config::{ClinicConfig, MongoConfig, StoreBackend};
use clinic_service::services::ClinicDb;
use clinic_service::startup::Application;
use reqwest::{Client, Response};
use secrecy::Secret;
use serde_json::Value;
use std::net::Ipv4Addr;
use service_core::config::Config as CoreConfig;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: Option<ClinicDb>,
    pub db_name: String,
    client: Client,
}

impl TestApp {
    /// Spawn against the in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(StoreBackend::Memory, None).await
    }

    /// Spawn against a real MongoDB (`TEST_MONGODB_URI`, default localhost).
    pub async fn spawn_with_mongo() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        Self::spawn_with(StoreBackend::Mongo, Some(Secret::new(uri))).await
    }

    async fn spawn_with(store: StoreBackend, uri: Option<Secret<String>>) -> Self {
        let db_name = format!("clinic_test_{}", Uuid::new_v4().simple());

        let config = ClinicConfig {
            common: CoreConfig {
                host: Ipv4Addr::LOCALHOST.into(),
                port: 0, // Random port for testing
            },
            mongodb: MongoConfig {
                uri,
                database: db_name.clone(),
            },
            store,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().cloned();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// GET a collection and return its JSON array.
    pub async fn list(&self, path: &str) -> Vec<Value> {
        let response = self.get(path).await;
        assert_eq!(response.status(), 200);
        response.json().await.expect("Failed to parse JSON")
    }

    /// POST a body that must be accepted and return the created record.
    pub async fn create(&self, path: &str, body: &Value) -> Value {
        let response = self.post(path, body).await;
        assert_eq!(response.status(), 201, "create {} failed", path);
        response.json().await.expect("Failed to parse JSON")
    }

    /// Drop the per-test database when running against MongoDB.
    pub async fn cleanup(&self) {
        if let Some(db) = &self.db {
            db.client()
                .database(&self.db_name)
                .drop(None)
                .await
                .expect("Failed to drop test database");
        }
    }
}

/// Collect the `details` messages of a 400 response.
pub async fn error_details(response: Response) -> Vec<String> {
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["details"]
        .as_array()
        .expect("Missing details")
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}
