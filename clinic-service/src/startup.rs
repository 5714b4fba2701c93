//! Application startup and lifecycle management.
//!
//! Builds the record stores for the configured backend, wires the `/api`
//! routes and the operational endpoints, and runs the HTTP server.

use axum::{
    extract::FromRef,
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, request_id::request_id_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::{ClinicConfig, StoreBackend};
use crate::handlers::{
    health::{health_check, metrics_endpoint, readiness_check},
    records::{create_record, delete_record, list_records, update_record},
};
use crate::models::{Appointment, Doctor, Patient, Record};
use crate::services::{ClinicDb, MemoryStore, MongoStore, SharedStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ClinicConfig,
    /// Present for the `mongo` backend only.
    pub db: Option<ClinicDb>,
    pub appointments: SharedStore<Appointment>,
    pub doctors: SharedStore<Doctor>,
    pub patients: SharedStore<Patient>,
}

impl AppState {
    /// Build the three stores for the configured backend.
    pub async fn initialize(config: ClinicConfig) -> Result<Self, AppError> {
        match config.store {
            StoreBackend::Mongo => {
                let uri = config.mongodb.uri.as_ref().ok_or_else(|| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "MONGODB_URI is required for the mongo store backend"
                    ))
                })?;
                let db = ClinicDb::connect(uri, &config.mongodb.database).await?;

                tracing::info!("Using MongoDB record stores");
                Ok(Self {
                    appointments: Arc::new(MongoStore::<Appointment>::new(&db)),
                    doctors: Arc::new(MongoStore::<Doctor>::new(&db)),
                    patients: Arc::new(MongoStore::<Patient>::new(&db)),
                    db: Some(db),
                    config,
                })
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory record stores; data is lost on restart");
                Ok(Self {
                    appointments: Arc::new(MemoryStore::<Appointment>::new()),
                    doctors: Arc::new(MemoryStore::<Doctor>::new()),
                    patients: Arc::new(MemoryStore::<Patient>::new()),
                    db: None,
                    config,
                })
            }
        }
    }

    /// Ping the database; the in-memory backend is always reachable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        match &self.db {
            Some(db) => db.health_check().await,
            None => Ok(()),
        }
    }
}

impl FromRef<AppState> for SharedStore<Appointment> {
    fn from_ref(state: &AppState) -> Self {
        state.appointments.clone()
    }
}

impl FromRef<AppState> for SharedStore<Doctor> {
    fn from_ref(state: &AppState) -> Self {
        state.doctors.clone()
    }
}

impl FromRef<AppState> for SharedStore<Patient> {
    fn from_ref(state: &AppState) -> Self {
        state.patients.clone()
    }
}

/// create + list on the collection root, update + delete by id.
fn record_routes<R: Record>() -> Router<AppState>
where
    SharedStore<R>: FromRef<AppState>,
{
    Router::new()
        .route("/", post(create_record::<R>).get(list_records::<R>))
        .route("/:id", put(update_record::<R>).delete(delete_record::<R>))
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/appointments", record_routes::<Appointment>())
        .nest("/doctors", record_routes::<Doctor>())
        .nest("/patients", record_routes::<Patient>());

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .nest("/api", api)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(from_fn(request_id_middleware))
        // Cross-origin access is open to every origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ClinicConfig) -> Result<Self, AppError> {
        let addr = config.common.socket_addr();
        let state = AppState::initialize(config).await?;

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Clinic service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database, if the mongo backend is in use.
    pub fn db(&self) -> Option<&ClinicDb> {
        self.state.db.as_ref()
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use service_core::config::Config as CoreConfig;
    use std::net::Ipv4Addr;
    use tower::ServiceExt;

    use crate::config::MongoConfig;

    async fn memory_router() -> Router {
        let config = ClinicConfig {
            common: CoreConfig {
                host: Ipv4Addr::LOCALHOST.into(),
                port: 0,
            },
            mongodb: MongoConfig {
                uri: None,
                database: "unused".to_string(),
            },
            store: StoreBackend::Memory,
        };
        build_router(AppState::initialize(config).await.unwrap())
    }

    #[tokio::test]
    async fn test_mongo_backend_requires_uri() {
        let config = ClinicConfig {
            common: CoreConfig {
                host: Ipv4Addr::LOCALHOST.into(),
                port: 0,
            },
            mongodb: MongoConfig {
                uri: None,
                database: "clinic_db".to_string(),
            },
            store: StoreBackend::Mongo,
        };

        let err = AppState::initialize(config).await.err().unwrap();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_collection_root_lists_empty_array() {
        for path in ["/api/appointments", "/api/doctors", "/api/patients"] {
            let response = memory_router()
                .await
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", path);

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(&bytes[..], b"[]", "{}", path);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = memory_router()
            .await
            .oneshot(
                Request::builder()
                    .uri("/api/nurses")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let response = memory_router()
            .await
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/patients")
                    .header(header::ORIGIN, "https://frontend.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
