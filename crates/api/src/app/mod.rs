//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder structure:
//! - `services.rs`: service wiring (claim reader, evaluator, user service)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

const DEFAULT_OWNERSHIP_TIMEOUT_MS: u64 = 2_000;

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub ownership_check_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let ownership_check_timeout = std::env::var("OWNERSHIP_CHECK_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_OWNERSHIP_TIMEOUT_MS));

        Self {
            jwt_secret,
            ownership_check_timeout,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(services::build_services(&config));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/v1/user", routes::users::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
