//! HTTP API Layer
//!
//! This crate provides the REST API for the motor insurance system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for cars, claims and health
//! - **Middleware**: Tracing and request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(store, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_motor::{HistoryMerger, RecordStorePort, ValidityEvaluator};

use crate::config::ApiConfig;
use crate::middleware::request_logging_middleware;
use crate::handlers::{cars, claims, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStorePort>,
    pub evaluator: ValidityEvaluator,
    pub merger: HistoryMerger,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStorePort>, config: ApiConfig) -> Self {
        Self {
            evaluator: ValidityEvaluator::new(store.clone()),
            merger: HistoryMerger::new(store.clone()),
            store,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - Record store backing every endpoint
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<dyn RecordStorePort>, config: ApiConfig) -> Router {
    let state = AppState::new(store, config);

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let car_routes = Router::new()
        .route("/", get(cars::list_cars))
        .route("/:car_id/insurance-valid", get(cars::insurance_valid))
        .route("/:car_id/history", get(cars::car_history))
        .route("/:car_id/claims", post(claims::create_claim))
        .route("/:car_id/claims/:claim_id", get(claims::get_claim));

    let api_routes = Router::new()
        .nest("/cars", car_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
