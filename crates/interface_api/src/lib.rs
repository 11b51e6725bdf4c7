//! HTTP API Layer
//!
//! This crate exposes the restatement and tariff engines over a small,
//! stateless JSON API using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each engine
//! - **Middleware**: Request ids and request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent `{error, message}` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::config::ApiConfig;
use crate::middleware::request_logging;
use crate::handlers::{health, restatement, tariff};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(config: ApiConfig) -> Router {
    let state = AppState { config };

    let public_routes = Router::new().route("/health", get(health::health_check));

    let restatement_routes = Router::new()
        .route("/", post(restatement::restate_ledger))
        .route("/aggregate", post(restatement::restate_aggregate));

    let tariff_routes = Router::new()
        .route("/evaluate", post(tariff::evaluate_tariff))
        .route("/regions", get(tariff::list_regions))
        .route("/regions/:region", get(tariff::get_region));

    let api_routes = Router::new()
        .nest("/restatements", restatement_routes)
        .nest("/tariffs", tariff_routes)
        .layer(axum_middleware::from_fn(request_logging));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
