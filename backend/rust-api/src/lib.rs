// Library root - exports for the server binary, tools and tests

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use handlers::*;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use middleware::RateLimiter;
use services::EventStore;

/// Shared request state. Built once at startup; the store handle is the only owner of
/// the events file.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EventStore>,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(EventStore::new(config.data_dir.clone()));
        let rate_limiter = RateLimiter::new(config.rate_limit_requests, config.rate_limit_window_secs);
        Self {
            store,
            config: Arc::new(config),
            rate_limiter,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let purchase_routes = Router::new()
        .route("/api/tickets/purchase", post(handlers::purchase_tickets))
        .route_layer(from_fn_with_state(
            state.rate_limiter.clone(),
            middleware::rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/events/create", post(handlers::create_event))
        .route("/api/events/list", get(handlers::list_events))
        .route(
            "/api/events/:id",
            get(handlers::get_event).patch(handlers::update_event),
        )
        .route("/api/credentials/perks", post(handlers::get_perks))
        .route("/api/fraud/analyze", post(handlers::analyze_fraud))
        .merge(purchase_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(from_fn(middleware::security_headers_middleware)),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
