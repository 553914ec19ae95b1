use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Build the REST router for the appointments module.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/events",
            get(handlers::list_events).post(handlers::create_event),
        )
        .route("/events/propose", post(handlers::propose_event))
        .route(
            "/events/{id}",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        .route("/healthz", get(handlers::health))
        .route("/api-docs/openapi.json", get(handlers::openapi_doc))
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
