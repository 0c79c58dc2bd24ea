//! Axum router construction for the DevEvents API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /health` -- liveness probe
/// - `GET /api/dev-events` -- list events (public)
/// - `GET /api/dev-events/{id}` -- single event (public)
/// - `POST /api/dev-events` -- create event (bearer)
/// - `PUT /api/dev-events/{id}` -- update event (bearer)
/// - `DELETE /api/dev-events/{id}` -- delete event (bearer)
/// - `POST /api/dev-events/{id}/speakers` -- add speaker (bearer)
/// - `POST /api/auth/login` -- issue a token (public)
/// - `GET /api/auth/logged` -- check a token (bearer)
///
/// CORS allows any origin; browsers send the token in the `Authorization`
/// header, never in cookies.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // Events
        .route(
            "/api/dev-events",
            get(handlers::list_events).post(handlers::create_event),
        )
        .route(
            "/api/dev-events/{id}",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        .route("/api/dev-events/{id}/speakers", post(handlers::add_speaker))
        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logged", get(auth::logged))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
