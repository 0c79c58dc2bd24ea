//! Shared application state for the API server.

use devevents_auth::TokenService;
use devevents_core::EventService;

/// Handles every request needs: the event use cases and the token gate.
///
/// Built once at startup and shared behind an `Arc`; nothing in it changes
/// per request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event aggregate service.
    pub events: EventService,
    /// Bearer token issuer and validator.
    pub tokens: TokenService,
}

impl AppState {
    /// Bundle the services.
    pub const fn new(events: EventService, tokens: TokenService) -> Self {
        Self { events, tokens }
    }
}
