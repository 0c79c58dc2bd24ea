//! HTTP API for the DevEvents service.
//!
//! This crate provides an Axum router exposing the event resource under
//! `/api/dev-events`, bearer token login under `/api/auth`, and a `/health`
//! probe. Reads are public; every write requires a valid bearer token.
//!
//! # Architecture
//!
//! Handlers are thin: they parse the path and body, call the
//! [`EventService`](devevents_core::EventService) held in [`AppState`], and
//! map [`ServiceError`](devevents_core::ServiceError) into [`ApiError`].
//! Token checks happen in the [`Authenticated`] extractor.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use auth::{Authenticated, LoggedResponse, LoginRequest, LoginResponse};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
