//! Stateless authentication gate for the DevEvents service.
//!
//! [`TokenService`] issues HS256-signed bearer tokens that embed the caller's
//! subject and expire one hour after issuance, and validates them on every
//! protected request. There is no server-side session state.
//!
//! # Modules
//!
//! - [`config`] -- Signing secret, issuer, audience
//! - [`token`] -- Issue and validate
//! - [`error`] -- [`AuthError`]

pub mod config;
pub mod error;
pub mod token;

pub use config::{MIN_SECRET_BYTES, TokenConfig};
pub use error::AuthError;
pub use token::{Claims, IssuedToken, TOKEN_LIFETIME_SECS, TokenService};
