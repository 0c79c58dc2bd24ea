//! Error types for token issuance and validation.

/// Errors produced by the token service.
///
/// Validation failures deliberately collapse into a single
/// [`AuthError::Unauthenticated`] so callers cannot tell which check failed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The token is missing, malformed, forged, expired, or was issued for
    /// another issuer or audience.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Signing a new token failed.
    #[error("failed to issue token: {0}")]
    Issue(String),

    /// The token configuration is unusable.
    #[error("invalid token configuration: {0}")]
    Config(String),
}
