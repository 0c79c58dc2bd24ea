//! Token service configuration.
//!
//! Built once at process start and moved into the [`TokenService`]; it is
//! never re-read per request.
//!
//! [`TokenService`]: crate::TokenService

use crate::error::AuthError;

/// Minimum accepted length of the HMAC signing secret, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Signing secret plus the issuer and audience every token must carry.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    issuer: String,
    audience: String,
    leeway_secs: u64,
}

impl TokenConfig {
    /// Build a configuration, rejecting secrets shorter than
    /// [`MIN_SECRET_BYTES`] and empty issuer/audience values.
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let secret = secret.into();
        let issuer = issuer.into();
        let audience = audience.into();

        if secret.len() < MIN_SECRET_BYTES {
            return Err(AuthError::Config(format!(
                "signing secret must be at least {MIN_SECRET_BYTES} bytes, got {}",
                secret.len()
            )));
        }
        if issuer.is_empty() {
            return Err(AuthError::Config(String::from("issuer must not be empty")));
        }
        if audience.is_empty() {
            return Err(AuthError::Config(String::from("audience must not be empty")));
        }

        Ok(Self {
            secret,
            issuer,
            audience,
            leeway_secs: 0,
        })
    }

    /// Allow this many seconds of clock skew past `exp`.
    #[must_use]
    pub const fn with_leeway_secs(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// The expected `iss` claim.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// The expected `aud` claim.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Accepted clock skew in seconds.
    pub const fn leeway_secs(&self) -> u64 {
        self.leeway_secs
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl core::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}
