//! HS256 bearer token issuance and validation.
//!
//! Tokens are self-contained: the service keeps no session table and no
//! revocation list. Everything needed to accept or reject a token travels in
//! its signed claims.

use chrono::{DateTime, Duration, SubsecRound, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TokenConfig;
use crate::error::AuthError;

/// Lifetime of an issued token, in seconds. Fixed at issuance, not sliding.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Registered claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity the token was issued for.
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// The compact JWS string to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// Subject the token was issued for.
    pub subject: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates signed bearer tokens.
///
/// Cheap to clone; keys are derived once from the [`TokenConfig`].
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl core::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build the service from its configuration.
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer()]);
        validation.set_audience(&[config.audience()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        // Expiry is checked in `validate_at` against the caller's clock.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// The configuration this service was built from.
    pub const fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Issue a token for `subject`, expiring one hour from now.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        if subject.is_empty() {
            return Err(AuthError::Issue(String::from("subject must not be empty")));
        }

        // Claims carry whole seconds; report the expiry the token actually has.
        let now = now.trunc_subsecs(0);
        let expires_at = now
            .checked_add_signed(Duration::seconds(TOKEN_LIFETIME_SECS))
            .ok_or_else(|| AuthError::Issue(String::from("expiry out of range")))?;

        let claims = Claims {
            sub: subject.to_owned(),
            iss: self.config.issuer().to_owned(),
            aud: self.config.audience().to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Issue(e.to_string()))?;

        debug!(subject, %expires_at, "issued bearer token");

        Ok(IssuedToken {
            token,
            subject: claims.sub,
            expires_at,
        })
    }

    /// Validate a token against the current time.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    ///
    /// Checks signature, issuer, audience, and expiry. The token stays valid
    /// up to and including the instant `exp` (plus leeway) and is rejected
    /// at any later instant, sub-second included. Every failure maps to
    /// [`AuthError::Unauthenticated`].
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(reason = %e, "bearer token rejected");
                AuthError::Unauthenticated
            })?;
        let claims = data.claims;

        let expires_at = claims.expires_at().ok_or_else(|| {
            debug!(exp = claims.exp, "bearer token expiry out of range");
            AuthError::Unauthenticated
        })?;
        let leeway = i64::try_from(self.config.leeway_secs())
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        let deadline = expires_at
            .checked_add_signed(leeway)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if now > deadline {
            debug!(subject = claims.sub, %expires_at, "bearer token expired");
            return Err(AuthError::Unauthenticated);
        }

        if claims.sub.is_empty() {
            debug!("bearer token has an empty subject");
            return Err(AuthError::Unauthenticated);
        }

        Ok(claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-secret-0123456789abcdef";
    const SUBJECT: &str = "alice@example.com";

    fn service() -> TokenService {
        TokenService::new(TokenConfig::new(SECRET, "devevents", "devevents-clients").unwrap())
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn token_validates_before_expiry() {
        let tokens = service();
        let issued = tokens.issue_at(SUBJECT, issued_at()).unwrap();

        let claims = tokens
            .validate_at(&issued.token, issued_at() + Duration::minutes(59))
            .unwrap();
        assert_eq!(claims.sub, SUBJECT);
        assert_eq!(claims.iss, "devevents");
        assert_eq!(claims.aud, "devevents-clients");
    }

    #[test]
    fn token_expires_one_hour_after_issue() {
        let tokens = service();
        let issued = tokens.issue_at(SUBJECT, issued_at()).unwrap();
        assert_eq!(issued.expires_at, issued_at() + Duration::hours(1));

        // Valid at the expiry instant itself, rejected strictly after.
        assert!(tokens.validate_at(&issued.token, issued.expires_at).is_ok());
        let result = tokens.validate_at(&issued.token, issued.expires_at + Duration::seconds(1));
        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }

    #[test]
    fn token_is_rejected_within_the_second_after_expiry() {
        let tokens = service();
        let issued = tokens.issue_at(SUBJECT, issued_at()).unwrap();

        let just_before = issued.expires_at - Duration::milliseconds(1);
        assert!(tokens.validate_at(&issued.token, just_before).is_ok());

        for late in [1, 900] {
            let result =
                tokens.validate_at(&issued.token, issued.expires_at + Duration::milliseconds(late));
            assert!(matches!(result, Err(AuthError::Unauthenticated)), "accepted {late}ms late");
        }
    }

    #[test]
    fn leeway_is_measured_to_the_instant() {
        let config = TokenConfig::new(SECRET, "devevents", "devevents-clients")
            .unwrap()
            .with_leeway_secs(60);
        let tokens = TokenService::new(config);
        let issued = tokens.issue_at(SUBJECT, issued_at()).unwrap();

        let past_leeway = issued.expires_at + Duration::seconds(60) + Duration::milliseconds(500);
        assert!(tokens.validate_at(&issued.token, past_leeway).is_err());
    }

    #[test]
    fn leeway_extends_acceptance_window() {
        let config = TokenConfig::new(SECRET, "devevents", "devevents-clients")
            .unwrap()
            .with_leeway_secs(60);
        let tokens = TokenService::new(config);
        let issued = tokens.issue_at(SUBJECT, issued_at()).unwrap();

        assert!(tokens
            .validate_at(&issued.token, issued.expires_at + Duration::seconds(60))
            .is_ok());
        assert!(tokens
            .validate_at(&issued.token, issued.expires_at + Duration::seconds(61))
            .is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new(
            TokenConfig::new("ffffffffffffffffffffffffffffffffffff", "devevents", "devevents-clients")
                .unwrap(),
        );
        let issued = other.issue_at(SUBJECT, issued_at()).unwrap();
        let result = service().validate_at(&issued.token, issued_at());
        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }

    #[test]
    fn issuer_mismatch_is_rejected() {
        let other = TokenService::new(TokenConfig::new(SECRET, "someone-else", "devevents-clients").unwrap());
        let issued = other.issue_at(SUBJECT, issued_at()).unwrap();
        assert!(matches!(
            service().validate_at(&issued.token, issued_at()),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn audience_mismatch_is_rejected() {
        let other = TokenService::new(TokenConfig::new(SECRET, "devevents", "other-clients").unwrap());
        let issued = other.issue_at(SUBJECT, issued_at()).unwrap();
        assert!(matches!(
            service().validate_at(&issued.token, issued_at()),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let tokens = service();
        for garbage in ["", "not-a-jwt", "a.b.c", "Bearer abc.def.ghi"] {
            assert!(matches!(
                tokens.validate_at(garbage, issued_at()),
                Err(AuthError::Unauthenticated)
            ));
        }
    }

    #[test]
    fn spliced_payload_fails_signature_check() {
        let tokens = service();
        let alice = tokens.issue_at(SUBJECT, issued_at()).unwrap().token;
        let mallory = tokens.issue_at("mallory@example.com", issued_at()).unwrap().token;

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let mallory_parts: Vec<&str> = mallory.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            alice_parts.first().unwrap(),
            mallory_parts.get(1).unwrap(),
            alice_parts.get(2).unwrap()
        );

        assert!(matches!(
            tokens.validate_at(&forged, issued_at()),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn empty_subject_cannot_be_issued() {
        assert!(matches!(
            service().issue_at("", issued_at()),
            Err(AuthError::Issue(_))
        ));
    }

    #[test]
    fn wall_clock_issue_validates_now() {
        let tokens = service();
        let issued = tokens.issue(SUBJECT).unwrap();
        let claims = tokens.validate(&issued.token).unwrap();
        assert_eq!(claims.expires_at(), Some(issued.expires_at));
    }
}
