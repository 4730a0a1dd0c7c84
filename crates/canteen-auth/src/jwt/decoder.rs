//! Access token validation.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use canteen_core::config::AuthConfig;
use canteen_core::error::AppError;
use canteen_core::traits::Clock;

use crate::identity::Identity;

use super::claims::Claims;

/// Validates access tokens.
///
/// Only HS256 is accepted. Expiry is checked against the injected clock
/// rather than the library's wall-clock check.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Tolerated clock skew in seconds.
    leeway_seconds: i64,
    /// Source of the current time.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        if config.signing_key.is_empty() {
            return Err(AppError::configuration("Access token signing key is not set"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.signing_key.as_bytes()),
            validation,
            leeway_seconds: config.leeway()?.num_seconds(),
            clock,
        })
    }

    /// Validates a token and returns the identity it carries.
    pub fn validate(&self, token: &str) -> Result<Identity, AppError> {
        self.decode_claims(token).map(|claims| claims.identity())
    }

    /// Validates a token and returns its full claims.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    JwtErrorKind::InvalidSignature => {
                        AppError::token_invalid("Invalid token signature")
                    }
                    JwtErrorKind::InvalidAlgorithm => {
                        AppError::token_invalid("Unexpected token algorithm")
                    }
                    JwtErrorKind::InvalidToken => AppError::token_invalid("Invalid token format"),
                    _ => AppError::token_invalid(format!("Token validation failed: {e}")),
                }
            })?;

        let claims = token_data.claims;
        if !claims.is_live_at(self.clock.now(), self.leeway_seconds) {
            return Err(AppError::token_expired("Token has expired"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use canteen_core::error::ErrorKind;
    use canteen_core::traits::ManualClock;
    use chrono::{DateTime, Duration};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            signing_key: "test-signing-key".to_string(),
            ..AuthConfig::default()
        }
    }

    fn setup() -> (JwtEncoder, JwtDecoder, Arc<ManualClock>) {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let encoder = JwtEncoder::new(&config(), clock.clone()).unwrap();
        let decoder = JwtDecoder::new(&config(), clock.clone()).unwrap();
        (encoder, decoder, clock)
    }

    #[test]
    fn test_issue_then_validate() {
        let (encoder, decoder, _) = setup();

        let (token, _) = encoder.issue(42, 3).unwrap();
        let identity = decoder.validate(&token).unwrap();

        assert_eq!(identity, Identity { user_id: 42, role_id: 3 });
    }

    #[test]
    fn test_expiry_boundary() {
        let (encoder, decoder, clock) = setup();
        let issued_at = clock.now();

        let (token, expires_at) = encoder.issue(1, 1).unwrap();
        assert_eq!(expires_at, issued_at + Duration::seconds(120));

        clock.set(expires_at - Duration::seconds(1));
        assert!(decoder.validate(&token).is_ok());

        clock.set(expires_at);
        let err = decoder.validate(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);

        clock.set(expires_at + Duration::seconds(1));
        let err = decoder.validate(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[test]
    fn test_leeway_extends_validity() {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let lenient = AuthConfig {
            leeway_seconds: 5,
            ..config()
        };
        let encoder = JwtEncoder::new(&lenient, clock.clone()).unwrap();
        let decoder = JwtDecoder::new(&lenient, clock.clone()).unwrap();

        let (token, expires_at) = encoder.issue(1, 1).unwrap();
        clock.set(expires_at + Duration::seconds(4));
        assert!(decoder.validate(&token).is_ok());

        clock.set(expires_at + Duration::seconds(5));
        assert!(decoder.validate(&token).is_err());
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let (_, decoder, clock) = setup();
        let claims = Claims {
            user_id: 1,
            user_role_id: 1,
            iat: clock.now().timestamp(),
            exp: clock.now().timestamp() + 60,
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-signing-key"),
        )
        .unwrap();

        let err = decoder.validate(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[test]
    fn test_wrong_key_rejected() {
        let (_, decoder, clock) = setup();
        let other = AuthConfig {
            signing_key: "another-key".to_string(),
            ..AuthConfig::default()
        };
        let (token, _) = JwtEncoder::new(&other, clock).unwrap().issue(1, 1).unwrap();

        let err = decoder.validate(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[test]
    fn test_garbage_rejected() {
        let (_, decoder, _) = setup();

        for token in ["", "abc", "a.b.c"] {
            let err = decoder.validate(token).unwrap_err();
            assert_eq!(err.kind, ErrorKind::TokenInvalid);
        }
    }

    #[test]
    fn test_empty_signing_key_is_configuration_error() {
        let clock = Arc::new(ManualClock::default());
        let err = JwtEncoder::new(&AuthConfig::default(), clock).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
