//! Bearer token authentication for inbound requests.

use std::sync::Arc;

use canteen_core::error::AppError;

use crate::identity::Identity;
use crate::jwt::JwtDecoder;

/// Authorization scheme accepted by the gate.
const BEARER_SCHEME: &str = "Bearer";

/// Authenticates requests from their `Authorization` header.
///
/// Validation is stateless: only the token signature and expiry are
/// checked, never the refresh session store.
#[derive(Debug, Clone)]
pub struct AuthGate {
    /// Access token validation.
    jwt_decoder: Arc<JwtDecoder>,
}

impl AuthGate {
    /// Creates a new gate.
    pub fn new(jwt_decoder: Arc<JwtDecoder>) -> Self {
        Self { jwt_decoder }
    }

    /// Authenticates a request given its raw `Authorization` header value.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Identity, AppError> {
        let token = parse_bearer(header)?;
        self.jwt_decoder.validate(token)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` value.
///
/// Fails when the header is absent, uses another scheme, has an empty
/// token, or carries extra parts.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AppError> {
    let value = header.ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AppError::unauthorized("Malformed authorization header")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use canteen_core::config::AuthConfig;
    use canteen_core::error::ErrorKind;
    use canteen_core::traits::ManualClock;
    use chrono::Duration;

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");

        for bad in [
            None,
            Some(""),
            Some("Bearer"),
            Some("Bearer "),
            Some("Basic abc"),
            Some("bearer abc"),
            Some("Bearer abc def"),
            Some("Bearer  abc"),
            Some("abc"),
        ] {
            let err = parse_bearer(bad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unauthorized, "{bad:?}");
        }
    }

    #[test]
    fn test_authenticate() {
        let config = AuthConfig {
            signing_key: "test-signing-key".to_string(),
            ..AuthConfig::default()
        };
        let clock = Arc::new(ManualClock::default());
        let encoder = JwtEncoder::new(&config, clock.clone()).unwrap();
        let gate = AuthGate::new(Arc::new(JwtDecoder::new(&config, clock.clone()).unwrap()));

        let (token, _) = encoder.issue(5, 2).unwrap();
        let header = format!("Bearer {token}");

        let identity = gate.authenticate(Some(&header)).unwrap();
        assert_eq!(identity, Identity { user_id: 5, role_id: 2 });

        clock.advance(Duration::seconds(121));
        let err = gate.authenticate(Some(&header)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }
}
