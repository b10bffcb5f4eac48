//! Bearer token authentication for link owners.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;

/// Claims carried by an owner token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub exp: i64,
}

/// Verified identity of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerId(pub i64);

/// Service for issuing and verifying HS256 owner tokens.
///
/// The identity inside a valid token is trusted as-is; there is no user table
/// lookup.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates a service keyed by the shared `JWT_SECRET`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Verifies a raw bearer token and returns the owner it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the signature is wrong, the token is
    /// malformed or it has expired.
    pub fn authenticate(&self, token: &str) -> Result<OwnerId, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid or expired token" }))
        })?;

        Ok(OwnerId(data.claims.user_id))
    }

    /// Issues a token for `user_id` valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user_id: i64, ttl: Duration) -> Result<String, AppError> {
        let claims = Claims {
            user_id,
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to sign token", json!({ "reason": e.to_string() }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secret() -> &'static str {
        "test-signing-secret"
    }

    #[test]
    fn test_issue_then_authenticate() {
        let service = AuthService::new(test_secret());

        let token = service.issue(42, Duration::hours(1)).unwrap();

        assert_eq!(service.authenticate(&token).unwrap(), OwnerId(42));
    }

    #[test]
    fn test_authenticate_rejects_garbage() {
        let service = AuthService::new(test_secret());

        let err = service.authenticate("not-a-token").unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_authenticate_rejects_other_secret() {
        let issuer = AuthService::new("secret-a");
        let verifier = AuthService::new("secret-b");

        let token = issuer.issue(1, Duration::hours(1)).unwrap();

        assert!(verifier.authenticate(&token).is_err());
    }

    #[test]
    fn test_authenticate_rejects_expired_token() {
        let service = AuthService::new(test_secret());

        let token = service.issue(1, Duration::hours(-2)).unwrap();

        assert!(matches!(
            service.authenticate(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_claims_use_user_id_key() {
        let claims = Claims { user_id: 5, exp: 0 };
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["userId"], 5);
    }
}
