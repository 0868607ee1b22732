use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::models::User;
use crate::error::{AppError, AuthError};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity placed into a token. The issuer adds `iat` and `exp`.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// HS256 signer/verifier holding the process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::ConfigError("auth.jwt_secret must not be empty".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(&self, subject: &TokenSubject, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id: subject.id,
            email: subject.email.clone(),
            role: subject.role.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Any signature, format or expiry failure maps to `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> TokenSubject {
        TokenSubject {
            id: 42,
            email: "coach@example.com".into(),
            role: "admin".into(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new("test_secret").unwrap();
        let token = issuer.issue(&subject(), Duration::hours(24)).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "coach@example.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new("test_secret").unwrap();
        let token = issuer.issue(&subject(), Duration::hours(-2)).unwrap();

        assert_eq!(issuer.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let issuer = TokenIssuer::new("test_secret").unwrap();
        let other = TokenIssuer::new("another_secret").unwrap();
        let token = other.issue(&subject(), Duration::hours(1)).unwrap();

        assert_eq!(issuer.verify(&token), Err(AuthError::InvalidToken));
        assert_eq!(issuer.verify("not.a.jwt"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(TokenIssuer::new(""), Err(AppError::ConfigError(_))));
    }
}
