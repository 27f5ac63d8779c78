use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,     // email de l'utilisateur
    pub iat: i64,
    pub exp: i64,        // expiration timestamp
}

/// Raisons pour lesquelles un token est refusé
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Clés de signature HS256
/// `previous` permet d'accepter encore les tokens signés avant une rotation du secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    previous: Option<DecodingKey>,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, previous_secret: Option<&str>, ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            previous: previous_secret.map(|s| DecodingKey::from_secret(s.as_bytes())),
            ttl: Duration::days(ttl_days),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_previous_secret.as_deref(),
            config.token_ttl_days,
        )
    }

    /// Génère un JWT token pour un utilisateur
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Génère un token comme s'il avait été émis à `issued_at`
    pub fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Vérifie et décode un JWT token (signature + expiration, sans tolérance)
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        match decode_with(token, &self.decoding) {
            Err(TokenError::InvalidSignature) => match &self.previous {
                Some(previous) => decode_with(token, previous),
                None => Err(TokenError::InvalidSignature),
            },
            other => other,
        }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

fn decode_with(token: &str, key: &DecodingKey) -> Result<Claims, TokenError> {
    decode::<Claims>(token, key, &validation())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })
}
