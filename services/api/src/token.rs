//! services/api/src/token.rs
//!
//! Issues and verifies the signed, time-limited credentials carried in the
//! auth cookie. Tokens are stateless HS256 JWTs: verification depends only on
//! the token, the server secret and the clock.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 5;

/// Claim keys managed by the service itself.
const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("Invalid token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
}

/// The identity payload a token is issued for.
///
/// Any JSON object is accepted as is. `email` is the only key the service
/// reads, and only when it holds a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityClaim {
    pub fields: Map<String, Value>,
}

impl IdentityClaim {
    pub fn for_email(email: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("email".to_string(), Value::String(email.into()));
        Self { fields }
    }

    pub fn email(&self) -> Option<&str> {
        self.fields.get("email").and_then(Value::as_str)
    }
}

#[derive(Serialize, Deserialize)]
struct SignedClaims {
    #[serde(flatten)]
    identity: IdentityClaim,
    iat: i64,
    exp: i64,
}

/// Signs and verifies identity tokens with a server-held secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Creates a service issuing tokens valid for [`TOKEN_TTL_HOURS`].
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        // Identity payloads are free-form, an `aud` key in one is not an audience.
        let mut validation = Validation::default();
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, mut claim: IdentityClaim) -> Result<String, TokenError> {
        for key in RESERVED_CLAIMS {
            claim.fields.remove(key);
        }

        let now = Utc::now();
        let claims = SignedClaims {
            identity: claim,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Checks signature, structure and expiry, yielding the original claim.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        let data = decode::<SignedClaims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::InvalidToken)?;
        Ok(data.claims.identity)
    }
}
