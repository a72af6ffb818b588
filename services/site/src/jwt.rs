//! JWT service for session token generation and validation
//!
//! Session tokens are HS256-signed and carry the user id, email, and an
//! issued-at/expires-at pair. They are stateless: nothing is stored
//! server-side, so a token stays valid until it expires or the signing
//! secret changes.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: u64,
    /// User email at issuance time
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `token_ttl` - token lifetime in seconds
    pub fn new(secret: &str, token_ttl: u64) -> Result<Self> {
        if secret.is_empty() {
            anyhow::bail!("JWT secret must not be empty");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl,
        })
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user_id: u64, email: &str) -> Result<String> {
        let now = unix_now()?;

        let claims = Claims {
            id: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.token_ttl,
        };

        self.sign(&claims)
    }

    /// Sign an explicit set of claims
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return its claims
    ///
    /// Malformed, tampered, and expired tokens all yield `None`.
    pub fn verify_token(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => Some(token_data.claims),
            Err(e) => {
                debug!("Rejected session token: {}", e);
                None
            }
        }
    }

    /// Get the token lifetime in seconds
    pub fn token_ttl(&self) -> u64 {
        self.token_ttl
    }
}

/// Current Unix time in seconds
pub fn unix_now() -> Result<u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
        .as_secs();
    Ok(now)
}
