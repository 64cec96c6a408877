//! Password hashing and access-token issuance.
//!
//! Passwords are stored as `salt$digest` where the digest is a SHA-256 of
//! the hex salt concatenated with the password. Tokens are HS256 JWTs
//! carrying the subject email, user id, and role.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::store::{Role, User};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Claims embedded in every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email
    pub sub: String,
    pub user_id: u64,
    pub role: Role,
    /// Expiry, seconds since the epoch
    pub exp: u64,
}

/// Authenticated identity attached to requests by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.sub,
            role: claims.role,
        }
    }
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt_hex = to_hex(&salt);
    format!("{salt_hex}${}", digest(&salt_hex, password))
}

/// Check a password against a stored `salt$digest` value.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, expected)) = stored.split_once('$') else {
        return false;
    };
    digest(salt_hex, password) == expected
}

fn digest(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Issue an access token for a user.
pub fn create_token(config: &ServerConfig, user: &User) -> ServerResult<String> {
    let expires_at = chrono::Utc::now() + config.token_expiry();
    let claims = Claims {
        sub: user.email.clone(),
        user_id: user.id,
        role: user.role,
        exp: expires_at.timestamp() as u64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| ServerError::Internal(format!("token signing failed: {e}")))
}

/// Validate a token and return its claims. Expired or tampered tokens fail.
pub fn decode_token(config: &ServerConfig, token: &str) -> ServerResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| ServerError::Authentication(format!("invalid token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: 7,
            email: "reader@example.com".into(),
            password_hash: String::new(),
            full_name: None,
            role: Role::Student,
            created_at: Utc::now(),
        }
    }

    fn test_config() -> ServerConfig {
        ServerConfig {
            jwt_secret: "test-secret".into(),
            ..Default::default()
        }
    }

    #[test]
    fn password_round_trip() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn same_password_hashes_differently() {
        assert_ne!(hash_password("hunter2"), hash_password("hunter2"));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "no-dollar-sign"));
    }

    #[test]
    fn token_round_trip() {
        let config = test_config();
        let token = create_token(&config, &test_user()).unwrap();
        let claims = decode_token(&config, &token).unwrap();
        assert_eq!(claims.sub, "reader@example.com");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.role, Role::Student);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let token = create_token(&config, &test_user()).unwrap();

        let other = ServerConfig {
            jwt_secret: "different-secret".into(),
            ..Default::default()
        };
        assert!(decode_token(&other, &token).is_err());
    }
}
