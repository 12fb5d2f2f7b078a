use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Claims carried inside a session token.
///
/// Clients never parse these; the token is opaque outside this module.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims valid from now for `expiry_hours`
    pub fn new(subject: impl Into<String>, expiry_hours: u64) -> Result<Self, AuthError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::TokenGeneration(format!("expiry of {} hours is out of range", expiry_hours)))?;

        Ok(Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("invalid JWT secret")]
    InvalidSecret,
}

/// Check a submitted pair against the configured dashboard credential
pub fn check_credentials(security: &SecurityConfig, email: &str, password: &str) -> Result<(), AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    // An unset configured password disables login entirely.
    if security.admin_password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }

    let email_ok = email.eq_ignore_ascii_case(security.admin_email.trim());
    let password_ok = digest(password) == digest(&security.admin_password);

    if email_ok && password_ok {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

/// Validate a credential pair and issue a session token for it
pub fn login(security: &SecurityConfig, email: &str, password: &str) -> Result<String, AuthError> {
    check_credentials(security, email, password)?;
    let claims = Claims::new(email.trim(), security.jwt_expiry_hours)?;
    generate_token(security, claims)
}

pub fn generate_token(security: &SecurityConfig, claims: Claims) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry; used only when token verification is enabled
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidCredentials)
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
